//! Placeholder substitution in geometry files

use crate::GeometryFile;
use applicant::FieldValues;

/// Replace each field's placeholder token with its resolved value
///
/// Tokens with no resolved value keep their literal text. Returns the number
/// of fields whose text was replaced.
pub fn substitute_values(geometry: &mut GeometryFile, values: &FieldValues) -> usize {
    let mut replaced = 0;
    for entry in geometry
        .form_fields
        .iter_mut()
        .filter_map(|field| field.entry_text.as_mut())
    {
        if let Some(value) = values.get(&entry.text) {
            entry.text = value.to_string();
            replaced += 1;
        }
    }
    replaced
}
