//! Form generation pipeline
//!
//! Each form goes through redact → resolve → substitute → overlay →
//! serialize on one in-memory document. Forms run one after another and the
//! first failure aborts the batch.

use crate::config::Settings;
use crate::error::ServerError;
use crate::forms::FormDefinition;
use applicant::{resolve, FieldValues, FormData, PlaceholderKind, TEMPLATE_PLACEHOLDERS};
use chrono::NaiveDate;
use pdf_core::{PdfDocument, RedactPattern};
use template::{load_geometry, substitute_values, OverlayRenderer, TemplateError};
use tracing::{debug, info};

/// A filled form ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPdf {
    pub form_id: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Redaction patterns for the placeholders printed on the templates
pub fn redact_patterns() -> Vec<RedactPattern> {
    TEMPLATE_PLACEHOLDERS
        .iter()
        .map(|placeholder| match placeholder.kind {
            PlaceholderKind::Braced => RedactPattern::anywhere(placeholder.text),
            PlaceholderKind::Bare => RedactPattern::whole_word(placeholder.text),
        })
        .collect()
}

/// Fill one form with resolved values
pub fn fill_form(form: &FormDefinition, values: &FieldValues) -> Result<Vec<u8>, TemplateError> {
    let mut doc = PdfDocument::open(&form.template)?;

    let removed = doc.redact(&redact_patterns())?;
    debug!(form = %form.id, removed, "placeholders redacted");

    let mut geometry = load_geometry(&form.fields_json)?;
    let replaced = substitute_values(&mut geometry, values);
    debug!(form = %form.id, replaced, fields = geometry.form_fields.len(), "values substituted");

    let summary = OverlayRenderer::new(&geometry).render(&mut doc)?;
    debug!(form = %form.id, drawn = summary.drawn, skipped = summary.skipped, "overlay rendered");

    Ok(doc.to_bytes()?)
}

/// Generate every requested form for one submission
///
/// All ids are checked before any work starts. When an output directory is
/// configured each PDF is also written there.
pub fn generate_forms(
    settings: &Settings,
    form_ids: &[String],
    data: &FormData,
    today: NaiveDate,
) -> Result<Vec<GeneratedPdf>, ServerError> {
    if form_ids.is_empty() {
        return Err(ServerError::NoFormSelected);
    }

    let forms = form_ids
        .iter()
        .map(|id| {
            settings
                .forms
                .get(id)
                .ok_or_else(|| ServerError::UnknownForm(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let values = resolve(data, today);
    let last_name = data.last_name();

    let mut generated = Vec::with_capacity(forms.len());
    for form in forms {
        let bytes = fill_form(form, &values).map_err(|source| ServerError::Generation {
            form_id: form.id.clone(),
            source,
        })?;

        let file_name = form.output_file_name(last_name);
        info!(form = %form.id, file = %file_name, bytes = bytes.len(), "form generated");

        generated.push(GeneratedPdf {
            form_id: form.id.clone(),
            file_name,
            bytes,
        });
    }

    if let Some(dir) = &settings.output_dir {
        write_outputs(dir, &generated)?;
    }

    Ok(generated)
}

fn write_outputs(dir: &std::path::Path, documents: &[GeneratedPdf]) -> Result<(), ServerError> {
    let output_error = |path: &std::path::Path, source| ServerError::Output {
        path: path.display().to_string(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(|e| output_error(dir, e))?;
    for doc in documents {
        let path = dir.join(&doc.file_name);
        std::fs::write(&path, &doc.bytes).map_err(|e| output_error(&path, e))?;
        debug!(path = %path.display(), "output written");
    }
    Ok(())
}
