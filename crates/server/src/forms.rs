//! The table of fillable forms

use anyhow::{bail, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Directory of the template PDFs in the built-in table
const TEMPLATE_DIR: &str = "Autofill and manual documents";

/// Directory of the geometry files in the built-in table
const GEOMETRY_DIR: &str = "form_configs";

/// File name used when the applicant gave no last name
pub const DEFAULT_NAME: &str = "user";

/// One fillable form
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FormDefinition {
    /// Identifier used by the HTTP form (`form_id`, `selected_forms`)
    pub id: String,
    /// Template PDF
    pub template: PathBuf,
    /// Field geometry JSON
    pub fields_json: PathBuf,
    /// Output file name; `{last_name}` is replaced
    pub output_name: String,
}

impl FormDefinition {
    pub fn new(
        id: impl Into<String>,
        template: impl Into<PathBuf>,
        fields_json: impl Into<PathBuf>,
        output_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            template: template.into(),
            fields_json: fields_json.into(),
            output_name: output_name.into(),
        }
    }

    /// Output file name for an applicant
    pub fn output_file_name(&self, last_name: Option<&str>) -> String {
        self.output_name
            .replace("{last_name}", &file_name_part(last_name))
    }

    fn with_base_dir(mut self, base_dir: &Path) -> Self {
        self.template = base_dir.join(&self.template);
        self.fields_json = base_dir.join(&self.fields_json);
        self
    }
}

/// Make a last name safe to embed in a file name
///
/// Path separators, quotes and control characters are dropped. A missing or
/// blank name becomes [`DEFAULT_NAME`].
pub fn file_name_part(last_name: Option<&str>) -> String {
    let cleaned: String = last_name
        .unwrap_or_default()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '"' | '\'') && !c.is_control())
        .collect();

    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        DEFAULT_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Ordered, read-only set of form definitions with unique ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTable {
    forms: Vec<FormDefinition>,
}

impl FormTable {
    /// Build a table, rejecting empty ids and duplicate ids or output names
    ///
    /// Output names become ZIP entry names, so two forms sharing one would
    /// break every multi-form download.
    pub fn new(forms: Vec<FormDefinition>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut output_names = HashSet::new();
        for form in &forms {
            if form.id.trim().is_empty() {
                bail!("form with empty id (template {})", form.template.display());
            }
            if !ids.insert(form.id.as_str()) {
                bail!("duplicate form id '{}'", form.id);
            }
            if !output_names.insert(form.output_name.as_str()) {
                bail!(
                    "form '{}' reuses output name '{}'",
                    form.id,
                    form.output_name
                );
            }
        }
        Ok(Self { forms })
    }

    /// The five forms of the NIE / EX-15 application pack
    pub fn builtin() -> Self {
        let template = |name: &str| Path::new(TEMPLATE_DIR).join(name);
        let geometry = |id: &str| Path::new(GEOMETRY_DIR).join(format!("fields_{id}.json"));

        Self {
            forms: vec![
                FormDefinition::new(
                    "ex15_alzira",
                    template("{Birth names} {Last name} - EX15 ALZIRA.pdf"),
                    geometry("ex15_alzira"),
                    "EX15_Alzira_{last_name}.pdf",
                ),
                FormDefinition::new(
                    "ex15_valencia",
                    template("{Birth names} {Last name} - EX15 VALENCIA.pdf"),
                    geometry("ex15_valencia"),
                    "EX15_Valencia_{last_name}.pdf",
                ),
                FormDefinition::new(
                    "poder_notarial",
                    template("{Full name customer} - Poder Notarial.pdf"),
                    geometry("poder_notarial"),
                    "Poder_Notarial_{last_name}.pdf",
                ),
                FormDefinition::new(
                    "shipping_receipt",
                    template("{Full name customer} - Shipping receipt.pdf"),
                    geometry("shipping_receipt"),
                    "Shipping_Receipt_{last_name}.pdf",
                ),
                FormDefinition::new(
                    "consent_agreement",
                    template("{name of customer} - customer consent agreement.pdf"),
                    geometry("consent_agreement"),
                    "Consent_Agreement_{last_name}.pdf",
                ),
            ],
        }
    }

    /// Resolve relative template and geometry paths against `base_dir`
    pub fn with_base_dir(self, base_dir: &Path) -> Self {
        Self {
            forms: self
                .forms
                .into_iter()
                .map(|form| form.with_base_dir(base_dir))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&FormDefinition> {
        self.forms.iter().find(|form| form.id == id)
    }

    /// Form ids in table order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(|form| form.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormDefinition> {
        self.forms.iter()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_table() {
        let table = FormTable::builtin();
        assert_eq!(
            table.ids().collect::<Vec<_>>(),
            vec![
                "ex15_alzira",
                "ex15_valencia",
                "poder_notarial",
                "shipping_receipt",
                "consent_agreement"
            ]
        );

        let form = table.get("poder_notarial").unwrap();
        assert_eq!(
            form.fields_json,
            PathBuf::from("form_configs/fields_poder_notarial.json")
        );
    }

    #[test]
    fn test_builtin_ids_unique() {
        let forms = FormTable::builtin().iter().cloned().collect();
        assert!(FormTable::new(forms).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let form = FormDefinition::new("a", "a.pdf", "a.json", "A.pdf");
        let err = FormTable::new(vec![form.clone(), form]).unwrap_err();
        assert!(err.to_string().contains("duplicate form id 'a'"));
    }

    #[test]
    fn test_duplicate_output_names_rejected() {
        let err = FormTable::new(vec![
            FormDefinition::new("a", "a.pdf", "a.json", "Form_{last_name}.pdf"),
            FormDefinition::new("b", "b.pdf", "b.json", "Form_{last_name}.pdf"),
        ])
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("form 'b' reuses output name 'Form_{last_name}.pdf'"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let form = FormDefinition::new(" ", "a.pdf", "a.json", "A.pdf");
        assert!(FormTable::new(vec![form]).is_err());
    }

    #[test]
    fn test_with_base_dir() {
        let table = FormTable::new(vec![
            FormDefinition::new("a", "templates/a.pdf", "/abs/a.json", "A.pdf"),
        ])
        .unwrap()
        .with_base_dir(Path::new("/srv/forms"));

        let form = table.get("a").unwrap();
        assert_eq!(form.template, PathBuf::from("/srv/forms/templates/a.pdf"));
        assert_eq!(form.fields_json, PathBuf::from("/abs/a.json"));
    }

    #[test]
    fn test_output_file_name() {
        let form = FormDefinition::new("a", "a.pdf", "a.json", "EX15_Alzira_{last_name}.pdf");
        assert_eq!(form.output_file_name(Some("Garcia")), "EX15_Alzira_Garcia.pdf");
        assert_eq!(form.output_file_name(None), "EX15_Alzira_user.pdf");
    }

    #[test]
    fn test_file_name_part() {
        assert_eq!(file_name_part(Some("García López")), "García López");
        assert_eq!(file_name_part(Some("../../etc/passwd")), "....etcpasswd");
        assert_eq!(file_name_part(Some("O'Brien")), "OBrien");
        assert_eq!(file_name_part(Some("  ")), "user");
        assert_eq!(file_name_part(Some("..")), "user");
        assert_eq!(file_name_part(None), "user");
    }
}
