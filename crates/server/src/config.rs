//! Command-line and file configuration

use crate::forms::{FormDefinition, FormTable};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Fill NIE / EX-15 PDF forms from a web form
#[derive(Debug, Clone, Parser)]
#[command(name = "nie-forms")]
#[command(version)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "NIE_FORMS_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Root for relative template and geometry paths
    #[arg(long, env = "NIE_FORMS_BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// TOML file with `[[forms]]` entries (defaults to the built-in table)
    #[arg(long = "forms", env = "NIE_FORMS_CONFIG")]
    pub forms_config: Option<PathBuf>,

    /// Directory where every generated PDF is also written
    #[arg(long, env = "NIE_FORMS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Settings shared read-only by all requests
#[derive(Debug, Clone)]
pub struct Settings {
    /// Forms with paths resolved against the base directory
    pub forms: FormTable,
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    pub fn new(forms: FormTable, output_dir: Option<PathBuf>) -> Self {
        Self { forms, output_dir }
    }

    /// Build settings from the command line, loading the forms file if given
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let forms = match &cli.forms_config {
            Some(path) => load_forms(path)?,
            None => FormTable::builtin(),
        };

        let output_dir = cli.output_dir.as_ref().map(|dir| cli.base_dir.join(dir));
        Ok(Self::new(forms.with_base_dir(&cli.base_dir), output_dir))
    }
}

/// Top-level forms configuration file
#[derive(Debug, Clone, Deserialize, Default)]
struct FormsFile {
    #[serde(default)]
    forms: Vec<FormDefinition>,
}

/// Load a form table from a TOML file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or lists the same
/// form id twice.
pub fn load_forms(path: &Path) -> Result<FormTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let file: FormsFile =
        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))?;

    FormTable::new(file.forms).with_context(|| format!("invalid form table in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn parse_forms_file() {
        let toml_str = r#"
[[forms]]
id = "ex15"
template = "templates/ex15.pdf"
fields_json = "geometry/ex15.json"
output_name = "EX15_{last_name}.pdf"
"#;
        let file: FormsFile = toml::from_str(toml_str).unwrap();
        assert_eq!(
            file.forms,
            vec![FormDefinition::new(
                "ex15",
                "templates/ex15.pdf",
                "geometry/ex15.json",
                "EX15_{last_name}.pdf"
            )]
        );
    }

    #[test]
    fn parse_empty_forms_file() {
        let file: FormsFile = toml::from_str("").unwrap();
        assert!(file.forms.is_empty());
    }

    #[test]
    fn load_forms_rejects_duplicates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[forms]]
id = "a"
template = "a.pdf"
fields_json = "a.json"
output_name = "A.pdf"

[[forms]]
id = "a"
template = "b.pdf"
fields_json = "b.json"
output_name = "B.pdf"
"#
        )
        .unwrap();

        let err = load_forms(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate form id 'a'"));
    }

    #[test]
    fn load_forms_missing_file() {
        let err = load_forms(Path::new("/nonexistent/forms.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["nie-forms"]).unwrap();
        assert_eq!(cli.bind, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.base_dir, PathBuf::from("."));
        assert_eq!(cli.forms_config, None);
    }

    #[test]
    fn settings_resolve_paths() {
        let cli = Cli::try_parse_from([
            "nie-forms",
            "--base-dir",
            "/srv/nie",
            "--output-dir",
            "pdfs_output",
        ])
        .unwrap();
        let settings = Settings::from_cli(&cli).unwrap();

        assert_eq!(settings.output_dir, Some(PathBuf::from("/srv/nie/pdfs_output")));
        let form = settings.forms.get("ex15_alzira").unwrap();
        assert!(form.template.starts_with("/srv/nie/Autofill and manual documents"));
        assert_eq!(settings.forms.len(), 5);
    }
}
