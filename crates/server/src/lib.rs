//! Web backend that fills NIE / EX-15 immigration PDF forms
//!
//! An applicant submits one HTML form; the server resolves the submitted
//! values, redacts the placeholder text printed on each template and draws
//! the values as free-text annotations. One form comes back as a PDF, several
//! as a ZIP.

pub mod archive;
pub mod config;
pub mod error;
pub mod forms;
pub mod generate;
pub mod routes;

pub use config::{load_forms, Cli, Settings};
pub use error::ServerError;
pub use forms::{FormDefinition, FormTable};
pub use generate::{fill_form, generate_forms, GeneratedPdf};
pub use routes::router;
