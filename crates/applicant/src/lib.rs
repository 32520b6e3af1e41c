//! Applicant - submitted form data and placeholder resolution
//!
//! This crate provides:
//! - The flat key/value data posted by the applicant form
//! - Coded choices (sex, marital status, document type, ...) with a total
//!   mapping to the marks drawn on the forms
//! - Date of birth splitting and today's date formatting
//! - Resolution of every known template token to its display string
//! - The list of literal placeholders printed on the template PDFs
//!
//! # Example
//!
//! ```ignore
//! use applicant::{resolve, today, FormData};
//!
//! let data = FormData::from_pairs([("last_name", "Garcia"), ("dob", "1990-05-17")]);
//! let values = resolve(&data, today());
//! assert_eq!(values.get("{dob_day}"), Some("17"));
//! ```

mod dates;
mod form_data;
mod marks;
mod placeholders;
mod resolver;

pub use dates::{format_today, today, BirthDate, DateParts, DOB_FORMAT, TODAY_FORMAT};
pub use form_data::{FormData, SELECTED_FORMS_KEY};
pub use marks::{
    CertificateType, Choice, DocumentType, MaritalStatus, Motive, Sex, StatusInCountry,
    SubmissionOffice, CHECK_MARK, CROSS_MARK,
};
pub use placeholders::{PlaceholderKind, TemplatePlaceholder, TEMPLATE_PLACEHOLDERS};
pub use resolver::{resolve, FieldValues};

use thiserror::Error;

/// Errors that can occur while interpreting applicant data
#[derive(Debug, Error)]
pub enum ApplicantError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for applicant operations
pub type Result<T> = std::result::Result<T, ApplicantError>;
