//! Template Engine - field geometry parsing and text overlay
//!
//! This crate provides:
//! - Field geometry JSON schema types
//! - Geometry parsing and validation
//! - Placeholder substitution with resolved applicant values
//! - Image pixel to PDF point conversion
//! - Font size fitting
//! - Free-text overlay rendering
//!
//! # Example
//!
//! ```ignore
//! use template::{load_geometry, substitute_values, OverlayRenderer};
//!
//! let mut geometry = load_geometry("form_configs/fields_ex15_alzira.json")?;
//! substitute_values(&mut geometry, &values);
//! OverlayRenderer::new(&geometry).render(&mut doc)?;
//! ```

pub mod fit;
pub mod parser;
mod renderer;
mod schema;
mod substitute;
pub mod transform;

pub use parser::{load_geometry, parse_geometry, validate_geometry};
pub use renderer::{OverlayRenderer, RenderSummary};
pub use schema::*;
pub use substitute::substitute_values;

use thiserror::Error;

/// Errors that can occur during template processing
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse geometry: {0}")]
    ParseError(String),

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
