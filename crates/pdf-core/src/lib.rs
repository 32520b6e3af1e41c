//! PDF Core - Low-level PDF manipulation
//!
//! This crate provides functionality for:
//! - Opening and serializing PDF documents
//! - Reading page geometry (inherited MediaBox)
//! - Redacting literal placeholder text from page content
//! - Adding free-text annotations with generated appearance streams
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{FreeText, PdfDocument, PdfRect, RedactPattern};
//!
//! let mut doc = PdfDocument::open("template.pdf")?;
//! doc.redact(&[RedactPattern::anywhere("{Last name}")])?;
//! doc.add_free_text(1, &FreeText::new("Garcia", PdfRect::new(72.0, 700.0, 200.0, 714.0)))?;
//! let bytes = doc.to_bytes()?;
//! ```

mod annotation;
mod document;
mod redact;
mod text;

pub use annotation::{FreeText, StandardFont};
pub use document::{Color, PageSize, PdfDocument, PdfRect};
pub use redact::{MatchMode, RedactPattern};
pub use text::{encode_utf16_text, encode_win_ansi, generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Quadding value used by the `/Q` entry of free-text annotations
    pub fn quadding(self) -> i64 {
        match self {
            Align::Left => 0,
            Align::Center => 1,
            Align::Right => 2,
        }
    }
}
