//! Geometry file parsing and validation

use crate::{BoundingBox, GeometryFile, PageGeometry, Result, TemplateError};
use std::collections::HashSet;
use std::path::Path;

/// Parse a geometry file from a JSON string
///
/// Only the JSON structure is checked; see [`validate_geometry`].
pub fn parse_geometry(json: &str) -> Result<GeometryFile> {
    serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))
}

/// Read, parse and validate a geometry file
pub fn load_geometry(path: impl AsRef<Path>) -> Result<GeometryFile> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| TemplateError::ReadError {
        path: path.display().to_string(),
        source,
    })?;

    let geometry = parse_geometry(&json)?;
    validate_geometry(&geometry)?;
    Ok(geometry)
}

/// Check that every field can be placed
///
/// Each page record needs a positive image size and a unique number, every
/// field's page needs a record, and every box must be ordered and lie inside
/// its page image.
pub fn validate_geometry(geometry: &GeometryFile) -> Result<()> {
    let mut seen = HashSet::new();
    for page in &geometry.pages {
        if !seen.insert(page.page_number) {
            return Err(invalid(format!(
                "duplicate geometry for page {}",
                page.page_number
            )));
        }
        if page.page_number == 0 {
            return Err(invalid("page numbers start at 1".to_string()));
        }
        if !is_positive(page.image_width) || !is_positive(page.image_height) {
            return Err(invalid(format!(
                "page {} has invalid image size {}x{}",
                page.page_number, page.image_width, page.image_height
            )));
        }
    }

    for (index, field) in geometry.form_fields.iter().enumerate() {
        let page = geometry.page(field.page_number).ok_or_else(|| {
            invalid(format!(
                "field {index} ({}) is on page {} which has no geometry",
                field.description, field.page_number
            ))
        })?;

        if !box_fits(&field.entry_bounding_box, page) {
            let b = field.entry_bounding_box;
            return Err(invalid(format!(
                "field {index} ({}) box [{}, {}, {}, {}] must be non-empty and inside the {}x{} page image",
                field.description,
                b.left,
                b.top,
                b.right,
                b.bottom,
                page.image_width,
                page.image_height
            )));
        }
    }

    Ok(())
}

fn invalid(message: String) -> TemplateError {
    TemplateError::InvalidGeometry(message)
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn box_fits(b: &BoundingBox, page: &PageGeometry) -> bool {
    let coords = [b.left, b.top, b.right, b.bottom];
    coords.iter().all(|c| c.is_finite())
        && 0.0 <= b.left
        && b.left < b.right
        && b.right <= page.image_width
        && 0.0 <= b.top
        && b.top < b.bottom
        && b.bottom <= page.image_height
}
