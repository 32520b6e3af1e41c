//! Text overlay rendering

use crate::fit::{base_font_size, fit_font_size};
use crate::schema::*;
use crate::transform::image_to_pdf;
use crate::{Result, TemplateError};
use pdf_core::{Color, FreeText, PdfDocument, StandardFont};
use tracing::debug;

/// Padding between the field box and the annotation rectangle, in points
const ANNOTATION_INSET: f64 = 1.0;

/// Check-mark glyphs that only ZapfDingbats can draw
const CHECK_GLYPHS: [char; 6] = ['☑', '✓', '✔', '☒', '✗', '✘'];

/// Counts reported by [`OverlayRenderer::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Annotations added
    pub drawn: usize,
    /// Fields without text
    pub skipped: usize,
}

/// Draws the fields of a geometry file as free-text annotations
pub struct OverlayRenderer<'a> {
    geometry: &'a GeometryFile,
}

impl<'a> OverlayRenderer<'a> {
    /// Create a renderer for a (substituted) geometry file
    pub fn new(geometry: &'a GeometryFile) -> Self {
        Self { geometry }
    }

    /// Add one annotation per field with non-blank text
    ///
    /// # Arguments
    /// * `doc` - PDF document to annotate
    pub fn render(&self, doc: &mut PdfDocument) -> Result<RenderSummary> {
        let mut summary = RenderSummary::default();

        for field in &self.geometry.form_fields {
            if self.render_field(doc, field)? {
                summary.drawn += 1;
            } else {
                summary.skipped += 1;
            }
        }

        Ok(summary)
    }

    /// Render a single field, returning whether anything was drawn
    fn render_field(&self, doc: &mut PdfDocument, field: &FormField) -> Result<bool> {
        let Some(entry) = &field.entry_text else {
            debug!(description = %field.description, "field has no entry text, skipped");
            return Ok(false);
        };

        let text = entry.text.trim();
        if text.is_empty() {
            debug!(description = %field.description, "field is empty, skipped");
            return Ok(false);
        }

        let image = self.geometry.page(field.page_number).ok_or_else(|| {
            TemplateError::InvalidGeometry(format!(
                "page {} has no geometry",
                field.page_number
            ))
        })?;
        let page_size = doc.page_size(field.page_number)?;
        let rect = image_to_pdf(&field.entry_bounding_box, image, &page_size);

        let base_size = base_font_size(&field.description, entry.font_size);
        let font_size = fit_font_size(text, rect.width(), base_size);
        if font_size < base_size {
            debug!(
                description = %field.description,
                from = base_size,
                to = font_size,
                "font shrunk to fit"
            );
        }

        let annotation = FreeText::new(text, rect.inset(ANNOTATION_INSET))
            .with_font(resolve_font(text, entry.font.as_deref()))
            .with_font_size(font_size)
            .with_color(resolve_color(entry.font_color.as_deref()))
            .with_align(entry.align.into());

        doc.add_free_text(field.page_number, &annotation)?;
        Ok(true)
    }
}

/// Font for a field's text: ZapfDingbats for check marks, else by name
fn resolve_font(text: &str, name: Option<&str>) -> StandardFont {
    if is_check_mark(text) {
        return StandardFont::ZapfDingbats;
    }
    name.map(StandardFont::from_name).unwrap_or_default()
}

fn is_check_mark(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| CHECK_GLYPHS.contains(&c))
}

/// Parse a hex color, falling back to black
fn resolve_color(hex: Option<&str>) -> Color {
    hex.and_then(Color::from_hex).unwrap_or_default()
}
