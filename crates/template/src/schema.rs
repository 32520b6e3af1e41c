//! Field geometry JSON schema types
//!
//! A geometry file describes where each value goes on a template. Boxes
//! were digitized on a rendered image of every page, so they are in image
//! pixels with a top-left origin.

use serde::{Deserialize, Serialize};

/// Root of a field geometry file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryFile {
    /// Reference image size of each page
    pub pages: Vec<PageGeometry>,

    /// Fillable regions
    #[serde(default)]
    pub form_fields: Vec<FormField>,
}

impl GeometryFile {
    /// Geometry record of a page (1-indexed)
    pub fn page(&self, page_number: usize) -> Option<&PageGeometry> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }
}

/// Size of the image a page was digitized from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PageGeometry {
    /// Page number (1-indexed)
    pub page_number: usize,

    /// Image width in pixels
    pub image_width: f64,

    /// Image height in pixels
    pub image_height: f64,
}

/// One fillable region of a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormField {
    /// Page number (1-indexed)
    pub page_number: usize,

    /// Human-readable label, also used to pick a smaller font for long fields
    #[serde(default)]
    pub description: String,

    /// Region in image pixels
    pub entry_bounding_box: BoundingBox,

    /// Text to draw; fields without it are skipped
    #[serde(default)]
    pub entry_text: Option<EntryText>,
}

/// Box in image pixels, serialized as `[left, top, right, bottom]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([left, top, right, bottom]: [f64; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.left, b.top, b.right, b.bottom]
    }
}

/// Text payload and style of a field
///
/// `text` starts out as a placeholder token and is replaced with the
/// resolved value before rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EntryText {
    #[serde(default)]
    pub text: String,

    /// Font name (standard 14 fonts; unknown names fall back to Helvetica)
    #[serde(default)]
    pub font: Option<String>,

    /// 6-digit hex color, e.g. `"000000"`
    #[serde(default)]
    pub font_color: Option<String>,

    /// Font size in points
    #[serde(default)]
    pub font_size: Option<f32>,

    #[serde(default)]
    pub align: Align,
}

/// Text alignment inside the box
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for pdf_core::Align {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => pdf_core::Align::Left,
            Align::Center => pdf_core::Align::Center,
            Align::Right => pdf_core::Align::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_field() {
        let json = r#"{
            "page_number": 1,
            "description": "Last name",
            "entry_bounding_box": [100, 120.5, 300, 140],
            "entry_text": { "text": "{last_name}", "font": "Helvetica", "font_color": "000000", "font_size": 9 }
        }"#;

        let field: FormField = serde_json::from_str(json).unwrap();
        assert_eq!(field.entry_bounding_box, BoundingBox::new(100.0, 120.5, 300.0, 140.0));

        let entry = field.entry_text.unwrap();
        assert_eq!(entry.text, "{last_name}");
        assert_eq!(entry.font_size, Some(9.0));
        assert_eq!(entry.align, Align::Left);
    }

    #[test]
    fn test_deserialize_field_without_entry_text() {
        let json = r#"{ "page_number": 2, "entry_bounding_box": [0, 0, 1, 1] }"#;
        let field: FormField = serde_json::from_str(json).unwrap();
        assert_eq!(field.entry_text, None);
        assert_eq!(field.description, "");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let json = r#"{
            "pages": [{ "page_number": 1, "image_width": 1700, "image_height": 2200 }],
            "form_fields": [{
                "page_number": 1,
                "description": "Email",
                "field_label": "Email",
                "label_bounding_box": [10, 10, 50, 20],
                "entry_bounding_box": [60, 10, 200, 20],
                "entry_text": { "text": "{email}", "align": "center" }
            }]
        }"#;

        let geometry: GeometryFile = serde_json::from_str(json).unwrap();
        assert_eq!(geometry.pages.len(), 1);
        assert_eq!(
            geometry.form_fields[0].entry_text.as_ref().unwrap().align,
            Align::Center
        );
    }

    #[test]
    fn test_bounding_box_serializes_as_array() {
        let json = serde_json::to_string(&BoundingBox::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
    }

    #[test]
    fn test_page_lookup() {
        let geometry = GeometryFile {
            pages: vec![
                PageGeometry { page_number: 1, image_width: 10.0, image_height: 20.0 },
                PageGeometry { page_number: 2, image_width: 30.0, image_height: 40.0 },
            ],
            form_fields: vec![],
        };
        assert_eq!(geometry.page(2).map(|p| p.image_width), Some(30.0));
        assert_eq!(geometry.page(3), None);
    }

    #[test]
    fn test_align_conversion() {
        assert_eq!(pdf_core::Align::from(Align::Right), pdf_core::Align::Right);
    }
}
