//! Font size selection
//!
//! A single-line heuristic: glyphs are assumed to be half an em wide on
//! average. There is no wrapping and no real glyph measurement.

/// Font size when a field does not configure one
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// Font size for the long name and address fields
pub const LONG_FIELD_FONT_SIZE: f32 = 10.0;

/// Text is never shrunk below this size
pub const MIN_FONT_SIZE: f32 = 6.0;

/// Horizontal room reserved inside a box, in points
pub const BOX_PADDING: f64 = 2.0;

const AVERAGE_GLYPH_WIDTH: f64 = 0.5;

const LONG_FIELD_DESCRIPTIONS: [&str; 2] = ["full name and surname", "street and number"];

/// Starting font size of a field
///
/// The long name and address fields always use [`LONG_FIELD_FONT_SIZE`],
/// whatever they configure.
pub fn base_font_size(description: &str, configured: Option<f32>) -> f32 {
    let description = description.trim().to_lowercase();
    if LONG_FIELD_DESCRIPTIONS.contains(&description.as_str()) {
        return LONG_FIELD_FONT_SIZE;
    }

    configured
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE)
}

/// Shrink `font_size` so `text` fits on one line of a box `box_width` wide
///
/// Text that already fits keeps its size. Otherwise the size is the whole
/// number of points that fits, floored at [`MIN_FONT_SIZE`].
pub fn fit_font_size(text: &str, box_width: f64, font_size: f32) -> f32 {
    let chars = text.chars().count() as f64;
    let usable = box_width - BOX_PADDING;

    if chars * font_size as f64 * AVERAGE_GLYPH_WIDTH <= usable {
        return font_size;
    }

    let fitted = (usable / (chars * AVERAGE_GLYPH_WIDTH)).floor() as f32;
    fitted.max(MIN_FONT_SIZE)
}
