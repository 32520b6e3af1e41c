//! Free-text annotations
//!
//! Annotations are drawn with one of the standard 14 fonts, so nothing has to
//! be embedded. Each annotation carries its own appearance stream.

use crate::document::{Color, PdfRect};
use crate::text::{
    calculate_x_offset, encode_utf16_text, encode_win_ansi, generate_text_operators,
    to_hex_string, TextRenderContext,
};
use crate::Align;
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};

/// Average glyph advance as a fraction of the font size
///
/// No real glyph metrics are available for the standard fonts here, so
/// alignment uses this estimate.
const AVERAGE_GLYPH_WIDTH: f64 = 0.5;

/// Horizontal padding inside the appearance box, in points
const TEXT_PADDING: f64 = 2.0;

/// The standard 14 fonts that annotations may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
    ZapfDingbats,
}

impl StandardFont {
    /// Resolve a font name from a geometry file
    ///
    /// Matching is case-insensitive and accepts the usual short forms.
    /// Unknown names fall back to Helvetica.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica-bold" | "helvetica bold" | "hebo" => StandardFont::HelveticaBold,
            "times" | "times-roman" | "times new roman" | "tiro" => StandardFont::TimesRoman,
            "times-bold" | "tibo" => StandardFont::TimesBold,
            "courier" | "cour" => StandardFont::Courier,
            "courier-bold" | "cobo" => StandardFont::CourierBold,
            "zapfdingbats" | "zadb" => StandardFont::ZapfDingbats,
            _ => StandardFont::Helvetica,
        }
    }

    /// PostScript name used as `/BaseFont`
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Resource name used in `/DA` strings and appearance streams
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helv",
            StandardFont::HelveticaBold => "HeBo",
            StandardFont::TimesRoman => "TiRo",
            StandardFont::TimesBold => "TiBo",
            StandardFont::Courier => "Cour",
            StandardFont::CourierBold => "CoBo",
            StandardFont::ZapfDingbats => "ZaDb",
        }
    }

    /// Encode text into the font's single-byte encoding
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            StandardFont::ZapfDingbats => text.chars().map(dingbat_code).collect(),
            _ => encode_win_ansi(text),
        }
    }

    pub(crate) fn to_font_dict(self) -> Dictionary {
        let mut dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.base_font(),
        };
        // The symbolic font keeps its built-in encoding
        if self != StandardFont::ZapfDingbats {
            dict.set("Encoding", "WinAnsiEncoding");
        }
        dict
    }
}

/// Map check marks and ballot boxes to ZapfDingbats codes
fn dingbat_code(c: char) -> u8 {
    match c {
        // a20: heavy check mark
        '☑' | '✓' | '✔' | '☒' | '✗' | '✘' | 'X' | 'x' => b'4',
        // a71: black square
        '■' => b'n',
        ' '..='~' => c as u8,
        _ => b'4',
    }
}

/// A free-text annotation to place on a page
#[derive(Debug, Clone, PartialEq)]
pub struct FreeText {
    /// Text to display (also stored as the annotation's `/Contents`)
    pub text: String,
    /// Annotation rectangle in PDF user space
    pub rect: PdfRect,
    pub font: StandardFont,
    /// Font size in points
    pub font_size: f32,
    pub color: Color,
    pub align: Align,
}

impl FreeText {
    /// Create an annotation with Helvetica 11pt black, left aligned
    pub fn new(text: impl Into<String>, rect: PdfRect) -> Self {
        Self {
            text: text.into(),
            rect,
            font: StandardFont::Helvetica,
            font_size: 11.0,
            color: Color::black(),
            align: Align::Left,
        }
    }

    pub fn with_font(mut self, font: StandardFont) -> Self {
        self.font = font;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Default appearance string, e.g. `/Helv 10 Tf 0 0 0 rg`
    pub fn default_appearance(&self) -> String {
        format!(
            "/{} {} Tf {} {} {} rg",
            self.font.resource_name(),
            self.font_size,
            self.color.r,
            self.color.g,
            self.color.b
        )
    }

    /// Content stream for the annotation's normal appearance
    ///
    /// Coordinates are relative to the annotation box: one line of text,
    /// vertically centered.
    pub fn appearance_content(&self) -> Vec<u8> {
        let width = self.rect.width();
        let height = self.rect.height();
        let font_size = self.font_size as f64;

        let text_width = self.text.chars().count() as f64 * font_size * AVERAGE_GLYPH_WIDTH;
        let x = TEXT_PADDING
            + calculate_x_offset(text_width, width - 2.0 * TEXT_PADDING, self.align).max(0.0);
        // Cap height of the standard fonts is roughly 0.7 em
        let y = ((height - font_size * 0.7) / 2.0).max(0.0);

        let ctx = TextRenderContext {
            font_name: self.font.resource_name().to_string(),
            font_size: self.font_size,
            color: self.color,
        };
        let text_hex = to_hex_string(&self.font.encode(&self.text));

        let mut content = b"/Tx BMC\nq\n".to_vec();
        content.extend(generate_text_operators(&text_hex, x, y, &ctx));
        content.extend_from_slice(b"Q\nEMC\n");
        content
    }
}

/// Build the form XObject used as normal appearance
pub(crate) fn build_appearance_stream(annotation: &FreeText, font_id: ObjectId) -> Stream {
    let width = annotation.rect.width().max(0.0);
    let height = annotation.rect.height().max(0.0);

    let mut fonts = Dictionary::new();
    fonts.set(annotation.font.resource_name(), Object::Reference(font_id));

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "BBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width as f32),
            Object::Real(height as f32),
        ],
        "Resources" => dictionary! {
            "Font" => fonts,
        },
    };

    Stream::new(dict, annotation.appearance_content())
}

/// Build the `/FreeText` annotation dictionary
pub(crate) fn build_free_text_dict(
    annotation: &FreeText,
    page_id: ObjectId,
    appearance_id: ObjectId,
) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "FreeText",
        "Rect" => annotation.rect.to_object(),
        "Contents" => Object::String(encode_utf16_text(&annotation.text), StringFormat::Hexadecimal),
        "DA" => Object::String(annotation.default_appearance().into_bytes(), StringFormat::Literal),
        "Q" => annotation.align.quadding(),
        // Print flag
        "F" => 4,
        "P" => Object::Reference(page_id),
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "AP" => dictionary! {
            "N" => Object::Reference(appearance_id),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_from_name() {
        assert_eq!(StandardFont::from_name("Helvetica"), StandardFont::Helvetica);
        assert_eq!(StandardFont::from_name("helv"), StandardFont::Helvetica);
        assert_eq!(StandardFont::from_name("Helvetica-Bold"), StandardFont::HelveticaBold);
        assert_eq!(StandardFont::from_name("Times-Roman"), StandardFont::TimesRoman);
        assert_eq!(StandardFont::from_name("COURIER"), StandardFont::Courier);
        assert_eq!(StandardFont::from_name("ZapfDingbats"), StandardFont::ZapfDingbats);
        assert_eq!(StandardFont::from_name("Comic Sans"), StandardFont::Helvetica);
    }

    #[test]
    fn test_font_dict_encoding() {
        let helv = StandardFont::Helvetica.to_font_dict();
        assert!(helv.get(b"Encoding").is_ok());

        let zadb = StandardFont::ZapfDingbats.to_font_dict();
        assert!(zadb.get(b"Encoding").is_err());
    }

    #[test]
    fn test_dingbat_encoding() {
        assert_eq!(StandardFont::ZapfDingbats.encode("☑"), vec![b'4']);
        assert_eq!(StandardFont::ZapfDingbats.encode("✔"), vec![b'4']);
        assert_eq!(StandardFont::Helvetica.encode("X"), vec![b'X']);
    }

    #[test]
    fn test_default_appearance() {
        let annot = FreeText::new("Garcia", PdfRect::new(0.0, 0.0, 100.0, 20.0))
            .with_font_size(10.0)
            .with_color(Color::red());
        assert_eq!(annot.default_appearance(), "/Helv 10 Tf 1 0 0 rg");
    }

    #[test]
    fn test_appearance_content_left() {
        let annot = FreeText::new("AB", PdfRect::new(100.0, 100.0, 200.0, 120.0))
            .with_font_size(10.0);
        let content = String::from_utf8(annot.appearance_content()).unwrap();

        assert!(content.starts_with("/Tx BMC\nq\n"));
        assert!(content.contains("/Helv 10 Tf"));
        assert!(content.contains("<4142> Tj"));
        assert!(content.ends_with("Q\nEMC\n"));

        let (x, y) = td_position(&content);
        assert_eq!(x, 2.0);
        // (20 - 7) / 2
        assert!((y - 6.5).abs() < 1e-9);
    }

    fn td_position(content: &str) -> (f64, f64) {
        let line = content
            .lines()
            .find(|l| l.ends_with(" Td"))
            .expect("Td operator");
        let nums: Vec<f64> = line
            .split_whitespace()
            .take(2)
            .map(|n| n.parse().unwrap())
            .collect();
        (nums[0], nums[1])
    }

    #[test]
    fn test_appearance_content_right() {
        // width 100, text width 2 * 10 * 0.5 = 10, usable 96 -> offset 86
        let annot = FreeText::new("AB", PdfRect::new(0.0, 0.0, 100.0, 20.0))
            .with_font_size(10.0)
            .with_align(Align::Right);
        let content = String::from_utf8(annot.appearance_content()).unwrap();
        let (x, _) = td_position(&content);
        assert_eq!(x, 88.0);
    }

    #[test]
    fn test_free_text_dict() {
        let annot = FreeText::new("Hi", PdfRect::new(1.0, 2.0, 3.0, 4.0));
        let dict = build_free_text_dict(&annot, (1, 0), (2, 0));

        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"FreeText");
        assert_eq!(dict.get(b"F").unwrap().as_i64().unwrap(), 4);
        assert!(dict.get(b"AP").is_ok());
        match dict.get(b"Contents").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes, &encode_utf16_text("Hi")),
            other => panic!("unexpected Contents: {other:?}"),
        }
    }
}
