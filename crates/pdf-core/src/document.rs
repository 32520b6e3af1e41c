//! PDF Document wrapper

use crate::annotation::{build_appearance_stream, build_free_text_dict, FreeText, StandardFont};
use crate::redact::{redact_content, ByteDecoder, FontDecoders, RedactPattern};
use crate::{PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a 6-digit hex color such as `"000000"` or `"#1F3A93"`
    ///
    /// Returns `None` for anything that is not exactly six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::from_rgb(r, g, b))
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Rectangle in PDF user space (points, bottom-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRect {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl PdfRect {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Shrink the rectangle by `padding` points on every side
    pub fn inset(&self, padding: f64) -> Self {
        Self {
            left: self.left + padding,
            bottom: self.bottom + padding,
            right: self.right - padding,
            top: self.top - padding,
        }
    }

    pub(crate) fn to_object(self) -> Object {
        Object::Array(vec![
            Object::Real(self.left as f32),
            Object::Real(self.bottom as f32),
            Object::Real(self.right as f32),
            Object::Real(self.top as f32),
        ])
    }
}

/// Physical page box: origin and size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    /// Lower-left x of the MediaBox
    pub x: f64,
    /// Lower-left y of the MediaBox
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// PDF Document wrapper providing high-level operations
///
/// The handle owns the parsed document; every edit stays in memory until
/// [`PdfDocument::to_bytes`].
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Standard font dictionaries already added (font -> PDF object ID)
    font_objects: HashMap<StandardFont, ObjectId>,
}

impl PdfDocument {
    /// Open a PDF document from a file path
    ///
    /// # Arguments
    /// * `path` - Path to the PDF file
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::open("template.pdf")?;
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let inner = Document::load(path)
            .map_err(|e| PdfError::OpenError(format!("{}: {e}", path.display())))?;

        Ok(Self::from_document(inner))
    }

    /// Open a PDF document from bytes
    ///
    /// # Arguments
    /// * `data` - PDF file bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| PdfError::OpenError(e.to_string()))?;

        Ok(Self::from_document(inner))
    }

    fn from_document(inner: Document) -> Self {
        Self {
            inner,
            font_objects: HashMap::new(),
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Get the page object IDs in page order
    pub fn get_page_ids(&self) -> Vec<ObjectId> {
        self.inner.get_pages().into_values().collect()
    }

    /// Look up the object ID of a page (1-indexed)
    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.inner.get_pages();
        pages
            .get(&(page as u32))
            .copied()
            .ok_or(PdfError::InvalidPage(page, pages.len()))
    }

    /// Get the page box in points
    ///
    /// Reads the MediaBox, following the parent chain when it is inherited
    /// from a Pages node. The CropBox is used only when no MediaBox exists
    /// anywhere in the chain, and A4 when neither does.
    pub fn page_size(&self, page: usize) -> Result<PageSize> {
        let page_id = self.page_id(page)?;
        let page_box = match self.get_inherited_box(page_id, b"MediaBox")? {
            Some(media_box) => media_box,
            None => self.get_inherited_box(page_id, b"CropBox")?.unwrap_or_else(|| {
                vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(595.28),
                    Object::Real(841.89),
                ]
            }),
        };
        extract_page_size(&page_box)
    }

    /// Get a page box entry, following the parent inheritance chain
    fn get_inherited_box(&self, page_id: ObjectId, key: &[u8]) -> Result<Option<Vec<Object>>> {
        let mut current_id = page_id;

        // Follow parent chain up to 10 levels (safety limit)
        for _ in 0..10 {
            let obj = self.inner.get_object(current_id)?;
            let dict = obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Object is not a dictionary".to_string()))?;

            if let Ok(page_box) = dict.get(key) {
                let not_array = || {
                    PdfError::ParseError(format!(
                        "{} is not an array",
                        String::from_utf8_lossy(key)
                    ))
                };
                let array = match page_box {
                    Object::Array(arr) => arr.clone(),
                    Object::Reference(ref_id) => self
                        .inner
                        .get_object(*ref_id)?
                        .as_array()
                        .map_err(|_| not_array())?
                        .clone(),
                    _ => return Err(not_array()),
                };
                return Ok(Some(array));
            }

            if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
                current_id = *parent_id;
                continue;
            }

            break;
        }

        Ok(None)
    }

    /// Remove every occurrence of the given placeholders from all pages
    ///
    /// Returns the number of occurrences removed. Patterns that never occur
    /// are a no-op.
    pub fn redact(&mut self, patterns: &[RedactPattern]) -> Result<usize> {
        if patterns.is_empty() {
            return Ok(0);
        }

        let mut removed = 0;
        for page in 1..=self.page_count() {
            let content = self.read_page_content(page)?;
            if content.is_empty() {
                continue;
            }

            let fonts = self.page_font_decoders(page)?;
            let (rewritten, count) = redact_content(&content, &fonts, patterns)?;
            if count > 0 {
                self.write_page_content(page, rewritten)?;
                removed += count;
            }
        }

        Ok(removed)
    }

    /// Character decoders for the fonts in a page's resources
    fn page_font_decoders(&self, page: usize) -> Result<FontDecoders> {
        let page_id = self.page_id(page)?;
        Ok(self
            .inner
            .get_page_fonts(page_id)
            .into_iter()
            .map(|(name, font)| (name, self.font_decoder(font)))
            .collect())
    }

    fn font_decoder(&self, font: &Dictionary) -> ByteDecoder {
        let subtype = font.get(b"Subtype").and_then(Object::as_name);
        if matches!(subtype, Ok(b"Type0")) {
            return ByteDecoder::composite();
        }

        let encoding = match font.get(b"Encoding") {
            Ok(Object::Reference(id)) => self.inner.get_object(*id).ok(),
            Ok(object) => Some(object),
            Err(_) => None,
        };

        // Differences arrays are not applied; only the base encoding is used
        let name = match encoding {
            Some(Object::Name(name)) => Some(name.as_slice()),
            Some(Object::Dictionary(dict)) => dict.get(b"BaseEncoding").and_then(Object::as_name).ok(),
            _ => None,
        };

        match name {
            Some(name) => ByteDecoder::simple(&String::from_utf8_lossy(name)),
            None => ByteDecoder::default(),
        }
    }

    /// Read a page's content, concatenating and decompressing all streams
    fn read_page_content(&self, page: usize) -> Result<Vec<u8>> {
        let page_id = self.page_id(page)?;
        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

        let content = match page_dict.get(b"Contents") {
            Ok(Object::Stream(stream)) => stream_bytes(stream),
            Ok(Object::Reference(ref_id)) => match self.inner.get_object(*ref_id) {
                Ok(Object::Stream(stream)) => stream_bytes(stream),
                Ok(Object::Array(arr)) => self.concat_streams(arr),
                _ => Vec::new(),
            },
            Ok(Object::Array(arr)) => self.concat_streams(arr),
            _ => Vec::new(),
        };

        Ok(content)
    }

    /// Concatenate an array of content streams (or references to them)
    fn concat_streams(&self, arr: &[Object]) -> Vec<u8> {
        let mut combined = Vec::new();
        for obj in arr {
            match obj {
                Object::Reference(ref_id) => {
                    if let Ok(Object::Stream(stream)) = self.inner.get_object(*ref_id) {
                        combined.extend_from_slice(&stream_bytes(stream));
                        // Streams are only separated by whitespace in the combined content
                        combined.push(b'\n');
                    }
                }
                Object::Stream(stream) => {
                    combined.extend_from_slice(&stream_bytes(stream));
                    combined.push(b'\n');
                }
                _ => {}
            }
        }
        combined
    }

    /// Replace a page's content with a single new stream object
    fn write_page_content(&mut self, page: usize, content: Vec<u8>) -> Result<()> {
        let page_id = self.page_id(page)?;

        let mut page_dict = self
            .inner
            .get_object(page_id)?
            .as_dict()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?
            .clone();

        let stream_id = self
            .inner
            .add_object(Stream::new(Dictionary::new(), content));
        page_dict.set(b"Contents", Object::Reference(stream_id));

        self.inner.objects.insert(page_id, page_dict.into());

        Ok(())
    }

    /// Add a free-text annotation to a page (1-indexed)
    ///
    /// The annotation gets a normal appearance stream so it renders the same
    /// in every viewer, not only in those that regenerate from `/DA`.
    pub fn add_free_text(&mut self, page: usize, annotation: &FreeText) -> Result<ObjectId> {
        let page_id = self.page_id(page)?;

        let font_id = self.get_or_create_font(annotation.font);
        let appearance = build_appearance_stream(annotation, font_id);
        let appearance_id = self.inner.add_object(appearance);

        let annot_dict = build_free_text_dict(annotation, page_id, appearance_id);
        let annot_id = self.inner.add_object(annot_dict);

        self.add_annotation_to_page(page_id, annot_id)?;

        Ok(annot_id)
    }

    /// Get or create the shared font dictionary for a standard font
    fn get_or_create_font(&mut self, font: StandardFont) -> ObjectId {
        if let Some(id) = self.font_objects.get(&font) {
            return *id;
        }

        let id = self.inner.add_object(font.to_font_dict());
        self.font_objects.insert(font, id);
        id
    }

    /// Append an annotation reference to the page's `/Annots` array
    fn add_annotation_to_page(&mut self, page_id: ObjectId, annot_id: ObjectId) -> Result<()> {
        let mut page_dict = self
            .inner
            .get_object(page_id)?
            .as_dict()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?
            .clone();

        let existing = page_dict.get(b"Annots").ok().cloned();
        match existing {
            // Indirect array: extend the referenced object in place
            Some(Object::Reference(array_id)) => {
                if let Ok(Object::Array(arr)) = self.inner.get_object_mut(array_id) {
                    arr.push(Object::Reference(annot_id));
                    return Ok(());
                }
                page_dict.set(b"Annots", Object::Array(vec![Object::Reference(annot_id)]));
            }
            Some(Object::Array(mut annots)) => {
                annots.push(Object::Reference(annot_id));
                page_dict.set(b"Annots", Object::Array(annots));
            }
            _ => {
                page_dict.set(b"Annots", Object::Array(vec![Object::Reference(annot_id)]));
            }
        }

        self.inner.objects.insert(page_id, page_dict.into());

        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}

/// Decompressed stream content, or the raw bytes when not compressed
fn stream_bytes(stream: &Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Read a number object as f64
fn object_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(v) => Some(*v as f64),
        Object::Real(v) => Some(*v as f64),
        _ => None,
    }
}

/// Extract origin and size from a MediaBox array
fn extract_page_size(media_box: &[Object]) -> Result<PageSize> {
    if media_box.len() < 4 {
        return Err(PdfError::ParseError("Invalid MediaBox format".to_string()));
    }

    let mut coords = [0.0f64; 4];
    for (i, coord) in coords.iter_mut().enumerate() {
        *coord = object_to_f64(&media_box[i])
            .ok_or_else(|| PdfError::ParseError(format!("Invalid MediaBox entry {i}")))?;
    }

    // Boxes may be given with any pair of opposite corners
    let (x1, y1, x2, y2) = (coords[0], coords[1], coords[2], coords[3]);
    Ok(PageSize {
        x: x1.min(x2),
        y: y1.min(y2),
        width: (x2 - x1).abs(),
        height: (y2 - y1).abs(),
    })
}
