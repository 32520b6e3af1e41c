//! Placeholder redaction on page content streams
//!
//! Redaction deletes the matched glyphs from the text-showing operators
//! (`Tj`, `TJ`, `'` and `"`). Positioning operators are left alone, so the
//! rest of the page keeps its layout.
//!
//! All strings shown inside one `BT ... ET` block form a single logical run,
//! so a placeholder drawn by several operators is still found. Bytes are
//! decoded through the encoding of the font selected by `Tf`. Text drawn
//! with composite (two-byte) fonts never matches.

use crate::{PdfError, Result};
use lopdf::content::Content;
use lopdf::{Document, Object};
use std::collections::BTreeMap;

/// How a placeholder is matched against a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every occurrence inside a run is removed
    Anywhere,
    /// Only occurrences standing as a whole word are removed: the
    /// neighbouring characters are not alphanumeric, or the match touches
    /// the start or end of an operator's text
    WholeWord,
}

/// A literal placeholder to erase from a PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactPattern {
    pub text: String,
    pub mode: MatchMode,
}

impl RedactPattern {
    pub fn anywhere(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: MatchMode::Anywhere,
        }
    }

    pub fn whole_word(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: MatchMode::WholeWord,
        }
    }
}

/// Byte to character table of one font
#[derive(Debug, Clone)]
pub(crate) struct ByteDecoder {
    table: [char; 256],
}

impl ByteDecoder {
    /// Single-byte font using a named base encoding
    pub(crate) fn simple(encoding: &str) -> Self {
        let mut table = [char::REPLACEMENT_CHARACTER; 256];
        for (byte, slot) in table.iter_mut().enumerate() {
            if let Some(c) = Document::decode_text(Some(encoding), &[byte as u8]).chars().next() {
                *slot = c;
            }
        }
        Self { table }
    }

    /// Composite font: no byte decodes to a matchable character
    pub(crate) fn composite() -> Self {
        Self {
            table: [char::REPLACEMENT_CHARACTER; 256],
        }
    }

    fn decode(&self, byte: u8) -> char {
        self.table[byte as usize]
    }
}

impl Default for ByteDecoder {
    fn default() -> Self {
        Self::simple("StandardEncoding")
    }
}

/// Decoders of a page's fonts keyed by resource name
pub(crate) type FontDecoders = BTreeMap<Vec<u8>, ByteDecoder>;

/// Strings of one `BT ... ET` block with their decoded characters
#[derive(Default)]
struct TextRun<'a> {
    pieces: Vec<&'a mut Vec<u8>>,
    chars: Vec<char>,
    /// True where the text of a new operator starts
    operator_starts: Vec<bool>,
}

impl<'a> TextRun<'a> {
    fn push_operator(&mut self, strings: Vec<&'a mut Vec<u8>>, decoder: &ByteDecoder) {
        let start = self.chars.len();
        for bytes in strings {
            self.chars.extend(bytes.iter().map(|b| decoder.decode(*b)));
            self.operator_starts.resize(self.chars.len(), false);
            self.pieces.push(bytes);
        }
        if let Some(first) = self.operator_starts.get_mut(start) {
            *first = true;
        }
    }

    fn flush(&mut self, patterns: &[RedactPattern]) -> usize {
        let count = self.redact(patterns);
        self.pieces.clear();
        self.chars.clear();
        self.operator_starts.clear();
        count
    }

    /// Whether a match over `start..end` stands as a whole word
    fn is_word(&self, start: usize, end: usize) -> bool {
        let open = start == 0
            || self.operator_starts[start]
            || !self.chars[start - 1].is_alphanumeric();
        let close = end == self.chars.len()
            || self.operator_starts[end]
            || !self.chars[end].is_alphanumeric();
        open && close
    }

    fn redact(&mut self, patterns: &[RedactPattern]) -> usize {
        if self.chars.is_empty() {
            return 0;
        }

        let mut mask = vec![false; self.chars.len()];
        let mut count = 0;

        for pattern in patterns {
            let needle: Vec<char> = pattern.text.chars().collect();
            if needle.is_empty() {
                continue;
            }

            let mut i = 0;
            while i + needle.len() <= self.chars.len() {
                let end = i + needle.len();
                let matched = self.chars[i..end] == needle[..]
                    && !mask[i..end].iter().any(|m| *m)
                    && (pattern.mode == MatchMode::Anywhere || self.is_word(i, end));

                if matched {
                    mask[i..end].iter_mut().for_each(|m| *m = true);
                    count += 1;
                    i = end;
                } else {
                    i += 1;
                }
            }
        }

        if count == 0 {
            return 0;
        }

        // Write back each piece without its masked bytes
        let mut offset = 0;
        for piece in self.pieces.iter_mut() {
            let len = piece.len();
            let kept: Vec<u8> = piece
                .iter()
                .zip(&mask[offset..offset + len])
                .filter(|(_, masked)| !**masked)
                .map(|(b, _)| *b)
                .collect();
            **piece = kept;
            offset += len;
        }

        count
    }
}

/// Remove placeholders from a decoded page content stream
///
/// `fonts` maps the page's font resource names to their decoders; unknown
/// fonts decode with `StandardEncoding`. Returns the re-encoded content and
/// the number of occurrences removed. Content that cannot be parsed is
/// returned unchanged with a count of zero.
pub(crate) fn redact_content(
    content: &[u8],
    fonts: &FontDecoders,
    patterns: &[RedactPattern],
) -> Result<(Vec<u8>, usize)> {
    let mut decoded = match Content::decode(content) {
        Ok(decoded) => decoded,
        Err(_) => return Ok((content.to_vec(), 0)),
    };

    let fallback = ByteDecoder::default();
    let mut current_font: Option<Vec<u8>> = None;
    let mut run = TextRun::default();
    let mut removed = 0;

    for operation in decoded.operations.iter_mut() {
        let decoder = current_font
            .as_ref()
            .and_then(|name| fonts.get(name))
            .unwrap_or(&fallback);

        match operation.operator.as_str() {
            "BT" | "ET" => removed += run.flush(patterns),
            "Tf" => {
                current_font = operation
                    .operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .map(<[u8]>::to_vec);
            }
            // The string is the last operand of Tj, ' and "
            "Tj" | "'" | "\"" => {
                if let Some(Object::String(bytes, _)) = operation.operands.last_mut() {
                    run.push_operator(vec![bytes], decoder);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operation.operands.first_mut() {
                    let strings = items
                        .iter_mut()
                        .filter_map(|item| match item {
                            Object::String(bytes, _) => Some(bytes),
                            _ => None,
                        })
                        .collect();
                    run.push_operator(strings, decoder);
                }
            }
            _ => {}
        }
    }
    removed += run.flush(patterns);

    if removed == 0 {
        return Ok((content.to_vec(), 0));
    }

    let encoded = decoded
        .encode()
        .map_err(|e| PdfError::ParseError(format!("Failed to encode content: {e}")))?;

    Ok((encoded, removed))
}
