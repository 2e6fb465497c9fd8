//! Grapheme-index helpers. Every caret/selection index in Trellis counts
//! extended grapheme clusters, never bytes.

use unicode_segmentation::UnicodeSegmentation;

pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of grapheme `index`; indices past the end map to `text.len()`.
pub fn byte_offset(text: &str, index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(index)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// The first `index` graphemes.
pub fn prefix(text: &str, index: usize) -> &str {
    &text[..byte_offset(text, index)]
}

/// Byte range covering graphemes `start..start + count`.
pub fn byte_range(text: &str, start: usize, count: usize) -> std::ops::Range<usize> {
    byte_offset(text, start)..byte_offset(text, start + count)
}
