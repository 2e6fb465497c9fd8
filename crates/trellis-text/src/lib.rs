//! Text metrics for Trellis widgets.
//!
//! Widgets only ever ask three questions of a font: how big is this string,
//! where does the caret sit before grapheme *n*, and which rect covers a
//! selection. [`GlyphTable`] answers them from an immutable advance table
//! keyed by character. The built-in monospace table is what a canvas falls
//! back to when a widget names no font.

pub mod graphemes;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use ahash::AHashMap;
use thiserror::Error;
use trellis_core::{FontHandle, FontMetrics, Rect, Size, Vec2};
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_ADVANCE: f32 = 8.0;
pub const DEFAULT_LINE_HEIGHT: f32 = 16.0;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("invalid font data: {0}")]
    Invalid(#[from] ab_glyph::InvalidFont),
}

/// Immutable per-character advance table.
#[derive(Clone, Debug)]
pub struct GlyphTable {
    name: String,
    advances: AHashMap<char, f32>,
    fallback_advance: f32,
    line_height: f32,
}

impl GlyphTable {
    /// Every character advances by the same amount.
    pub fn monospace(advance: f32, line_height: f32) -> Self {
        Self {
            name: format!("mono-{advance}x{line_height}"),
            advances: AHashMap::new(),
            fallback_advance: advance.max(0.0),
            line_height: line_height.max(0.0),
        }
    }

    /// Builds the table from TTF/OTF bytes at `px` pixels. Covers printable
    /// ASCII and Latin-1; other characters use the advance of `'?'`.
    pub fn from_font_bytes(
        name: impl Into<String>,
        data: Vec<u8>,
        px: f32,
    ) -> Result<Self, FontError> {
        let font = FontVec::try_from_vec(data)?;
        let scaled = font.as_scaled(PxScale::from(px));

        let mut advances = AHashMap::new();
        for c in (' '..='~').chain('\u{A0}'..='\u{FF}') {
            let id = font.glyph_id(c);
            if id.0 != 0 {
                advances.insert(c, scaled.h_advance(id));
            }
        }
        let fallback_advance = scaled.h_advance(font.glyph_id('?'));
        let line_height = scaled.ascent() - scaled.descent() + scaled.line_gap();

        let name = name.into();
        log::debug!(
            "loaded glyph table '{name}' at {px}px: {} glyphs, line height {line_height}",
            advances.len()
        );
        Ok(Self {
            name,
            advances,
            fallback_advance,
            line_height,
        })
    }

    pub fn with_advance(mut self, c: char, advance: f32) -> Self {
        self.advances.insert(c, advance);
        self
    }

    pub fn advance(&self, c: char) -> f32 {
        self.advances.get(&c).copied().unwrap_or(self.fallback_advance)
    }

    fn cluster_advance(&self, cluster: &str) -> f32 {
        cluster.chars().next().map(|c| self.advance(c)).unwrap_or(0.0)
    }

    pub fn into_handle(self) -> FontHandle {
        FontHandle::new(self)
    }
}

impl FontMetrics for GlyphTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn measure_text(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let width = text.graphemes(true).map(|g| self.cluster_advance(g)).sum();
        Size::new(width, self.line_height)
    }

    fn grapheme_count(&self, text: &str) -> usize {
        graphemes::grapheme_count(text)
    }

    fn cursor_position(&self, text: &str, index: usize) -> Vec2 {
        let x = text
            .graphemes(true)
            .take(index)
            .map(|g| self.cluster_advance(g))
            .sum();
        Vec2::new(x, 0.0)
    }

    fn selection_rect(&self, text: &str, start: usize, count: usize) -> Rect {
        let len = graphemes::grapheme_count(text);
        assert!(
            start + count <= len,
            "selection {start}+{count} outside text of {len} graphemes"
        );
        let x0 = self.cursor_position(text, start).x;
        let x1 = self.cursor_position(text, start + count).x;
        Rect::new(x0, 0.0, x1 - x0, self.line_height)
    }
}

/// The fallback font every canvas starts with.
pub fn default_font() -> FontHandle {
    GlyphTable::monospace(DEFAULT_ADVANCE, DEFAULT_LINE_HEIGHT).into_handle()
}
