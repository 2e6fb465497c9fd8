use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::{Rect, Size, Vec2};

/// Read-only text metric queries. Indices count grapheme clusters.
pub trait FontMetrics {
    fn name(&self) -> &str;

    fn line_height(&self) -> f32;

    fn measure_text(&self, text: &str) -> Size;

    /// Number of caret stops minus one.
    fn grapheme_count(&self, text: &str) -> usize;

    /// Top-left of the caret placed before grapheme `index`, relative to the
    /// text origin.
    fn cursor_position(&self, text: &str, index: usize) -> Vec2;

    /// Rect covering `count` graphemes starting at `start`, relative to the
    /// text origin.
    fn selection_rect(&self, text: &str, start: usize, count: usize) -> Rect {
        let a = self.cursor_position(text, start);
        let b = self.cursor_position(text, start + count);
        Rect::new(a.x, a.y, (b.x - a.x).max(0.0), self.line_height())
    }

    /// Nearest caret index for a horizontal offset into the text.
    fn index_for_x(&self, text: &str, x: f32) -> usize {
        let len = self.grapheme_count(text);
        let mut best = 0usize;
        let mut best_d = f32::INFINITY;
        for i in 0..=len {
            let d = (self.cursor_position(text, i).x - x).abs();
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        best
    }
}

/// Shared, reference-counted font. Cloning shares the same metrics table.
#[derive(Clone)]
pub struct FontHandle(Rc<dyn FontMetrics>);

impl FontHandle {
    pub fn new(font: impl FontMetrics + 'static) -> Self {
        Self(Rc::new(font))
    }

    pub fn ptr_eq(&self, other: &FontHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for FontHandle {
    type Target = dyn FontMetrics;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontHandle").field(&self.0.name()).finish()
    }
}

/// Opaque texture/material handle understood by the graphics backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    /// The backend's 1×1 white texture; untextured rects draw with it.
    pub const WHITE: TextureId = TextureId(0);
}
