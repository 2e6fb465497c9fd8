//! Per-frame draw stream with nested paint-order buckets and clip rects.
//!
//! A `Scene` is rebuilt from scratch every render pass. Commands are appended
//! to the current (order, clip) scope; the backend consumes
//! [`Scene::ordered_batches`], which yields batches bucket by bucket (lower
//! order first) and in emission order inside a bucket.
//!
//! Clip rects form a tree: every pushed clip is the intersection of the
//! requested rect with its parent clip. Pushes hand out scope tokens that
//! must be returned, innermost first, to pop.

use std::fmt::{self, Write as _};

use smallvec::{SmallVec, smallvec};

use crate::{Color, FontHandle, Rect, TextureId, Vec2};

#[derive(Clone, Debug)]
pub enum DrawCmd {
    Rect {
        rect: Rect,
        color: Color,
        texture: TextureId,
    },
    Text {
        text: String,
        position: Vec2,
        color: Color,
        font: Option<FontHandle>,
    },
    Line {
        p0: Vec2,
        p1: Vec2,
        color: Color,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClipIndex(pub u32);

#[derive(Clone, Copy, Debug)]
pub struct ClipNode {
    pub rect: Rect,
    pub parent: Option<ClipIndex>,
}

#[derive(Clone, Debug)]
pub struct Batch {
    pub order: u8,
    pub clip: ClipIndex,
    pub commands: Vec<DrawCmd>,
}

/// Returned by [`Scene::push_order`]; hand it back to pop.
#[must_use]
#[derive(Debug)]
pub struct OrderScope {
    depth: usize,
}

/// Returned by [`Scene::push_clip`]; hand it back to pop.
#[must_use]
#[derive(Debug)]
pub struct ClipScope {
    index: ClipIndex,
    depth: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub order_pushes: usize,
    pub order_pops: usize,
    pub clip_pushes: usize,
    pub clip_pops: usize,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub clear_color: Color,
    clips: Vec<ClipNode>,
    batches: Vec<Batch>,
    order_stack: SmallVec<[u8; 16]>,
    clip_stack: SmallVec<[ClipIndex; 16]>,
    stats: SceneStats,
}

impl Scene {
    /// Starts an empty scene whose root clip is `screen` and whose ambient
    /// order is `base_order`.
    pub fn new(screen: Rect, base_order: u8) -> Self {
        Self {
            clear_color: Color::BLACK,
            clips: vec![ClipNode {
                rect: screen,
                parent: None,
            }],
            batches: Vec::new(),
            order_stack: smallvec![base_order],
            clip_stack: smallvec![ClipIndex(0)],
            stats: SceneStats::default(),
        }
    }

    pub fn current_order(&self) -> u8 {
        self.order_stack.last().copied().unwrap_or(0)
    }

    pub fn current_clip(&self) -> ClipIndex {
        self.clip_stack.last().copied().unwrap_or(ClipIndex(0))
    }

    pub fn clip_rect(&self) -> Rect {
        self.clips[self.current_clip().0 as usize].rect
    }

    pub fn clip(&self, index: ClipIndex) -> Option<&ClipNode> {
        self.clips.get(index.0 as usize)
    }

    pub fn push_order(&mut self, order: u8) -> OrderScope {
        let depth = self.order_stack.len();
        self.order_stack.push(order);
        self.stats.order_pushes += 1;
        OrderScope { depth }
    }

    pub fn pop_order(&mut self, scope: OrderScope) {
        assert!(
            scope.depth > 0 && self.order_stack.len() == scope.depth + 1,
            "unbalanced order pop: stack depth {}, scope depth {}",
            self.order_stack.len(),
            scope.depth
        );
        self.order_stack.pop();
        self.stats.order_pops += 1;
    }

    /// Pushes `rect` intersected with the current clip. A disjoint rect
    /// yields an empty clip at its own origin.
    pub fn push_clip(&mut self, rect: Rect) -> ClipScope {
        let parent = self.current_clip();
        let parent_rect = self.clip_rect();
        let clipped = rect
            .intersect(&parent_rect)
            .unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0));
        let index = ClipIndex(self.clips.len() as u32);
        self.clips.push(ClipNode {
            rect: clipped,
            parent: Some(parent),
        });
        let depth = self.clip_stack.len();
        self.clip_stack.push(index);
        self.stats.clip_pushes += 1;
        ClipScope { index, depth }
    }

    pub fn pop_clip(&mut self, scope: ClipScope) {
        assert!(
            scope.depth > 0
                && self.clip_stack.len() == scope.depth + 1
                && self.current_clip() == scope.index,
            "unbalanced clip pop: top {:?}, scope {:?}",
            self.current_clip(),
            scope.index
        );
        self.clip_stack.pop();
        self.stats.clip_pops += 1;
    }

    /// Both stacks are back at their root entries.
    pub fn is_balanced(&self) -> bool {
        self.order_stack.len() == 1 && self.clip_stack.len() == 1
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color, texture: Option<TextureId>) {
        if rect.is_empty() || color.3 == 0 {
            return;
        }
        self.push_cmd(DrawCmd::Rect {
            rect,
            color,
            texture: texture.unwrap_or(TextureId::WHITE),
        });
    }

    pub fn draw_text(
        &mut self,
        text: &str,
        position: Vec2,
        color: Color,
        font: Option<&FontHandle>,
    ) {
        if text.is_empty() {
            return;
        }
        self.push_cmd(DrawCmd::Text {
            text: text.to_owned(),
            position,
            color,
            font: font.cloned(),
        });
    }

    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        self.push_cmd(DrawCmd::Line { p0, p1, color });
    }

    /// Outline drawn as four lines.
    pub fn draw_outline(&mut self, rect: Rect, color: Color) {
        let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        self.draw_line(Vec2::new(l, t), Vec2::new(r, t), color);
        self.draw_line(Vec2::new(r, t), Vec2::new(r, b), color);
        self.draw_line(Vec2::new(r, b), Vec2::new(l, b), color);
        self.draw_line(Vec2::new(l, b), Vec2::new(l, t), color);
    }

    fn push_cmd(&mut self, cmd: DrawCmd) {
        let order = self.current_order();
        let clip = self.current_clip();
        match self.batches.last_mut() {
            Some(b) if b.order == order && b.clip == clip => b.commands.push(cmd),
            _ => self.batches.push(Batch {
                order,
                clip,
                commands: vec![cmd],
            }),
        }
    }

    /// Batches in emission order.
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Batches grouped by bucket, lower order first; emission order is kept
    /// inside a bucket.
    pub fn ordered_batches(&self) -> Vec<&Batch> {
        let mut out: Vec<&Batch> = self.batches.iter().collect();
        out.sort_by_key(|b| b.order);
        out
    }

    pub fn command_count(&self) -> usize {
        self.batches.iter().map(|b| b.commands.len()).sum()
    }

    /// Plain-text listing of the ordered draw stream, one command per line.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for b in self.ordered_batches() {
            let c = self.clips[b.clip.0 as usize].rect;
            let _ = writeln!(
                out,
                "order {} clip {} {} {} {}",
                b.order, c.x, c.y, c.w, c.h
            );
            for cmd in &b.commands {
                let _ = writeln!(out, "  {cmd}");
            }
        }
        out
    }
}

impl fmt::Display for DrawCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCmd::Rect { rect, texture, .. } => write!(
                f,
                "rect {} {} {} {} tex {}",
                rect.x, rect.y, rect.w, rect.h, texture.0
            ),
            DrawCmd::Text { text, position, .. } => {
                write!(f, "text {:?} at {} {}", text, position.x, position.y)
            }
            DrawCmd::Line { p0, p1, .. } => {
                write!(f, "line {} {} -> {} {}", p0.x, p0.y, p1.x, p1.y)
            }
        }
    }
}
