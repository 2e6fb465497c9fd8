//! Container flow and scrolling.
//!
//! A container places its visible children one after another along its
//! direction (or leaves them at their own positions for `Direction::None`),
//! starting at its padded origin shifted back by the scroll offset. The
//! offset lives in two halves: `scroll` is what placement uses this frame,
//! `pending_scroll` is where wheel input lands. The state pass commits the
//! pending half, so running the rect pass twice in a row never moves
//! anything.

use smallvec::SmallVec;
use slotmap::SlotMap;
use trellis_core::{Insets, Rect, Size, Vec2, WidgetId};

use crate::context::Context;
use crate::widget::{Resources, Widget};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Children keep their own positions relative to the padded origin.
    #[default]
    None,
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub direction: Direction,
    pub padding: Insets,
    pub spacing: f32,
    pub scroll_x: bool,
    pub scroll_y: bool,
    /// Offset used for placement this frame.
    pub scroll: Vec2,
    /// Offset requested by wheel input, committed on the next state pass.
    pub pending_scroll: Vec2,
    /// Union of the placed children's rects, in absolute coordinates.
    pub content: Rect,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Direction::None)
    }
}

impl Layout {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            padding: Insets::ZERO,
            spacing: 0.0,
            scroll_x: false,
            scroll_y: false,
            scroll: Vec2::ZERO,
            pending_scroll: Vec2::ZERO,
            content: Rect::ZERO,
        }
    }

    pub fn is_scrollable(&self) -> bool {
        self.scroll_x || self.scroll_y
    }

    /// Largest offset per axis that still keeps content covering the
    /// viewport. Non-scrollable axes are pinned to zero.
    pub fn max_scroll(&self, extent: Size, viewport: Size) -> Vec2 {
        let over = |on: bool, content: f32, pad: f32, view: f32| {
            if on {
                (content + pad - view).max(0.0)
            } else {
                0.0
            }
        };
        Vec2::new(
            over(self.scroll_x, extent.width, self.padding.horizontal(), viewport.width),
            over(self.scroll_y, extent.height, self.padding.vertical(), viewport.height),
        )
    }

    /// Asks the next layout to show the far end of the content.
    pub fn scroll_to_end(&mut self) {
        if self.scroll_x {
            self.pending_scroll.x = f32::MAX;
        }
        if self.scroll_y {
            self.pending_scroll.y = f32::MAX;
        }
    }
}

fn clamp_offset(v: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(v.x.clamp(0.0, max.x), v.y.clamp(0.0, max.y))
}

/// Size the children occupy from the padded origin, ignoring scroll.
fn flow_extent(
    widgets: &SlotMap<WidgetId, Widget>,
    children: &[WidgetId],
    layout: &Layout,
) -> Size {
    let mut w = 0.0f32;
    let mut h = 0.0f32;
    for (i, &c) in children.iter().enumerate() {
        let n = &widgets[c].node;
        let (cw, ch) = (n.position.x + n.size.width, n.position.y + n.size.height);
        let gap = if i > 0 { layout.spacing } else { 0.0 };
        match layout.direction {
            Direction::None => {
                w = w.max(cw);
                h = h.max(ch);
            }
            Direction::Horizontal => {
                w += gap + cw;
                h = h.max(ch);
            }
            Direction::Vertical => {
                w = w.max(cw);
                h += gap + ch;
            }
        }
    }
    Size::new(w.max(0.0), h.max(0.0))
}

/// Recomputes `id`'s absolute rect from `offset` and, for containers, lays
/// out the subtree.
pub(crate) fn layout_widget(
    widgets: &mut SlotMap<WidgetId, Widget>,
    res: &Resources,
    ctx: &mut Context,
    id: WidgetId,
    offset: Vec2,
) {
    let Some(w) = widgets.get_mut(id) else {
        return;
    };
    if !w.node.flags.is_visible() {
        return;
    }
    w.node.rect = w.node.calculate_absolute_rect(offset);
    if w.layout.is_some() {
        layout_children(widgets, res, ctx, id);
    }
}

fn layout_children(
    widgets: &mut SlotMap<WidgetId, Widget>,
    res: &Resources,
    ctx: &mut Context,
    id: WidgetId,
) {
    let (rect, layout, hovered, children) = {
        let w = &widgets[id];
        let Some(layout) = w.layout else {
            return;
        };
        let children: SmallVec<[WidgetId; 16]> = w
            .children
            .iter()
            .copied()
            .filter(|c| widgets.get(*c).is_some_and(|cw| cw.node.flags.is_visible()))
            .collect();
        (w.node.rect, layout, w.node.flags.is_hovered(), children)
    };

    if layout.direction == Direction::Vertical {
        let fill = (rect.w - layout.padding.horizontal()).max(0.0);
        for &c in &children {
            let n = &mut widgets[c].node;
            if n.fill_width {
                n.size.width = fill;
            }
        }
    }

    let extent = flow_extent(widgets, &children, &layout);
    let max = layout.max_scroll(extent, rect.size());
    let scroll = clamp_offset(layout.scroll, max);

    let origin = Vec2::new(rect.x + layout.padding.left, rect.y + layout.padding.top) - scroll;
    let mut cursor = origin;
    let mut content: Option<Rect> = None;
    for &c in &children {
        let at = match layout.direction {
            Direction::None => origin,
            Direction::Horizontal => Vec2::new(cursor.x, origin.y),
            Direction::Vertical => Vec2::new(origin.x, cursor.y),
        };
        layout_widget(widgets, res, ctx, c, at);
        let r = widgets[c].node.rect;
        match layout.direction {
            Direction::None => {}
            Direction::Horizontal => cursor.x = r.right() + layout.spacing,
            Direction::Vertical => cursor.y = r.bottom() + layout.spacing,
        }
        content = Some(content.map_or(r, |u| u.union(&r)));
    }

    let mut pending = clamp_offset(layout.pending_scroll, max);
    if hovered && layout.is_scrollable() {
        if let Some(wheel) = ctx.take_wheel() {
            let speed = res.config.scroll_speed;
            let step = Vec2::new(
                if layout.scroll_x { wheel.x * speed } else { 0.0 },
                if layout.scroll_y { wheel.y * speed } else { 0.0 },
            );
            pending = clamp_offset(pending - step, max);
            log::trace!("wheel {wheel:?} on {id:?}: pending scroll {pending:?}");
        }
    }

    if let Some(l) = widgets[id].layout.as_mut() {
        l.scroll = scroll;
        l.pending_scroll = pending;
        l.content = content.unwrap_or(Rect::new(origin.x, origin.y, 0.0, 0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_only_counts_scrollable_axes() {
        let mut l = Layout::new(Direction::Vertical);
        l.padding = Insets::all(4.0);
        l.scroll_y = true;
        let max = l.max_scroll(Size::new(900.0, 836.0), Size::new(200.0, 512.0));
        assert_eq!(max, Vec2::new(0.0, 332.0));

        let short = l.max_scroll(Size::new(10.0, 100.0), Size::new(200.0, 512.0));
        assert_eq!(short, Vec2::ZERO);
    }

    #[test]
    fn offsets_clamp_into_range() {
        let max = Vec2::new(0.0, 50.0);
        assert_eq!(clamp_offset(Vec2::new(-3.0, 80.0), max), Vec2::new(0.0, 50.0));
        assert_eq!(clamp_offset(Vec2::new(9.0, -1.0), max), Vec2::ZERO);
    }
}
