use trellis_core::{MouseButton, Rect, Scene, Vec2};

use crate::layout::Layout;
use crate::widget::{Behavior, HookCx, Node, Resources};

/// A container with a title bar that drags it around.
#[derive(Clone, Debug, Default)]
pub struct Window {
    pub title: String,
    pub movable: bool,
    title_height: f32,
    dragging: bool,
}

impl Window {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            movable: true,
            ..Default::default()
        }
    }

    pub fn title_bar(&self, rect: Rect) -> Rect {
        Rect::new(rect.x, rect.y, rect.w, self.title_height.min(rect.h))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

impl Behavior for Window {
    fn initialize(&mut self, _node: &mut Node, layout: Option<&mut Layout>, res: &Resources) {
        self.title_height = res.config.window_title_height;
        if let Some(l) = layout {
            l.padding.top += self.title_height;
        }
    }

    fn on_pressed(&mut self, node: &Node, cx: &mut HookCx<'_>) {
        let at = cx.ctx.input().cursor;
        self.dragging = self.movable && self.title_bar(node.rect).contains(at);
    }

    fn on_update(&mut self, node: &mut Node, cx: &mut HookCx<'_>) {
        if !self.dragging {
            return;
        }
        let input = cx.ctx.input();
        if node.flags.is_pressed() && input.is_down(MouseButton::Left) {
            let d: Vec2 = input.cursor_delta;
            node.position += d;
        } else {
            self.dragging = false;
            log::debug!("window '{}' dropped at {:?}", node.name, node.position);
        }
    }

    fn on_render(&self, node: &Node, scene: &mut Scene, res: &Resources) {
        let th = res.theme();
        scene.draw_rect(node.rect, th.window_bg, node.texture);
        let bar = self.title_bar(node.rect);
        scene.draw_rect(bar, th.title_bg, None);
        let font = node.font(res);
        let at = Vec2::new(bar.x + 6.0, bar.y + (bar.h - font.line_height()) * 0.5);
        scene.draw_text(&self.title, at, th.title_text, Some(font));
    }
}
