use std::rc::Rc;

use trellis_core::{Color, Scene, Vec2};

use crate::layout::Layout;
use crate::widget::{Behavior, HookCx, Node, Resources};

const PAD_X: f32 = 12.0;
const PAD_Y: f32 = 4.0;

#[derive(Default)]
pub struct Button {
    pub label: String,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub background: Option<Color>,
    pub text_color: Option<Color>,
    clicks: u32,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Completed clicks so far.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl Behavior for Button {
    fn initialize(&mut self, node: &mut Node, _layout: Option<&mut Layout>, res: &Resources) {
        let m = node.font(res).measure_text(&self.label);
        if node.size.width <= 0.0 {
            node.size.width = m.width + PAD_X * 2.0;
        }
        if node.size.height <= 0.0 {
            node.size.height = node.font(res).line_height() + PAD_Y * 2.0;
        }
    }

    fn on_released(&mut self, node: &Node, _cx: &mut HookCx<'_>) {
        self.clicks += 1;
        log::debug!("button '{}' clicked ({})", node.name, self.clicks);
        if let Some(cb) = &self.on_click {
            cb();
        }
    }

    fn on_render(&self, node: &Node, scene: &mut Scene, res: &Resources) {
        let th = res.theme();
        let bg = if node.flags.is_pressed() {
            th.button_bg_pressed
        } else if node.flags.is_hovered() {
            th.button_bg_hover
        } else {
            self.background.unwrap_or(th.button_bg)
        };
        let r = node.rect;
        scene.draw_rect(r, bg, node.texture);

        let font = node.font(res);
        let m = font.measure_text(&self.label);
        let at = Vec2::new(r.x + (r.w - m.width) * 0.5, r.y + (r.h - m.height) * 0.5);
        scene.draw_text(
            &self.label,
            at,
            self.text_color.unwrap_or(th.text),
            Some(font),
        );
        if node.flags.is_focused() {
            scene.draw_outline(r, th.focus);
        }
    }
}
