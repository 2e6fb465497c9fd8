use trellis_core::{Color, Scene, Vec2};

use crate::layout::Layout;
use crate::widget::{Behavior, Node, Resources};

#[derive(Clone, Debug, Default)]
pub struct Label {
    pub text: String,
    pub color: Option<Color>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    /// Sizes an auto-width label to its text; height is at least one line.
    pub(crate) fn fit(&self, node: &mut Node, res: &Resources) {
        let font = node.font(res);
        let m = font.measure_text(&self.text);
        let line = font.line_height();
        if node.fill_width {
            node.size.width = m.width;
        }
        node.size.height = node.size.height.max(line);
    }
}

impl Behavior for Label {
    fn initialize(&mut self, node: &mut Node, _layout: Option<&mut Layout>, res: &Resources) {
        self.fit(node, res);
    }

    fn on_render(&self, node: &Node, scene: &mut Scene, res: &Resources) {
        let font = node.font(res);
        let r = node.rect;
        let at = Vec2::new(r.x, r.y + (r.h - font.line_height()) * 0.5);
        let color = self.color.unwrap_or(res.theme().text);
        scene.draw_text(&self.text, at, color, Some(font));
    }
}
