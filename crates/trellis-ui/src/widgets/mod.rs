//! Built-in widget kinds.

mod button;
mod label;
mod text_edit;
mod window;

pub use button::Button;
pub use label::Label;
pub use text_edit::{EditState, TextEdit};
pub use window::Window;

use trellis_core::{Color, Scene};

use crate::widget::{Behavior, Node, Resources};

/// Plain container body: an optional background behind its children.
#[derive(Clone, Debug, Default)]
pub struct Panel {
    pub background: Option<Color>,
}

impl Behavior for Panel {
    fn on_render(&self, node: &Node, scene: &mut Scene, _res: &Resources) {
        if let Some(bg) = self.background {
            scene.draw_rect(node.rect, bg, node.texture);
        }
    }
}
