use std::fmt::Write as _;

use web_time::Instant;

use trellis_core::{Color, Rect, Scene, Vec2, WidgetId};
use trellis_ui::{Canvas, Context, WidgetTree};

/// Order the overlay paints at, above anything a widget can ask for.
pub const OVERLAY_ORDER: u8 = u8::MAX;

pub struct Hud {
    pub inspector_enabled: bool,
    pub hovered: Option<Rect>,
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
    pub metrics: Option<Metrics>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            hovered: None,
            frame_count: 0,
            last_frame: None,
            fps_smooth: 0.0,
            metrics: None,
        }
    }

    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
        log::debug!("inspector enabled: {}", self.inspector_enabled);
    }

    pub fn set_hovered(&mut self, r: Option<Rect>) {
        self.hovered = r;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn tick(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        if let Some(prev) = self.last_frame.replace(now) {
            let dt = (now - prev).as_secs_f32();
            if dt > 0.0 {
                let fps = 1.0 / dt;
                // exponential moving average
                let a = 0.2;
                self.fps_smooth = if self.fps_smooth == 0.0 {
                    fps
                } else {
                    (1.0 - a) * self.fps_smooth + a * fps
                };
            }
        }
    }

    pub fn status_line(&self) -> String {
        let mut lines = vec![
            format!("frame: {}", self.frame_count),
            format!("fps: {:.1}", self.fps_smooth),
        ];
        if let Some(m) = &self.metrics {
            lines.push(format!("widgets: {}", m.widgets));
            lines.push(format!("cmds: {} in {} batches", m.commands, m.batches));
        }
        lines.join("  |  ")
    }

    /// Appends the HUD to `scene` in its own top bucket.
    pub fn overlay(&mut self, scene: &mut Scene) {
        self.tick();
        let text = self.status_line();
        let order = scene.push_order(OVERLAY_ORDER);
        scene.draw_text(&text, Vec2::new(8.0, 8.0), Color::from_hex("#AAAAAA"), None);
        if let Some(r) = self.hovered {
            scene.draw_outline(r, Color::from_hex("#44AAFF"));
        }
        scene.pop_order(order);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub widgets: usize,
    pub commands: usize,
    pub batches: usize,
}

pub struct Inspector {
    pub hud: Hud,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }

    /// Collects metrics and the hovered rect, then draws the HUD when the
    /// inspector is on.
    pub fn frame(&mut self, scene: &mut Scene, canvas: &Canvas, ctx: &Context) {
        if !self.hud.inspector_enabled {
            return;
        }
        self.hud.metrics = Some(Metrics {
            widgets: canvas.tree().len(),
            commands: scene.command_count(),
            batches: scene.batches().len(),
        });
        let hovered = ctx
            .hovered_leaf()
            .or(ctx.hovered_container())
            .filter(|id| *id != canvas.root())
            .and_then(|id| canvas.tree().get(id))
            .map(|w| w.node.rect);
        self.hud.set_hovered(hovered);
        self.hud.overlay(scene);
    }
}

/// One line per visible-or-not widget, indented by depth:
/// `Kind 'name' x y w h order N [flags]`.
pub fn dump_tree(tree: &WidgetTree) -> String {
    let mut out = String::new();
    dump(tree, tree.root(), 0, &mut out);
    out
}

fn dump(tree: &WidgetTree, id: WidgetId, depth: usize, out: &mut String) {
    let Some(w) = tree.get(id) else {
        return;
    };
    let n = &w.node;
    let _ = writeln!(
        out,
        "{:indent$}{} '{}' {} {} {} {} order {} {:?}",
        "",
        w.kind.type_name(),
        n.name,
        n.rect.x,
        n.rect.y,
        n.rect.w,
        n.rect.h,
        n.order,
        n.flags,
        indent = depth * 2
    );
    for &c in w.children() {
        dump(tree, c, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::UiConfig;
    use trellis_ui::{Button, Container, Direction};

    #[test]
    fn overlay_lands_in_top_bucket() {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 100.0, 100.0), 0);
        scene.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE, None);
        let mut hud = Hud::new();
        hud.set_hovered(Some(Rect::new(1.0, 1.0, 5.0, 5.0)));
        hud.overlay(&mut scene);

        assert!(scene.is_balanced());
        let last = scene.ordered_batches().last().map(|b| b.order);
        assert_eq!(last, Some(OVERLAY_ORDER));
        assert_eq!(scene.command_count(), 1 + 1 + 4);
        assert_eq!(hud.frame_count(), 1);
    }

    #[test]
    fn tree_dump_is_indented_by_depth() {
        let mut canvas = Canvas::new(UiConfig::default());
        let col = canvas
            .add_child(canvas.root(), Container("col", Direction::Vertical).size(50.0, 50.0))
            .unwrap();
        canvas
            .add_child(col, Button("go", "Go").size(20.0, 10.0))
            .unwrap();
        let dump = dump_tree(canvas.tree());
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Container 'canvas'"));
        assert!(lines[1].starts_with("  Container 'col'"));
        assert!(lines[2].starts_with("    Button 'go' 0 0 0 0 order 0"));
    }
}
