use slotmap::SlotMap;
use trellis_core::{Rect, Scene, WidgetId};

use crate::tree::WidgetTree;
use crate::widget::{Resources, Widget};

/// Walks the visible tree into a fresh scene.
///
/// Containers scope their subtree: paint order is pushed when it differs
/// from the ambient one, and the container rect is pushed as a clip. A
/// container or leaf that does not touch the inherited clip is skipped.
pub(crate) fn render(tree: &WidgetTree, screen: Rect) -> Scene {
    let root = tree.root();
    let base = tree.get(root).map(|w| w.node.order).unwrap_or(0);
    let mut scene = Scene::new(screen, base);
    scene.clear_color = tree.resources().theme().background;
    render_widget(&tree.widgets, tree.resources(), &mut scene, root);
    debug_assert!(scene.is_balanced(), "render walk left scopes open");
    scene
}

fn render_widget(
    widgets: &SlotMap<WidgetId, Widget>,
    res: &Resources,
    scene: &mut Scene,
    id: WidgetId,
) {
    let Some(w) = widgets.get(id) else {
        return;
    };
    if !w.node.flags.is_visible() || !w.node.rect.intersects(&scene.clip_rect()) {
        return;
    }
    if !w.node.flags.is_container() {
        w.kind.behavior().on_render(&w.node, scene, res);
        return;
    }

    let order = (w.node.order != scene.current_order()).then(|| scene.push_order(w.node.order));
    let clip = scene.push_clip(w.node.rect);
    w.kind.behavior().on_render(&w.node, scene, res);
    for &c in &w.children {
        render_widget(widgets, res, scene, c);
    }
    scene.pop_clip(clip);
    if let Some(o) = order {
        scene.pop_order(o);
    }
}
