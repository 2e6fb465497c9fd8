//! The interaction state machine, run once per frame over the visible tree.
//!
//! Per widget, in order:
//!
//! 1. invisible widgets are skipped with their subtree;
//! 2. hover is dropped when the widget is no longer the nominated winner;
//! 3. press is dropped once the primary button is up;
//! 4. the one-frame release pulse is cleared;
//! 5. focus is dropped on an outside click or when it moved elsewhere;
//! 6. outside the rect the widget only loses hover;
//! 7. inside it registers as a hover candidate (and as a press candidate on
//!    a fresh click while hovered), then takes at most one of: focus after a
//!    completed click, a release, or a press nominated last frame;
//! 8. a non-hovered nominated winner enters hover.
//!
//! "Inside" means inside the widget's rect and inside every ancestor's, so
//! a child scrolled or overflowed past its container's edge can never be
//! hovered or pressed.
//!
//! A nominated press is only taken while the primary button is still held.
//! If the button already came back up, the press resolves straight into the
//! release pulse: the click fires and the pressed flag is never set.
//!
//! The update hook runs after the rules, then children are visited.

use slotmap::SlotMap;
use smallvec::SmallVec;
use trellis_core::{MouseButton, WidgetFlags, WidgetId};

use crate::context::{Context, UiEventKind};
use crate::tree::WidgetTree;
use crate::widget::{HookCx, Resources, Widget};

pub(crate) fn update_state(tree: &mut WidgetTree, ctx: &mut Context) {
    ctx.start_state_pass();
    if let Some(f) = ctx.focused() {
        if !tree.contains(f) {
            log::warn!("focus slot held a removed widget {f:?}");
            ctx.set_focused(None);
        }
    }
    let root = tree.root();
    let (widgets, res) = tree.split_mut();
    visit(widgets, res, ctx, root, true);
    ctx.finish_state_pass();
}

/// `reachable` is false once some ancestor's rect excludes the cursor.
fn visit(
    widgets: &mut SlotMap<WidgetId, Widget>,
    res: &Resources,
    ctx: &mut Context,
    id: WidgetId,
    reachable: bool,
) {
    let Some(w) = widgets.get_mut(id) else {
        return;
    };
    if !w.node.flags.is_visible() {
        return;
    }

    let was = w.node.flags;
    let container = was.is_container();
    let order = w.node.order;
    let (inside, down, went_down) = {
        let input = ctx.input();
        (
            reachable && w.node.rect.contains(input.cursor),
            input.is_down(MouseButton::Left),
            input.went_down(MouseButton::Left),
        )
    };

    if let Some(l) = w.layout.as_mut() {
        l.scroll = l.pending_scroll;
    }

    if was.is_hovered() && ctx.nominated_hover(container) != Some(id) {
        hover_exit(w, res, ctx);
    }
    if was.is_pressed() && !down {
        w.node.flags.remove(WidgetFlags::PRESSED);
        ctx.clear_pressed(id);
    }
    if was.is_released() {
        w.node.flags.remove(WidgetFlags::RELEASED);
    }
    if w.node.flags.is_focused() && (ctx.focused() != Some(id) || (went_down && !inside)) {
        lose_focus(w, res, ctx);
    }

    let mut promote = false;
    if !inside {
        if w.node.flags.is_hovered() {
            hover_exit(w, res, ctx);
        }
    } else {
        ctx.register_hover(id, container, order);
        let hovered = w.node.flags.is_hovered();
        if hovered && went_down {
            ctx.register_press(id, container, order);
        }

        if hovered && was.is_released() && was.is_focusable() && !w.node.flags.is_focused() {
            promote = true;
        } else if hovered && was.is_pressed() && !down {
            w.node.flags.insert(WidgetFlags::RELEASED);
            ctx.emit(id, UiEventKind::Released);
            let mut cx = HookCx { ctx: &mut *ctx, res };
            w.kind.behavior_mut().on_released(&w.node, &mut cx);
        } else if ctx.nominated_press() == Some(id) && down {
            w.node.flags.insert(WidgetFlags::PRESSED);
            ctx.set_pressed(Some(id));
            ctx.emit(id, UiEventKind::Pressed);
            let mut cx = HookCx { ctx: &mut *ctx, res };
            w.kind.behavior_mut().on_pressed(&w.node, &mut cx);
        } else if ctx.nominated_press() == Some(id) && hovered {
            w.node.flags.insert(WidgetFlags::RELEASED);
            ctx.emit(id, UiEventKind::Released);
            let mut cx = HookCx { ctx: &mut *ctx, res };
            let behavior = w.kind.behavior_mut();
            behavior.on_pressed(&w.node, &mut cx);
            behavior.on_released(&w.node, &mut cx);
        }

        if !hovered && ctx.nominated_hover(container) == Some(id) {
            w.node.flags.insert(WidgetFlags::HOVERED);
            ctx.set_hovered(id, container);
            ctx.emit(id, UiEventKind::HoveredEnter);
            let mut cx = HookCx { ctx: &mut *ctx, res };
            w.kind.behavior_mut().on_hover_enter(&w.node, &mut cx);
        }
    }

    if promote {
        give_focus(widgets, res, ctx, id);
    }

    let Some(w) = widgets.get_mut(id) else {
        return;
    };
    let Widget { node, kind, .. } = &mut *w;
    let mut cx = HookCx { ctx: &mut *ctx, res };
    kind.behavior_mut().on_update(node, &mut cx);
    if ctx.take_focus_exit_request() && w.node.flags.is_focused() {
        lose_focus(w, res, ctx);
    }

    let children: SmallVec<[WidgetId; 16]> = w.children.iter().copied().collect();
    for c in children {
        visit(widgets, res, ctx, c, inside);
    }
}

fn hover_exit(w: &mut Widget, res: &Resources, ctx: &mut Context) {
    let id = w.node.id;
    w.node.flags.remove(WidgetFlags::HOVERED);
    ctx.clear_hovered(id);
    ctx.emit(id, UiEventKind::HoveredExit);
    let mut cx = HookCx { ctx: &mut *ctx, res };
    w.kind.behavior_mut().on_hover_exit(&w.node, &mut cx);
}

fn lose_focus(w: &mut Widget, res: &Resources, ctx: &mut Context) {
    let id = w.node.id;
    w.node.flags.remove(WidgetFlags::FOCUSED);
    if ctx.focused() == Some(id) {
        ctx.set_focused(None);
    }
    ctx.emit(id, UiEventKind::FocusExit);
    let mut cx = HookCx { ctx: &mut *ctx, res };
    w.kind.behavior_mut().on_focus_exit(&w.node, &mut cx);
}

/// Moves focus to `id`. The previous holder gets its exit transition first,
/// so at most one widget is ever focused.
pub(crate) fn give_focus(
    widgets: &mut SlotMap<WidgetId, Widget>,
    res: &Resources,
    ctx: &mut Context,
    id: WidgetId,
) {
    if let Some(old) = ctx.focused().filter(|old| *old != id) {
        match widgets.get_mut(old) {
            Some(ow) if ow.node.flags.is_focused() => lose_focus(ow, res, ctx),
            _ => ctx.set_focused(None),
        }
    }
    let Some(w) = widgets.get_mut(id) else {
        return;
    };
    if w.node.flags.is_focused() {
        return;
    }
    w.node.flags.insert(WidgetFlags::FOCUSED);
    ctx.set_focused(Some(id));
    ctx.emit(id, UiEventKind::FocusEnter);
    let mut cx = HookCx { ctx: &mut *ctx, res };
    w.kind.behavior_mut().on_focus_enter(&w.node, &mut cx);
}

/// Drops focus from whoever holds it.
pub(crate) fn clear_focus(
    widgets: &mut SlotMap<WidgetId, Widget>,
    res: &Resources,
    ctx: &mut Context,
) {
    let Some(old) = ctx.focused() else {
        return;
    };
    match widgets.get_mut(old) {
        Some(w) if w.node.flags.is_focused() => lose_focus(w, res, ctx),
        _ => ctx.set_focused(None),
    }
}
