use trellis_core::{FontHandle, Rect, Scene, Size, TreeError, UiConfig, Vec2, WidgetId};

use crate::context::Context;
use crate::layout::layout_widget;
use crate::tree::WidgetTree;
use crate::widget::{Resources, WidgetDesc};
use crate::{render, state};

/// Root of a widget hierarchy and driver of the per-frame passes.
pub struct Canvas {
    tree: WidgetTree,
    screen: Rect,
}

impl Canvas {
    pub fn new(config: UiConfig) -> Self {
        Self::with_font(config, trellis_text::default_font())
    }

    pub fn with_font(config: UiConfig, font: FontHandle) -> Self {
        Self {
            tree: WidgetTree::new(Resources::new(config, font)),
            screen: Rect::ZERO,
        }
    }

    pub fn root(&self) -> WidgetId {
        self.tree.root()
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn resources(&self) -> &Resources {
        self.tree.resources()
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn add_child(&mut self, parent: WidgetId, desc: WidgetDesc) -> Result<WidgetId, TreeError> {
        self.tree.add_child(parent, desc)
    }

    /// Removes `id` with its subtree and clears every context slot that
    /// pointed into it.
    pub fn remove_widget(&mut self, ctx: &mut Context, id: WidgetId) -> Result<(), TreeError> {
        let removed = self.tree.remove(id)?;
        ctx.forget(&removed);
        Ok(())
    }

    /// Runs the three passes in order and returns this frame's scene.
    pub fn update(&mut self, ctx: &mut Context, screen: Rect) -> Scene {
        self.update_state(ctx);
        self.update_rect(ctx, screen);
        self.render()
    }

    pub fn update_state(&mut self, ctx: &mut Context) {
        state::update_state(&mut self.tree, ctx);
    }

    /// Sizes the root to `screen` and recomputes every visible rect.
    /// Idempotent: a second call with no input in between changes nothing.
    pub fn update_rect(&mut self, ctx: &mut Context, screen: Rect) {
        self.screen = screen;
        let root = self.tree.root();
        if let Some(r) = self.tree.get_mut(root) {
            r.node.position = screen.origin();
            r.node.size = Size::new(screen.w, screen.h);
        }
        let (widgets, res) = self.tree.split_mut();
        layout_widget(widgets, res, ctx, root, Vec2::ZERO);
    }

    pub fn render(&self) -> Scene {
        render::render(&self.tree, self.screen)
    }

    /// Moves focus to `id` if it is focusable.
    pub fn set_focus(&mut self, ctx: &mut Context, id: WidgetId) -> Result<(), TreeError> {
        let w = self.tree.get(id).ok_or(TreeError::StaleWidget(id))?;
        if !w.node.flags.is_focusable() {
            log::warn!("'{}' ({id:?}) is not focusable", w.node.name);
            return Ok(());
        }
        let (widgets, res) = self.tree.split_mut();
        state::give_focus(widgets, res, ctx, id);
        Ok(())
    }

    pub fn clear_focus(&mut self, ctx: &mut Context) {
        let (widgets, res) = self.tree.split_mut();
        state::clear_focus(widgets, res, ctx);
    }
}
