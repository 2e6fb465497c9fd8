//! The widget arena: stable ids, parent links, ordered children.

use slotmap::SlotMap;
use smallvec::SmallVec;
use trellis_core::{Rect, Size, TreeError, Vec2, WidgetFlags, WidgetId};

use crate::widget::{Node, Resources, Widget, WidgetDesc, WidgetKind};
use crate::widgets::{Button, Label, Panel, TextEdit};

pub struct WidgetTree {
    pub(crate) widgets: SlotMap<WidgetId, Widget>,
    pub(crate) root: WidgetId,
    pub(crate) resources: Resources,
}

impl WidgetTree {
    /// Creates a tree holding only its root container.
    pub fn new(resources: Resources) -> Self {
        let mut widgets = SlotMap::with_key();
        let root = widgets.insert_with_key(|id| Widget {
            node: Node {
                id,
                name: "canvas".into(),
                position: Vec2::ZERO,
                size: Size::ZERO,
                fill_width: false,
                order: 0,
                flags: WidgetFlags::CONTAINER,
                rect: Rect::ZERO,
                font: None,
                texture: None,
            },
            layout: Some(Default::default()),
            kind: WidgetKind::Container(Panel::default()),
            parent: None,
            children: Vec::new(),
        });
        Self {
            widgets,
            root,
            resources,
        }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    /// Arena and resources borrowed apart, for the passes.
    pub(crate) fn split_mut(&mut self) -> (&mut SlotMap<WidgetId, Widget>, &Resources) {
        (&mut self.widgets, &self.resources)
    }

    /// Attaches a new widget as the last child of `parent`, then runs its
    /// `initialize` hook.
    pub fn add_child(&mut self, parent: WidgetId, desc: WidgetDesc) -> Result<WidgetId, TreeError> {
        let Some(p) = self.widgets.get(parent) else {
            return Err(TreeError::StaleWidget(parent));
        };
        if !p.is_container() {
            return Err(TreeError::NotAContainer(parent));
        }
        let order = desc.order.unwrap_or(p.node.order.saturating_sub(1));

        let WidgetDesc {
            name,
            position,
            width,
            height,
            focusable,
            visible,
            font,
            texture,
            layout,
            kind,
            ..
        } = desc;

        let mut flags = WidgetFlags::empty();
        flags.set(WidgetFlags::CONTAINER, layout.is_some());
        flags.set(WidgetFlags::FOCUSABLE, focusable);
        flags.set(WidgetFlags::INVISIBLE, !visible);

        let id = self.widgets.insert_with_key(|id| Widget {
            node: Node {
                id,
                name,
                position,
                size: Size::new(width.unwrap_or(0.0), height),
                fill_width: width.is_none(),
                order,
                flags,
                rect: Rect::ZERO,
                font,
                texture,
            },
            layout,
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.widgets[parent].children.push(id);

        let Widget {
            node, layout, kind, ..
        } = &mut self.widgets[id];
        kind.behavior_mut()
            .initialize(node, layout.as_mut(), &self.resources);

        log::debug!(
            "attached {} '{}' ({id:?}) under {parent:?}, order {order}",
            kind.type_name(),
            node.name
        );
        Ok(id)
    }

    /// `id` and its descendants, parents before children.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack: SmallVec<[WidgetId; 32]> = SmallVec::new();
        stack.push(id);
        while let Some(cur) = stack.pop() {
            let Some(w) = self.widgets.get(cur) else {
                continue;
            };
            out.push(cur);
            stack.extend(w.children.iter().rev().copied());
        }
        out
    }

    /// Detaches and drops `id` with its whole subtree. Returns the removed
    /// ids so callers can forget them elsewhere.
    pub fn remove(&mut self, id: WidgetId) -> Result<Vec<WidgetId>, TreeError> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let Some(parent) = self.widgets.get(id).map(|w| w.parent) else {
            return Err(TreeError::StaleWidget(id));
        };
        if let Some(p) = parent.and_then(|p| self.widgets.get_mut(p)) {
            p.children.retain(|c| *c != id);
        }
        let removed = self.subtree(id);
        for r in &removed {
            self.widgets.remove(*r);
        }
        log::debug!("removed {id:?} and {} descendants", removed.len() - 1);
        Ok(removed)
    }

    /// Depth-first search by name.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.subtree(self.root)
            .into_iter()
            .find(|id| self.widgets[*id].node.name == name)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), TreeError> {
        let w = self
            .widgets
            .get_mut(id)
            .ok_or(TreeError::StaleWidget(id))?;
        w.node.flags.set(WidgetFlags::INVISIBLE, !visible);
        Ok(())
    }

    pub fn set_position(&mut self, id: WidgetId, x: f32, y: f32) -> Result<(), TreeError> {
        let w = self
            .widgets
            .get_mut(id)
            .ok_or(TreeError::StaleWidget(id))?;
        w.node.position = Vec2::new(x, y);
        Ok(())
    }

    pub fn button(&self, id: WidgetId) -> Option<&Button> {
        match &self.widgets.get(id)?.kind {
            WidgetKind::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn label(&self, id: WidgetId) -> Option<&Label> {
        match &self.widgets.get(id)?.kind {
            WidgetKind::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn text_edit(&self, id: WidgetId) -> Option<&TextEdit> {
        match &self.widgets.get(id)?.kind {
            WidgetKind::TextEdit(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_edit_mut(&mut self, id: WidgetId) -> Option<&mut TextEdit> {
        match &mut self.widgets.get_mut(id)?.kind {
            WidgetKind::TextEdit(t) => Some(t),
            _ => None,
        }
    }

    /// Replaces a label's text and re-measures it.
    pub fn set_label_text(&mut self, id: WidgetId, text: impl Into<String>) -> Result<(), TreeError> {
        let w = self
            .widgets
            .get_mut(id)
            .ok_or(TreeError::StaleWidget(id))?;
        if let WidgetKind::Label(l) = &mut w.kind {
            l.text = text.into();
            l.fit(&mut w.node, &self.resources);
        }
        Ok(())
    }
}
