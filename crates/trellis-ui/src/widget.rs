//! Widget nodes and the lifecycle hooks every widget kind plugs into.
//!
//! A [`Widget`] is split into the data the passes share ([`Node`]), the
//! optional [`Layout`] a container carries, and the kind-specific state in
//! [`WidgetKind`]. Keeping them as separate fields lets a hook borrow the
//! kind mutably while reading the node.

use std::rc::Rc;

use trellis_core::{
    Color, FontHandle, Insets, Rect, Scene, Size, TextureId, Theme, UiConfig, Vec2, WidgetFlags,
    WidgetId,
};

use crate::context::Context;
use crate::layout::{Direction, Layout};
use crate::widgets::{Button, Label, Panel, TextEdit, Window};

/// Canvas-wide resources every hook can read.
#[derive(Clone, Debug)]
pub struct Resources {
    pub config: UiConfig,
    /// Used by any widget that does not name its own font.
    pub font: FontHandle,
}

impl Resources {
    pub fn new(config: UiConfig, font: FontHandle) -> Self {
        Self { config, font }
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }
}

/// Data shared by every widget, independent of its kind.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: WidgetId,
    pub name: String,
    /// Offset from the origin the parent hands down.
    pub position: Vec2,
    pub size: Size,
    /// Width is assigned by a vertical parent.
    pub fill_width: bool,
    pub order: u8,
    pub flags: WidgetFlags,
    /// Absolute rect, recomputed by every rect pass.
    pub rect: Rect,
    pub font: Option<FontHandle>,
    pub texture: Option<TextureId>,
}

impl Node {
    pub fn calculate_absolute_rect(&self, offset: Vec2) -> Rect {
        Rect::from_origin_size(offset + self.position, self.size)
    }

    pub fn font<'a>(&'a self, res: &'a Resources) -> &'a FontHandle {
        self.font.as_ref().unwrap_or(&res.font)
    }
}

/// What a hook gets to touch besides its own node.
pub struct HookCx<'a> {
    pub ctx: &'a mut Context,
    pub res: &'a Resources,
}

/// Lifecycle hooks. Every method defaults to doing nothing.
pub trait Behavior {
    /// Runs once, right after the widget is attached.
    fn initialize(&mut self, _node: &mut Node, _layout: Option<&mut Layout>, _res: &Resources) {}

    /// Runs every state pass after the interaction rules.
    fn on_update(&mut self, _node: &mut Node, _cx: &mut HookCx<'_>) {}

    fn on_hover_enter(&mut self, _node: &Node, _cx: &mut HookCx<'_>) {}
    fn on_hover_exit(&mut self, _node: &Node, _cx: &mut HookCx<'_>) {}
    fn on_pressed(&mut self, _node: &Node, _cx: &mut HookCx<'_>) {}
    fn on_released(&mut self, _node: &Node, _cx: &mut HookCx<'_>) {}
    fn on_focus_enter(&mut self, _node: &Node, _cx: &mut HookCx<'_>) {}
    fn on_focus_exit(&mut self, _node: &Node, _cx: &mut HookCx<'_>) {}

    fn on_render(&self, _node: &Node, _scene: &mut Scene, _res: &Resources) {}
}

pub enum WidgetKind {
    Container(Panel),
    Button(Button),
    Label(Label),
    TextEdit(TextEdit),
    Window(Window),
}

impl WidgetKind {
    pub fn behavior(&self) -> &dyn Behavior {
        match self {
            WidgetKind::Container(p) => p,
            WidgetKind::Button(b) => b,
            WidgetKind::Label(l) => l,
            WidgetKind::TextEdit(t) => t,
            WidgetKind::Window(w) => w,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            WidgetKind::Container(p) => p,
            WidgetKind::Button(b) => b,
            WidgetKind::Label(l) => l,
            WidgetKind::TextEdit(t) => t,
            WidgetKind::Window(w) => w,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            WidgetKind::Container(_) => "Container",
            WidgetKind::Button(_) => "Button",
            WidgetKind::Label(_) => "Label",
            WidgetKind::TextEdit(_) => "TextEdit",
            WidgetKind::Window(_) => "Window",
        }
    }
}

pub struct Widget {
    pub node: Node,
    /// `Some` exactly when the widget is a container.
    pub layout: Option<Layout>,
    pub kind: WidgetKind,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
}

impl Widget {
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn is_container(&self) -> bool {
        self.node.flags.is_container()
    }
}

/// Everything needed to attach a widget. Built with the free constructors
/// in the crate root and refined with the chained setters.
pub struct WidgetDesc {
    pub(crate) name: String,
    pub(crate) position: Vec2,
    pub(crate) width: Option<f32>,
    pub(crate) height: f32,
    pub(crate) order: Option<u8>,
    pub(crate) focusable: bool,
    pub(crate) visible: bool,
    pub(crate) font: Option<FontHandle>,
    pub(crate) texture: Option<TextureId>,
    pub(crate) layout: Option<Layout>,
    pub(crate) kind: WidgetKind,
}

impl WidgetDesc {
    pub fn new(name: impl Into<String>, kind: WidgetKind) -> Self {
        let (layout, focusable) = match &kind {
            WidgetKind::Container(_) | WidgetKind::Window(_) => (Some(Layout::default()), false),
            WidgetKind::TextEdit(_) => (None, true),
            _ => (None, false),
        };
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            width: None,
            height: 0.0,
            order: None,
            focusable,
            visible: true,
            font: None,
            texture: None,
            layout,
            kind,
        }
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.width = Some(w);
        self.height = h;
        self
    }

    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        self.height = h;
        self
    }

    /// Explicit paint order; otherwise one less than the parent's.
    pub fn order(mut self, order: u8) -> Self {
        self.order = Some(order);
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn font(mut self, font: FontHandle) -> Self {
        self.font = Some(font);
        self
    }

    pub fn texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        if let Some(l) = self.layout.as_mut() {
            l.direction = direction;
        }
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        if let Some(l) = self.layout.as_mut() {
            l.padding = padding;
        }
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        if let Some(l) = self.layout.as_mut() {
            l.spacing = spacing;
        }
        self
    }

    pub fn scrollable(mut self, x: bool, y: bool) -> Self {
        if let Some(l) = self.layout.as_mut() {
            l.scroll_x = x;
            l.scroll_y = y;
        }
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        match &mut self.kind {
            WidgetKind::Container(p) => p.background = Some(color),
            WidgetKind::Button(b) => b.background = Some(color),
            _ => {}
        }
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        match &mut self.kind {
            WidgetKind::Button(b) => b.text_color = Some(color),
            WidgetKind::Label(l) => l.color = Some(color),
            _ => {}
        }
        self
    }

    pub fn on_click(mut self, f: impl Fn() + 'static) -> Self {
        if let WidgetKind::Button(b) = &mut self.kind {
            b.on_click = Some(Rc::new(f));
        }
        self
    }

    pub fn on_commit(mut self, f: impl Fn(&str) + 'static) -> Self {
        if let WidgetKind::TextEdit(t) = &mut self.kind {
            t.on_commit = Some(Rc::new(f));
        }
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        if let WidgetKind::TextEdit(t) = &mut self.kind {
            t.placeholder = text.into();
        }
        self
    }

    pub fn commit_on_lost_focus(mut self, on: bool) -> Self {
        if let WidgetKind::TextEdit(t) = &mut self.kind {
            t.commit_on_lost_focus = on;
        }
        self
    }

    pub fn exit_focus_on_enter(mut self, on: bool) -> Self {
        if let WidgetKind::TextEdit(t) = &mut self.kind {
            t.exit_focus_on_enter = on;
        }
        self
    }
}
