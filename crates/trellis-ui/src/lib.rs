#![allow(non_snake_case)]
//! Widget tree, interaction state machine, layout and render walk.
//!
//! A [`Canvas`] owns a [`WidgetTree`]; every frame the host feeds input into
//! a [`Context`] and calls [`Canvas::update`], which runs the state, rect and
//! render passes and returns the frame's [`Scene`](trellis_core::Scene).
//!
//! ```no_run
//! use trellis_core::{Rect, UiConfig};
//! use trellis_ui::{Button, Canvas, Container, Context, Direction};
//!
//! let mut canvas = Canvas::new(UiConfig::default());
//! let mut ctx = Context::new();
//! let col = canvas
//!     .add_child(canvas.root(), Container("menu", Direction::Vertical).size(200.0, 300.0))
//!     .unwrap();
//! canvas
//!     .add_child(col, Button("quit", "Quit").height(24.0).on_click(|| println!("bye")))
//!     .unwrap();
//!
//! ctx.begin();
//! let scene = canvas.update(&mut ctx, Rect::new(0.0, 0.0, 800.0, 600.0));
//! ctx.end();
//! # let _ = scene;
//! ```

pub mod canvas;
pub mod console;
pub mod context;
pub mod layout;
mod render;
mod state;
pub mod tree;
pub mod widget;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use canvas::Canvas;
pub use console::{CommandError, CommandRegistry, Console};
pub use context::{Context, UiEvent, UiEventKind};
pub use layout::{Direction, Layout};
pub use tree::WidgetTree;
pub use widget::{Behavior, HookCx, Node, Resources, Widget, WidgetDesc, WidgetKind};
pub use widgets::{Button, EditState, Label, Panel, TextEdit, Window};

use crate::widgets as w;

pub fn Container(name: impl Into<String>, direction: Direction) -> WidgetDesc {
    WidgetDesc::new(name, WidgetKind::Container(w::Panel::default())).direction(direction)
}

pub fn Button(name: impl Into<String>, label: impl Into<String>) -> WidgetDesc {
    WidgetDesc::new(name, WidgetKind::Button(w::Button::new(label)))
}

pub fn Label(name: impl Into<String>, text: impl Into<String>) -> WidgetDesc {
    WidgetDesc::new(name, WidgetKind::Label(w::Label::new(text)))
}

/// Focusable single-line editor holding `value`.
pub fn TextEdit(name: impl Into<String>, value: impl Into<String>) -> WidgetDesc {
    WidgetDesc::new(name, WidgetKind::TextEdit(w::TextEdit::new(value)))
}

/// Container with a draggable title bar.
pub fn Window(name: impl Into<String>, title: impl Into<String>) -> WidgetDesc {
    WidgetDesc::new(name, WidgetKind::Window(w::Window::new(title)))
}
