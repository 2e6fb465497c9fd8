//! Single-line editable text.
//!
//! The committed `value` and the working `buffer` are kept apart: typing
//! only touches the buffer, and Enter (or losing focus, unless cancelled
//! with Escape) copies it into the value and emits `Committed`. Losing focus
//! right after an Enter with no edits in between does not commit again.
//! Caret and selection are grapheme indices into the buffer.

use std::rc::Rc;

use trellis_core::{Key, MouseButton, Rect, Scene, Vec2};
use trellis_text::graphemes;

use crate::context::UiEventKind;
use crate::widget::{Behavior, HookCx, Node, Resources};

const PAD_X: f32 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing,
    /// Mouse held after a press inside the focused field.
    Dragging,
}

pub struct TextEdit {
    pub value: String,
    pub placeholder: String,
    pub commit_on_lost_focus: bool,
    pub exit_focus_on_enter: bool,
    pub on_commit: Option<Rc<dyn Fn(&str)>>,
    buffer: String,
    cursor: usize,
    anchor: usize,
    state: EditState,
    cancelled: bool,
    /// Buffer committed and untouched since.
    committed: bool,
    scroll_x: f32,
}

impl Default for TextEdit {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextEdit {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            buffer: value.clone(),
            value,
            placeholder: String::new(),
            commit_on_lost_focus: true,
            exit_focus_on_enter: true,
            on_commit: None,
            cursor: 0,
            anchor: 0,
            state: EditState::Idle,
            cancelled: false,
            committed: false,
            scroll_x: 0.0,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn has_selection(&self) -> bool {
        self.cursor != self.anchor
    }

    /// First selected grapheme and how many are selected.
    pub fn selection(&self) -> (usize, usize) {
        let start = self.cursor.min(self.anchor);
        (start, self.cursor.max(self.anchor) - start)
    }

    pub fn selected_text(&self) -> &str {
        let (start, count) = self.selection();
        &self.buffer[graphemes::byte_range(&self.buffer, start, count)]
    }

    /// Replaces value and buffer and puts the caret at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.buffer = self.value.clone();
        let len = self.len();
        self.cursor = len;
        self.anchor = len;
    }

    pub fn clear(&mut self) {
        self.set_value("");
    }

    fn len(&self) -> usize {
        graphemes::grapheme_count(&self.buffer)
    }

    fn move_to(&mut self, index: usize, extend: bool) {
        self.cursor = index.min(self.len());
        if !extend {
            self.anchor = self.cursor;
        }
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.cursor = self.len();
    }

    fn delete_selection(&mut self) {
        let (start, count) = self.selection();
        assert!(
            start + count <= self.len(),
            "selection {start}+{count} past end of buffer"
        );
        let range = graphemes::byte_range(&self.buffer, start, count);
        self.buffer.replace_range(range, "");
        self.cursor = start;
        self.anchor = start;
        self.committed = false;
    }

    pub fn insert_char(&mut self, c: char) {
        if self.has_selection() {
            self.delete_selection();
        }
        let before = self.len();
        let at = graphemes::byte_offset(&self.buffer, self.cursor);
        self.buffer.insert(at, c);
        self.committed = false;
        let grown = self.len() - before;
        self.move_to(self.cursor + grown, false);
    }

    pub fn delete_backward(&mut self) {
        if self.has_selection() {
            self.delete_selection();
        } else if self.cursor > 0 {
            let range = graphemes::byte_range(&self.buffer, self.cursor - 1, 1);
            self.buffer.replace_range(range, "");
            self.committed = false;
            self.move_to(self.cursor - 1, false);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.has_selection() {
            self.delete_selection();
        } else if self.cursor < self.len() {
            let range = graphemes::byte_range(&self.buffer, self.cursor, 1);
            self.buffer.replace_range(range, "");
            self.committed = false;
        }
    }

    fn move_left(&mut self, extend: bool) {
        if !extend && self.has_selection() {
            let (start, _) = self.selection();
            self.move_to(start, false);
        } else {
            self.move_to(self.cursor.saturating_sub(1), extend);
        }
    }

    fn move_right(&mut self, extend: bool) {
        if !extend && self.has_selection() {
            let (start, count) = self.selection();
            self.move_to(start + count, false);
        } else {
            self.move_to(self.cursor + 1, extend);
        }
    }

    fn commit(&mut self, node: &Node, cx: &mut HookCx<'_>) {
        self.value = self.buffer.clone();
        self.committed = true;
        log::debug!("'{}' committed {:?}", node.name, self.value);
        cx.ctx
            .emit(node.id, UiEventKind::Committed(self.value.clone()));
        if let Some(cb) = &self.on_commit {
            cb(&self.value);
        }
    }

    fn text_origin(&self, node: &Node, res: &Resources) -> Vec2 {
        let r = node.rect;
        let lh = node.font(res).line_height();
        Vec2::new(r.x + PAD_X - self.scroll_x, r.y + (r.h - lh) * 0.5)
    }

    fn index_at(&self, node: &Node, res: &Resources, x: f32) -> usize {
        let local = x - self.text_origin(node, res).x;
        node.font(res).index_for_x(&self.buffer, local)
    }

    /// Keeps the caret inside the visible part of the field.
    fn follow_caret(&mut self, node: &Node, res: &Resources) {
        let inner = (node.rect.w - PAD_X * 2.0).max(0.0);
        let caret = node.font(res).cursor_position(&self.buffer, self.cursor).x;
        if caret - self.scroll_x > inner {
            self.scroll_x = caret - inner;
        } else if caret < self.scroll_x {
            self.scroll_x = caret;
        }
        self.scroll_x = self.scroll_x.max(0.0);
    }

    fn handle_keys(&mut self, node: &Node, cx: &mut HookCx<'_>) {
        let input = cx.ctx.input();
        let shift = input.shift();
        let ctrl = input.ctrl();
        let chars = input.chars.clone();
        let keys = input.keys_pressed.clone();

        if !ctrl {
            for c in chars {
                self.insert_char(c);
            }
        }
        for key in keys {
            match key {
                Key::Backspace => self.delete_backward(),
                Key::Delete => self.delete_forward(),
                Key::Left => self.move_left(shift),
                Key::Right => self.move_right(shift),
                Key::Home => self.move_to(0, shift),
                Key::End => self.move_to(self.len(), shift),
                Key::Character('a') if ctrl => self.select_all(),
                Key::Enter => {
                    self.commit(node, cx);
                    if self.exit_focus_on_enter {
                        cx.ctx.request_focus_exit();
                    }
                }
                Key::Escape => {
                    self.cancelled = true;
                    cx.ctx.request_focus_exit();
                }
                _ => {}
            }
        }
    }
}

impl Behavior for TextEdit {
    fn initialize(
        &mut self,
        node: &mut Node,
        _layout: Option<&mut crate::layout::Layout>,
        res: &Resources,
    ) {
        if node.size.height <= 0.0 {
            node.size.height = node.font(res).line_height() + 8.0;
        }
        if node.size.width <= 0.0 {
            node.size.width = 160.0;
        }
        let len = self.len();
        self.cursor = len;
        self.anchor = len;
    }

    fn on_focus_enter(&mut self, node: &Node, cx: &mut HookCx<'_>) {
        self.buffer = self.value.clone();
        self.move_to(self.len(), false);
        self.cancelled = false;
        self.committed = false;
        self.state = EditState::Editing;
        cx.ctx.begin_text_input(node.id);
    }

    fn on_focus_exit(&mut self, node: &Node, cx: &mut HookCx<'_>) {
        if !self.cancelled && self.commit_on_lost_focus && !self.committed {
            self.commit(node, cx);
        }
        self.cancelled = false;
        self.state = EditState::Idle;
        self.buffer = self.value.clone();
        self.scroll_x = 0.0;
        cx.ctx.end_text_input(node.id);
    }

    fn on_pressed(&mut self, node: &Node, cx: &mut HookCx<'_>) {
        if !node.flags.is_focused() {
            return;
        }
        let input = cx.ctx.input();
        let at = self.index_at(node, cx.res, input.cursor.x);
        self.move_to(at, input.shift());
        self.state = EditState::Dragging;
    }

    fn on_update(&mut self, node: &mut Node, cx: &mut HookCx<'_>) {
        if !node.flags.is_focused() || self.state == EditState::Idle {
            return;
        }
        if self.state == EditState::Dragging {
            let input = cx.ctx.input();
            if input.is_down(MouseButton::Left) {
                let at = self.index_at(node, cx.res, input.cursor.x);
                self.move_to(at, true);
            } else {
                self.state = EditState::Editing;
            }
        }
        self.handle_keys(node, cx);
        self.follow_caret(node, cx.res);
    }

    fn on_render(&self, node: &Node, scene: &mut Scene, res: &Resources) {
        let th = res.theme();
        let r = node.rect;
        let focused = node.flags.is_focused();
        let bg = if focused { th.edit_bg_focused } else { th.edit_bg };
        scene.draw_rect(r, bg, node.texture);

        let font = node.font(res);
        let origin = self.text_origin(node, res);
        let editing = self.state != EditState::Idle;
        let text = if editing { &self.buffer } else { &self.value };

        if editing && self.has_selection() {
            let (start, count) = self.selection();
            let sel = font.selection_rect(text, start, count).translate(origin);
            scene.draw_rect(sel, th.selection, None);
        }
        if text.is_empty() && !editing {
            scene.draw_text(&self.placeholder, origin, th.text_muted, Some(font));
        } else {
            scene.draw_text(text, origin, th.text, Some(font));
        }
        if editing {
            let x = origin.x + font.cursor_position(text, self.cursor).x;
            let caret = Rect::new(x, origin.y, res.config.caret_width, font.line_height());
            scene.draw_rect(caret, th.caret, None);
        }
        if focused {
            scene.draw_outline(r, th.focus);
        }
    }
}
