//! Frame-scoped interaction context.
//!
//! The context owns the input snapshots and the four interaction slots
//! (hovered leaf, hovered container, pressed, focused). During a state pass
//! widgets under the cursor register as candidates; when the pass finishes
//! the best candidate of each kind becomes the *nominated* winner, which the
//! next pass turns into enter/press transitions.

use trellis_core::{InputEvent, InputSnapshot, Key, MouseButton, Vec2, WidgetId};

#[derive(Clone, Debug, PartialEq)]
pub enum UiEventKind {
    HoveredEnter,
    HoveredExit,
    Pressed,
    Released,
    FocusEnter,
    FocusExit,
    /// A text edit accepted its buffer.
    Committed(String),
}

/// A state transition observed during the last state pass.
#[derive(Clone, Debug, PartialEq)]
pub struct UiEvent {
    pub widget: WidgetId,
    pub kind: UiEventKind,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    id: WidgetId,
    order: u8,
}

/// Higher order wins; on a tie the later registration (deeper, or a later
/// sibling) wins.
fn offer(slot: &mut Option<Candidate>, id: WidgetId, order: u8) {
    match slot {
        Some(best) if best.order > order => {}
        _ => *slot = Some(Candidate { id, order }),
    }
}

#[derive(Default)]
pub struct Context {
    input: InputSnapshot,
    previous: InputSnapshot,
    frame: u64,

    hovered_leaf: Option<WidgetId>,
    hovered_container: Option<WidgetId>,
    pressed: Option<WidgetId>,
    focused: Option<WidgetId>,

    leaf_candidate: Option<Candidate>,
    container_candidate: Option<Candidate>,
    press_leaf_candidate: Option<Candidate>,
    press_container_candidate: Option<Candidate>,

    nominated_leaf: Option<WidgetId>,
    nominated_container: Option<WidgetId>,
    nominated_press: Option<WidgetId>,

    wheel_taken: bool,
    focus_exit_requested: bool,
    text_input: Option<WidgetId>,
    events: Vec<UiEvent>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a frame: drops last frame's UI events and wheel claim. Input
    /// fed before this call is kept.
    pub fn begin(&mut self) {
        self.frame += 1;
        self.events.clear();
        self.wheel_taken = false;
    }

    /// Ends a frame: the current snapshot becomes the previous one and its
    /// edges are cleared.
    pub fn end(&mut self) {
        self.previous = self.input.clone();
        self.input.clear_edges();
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    pub fn cursor_moved(&mut self, position: Vec2) {
        let delta = position - self.input.cursor;
        self.handle_event(InputEvent::CursorMoved { position, delta });
    }

    pub fn wheel(&mut self, delta: Vec2) {
        self.handle_event(InputEvent::Wheel { delta });
    }

    pub fn button_down(&mut self, button: MouseButton) {
        self.handle_event(InputEvent::ButtonDown(button));
    }

    pub fn button_up(&mut self, button: MouseButton) {
        self.handle_event(InputEvent::ButtonUp(button));
    }

    pub fn key_down(&mut self, key: Key) {
        self.handle_event(InputEvent::KeyDown(key));
    }

    pub fn key_up(&mut self, key: Key) {
        self.handle_event(InputEvent::KeyUp(key));
    }

    pub fn char_input(&mut self, c: char) {
        self.handle_event(InputEvent::Char(c));
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn previous_input(&self) -> &InputSnapshot {
        &self.previous
    }

    pub fn hovered_leaf(&self) -> Option<WidgetId> {
        self.hovered_leaf
    }

    pub fn hovered_container(&self) -> Option<WidgetId> {
        self.hovered_container
    }

    pub fn pressed(&self) -> Option<WidgetId> {
        self.pressed
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Transitions produced by this frame's state pass, in traversal order.
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    pub fn events_for(&self, widget: WidgetId) -> impl Iterator<Item = &UiEventKind> {
        self.events
            .iter()
            .filter(move |e| e.widget == widget)
            .map(|e| &e.kind)
    }

    /// This frame's wheel motion, handed out once.
    pub fn take_wheel(&mut self) -> Option<Vec2> {
        if self.wheel_taken || self.input.wheel == Vec2::ZERO {
            return None;
        }
        self.wheel_taken = true;
        Some(self.input.wheel)
    }

    /// Asks the state pass to drop focus from the widget currently running
    /// its update hook.
    pub fn request_focus_exit(&mut self) {
        self.focus_exit_requested = true;
    }

    /// The widget that wants the host's text-input mode, if any.
    pub fn text_input_owner(&self) -> Option<WidgetId> {
        self.text_input
    }

    pub fn begin_text_input(&mut self, owner: WidgetId) {
        log::trace!("text input on for {owner:?}");
        self.text_input = Some(owner);
    }

    pub fn end_text_input(&mut self, owner: WidgetId) {
        if self.text_input == Some(owner) {
            log::trace!("text input off for {owner:?}");
            self.text_input = None;
        }
    }

    /// Clears every reference to widgets that no longer exist.
    pub fn forget(&mut self, ids: &[WidgetId]) {
        let gone = |slot: Option<WidgetId>| slot.filter(|id| !ids.contains(id));
        self.hovered_leaf = gone(self.hovered_leaf);
        self.hovered_container = gone(self.hovered_container);
        self.pressed = gone(self.pressed);
        self.focused = gone(self.focused);
        self.nominated_leaf = gone(self.nominated_leaf);
        self.nominated_container = gone(self.nominated_container);
        self.nominated_press = gone(self.nominated_press);
        self.text_input = gone(self.text_input);
        for c in [
            &mut self.leaf_candidate,
            &mut self.container_candidate,
            &mut self.press_leaf_candidate,
            &mut self.press_container_candidate,
        ] {
            if c.is_some_and(|c| ids.contains(&c.id)) {
                *c = None;
            }
        }
    }

    // State-pass plumbing.

    pub(crate) fn emit(&mut self, widget: WidgetId, kind: UiEventKind) {
        log::trace!("{widget:?}: {kind:?}");
        self.events.push(UiEvent { widget, kind });
    }

    pub(crate) fn start_state_pass(&mut self) {
        self.leaf_candidate = None;
        self.container_candidate = None;
        self.press_leaf_candidate = None;
        self.press_container_candidate = None;
        self.focus_exit_requested = false;
    }

    pub(crate) fn finish_state_pass(&mut self) {
        self.nominated_leaf = self.leaf_candidate.take().map(|c| c.id);
        self.nominated_container = self.container_candidate.take().map(|c| c.id);
        self.nominated_press = self
            .press_leaf_candidate
            .take()
            .or(self.press_container_candidate.take())
            .map(|c| c.id);
        self.press_container_candidate = None;
    }

    pub(crate) fn nominated_hover(&self, container: bool) -> Option<WidgetId> {
        if container {
            self.nominated_container
        } else {
            self.nominated_leaf
        }
    }

    pub(crate) fn nominated_press(&self) -> Option<WidgetId> {
        self.nominated_press
    }

    pub(crate) fn register_hover(&mut self, id: WidgetId, container: bool, order: u8) {
        let slot = if container {
            &mut self.container_candidate
        } else {
            &mut self.leaf_candidate
        };
        offer(slot, id, order);
    }

    pub(crate) fn register_press(&mut self, id: WidgetId, container: bool, order: u8) {
        let slot = if container {
            &mut self.press_container_candidate
        } else {
            &mut self.press_leaf_candidate
        };
        offer(slot, id, order);
    }

    pub(crate) fn set_hovered(&mut self, id: WidgetId, container: bool) {
        if container {
            self.hovered_container = Some(id);
        } else {
            self.hovered_leaf = Some(id);
        }
    }

    pub(crate) fn clear_hovered(&mut self, id: WidgetId) {
        if self.hovered_leaf == Some(id) {
            self.hovered_leaf = None;
        }
        if self.hovered_container == Some(id) {
            self.hovered_container = None;
        }
    }

    pub(crate) fn set_pressed(&mut self, id: Option<WidgetId>) {
        self.pressed = id;
    }

    pub(crate) fn clear_pressed(&mut self, id: WidgetId) {
        if self.pressed == Some(id) {
            self.pressed = None;
        }
    }

    pub(crate) fn set_focused(&mut self, id: Option<WidgetId>) {
        self.focused = id;
    }

    pub(crate) fn take_focus_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_exit_requested)
    }
}
