//! Normalized input events and the per-frame snapshot they accumulate into.
//!
//! A host maps its device events into [`InputEvent`]s and feeds them to the
//! UI context. The snapshot keeps *levels* (what is held, where the cursor
//! is) across frames and *edges* (what went down/up, wheel motion, typed
//! characters) only for the frame they arrived in.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::Vec2;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        const LEFT = 1;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn bit(self) -> MouseButtons {
        match self {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    /// A printable key identified by its lowercase character.
    Character(char),
}

impl Key {
    fn modifier(self) -> Modifiers {
        match self {
            Key::ShiftLeft | Key::ShiftRight => Modifiers::SHIFT,
            Key::ControlLeft | Key::ControlRight => Modifiers::CTRL,
            Key::AltLeft | Key::AltRight => Modifiers::ALT,
            _ => Modifiers::empty(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    CursorMoved { position: Vec2, delta: Vec2 },
    Wheel { delta: Vec2 },
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    KeyDown(Key),
    KeyUp(Key),
    Char(char),
}

#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    pub cursor: Vec2,
    /// Accumulated cursor motion this frame.
    pub cursor_delta: Vec2,
    /// Accumulated wheel motion this frame (per axis).
    pub wheel: Vec2,
    pub buttons_down: MouseButtons,
    pub buttons_pressed: MouseButtons,
    pub buttons_released: MouseButtons,
    /// Derived from `keys_down`: set while either side's key is held.
    pub modifiers: Modifiers,
    pub keys_down: SmallVec<[Key; 8]>,
    /// Keys that went down this frame, in arrival order.
    pub keys_pressed: SmallVec<[Key; 8]>,
    pub keys_released: SmallVec<[Key; 8]>,
    /// Characters typed this frame, in arrival order.
    pub chars: SmallVec<[char; 8]>,
}

impl InputSnapshot {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { position, delta } => {
                self.cursor = position;
                self.cursor_delta += delta;
            }
            InputEvent::Wheel { delta } => self.wheel += delta,
            InputEvent::ButtonDown(b) => {
                self.buttons_down.insert(b.bit());
                self.buttons_pressed.insert(b.bit());
            }
            InputEvent::ButtonUp(b) => {
                self.buttons_down.remove(b.bit());
                self.buttons_released.insert(b.bit());
            }
            InputEvent::KeyDown(k) => {
                if !self.keys_down.contains(&k) {
                    self.keys_down.push(k);
                }
                self.keys_pressed.push(k);
                self.sync_modifiers();
            }
            InputEvent::KeyUp(k) => {
                self.keys_down.retain(|d| *d != k);
                self.keys_released.push(k);
                self.sync_modifiers();
            }
            InputEvent::Char(c) => {
                if !c.is_control() {
                    self.chars.push(c);
                }
            }
        }
    }

    fn sync_modifiers(&mut self) {
        self.modifiers = self
            .keys_down
            .iter()
            .fold(Modifiers::empty(), |m, k| m | k.modifier());
    }

    /// Drops this frame's edges, keeping held state and cursor position.
    pub fn clear_edges(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.wheel = Vec2::ZERO;
        self.buttons_pressed = MouseButtons::empty();
        self.buttons_released = MouseButtons::empty();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.chars.clear();
    }

    pub fn is_down(&self, b: MouseButton) -> bool {
        self.buttons_down.contains(b.bit())
    }

    /// Went down this frame.
    pub fn went_down(&self, b: MouseButton) -> bool {
        self.buttons_pressed.contains(b.bit())
    }

    /// Went up this frame.
    pub fn went_up(&self, b: MouseButton) -> bool {
        self.buttons_released.contains(b.bit())
    }

    pub fn key_down(&self, k: Key) -> bool {
        self.keys_down.contains(&k)
    }

    pub fn key_pressed(&self, k: Key) -> bool {
        self.keys_pressed.contains(&k)
    }

    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}
