use bitflags::bitflags;

bitflags! {
    /// Capability and interaction-state bits carried by every widget.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u16 {
        /// Owns and positions children.
        const CONTAINER = 1 << 0;
        /// May receive input focus when clicked.
        const FOCUSABLE = 1 << 1;
        const HOVERED = 1 << 2;
        const PRESSED = 1 << 3;
        /// One-frame pulse set on the frame a press resolves over the widget.
        const RELEASED = 1 << 4;
        const FOCUSED = 1 << 5;
        /// Skipped, with its subtree, by every pass.
        const INVISIBLE = 1 << 6;

        /// Bits owned by the state machine; cleared when a widget is detached.
        const INTERACTION = Self::HOVERED.bits()
            | Self::PRESSED.bits()
            | Self::RELEASED.bits()
            | Self::FOCUSED.bits();
    }
}

impl WidgetFlags {
    pub fn is_container(&self) -> bool {
        self.contains(Self::CONTAINER)
    }
    pub fn is_focusable(&self) -> bool {
        self.contains(Self::FOCUSABLE)
    }
    pub fn is_visible(&self) -> bool {
        !self.contains(Self::INVISIBLE)
    }
    pub fn is_hovered(&self) -> bool {
        self.contains(Self::HOVERED)
    }
    pub fn is_pressed(&self) -> bool {
        self.contains(Self::PRESSED)
    }
    pub fn is_released(&self) -> bool {
        self.contains(Self::RELEASED)
    }
    pub fn is_focused(&self) -> bool {
        self.contains(Self::FOCUSED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_mask_leaves_capabilities_alone() {
        let mut f = WidgetFlags::CONTAINER | WidgetFlags::HOVERED | WidgetFlags::FOCUSED;
        f.remove(WidgetFlags::INTERACTION);
        assert_eq!(f, WidgetFlags::CONTAINER);
        assert!(f.is_visible());
    }
}
