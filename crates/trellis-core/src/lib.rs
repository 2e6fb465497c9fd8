//! # Trellis core
//!
//! Shared vocabulary for the Trellis widget toolkit. Nothing in here knows
//! about particular widgets; `trellis-ui` builds the tree and the per-frame
//! passes on top of these types.
//!
//! - [`geometry`]: `Vec2`, `Size`, `Rect`, `Insets`.
//! - [`flags`]: the capability/state bitset every widget carries.
//! - [`input`]: normalized input events and the per-frame snapshot.
//! - [`scene`]: the draw stream, split into paint-order buckets and a tree of
//!   clip rects, rebuilt every frame.
//! - [`font`]: the text-metric service trait and shared handles.
//! - [`config`]: `Theme` and `UiConfig`.
//!
//! ## Frame shape
//!
//! ```text
//! host events ──► Context (current snapshot)
//!                 Canvas::update
//!                   ├─ update_state   hover / press / release / focus
//!                   ├─ update_rect    absolute rects, flow, scroll
//!                   └─ render         Scene (order buckets + clip tree)
//!                 Context::end        current ──► previous
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod flags;
pub mod font;
pub mod geometry;
pub mod input;
pub mod scene;

pub use color::*;
pub use config::*;
pub use error::*;
pub use flags::*;
pub use font::*;
pub use geometry::*;
pub use input::{InputEvent, InputSnapshot, Key, Modifiers, MouseButton, MouseButtons};
pub use scene::*;

slotmap::new_key_type! {
    /// Stable handle into the widget arena. A handle whose widget was
    /// removed simply stops resolving.
    pub struct WidgetId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#FF5733"), Color(255, 87, 51, 255));
        assert_eq!(Color::from_hex("#FF5733AA"), Color(255, 87, 51, 170));
        assert_eq!(Color::from_hex("nope"), Color::BLACK);
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(50.0, 30.0)));
        assert!(!rect.contains(Vec2::new(110.0, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 60.0)));
        assert!(!rect.contains(Vec2::new(5.0, 30.0)));
    }

    #[test]
    fn test_rect_intersection_and_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 15.0, 15.0));

        let touching = Rect::new(10.0, 0.0, 5.0, 5.0);
        assert_eq!(a.intersect(&touching), None);
        assert!(!Rect::ZERO.intersects(&a));
    }

    #[test]
    fn test_rect_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 6.0, 6.0).inset(Insets::all(4.0));
        assert_eq!(r, Rect::new(4.0, 4.0, 0.0, 0.0));
    }
}
