//! winit events to core input events.

use piano_core::constants::WHEEL_LINE_PX;
use piano_core::input::InputEvent;
use winit::event::MouseScrollDelta;
use winit::keyboard::{Key, NamedKey};

/// Key name as the keymap expects it (the DOM `KeyboardEvent.key` spelling).
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(s) => Some(s.to_string()),
        Key::Named(NamedKey::Enter) => Some("Enter".to_string()),
        Key::Named(NamedKey::Tab) => Some("Tab".to_string()),
        _ => None,
    }
}

/// winit reports wheel-up as positive; the core follows the DOM sign where
/// positive means scrolling down (zoom out).
pub fn scroll_event(delta: MouseScrollDelta) -> InputEvent {
    let delta_y = match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
    };
    InputEvent::Scroll { delta_y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn named_and_character_keys() {
        assert_eq!(key_name(&Key::Character("q".into())).as_deref(), Some("q"));
        assert_eq!(key_name(&Key::Named(NamedKey::Enter)).as_deref(), Some("Enter"));
        assert_eq!(key_name(&Key::Named(NamedKey::Tab)).as_deref(), Some("Tab"));
        assert_eq!(key_name(&Key::Named(NamedKey::Space)), None);
    }

    #[test]
    fn wheel_sign_matches_dom() {
        match scroll_event(MouseScrollDelta::LineDelta(0.0, 1.0)) {
            InputEvent::Scroll { delta_y } => assert_eq!(delta_y, -WHEEL_LINE_PX),
            other => panic!("unexpected {other:?}"),
        }
        match scroll_event(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -120.0))) {
            InputEvent::Scroll { delta_y } => assert_eq!(delta_y, 120.0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
