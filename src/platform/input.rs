//! Input events delivered to the app
//!
//! Platform layers translate raw pointer/keyboard events into these.

use glam::Vec2;

/// Primary (left) pointer button
pub const LEFT_BUTTON: u8 = 1;

/// Map a DOM `MouseEvent.button` (0 = primary) to our 1-based numbering
pub fn dom_button(button: i16) -> u8 {
    if button == 0 {
        LEFT_BUTTON
    } else {
        button.saturating_add(1).clamp(2, u8::MAX as i16) as u8
    }
}

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `S`: open/close the shop
    ToggleShop,
    /// `K`: use a skip item
    UseSkip,
    /// `Escape`: save and quit
    Quit,
}

impl Key {
    /// Map a DOM/winit style key name to a logical key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "s" | "S" => Some(Key::ToggleShop),
            "k" | "K" => Some(Key::UseSkip),
            "Escape" | "Esc" => Some(Key::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Vec2, button: u8 },
    KeyDown(Key),
    WindowClose,
}

impl InputEvent {
    /// Left click at `(x, y)`
    pub fn click(x: f32, y: f32) -> Self {
        InputEvent::PointerDown {
            pos: Vec2::new(x, y),
            button: LEFT_BUTTON,
        }
    }
}
