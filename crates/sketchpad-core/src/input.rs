//! Input events and pressed-key/button tracking.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Key name reported for the space bar.
pub const SPACE_KEY: &str = " ";

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Platform command modifier (Ctrl or Meta).
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => *position,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Any raw input the editor consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    Wheel { delta: Vec2 },
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        InputEvent::Key(event)
    }
}

/// Tracks held buttons and keys between events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last pointer position in screen coordinates.
    pub pointer_position: Point,
    pressed_buttons: HashSet<MouseButton>,
    pressed_keys: HashSet<String>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.pointer_position = event.position();
        match event {
            PointerEvent::Down { button, .. } => {
                self.pressed_buttons.insert(*button);
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(button);
            }
            PointerEvent::Move { .. } => {}
        }
    }

    /// Process a key event. Returns true if the key was newly pressed.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        let newly_pressed = match event {
            KeyEvent::Pressed(key) => self.pressed_keys.insert(key.clone()),
            KeyEvent::Released(key) => {
                self.pressed_keys.remove(key);
                false
            }
        };
        self.update_modifiers();
        newly_pressed
    }

    fn update_modifiers(&mut self) {
        self.modifiers = Modifiers {
            shift: self.is_key_pressed("Shift"),
            ctrl: self.is_key_pressed("Control"),
            alt: self.is_key_pressed("Alt"),
            meta: self.is_key_pressed("Meta"),
        };
    }

    /// Check if a mouse button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Check if a key is currently pressed.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// Whether the space bar is held (temporary pan).
    pub fn is_space_held(&self) -> bool {
        self.is_key_pressed(SPACE_KEY)
    }

    pub fn shift(&self) -> bool {
        self.modifiers.shift
    }

    pub fn command(&self) -> bool {
        self.modifiers.command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_tracking() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(3.0, 4.0),
            button: MouseButton::Middle,
        });
        assert!(input.is_button_pressed(MouseButton::Middle));
        assert_eq!(input.pointer_position, Point::new(3.0, 4.0));

        input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(5.0, 6.0),
            button: MouseButton::Middle,
        });
        assert!(!input.is_button_pressed(MouseButton::Middle));
    }

    #[test]
    fn test_modifiers_follow_keys() {
        let mut input = InputState::new();
        assert!(input.handle_key_event(&KeyEvent::Pressed("Control".into())));
        assert!(!input.handle_key_event(&KeyEvent::Pressed("Control".into())));
        assert!(input.modifiers.ctrl);
        assert!(input.command());

        input.handle_key_event(&KeyEvent::Pressed("Meta".into()));
        input.handle_key_event(&KeyEvent::Released("Control".into()));
        assert!(!input.modifiers.ctrl);
        assert!(input.command());
    }

    #[test]
    fn test_space_held() {
        let mut input = InputState::new();
        input.handle_key_event(&KeyEvent::Pressed(SPACE_KEY.into()));
        assert!(input.is_space_held());
        input.handle_key_event(&KeyEvent::Released(SPACE_KEY.into()));
        assert!(!input.is_space_held());
    }
}
