//! Input state sampled by the host once per tick
//!
//! Controllers only see the [`InputSource`] trait. The host window layer (or a
//! test) feeds an [`InputState`] with key transitions and mouse motion, and
//! calls [`InputState::begin_frame`] before sampling the next tick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Tab key
    Tab,
    /// Left shift key
    LeftShift,
    /// F1 function key
    F1,
    /// F2 function key
    F2,
    /// F3 function key
    F3,
    /// F4 function key
    F4,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Read-only view of the input for the current tick
pub trait InputSource {
    /// Whether the key is held this tick
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Whether the key went down this tick
    fn is_first_key_press(&self, key: KeyCode) -> bool;

    /// Whether the mouse button is held this tick
    fn is_mouse_down(&self, _button: MouseButton) -> bool {
        false
    }

    /// Mouse motion since the previous tick
    fn mouse_delta(&self) -> Vec2 {
        Vec2::zeros()
    }
}

/// Input source with nothing pressed
///
/// Given to controllers of cameras that are not active.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn is_key_down(&self, _key: KeyCode) -> bool {
        false
    }

    fn is_first_key_press(&self, _key: KeyCode) -> bool {
        false
    }
}

/// Keyboard and mouse state with edge detection
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_previous: HashSet<KeyCode>,
    mouse_down: HashSet<MouseButton>,
    mouse_delta: Vec2,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new tick: current keys become the previous keys and mouse motion resets
    pub fn begin_frame(&mut self) {
        self.keys_previous.clone_from(&self.keys_down);
        self.mouse_delta = Vec2::zeros();
    }

    /// Record a key going down
    pub fn press(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    /// Record a key going up
    pub fn release(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Record a key transition
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Record a mouse button transition
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_down.insert(button);
        } else {
            self.mouse_down.remove(&button);
        }
    }

    /// Accumulate mouse motion for this tick
    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Replace this tick's mouse motion
    pub fn set_mouse_delta(&mut self, delta: Vec2) {
        self.mouse_delta = delta;
    }

    /// Release everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl InputSource for InputState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    fn is_first_key_press(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key) && !self.keys_previous.contains(&key)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_down.contains(&button)
    }

    fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_press_is_edge_triggered() {
        let mut input = InputState::new();
        input.press(KeyCode::Space);
        assert!(input.is_first_key_press(KeyCode::Space));
        assert!(input.is_key_down(KeyCode::Space));

        input.begin_frame();
        assert!(!input.is_first_key_press(KeyCode::Space));
        assert!(input.is_key_down(KeyCode::Space));

        input.release(KeyCode::Space);
        input.begin_frame();
        input.press(KeyCode::Space);
        assert!(input.is_first_key_press(KeyCode::Space));
    }

    #[test]
    fn test_mouse_delta_resets_each_frame() {
        let mut input = InputState::new();
        input.handle_mouse_move(2.0, -1.0);
        input.handle_mouse_move(1.0, 0.0);
        assert_eq!(input.mouse_delta(), Vec2::new(3.0, -1.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::zeros());
    }

    #[test]
    fn test_no_input_reports_nothing() {
        assert!(!NoInput.is_key_down(KeyCode::W));
        assert!(!NoInput.is_mouse_down(MouseButton::Left));
        assert_eq!(NoInput.mouse_delta(), Vec2::zeros());
    }
}
