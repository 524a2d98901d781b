//! Key bindings and speeds shared by keyboard-driven controllers

use serde::{Deserialize, Serialize};

use crate::input::{InputSource, KeyCode};

/// Four movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    /// Move along look
    pub forward: KeyCode,
    /// Move against look
    pub backward: KeyCode,
    /// Strafe or turn left
    pub left: KeyCode,
    /// Strafe or turn right
    pub right: KeyCode,
}

impl MoveKeys {
    /// W, S, A, D
    pub fn wasd() -> Self {
        Self {
            forward: KeyCode::W,
            backward: KeyCode::S,
            left: KeyCode::A,
            right: KeyCode::D,
        }
    }

    /// Arrow keys
    pub fn arrows() -> Self {
        Self {
            forward: KeyCode::Up,
            backward: KeyCode::Down,
            left: KeyCode::Left,
            right: KeyCode::Right,
        }
    }

    /// `1.0` forward, `-1.0` backward, `0.0` otherwise; forward wins when both are held
    pub fn forward_axis(&self, input: &dyn InputSource) -> f32 {
        if input.is_key_down(self.forward) {
            1.0
        } else if input.is_key_down(self.backward) {
            -1.0
        } else {
            0.0
        }
    }

    /// `1.0` right, `-1.0` left, `0.0` otherwise; left wins when both are held
    pub fn right_axis(&self, input: &dyn InputSource) -> f32 {
        if input.is_key_down(self.left) {
            -1.0
        } else if input.is_key_down(self.right) {
            1.0
        } else {
            0.0
        }
    }
}

impl Default for MoveKeys {
    fn default() -> Self {
        Self::wasd()
    }
}

/// Speeds per millisecond of tick time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveSpeeds {
    /// Units per millisecond along look
    pub move_speed: f32,
    /// Units per millisecond along right
    pub strafe_speed: f32,
    /// Degrees per millisecond (keys) or per pixel-millisecond (mouse)
    pub rotation_speed: f32,
}

impl MoveSpeeds {
    /// Create movement speeds
    pub fn new(move_speed: f32, strafe_speed: f32, rotation_speed: f32) -> Self {
        Self {
            move_speed,
            strafe_speed,
            rotation_speed,
        }
    }
}

impl Default for MoveSpeeds {
    fn default() -> Self {
        Self::new(0.01, 0.008, 0.004)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    #[test]
    fn test_axes_follow_held_keys() {
        let keys = MoveKeys::wasd();
        let mut input = InputState::new();
        assert_eq!(keys.forward_axis(&input), 0.0);

        input.press(KeyCode::S);
        input.press(KeyCode::D);
        assert_eq!(keys.forward_axis(&input), -1.0);
        assert_eq!(keys.right_axis(&input), 1.0);

        input.press(KeyCode::W);
        assert_eq!(keys.forward_axis(&input), 1.0);
    }
}
