use super::user_input::{MoveKeys, MoveSpeeds};
use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;

/// Reads movement keys and stages the move for the collision step
///
/// Forward/backward stage a translation along look; left/right stage a yaw.
/// Nothing moves here: the object manager applies the staged increments only
/// if the projected position is clear.
#[derive(Debug, Clone)]
pub struct PlayerInputController {
    core: ControllerCore,
    keys: MoveKeys,
    speeds: MoveSpeeds,
}

impl PlayerInputController {
    /// Create a player input controller
    pub fn new(id: impl Into<String>, keys: MoveKeys, speeds: MoveSpeeds) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::PlayerInput),
            keys,
            speeds,
        }
    }
}

impl Controller for PlayerInputController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        let ms = ctx.time.elapsed_ms();
        let forward = self.keys.forward_axis(ctx.input);
        let turn = self.keys.right_axis(ctx.input);
        if forward != 0.0 {
            let look = actor.transform.look();
            actor.transform.stage_translation(look * forward * ms * self.speeds.move_speed);
        }
        if turn != 0.0 {
            // Positive yaw turns left
            actor.transform.stage_rotation(-turn * ms * self.speeds.rotation_speed);
        }
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}
