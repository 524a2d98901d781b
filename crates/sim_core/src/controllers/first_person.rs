use super::flight::apply_mouse_look;
use super::user_input::{MoveKeys, MoveSpeeds};
use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::foundation::math::Vec3;

/// Walking camera: like flight, but movement stays at the current height
#[derive(Debug, Clone)]
pub struct FirstPersonCameraController {
    core: ControllerCore,
    keys: MoveKeys,
    speeds: MoveSpeeds,
}

impl FirstPersonCameraController {
    /// Create a first-person controller
    pub fn new(id: impl Into<String>, keys: MoveKeys, speeds: MoveSpeeds) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::FirstPerson),
            keys,
            speeds,
        }
    }
}

fn flatten(v: Vec3) -> Option<Vec3> {
    Vec3::new(v.x, 0.0, v.z).try_normalize(f32::EPSILON)
}

impl Controller for FirstPersonCameraController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        apply_mouse_look(actor, ctx, self.speeds.rotation_speed);

        let ms = ctx.time.elapsed_ms();
        let forward = self.keys.forward_axis(ctx.input);
        let right = self.keys.right_axis(ctx.input);
        if forward != 0.0 {
            if let Some(look) = flatten(actor.transform.look()) {
                actor.transform.translate_by(look * forward * ms * self.speeds.move_speed);
            }
        }
        if right != 0.0 {
            if let Some(side) = flatten(actor.transform.right()) {
                actor.transform.translate_by(side * right * ms * self.speeds.strafe_speed);
            }
        }
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}
