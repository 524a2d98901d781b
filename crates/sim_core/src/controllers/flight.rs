use super::user_input::{MoveKeys, MoveSpeeds};
use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::foundation::math::Vec3;

/// Free camera: mouse turns, keys move along look and strafe along right
#[derive(Debug, Clone)]
pub struct FlightCameraController {
    core: ControllerCore,
    keys: MoveKeys,
    speeds: MoveSpeeds,
}

impl FlightCameraController {
    /// Create a flight controller
    pub fn new(id: impl Into<String>, keys: MoveKeys, speeds: MoveSpeeds) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::Flight),
            keys,
            speeds,
        }
    }
}

/// Mouse look shared by the camera rigs: horizontal motion yaws, vertical pitches
pub(super) fn apply_mouse_look(actor: &mut Actor, ctx: &UpdateContext<'_>, rotation_speed: f32) {
    let delta = -ctx.input.mouse_delta() * ctx.time.elapsed_ms() * rotation_speed;
    if delta.x != 0.0 || delta.y != 0.0 {
        actor.transform.rotate_by(Vec3::new(delta.y, delta.x, 0.0));
    }
}

impl Controller for FlightCameraController {
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
        let look = actor.transform.look();
        let side = actor.transform.right();
        if forward != 0.0 {
            actor.transform.translate_by(look * forward * ms * self.speeds.move_speed);
        }
        if right != 0.0 {
            actor.transform.translate_by(side * right * ms * self.speeds.strafe_speed);
        }
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorType;
    use crate::controllers::test_support::run;
    use crate::events::EventDispatcher;
    use crate::foundation::math::{Transform3D, Vec2};
    use crate::input::{InputState, KeyCode};
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_follows_look() {
        let mut input = InputState::new();
        input.press(KeyCode::W);
        let mut actor = Actor::new("cam", ActorType::Camera, Transform3D::default());
        let mut controller = FlightCameraController::new("fly", MoveKeys::wasd(), MoveSpeeds::new(0.01, 0.01, 0.0));

        run(&mut controller, &mut actor, &input, &EventDispatcher::new(1), 10, 0.1);
        assert_relative_eq!(actor.transform.translation, Vec3::new(0.0, 0.0, -10.0), epsilon = 1e-3);
    }

    #[test]
    fn test_mouse_turns_camera() {
        let mut input = InputState::new();
        input.set_mouse_delta(Vec2::new(-10.0, 0.0));
        let mut actor = Actor::new("cam", ActorType::Camera, Transform3D::default());
        let mut controller = FlightCameraController::new("fly", MoveKeys::wasd(), MoveSpeeds::new(0.0, 0.0, 0.009));

        // -(-10) * 1000ms * 0.009 = 90 degrees of yaw
        run(&mut controller, &mut actor, &input, &EventDispatcher::new(1), 1, 1.0);
        assert_relative_eq!(actor.transform.rotation().y, 90.0, epsilon = 1e-3);
        assert_relative_eq!(actor.transform.look(), -Vec3::x(), epsilon = 1e-4);
    }
}
