use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::foundation::math::Vec3;

/// Spins an actor at a constant rate (degrees per second about each axis)
#[derive(Debug, Clone)]
pub struct RotationController {
    core: ControllerCore,
    rate: Vec3,
}

impl RotationController {
    /// Create a rotation controller
    pub fn new(id: impl Into<String>, rate: Vec3) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::Rotation),
            rate,
        }
    }

    /// Degrees per second
    pub fn rate(&self) -> Vec3 {
        self.rate
    }
}

impl Controller for RotationController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        actor.transform.rotate_by(self.rate * ctx.time.elapsed_seconds());
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
    use crate::foundation::math::Transform3D;
    use crate::input::NoInput;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_accumulates_with_time() {
        let mut actor = Actor::new("fan", ActorType::Decorator, Transform3D::default());
        let mut controller = RotationController::new("spin", Vec3::new(0.0, 90.0, 0.0));
        run(&mut controller, &mut actor, &NoInput, &EventDispatcher::new(1), 4, 0.25);
        assert_relative_eq!(actor.transform.rotation().y, 90.0, epsilon = 1e-4);
    }
}
