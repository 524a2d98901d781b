use super::look_at;
use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::foundation::math::{utils, Rotation3, Unit, Vec3};

/// Follows a target actor from behind and above, easing towards the ideal position
#[derive(Debug, Clone)]
pub struct ThirdPersonController {
    core: ControllerCore,
    target_id: String,
    distance: f32,
    elevation_degrees: f32,
    lerp_speed: f32,
}

impl ThirdPersonController {
    /// Create a follow camera
    ///
    /// `lerp_speed` is the fraction of the remaining distance covered per
    /// tick, clamped to `(0, 1]`.
    pub fn new(
        id: impl Into<String>,
        target_id: impl Into<String>,
        distance: f32,
        elevation_degrees: f32,
        lerp_speed: f32,
    ) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::ThirdPerson),
            target_id: target_id.into(),
            distance,
            elevation_degrees,
            lerp_speed: lerp_speed.clamp(f32::EPSILON, 1.0),
        }
    }

    /// Id of the followed actor
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Where the camera wants to be for a target transform
    fn ideal_position(&self, target_translation: Vec3, target_look: Vec3, target_right: Vec3) -> Vec3 {
        let behind = -target_look;
        // Negative angle about right tips "behind" upwards
        let offset = match Unit::try_new(target_right, f32::EPSILON) {
            Some(axis) => {
                Rotation3::from_axis_angle(&axis, -utils::deg_to_rad(self.elevation_degrees)) * behind
            }
            None => behind,
        };
        target_translation + offset * self.distance
    }
}

impl Controller for ThirdPersonController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        let Some(target) = ctx.transform_of(&self.target_id) else {
            log::trace!("Third person target '{}' not found", self.target_id);
            return;
        };
        let ideal = self.ideal_position(target.translation, target.look(), target.right());
        actor.transform.translation = utils::lerp_vec3(&actor.transform.translation, &ideal, self.lerp_speed);
        look_at(actor, target.translation);
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::controller::ActorLookup;
    use crate::actor::ActorType;
    use crate::events::EventDispatcher;
    use crate::foundation::math::Transform3D;
    use crate::foundation::time::GameTime;
    use crate::input::NoInput;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    struct Targets(HashMap<String, Transform3D>);

    impl ActorLookup for Targets {
        fn transform_of(&self, id: &str) -> Option<&Transform3D> {
            self.0.get(id)
        }
    }

    #[test]
    fn test_settles_behind_target() {
        let mut targets = HashMap::new();
        targets.insert("player".to_string(), Transform3D::from_translation(Vec3::new(0.0, 0.0, 0.0)));
        let scene = Targets(targets);

        let mut time = GameTime::new();
        time.advance(0.016);
        let events = EventDispatcher::new(1);
        let ctx = UpdateContext::new(&time, &NoInput, &events).with_scene(&scene);

        let mut camera = Actor::new("cam", ActorType::Camera, Transform3D::default());
        let mut controller = ThirdPersonController::new("follow", "player", 10.0, 0.0, 1.0);
        controller.update(&ctx, &mut camera);

        // Target looks down -Z so "behind" is +Z
        assert_relative_eq!(camera.transform.translation, Vec3::new(0.0, 0.0, 10.0), epsilon = 1e-4);
        assert_relative_eq!(camera.transform.look(), -Vec3::z(), epsilon = 1e-4);
    }

    #[test]
    fn test_elevation_raises_camera() {
        let controller = ThirdPersonController::new("follow", "player", 10.0, 30.0, 1.0);
        let target = Transform3D::default();
        let ideal = controller.ideal_position(target.translation, target.look(), target.right());
        assert!(ideal.y > 0.0);
        assert_relative_eq!(ideal.magnitude(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_missing_target_leaves_camera() {
        let scene = Targets(HashMap::new());
        let time = GameTime::new();
        let events = EventDispatcher::new(1);
        let ctx = UpdateContext::new(&time, &NoInput, &events).with_scene(&scene);
        let mut camera = Actor::new("cam", ActorType::Camera, Transform3D::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        ThirdPersonController::new("follow", "ghost", 10.0, 0.0, 1.0).update(&ctx, &mut camera);
        assert_relative_eq!(camera.transform.translation, Vec3::new(1.0, 2.0, 3.0));
    }
}
