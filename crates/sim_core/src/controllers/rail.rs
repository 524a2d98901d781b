use super::look_at;
use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::foundation::math::Vec3;

/// Straight segment a rail camera is constrained to
#[derive(Debug, Clone, PartialEq)]
pub struct RailParameters {
    /// Rail id
    pub id: String,
    /// First end point
    pub start: Vec3,
    /// Second end point
    pub end: Vec3,
}

impl RailParameters {
    /// Create a rail between two points
    pub fn new(id: impl Into<String>, start: Vec3, end: Vec3) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Length of the segment
    pub fn length(&self) -> f32 {
        (self.end - self.start).magnitude()
    }

    /// Unit direction from start to end, zero for a degenerate rail
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
    }

    /// Centre of the segment
    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Closest point on the segment to `point`
    pub fn project(&self, point: Vec3) -> Vec3 {
        let length = self.length();
        if length <= f32::EPSILON {
            return self.start;
        }
        let along = (point - self.start).dot(&self.direction()).clamp(0.0, length);
        self.start + self.direction() * along
    }
}

/// Slides along a rail to stay level with a target, always looking at it
#[derive(Debug, Clone)]
pub struct RailController {
    core: ControllerCore,
    rail: RailParameters,
    target_id: String,
    placed: bool,
}

impl RailController {
    /// Create a rail camera tracking `target_id`
    pub fn new(id: impl Into<String>, rail: RailParameters, target_id: impl Into<String>) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::Rail),
            rail,
            target_id: target_id.into(),
            placed: false,
        }
    }

    /// Rail this controller moves along
    pub fn rail(&self) -> &RailParameters {
        &self.rail
    }
}

impl Controller for RailController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        if !self.placed {
            actor.transform.translation = self.rail.midpoint();
            self.placed = true;
        }
        let Some(target) = ctx.transform_of(&self.target_id) else {
            return;
        };
        actor.transform.translation = self.rail.project(target.translation);
        look_at(actor, target.translation);
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        let mut copy = self.clone();
        copy.reset();
        Box::new(copy)
    }

    fn reset(&mut self) {
        self.placed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorType;
    use crate::events::EventDispatcher;
    use crate::foundation::math::Transform3D;
    use crate::foundation::time::GameTime;
    use crate::input::NoInput;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_clamps_to_segment() {
        let rail = RailParameters::new("r", Vec3::new(-10.0, 5.0, 0.0), Vec3::new(10.0, 5.0, 0.0));
        assert_relative_eq!(rail.project(Vec3::new(3.0, 0.0, 7.0)), Vec3::new(3.0, 5.0, 0.0));
        assert_relative_eq!(rail.project(Vec3::new(30.0, 0.0, 0.0)), Vec3::new(10.0, 5.0, 0.0));
        assert_relative_eq!(rail.midpoint(), Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_without_target_camera_waits_at_midpoint() {
        let time = GameTime::new();
        let events = EventDispatcher::new(1);
        let ctx = UpdateContext::new(&time, &NoInput, &events);
        let rail = RailParameters::new("r", Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -20.0));
        let mut camera = Actor::new("cam", ActorType::Camera, Transform3D::default());
        RailController::new("rail", rail, "player").update(&ctx, &mut camera);
        assert_relative_eq!(camera.transform.translation, Vec3::new(0.0, 0.0, -10.0));
    }
}
