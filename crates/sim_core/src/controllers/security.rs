use super::sine::TrigonometricParameters;
use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::foundation::math::{utils, Vec3};

/// Sweeps an actor back and forth about an axis, like a wall-mounted camera
///
/// The sweep is `amplitude * sin(frequency * t)` degrees about `axis`,
/// relative to the rotation the actor had when the controller first ran.
#[derive(Debug, Clone)]
pub struct SecurityCameraController {
    core: ControllerCore,
    sweep: TrigonometricParameters,
    axis: Vec3,
    elapsed: f32,
    base_rotation: Option<Vec3>,
}

impl SecurityCameraController {
    /// Create a sweeping controller; `amplitude` in degrees, `frequency` in radians per second
    pub fn new(id: impl Into<String>, amplitude: f32, frequency: f32, axis: Vec3) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::Security),
            sweep: TrigonometricParameters::new(amplitude, frequency, 0.0),
            axis: utils::normalize_or(axis, Vec3::y()),
            elapsed: 0.0,
            base_rotation: None,
        }
    }
}

impl Controller for SecurityCameraController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        let base = *self.base_rotation.get_or_insert(actor.transform.rotation());
        self.elapsed += ctx.time.elapsed_seconds();
        actor.transform.set_rotation(base + self.axis * self.sweep.evaluate(self.elapsed));
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        let mut copy = self.clone();
        copy.reset();
        Box::new(copy)
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.base_rotation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorType;
    use crate::controllers::test_support::run;
    use crate::events::EventDispatcher;
    use crate::foundation::math::{constants, Transform3D};
    use crate::input::NoInput;
    use approx::assert_relative_eq;

    #[test]
    fn test_sweep_stays_within_amplitude() {
        let mut actor = Actor::new("sec", ActorType::Camera, Transform3D::default());
        let mut controller = SecurityCameraController::new("sweep", 15.0, 2.0, Vec3::y());
        let events = EventDispatcher::new(1);
        for _ in 0..50 {
            run(&mut controller, &mut actor, &NoInput, &events, 1, 0.05);
            assert!(actor.transform.rotation().y.abs() <= 15.0 + 1e-4);
        }
    }

    #[test]
    fn test_peak_after_quarter_period() {
        let mut actor = Actor::new("sec", ActorType::Camera, Transform3D::default());
        let mut controller = SecurityCameraController::new("sweep", 15.0, 2.0, Vec3::y());
        // sin(2 * pi/4) = 1
        run(&mut controller, &mut actor, &NoInput, &EventDispatcher::new(1), 1, constants::PI / 4.0);
        assert_relative_eq!(actor.transform.rotation().y, 15.0, epsilon = 1e-3);
    }
}
