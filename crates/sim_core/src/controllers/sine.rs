//! Sinusoidal animation of translation and color

use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::foundation::math::{utils, Vec3};

/// `amplitude * sin(angular_frequency * t + phase)` with `t` in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigonometricParameters {
    /// Peak value
    pub max_amplitude: f32,
    /// Radians per second
    pub angular_frequency: f32,
    /// Phase offset in radians
    pub phase_angle: f32,
}

impl TrigonometricParameters {
    /// Create sine parameters
    pub fn new(max_amplitude: f32, angular_frequency: f32, phase_angle: f32) -> Self {
        Self {
            max_amplitude,
            angular_frequency,
            phase_angle,
        }
    }

    /// Value at `seconds`
    pub fn evaluate(&self, seconds: f32) -> f32 {
        self.max_amplitude * (self.angular_frequency * seconds + self.phase_angle).sin()
    }

    /// Value at `seconds` remapped from `[-amplitude, amplitude]` to `[0, 1]`
    pub fn evaluate_normalized(&self, seconds: f32) -> f32 {
        if self.max_amplitude == 0.0 {
            return 0.0;
        }
        (self.evaluate(seconds) / self.max_amplitude.abs() + 1.0) * 0.5
    }
}

/// Oscillates an actor along a direction around where it started
#[derive(Debug, Clone)]
pub struct TranslationSineLerpController {
    core: ControllerCore,
    direction: Vec3,
    parameters: TrigonometricParameters,
    elapsed: f32,
    origin: Option<Vec3>,
}

impl TranslationSineLerpController {
    /// Create a sinusoidal translation controller
    pub fn new(id: impl Into<String>, direction: Vec3, parameters: TrigonometricParameters) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::SineTranslation),
            direction: utils::normalize_or(direction, Vec3::y()),
            parameters,
            elapsed: 0.0,
            origin: None,
        }
    }
}

impl Controller for TranslationSineLerpController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        let origin = *self.origin.get_or_insert(actor.transform.translation);
        self.elapsed += ctx.time.elapsed_seconds();
        actor.transform.translation = origin + self.direction * self.parameters.evaluate(self.elapsed);
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        let mut copy = self.clone();
        copy.reset();
        Box::new(copy)
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.origin = None;
    }
}

/// Blends an actor's diffuse color between two colors
#[derive(Debug, Clone)]
pub struct ColorSineLerpController {
    core: ControllerCore,
    start_color: Vec3,
    end_color: Vec3,
    parameters: TrigonometricParameters,
    elapsed: f32,
}

impl ColorSineLerpController {
    /// Create a color interpolation controller
    pub fn new(
        id: impl Into<String>,
        start_color: Vec3,
        end_color: Vec3,
        parameters: TrigonometricParameters,
    ) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::SineColor),
            start_color,
            end_color,
            parameters,
            elapsed: 0.0,
        }
    }
}

impl Controller for ColorSineLerpController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        self.elapsed += ctx.time.elapsed_seconds();
        let t = self.parameters.evaluate_normalized(self.elapsed);
        actor.material.diffuse_color = utils::lerp_vec3(&self.start_color, &self.end_color, t);
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
