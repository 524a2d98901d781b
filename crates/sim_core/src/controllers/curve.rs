//! Keyframed curves and the track controller that follows them

use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::foundation::math::{utils, Vec3};

/// What a curve does past its last key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveLoopType {
    /// Hold the last value
    #[default]
    Constant,
    /// Start over from the first key
    Cycle,
}

/// Piecewise-linear curve over time in milliseconds
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve1D {
    keys: Vec<(f32, f32)>,
    loop_type: CurveLoopType,
}

impl Curve1D {
    /// Create an empty curve
    pub fn new(loop_type: CurveLoopType) -> Self {
        Self {
            keys: Vec::new(),
            loop_type,
        }
    }

    /// Add a key; keys are kept sorted by time
    pub fn add(&mut self, time_ms: f32, value: f32) {
        let index = self.keys.partition_point(|(time, _)| *time <= time_ms);
        self.keys.insert(index, (time_ms, value));
    }

    /// Time of the last key
    pub fn duration_ms(&self) -> f32 {
        self.keys.last().map_or(0.0, |(time, _)| *time)
    }

    /// Value at `time_ms`; an empty curve evaluates to zero
    pub fn evaluate(&self, time_ms: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        let time = match self.loop_type {
            CurveLoopType::Cycle if last.0 > first.0 => first.0 + (time_ms - first.0).rem_euclid(last.0 - first.0),
            _ => time_ms,
        };
        if time <= first.0 {
            return first.1;
        }
        if time >= last.0 {
            return last.1;
        }
        let upper = self.keys.partition_point(|(key_time, _)| *key_time <= time);
        let (t0, v0) = self.keys[upper - 1];
        let (t1, v1) = self.keys[upper];
        utils::lerp(v0, v1, (time - t0) / (t1 - t0))
    }
}

/// Translation, look and up curves evaluated together
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform3DCurve {
    translation: [Curve1D; 3],
    look: [Curve1D; 3],
    up: [Curve1D; 3],
}

impl Transform3DCurve {
    /// Create an empty curve
    pub fn new(loop_type: CurveLoopType) -> Self {
        let curve = || Curve1D::new(loop_type);
        Self {
            translation: [curve(), curve(), curve()],
            look: [curve(), curve(), curve()],
            up: [curve(), curve(), curve()],
        }
    }

    /// Add a keyframe
    pub fn add(&mut self, translation: Vec3, look: Vec3, up: Vec3, time_ms: f32) {
        for axis in 0..3 {
            self.translation[axis].add(time_ms, translation[axis]);
            self.look[axis].add(time_ms, look[axis]);
            self.up[axis].add(time_ms, up[axis]);
        }
    }

    /// Time of the last keyframe
    pub fn duration_ms(&self) -> f32 {
        self.translation[0].duration_ms()
    }

    /// Translation, look and up at `time_ms`
    pub fn evaluate(&self, time_ms: f32) -> (Vec3, Vec3, Vec3) {
        let sample = |curves: &[Curve1D; 3]| {
            Vec3::new(curves[0].evaluate(time_ms), curves[1].evaluate(time_ms), curves[2].evaluate(time_ms))
        };
        (sample(&self.translation), sample(&self.look), sample(&self.up))
    }
}

/// Moves an actor along a [`Transform3DCurve`]
#[derive(Debug, Clone)]
pub struct Track3DController {
    core: ControllerCore,
    curve: Transform3DCurve,
    elapsed_ms: f32,
}

impl Track3DController {
    /// Create a track controller
    pub fn new(id: impl Into<String>, curve: Transform3DCurve) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::Track),
            curve,
            elapsed_ms: 0.0,
        }
    }
}

impl Controller for Track3DController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        self.elapsed_ms += ctx.time.elapsed_ms();
        let (translation, look, up) = self.curve.evaluate(self.elapsed_ms);
        actor.transform.translation = translation;
        actor.transform.set_orientation(look, up);
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}
