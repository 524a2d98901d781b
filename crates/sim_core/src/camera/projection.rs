//! Perspective projection parameters and viewports

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Vec2};

/// Perspective frustum shape
///
/// `fovy` is the vertical field of view in radians; `aspect` is width over height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Vertical field of view in radians
    pub fovy: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

const SIXTEEN_NINE: f32 = 16.0 / 9.0;
const FOUR_THREE: f32 = 4.0 / 3.0;

impl ProjectionParameters {
    /// Create projection parameters
    pub fn new(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self { fovy, aspect, near, far }
    }

    /// 45° widescreen with a 1000 unit far plane
    pub fn standard_deep_sixteen_nine() -> Self {
        Self::new(std::f32::consts::FRAC_PI_4, SIXTEEN_NINE, 0.1, 1000.0)
    }

    /// 45° widescreen with a 500 unit far plane
    pub fn standard_medium_sixteen_nine() -> Self {
        Self::new(std::f32::consts::FRAC_PI_4, SIXTEEN_NINE, 0.1, 500.0)
    }

    /// 45° widescreen with a 150 unit far plane
    pub fn standard_shallow_sixteen_nine() -> Self {
        Self::new(std::f32::consts::FRAC_PI_4, SIXTEEN_NINE, 0.1, 150.0)
    }

    /// 45° 4:3 with a 1000 unit far plane
    pub fn standard_deep_four_three() -> Self {
        Self::new(std::f32::consts::FRAC_PI_4, FOUR_THREE, 0.1, 1000.0)
    }

    /// 45° 4:3 with a 500 unit far plane
    pub fn standard_medium_four_three() -> Self {
        Self::new(std::f32::consts::FRAC_PI_4, FOUR_THREE, 0.1, 500.0)
    }

    /// 45° 4:3 with a 150 unit far plane
    pub fn standard_shallow_four_three() -> Self {
        Self::new(std::f32::consts::FRAC_PI_4, FOUR_THREE, 0.1, 150.0)
    }

    /// Change the aspect ratio (builder pattern)
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Check the parameters describe a usable frustum
    pub fn validate(&self) -> Result<(), String> {
        if !(self.fovy > 0.0 && self.fovy < std::f32::consts::PI) {
            return Err(format!("field of view {} must be in (0, π)", self.fovy));
        }
        if self.aspect <= 0.0 {
            return Err(format!("aspect ratio {} must be positive", self.aspect));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(format!("clip planes must satisfy 0 < near ({}) < far ({})", self.near, self.far));
        }
        Ok(())
    }

    /// Right-handed perspective matrix with OpenGL depth range
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fovy, self.near, self.far)
    }
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self::standard_deep_sixteen_nine()
    }
}

/// Screen rectangle a camera draws into, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Width / height, or 1 for a degenerate viewport
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Centre of the viewport in pixels
    #[allow(clippy::cast_precision_loss)]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0, 1920, 1080)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_presets_are_valid() {
        for preset in [
            ProjectionParameters::standard_deep_sixteen_nine(),
            ProjectionParameters::standard_medium_sixteen_nine(),
            ProjectionParameters::standard_shallow_sixteen_nine(),
            ProjectionParameters::standard_deep_four_three(),
            ProjectionParameters::standard_medium_four_three(),
            ProjectionParameters::standard_shallow_four_three(),
        ] {
            assert!(preset.validate().is_ok());
        }
    }

    #[test]
    fn test_inverted_clip_planes_rejected() {
        let params = ProjectionParameters::new(1.0, 1.0, 10.0, 1.0);
        assert!(params.validate().is_err());
        assert!(ProjectionParameters::new(0.0, 1.0, 0.1, 1.0).validate().is_err());
    }

    #[test]
    fn test_viewport_aspect() {
        assert_relative_eq!(Viewport::new(0, 0, 800, 600).aspect(), 4.0 / 3.0);
        assert_relative_eq!(Viewport::new(0, 0, 800, 0).aspect(), 1.0);
        assert_relative_eq!(Viewport::new(100, 0, 200, 100).center(), Vec2::new(200.0, 50.0));
    }
}
