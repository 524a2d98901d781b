//! Surface parameters handed to the renderer

use std::sync::Arc;

use crate::assets::Texture;
use crate::foundation::math::Vec3;

/// Per-actor surface parameters
///
/// Colors and alpha are owned per actor; the texture is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Diffuse color, each channel in `[0, 1]`
    pub diffuse_color: Vec3,
    /// Opacity in `[0, 1]`
    pub alpha: f32,
    /// Optional shared texture
    pub texture: Option<Arc<Texture>>,
}

impl Material {
    /// Opaque white, untextured
    pub fn new() -> Self {
        Self {
            diffuse_color: Vec3::new(1.0, 1.0, 1.0),
            alpha: 1.0,
            texture: None,
        }
    }

    /// Set diffuse color (builder pattern)
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.diffuse_color = color;
        self
    }

    /// Set alpha, clamped to `[0, 1]` (builder pattern)
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set texture (builder pattern)
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Whether this surface belongs in the transparent draw pass
    pub fn is_transparent(&self, threshold: f32) -> bool {
        self.alpha < threshold
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
