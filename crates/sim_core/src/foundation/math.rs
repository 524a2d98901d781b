//! Math utilities and types
//!
//! Provides fundamental math types and the spatial transform carried by every actor.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Rotation3,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation between two vectors
    pub fn lerp_vec3(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }

    /// Normalize a vector, falling back when it has no length
    pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
        v.try_normalize(f32::EPSILON).unwrap_or(fallback)
    }
}

/// Spatial transform owned by an actor
///
/// Rotation is stored as Euler angles in degrees (pitch about X, yaw about Y,
/// roll about Z). The *look* and *up* basis vectors are derived from the
/// rotation applied to the basis the transform was created with; *right* is
/// always `look × up`.
///
/// The two increment fields are transient: a movement controller stages a
/// suggested move into them, the predictive collision step decides whether the
/// move is applied, and they are cleared at the start of every update.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform3D {
    /// World space translation
    pub translation: Vec3,
    /// World space scale factors
    pub scale: Vec3,
    rotation: Vec3,
    look: Vec3,
    up: Vec3,
    original_look: Vec3,
    original_up: Vec3,
    translate_increment: Vec3,
    rotate_increment: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::new(
            Vec3::zeros(),
            Vec3::zeros(),
            Vec3::new(1.0, 1.0, 1.0),
            -Vec3::z(),
            Vec3::y(),
        )
    }
}

impl Transform3D {
    /// Create a transform with an explicit basis
    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3, look: Vec3, up: Vec3) -> Self {
        let original_look = utils::normalize_or(look, -Vec3::z());
        let original_up = utils::normalize_or(up, Vec3::y());
        let mut transform = Self {
            translation,
            scale,
            rotation,
            look: original_look,
            up: original_up,
            original_look,
            original_up,
            translate_increment: Vec3::zeros(),
            rotate_increment: 0.0,
        };
        transform.rebuild_basis();
        transform
    }

    /// Create a transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Create a transform from translation and scale
    pub fn from_translation_scale(translation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            scale,
            ..Default::default()
        }
    }

    /// Transform at the origin with zero scale
    pub fn zero() -> Self {
        Self::from_translation_scale(Vec3::zeros(), Vec3::zeros())
    }

    /// Euler rotation in degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Forward direction
    pub fn look(&self) -> Vec3 {
        self.look
    }

    /// Up direction
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Right direction, `look × up`
    pub fn right(&self) -> Vec3 {
        self.look.cross(&self.up)
    }

    /// Move by a world space offset
    pub fn translate_by(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Add Euler angles (degrees) to the current rotation
    pub fn rotate_by(&mut self, degrees: Vec3) {
        self.rotation += degrees;
        self.rebuild_basis();
    }

    /// Yaw around the world Y axis by the given degrees
    pub fn rotate_around_y_by(&mut self, degrees: f32) {
        self.rotation.y += degrees;
        self.rebuild_basis();
    }

    /// Replace the rotation (degrees)
    pub fn set_rotation(&mut self, degrees: Vec3) {
        self.rotation = degrees;
        self.rebuild_basis();
    }

    /// Point the transform along a new look/up pair
    ///
    /// The given basis becomes the reference basis and the Euler rotation
    /// resets to zero.
    pub fn set_orientation(&mut self, look: Vec3, up: Vec3) {
        self.original_look = utils::normalize_or(look, self.look);
        self.original_up = utils::normalize_or(up, self.up);
        self.rotation = Vec3::zeros();
        self.rebuild_basis();
    }

    /// Staged translation for this tick
    pub fn translate_increment(&self) -> Vec3 {
        self.translate_increment
    }

    /// Staged yaw (degrees) for this tick
    pub fn rotate_increment(&self) -> f32 {
        self.rotate_increment
    }

    /// Stage a translation to be validated by the collision step
    pub fn stage_translation(&mut self, delta: Vec3) {
        self.translate_increment += delta;
    }

    /// Stage a yaw (degrees) to be validated by the collision step
    pub fn stage_rotation(&mut self, degrees: f32) {
        self.rotate_increment += degrees;
    }

    /// Whether anything is staged for this tick
    pub fn has_increment(&self) -> bool {
        self.translate_increment != Vec3::zeros() || self.rotate_increment != 0.0
    }

    /// Apply the staged increments and clear them
    pub fn apply_increments(&mut self) {
        if self.translate_increment != Vec3::zeros() {
            self.translate_by(self.translate_increment);
        }
        if self.rotate_increment != 0.0 {
            self.rotate_around_y_by(self.rotate_increment);
        }
        self.clear_increments();
    }

    /// Drop anything staged for this tick
    pub fn clear_increments(&mut self) {
        self.translate_increment = Vec3::zeros();
        self.rotate_increment = 0.0;
    }

    /// World matrix in scale-rotate-translate order
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translation)
            * self.rotation_matrix().to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    fn rotation_matrix(&self) -> Rotation3<f32> {
        let radians = self.rotation * constants::DEG_TO_RAD;
        Rotation3::from_axis_angle(&Vec3::y_axis(), radians.y)
            * Rotation3::from_axis_angle(&Vec3::x_axis(), radians.x)
            * Rotation3::from_axis_angle(&Vec3::z_axis(), radians.z)
    }

    fn rebuild_basis(&mut self) {
        let rotation = self.rotation_matrix();
        self.look = (rotation * self.original_look).normalize();
        self.up = (rotation * self.original_up).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_basis() {
        let transform = Transform3D::default();
        assert_relative_eq!(transform.look(), -Vec3::z());
        assert_relative_eq!(transform.up(), Vec3::y());
        assert_relative_eq!(transform.right(), Vec3::x());
    }

    #[test]
    fn test_rotate_around_y_turns_look() {
        let mut transform = Transform3D::default();
        transform.rotate_around_y_by(90.0);
        assert_relative_eq!(transform.look(), -Vec3::x(), epsilon = 1e-5);
        assert_relative_eq!(transform.up(), Vec3::y(), epsilon = 1e-5);
        assert_relative_eq!(transform.rotation().y, 90.0);
    }

    #[test]
    fn test_increments_only_move_when_applied() {
        let mut transform = Transform3D::from_translation(Vec3::new(1.0, 0.0, 0.0));
        transform.stage_translation(Vec3::new(0.5, 0.0, 0.0));
        transform.stage_rotation(10.0);
        assert!(transform.has_increment());
        assert_relative_eq!(transform.translation.x, 1.0);

        transform.apply_increments();
        assert_relative_eq!(transform.translation.x, 1.5);
        assert_relative_eq!(transform.rotation().y, 10.0);
        assert!(!transform.has_increment());
    }

    #[test]
    fn test_clear_discards_staged_move() {
        let mut transform = Transform3D::default();
        transform.stage_translation(Vec3::new(3.0, 0.0, 0.0));
        transform.clear_increments();
        transform.apply_increments();
        assert_relative_eq!(transform.translation, Vec3::zeros());
    }

    #[test]
    fn test_world_matrix_translation_column() {
        let transform = Transform3D::from_translation_scale(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 2.0, 2.0));
        let matrix = transform.world_matrix();
        assert_relative_eq!(matrix[(0, 3)], 1.0);
        assert_relative_eq!(matrix[(1, 3)], 2.0);
        assert_relative_eq!(matrix[(2, 3)], 3.0);
        assert_relative_eq!(matrix[(0, 0)], 2.0);
    }
}
