//! Box and sphere collision primitives

use super::bounds::{BoundingSphere, Frustum, Ray, AABB};
use crate::foundation::math::{Transform3D, Vec3};

/// Convex test volume owned by a collidable actor
///
/// Each variant keeps the volume it was created with (object space) and the
/// world-space volume derived from the owner's transform by [`update`].
///
/// [`update`]: CollisionPrimitive::update
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionPrimitive {
    /// Axis-aligned box; rotation of the owner is ignored
    Box {
        /// Object-space bounds
        origin: AABB,
        /// World-space bounds
        world: AABB,
    },
    /// Sphere; the radius is not scaled by the owner
    Sphere {
        /// Object-space sphere
        origin: BoundingSphere,
        /// World-space sphere
        world: BoundingSphere,
    },
}

impl CollisionPrimitive {
    /// Box spanning `[-0.5, 0.5]` on every axis, sized by the owner's scale
    pub fn unit_box() -> Self {
        Self::new_box(AABB::new(Vec3::repeat(-0.5), Vec3::repeat(0.5)))
    }

    /// Box with explicit object-space bounds
    pub fn new_box(origin: AABB) -> Self {
        Self::Box { origin, world: origin }
    }

    /// Sphere of `radius` centred on the owner
    pub fn sphere(radius: f32) -> Self {
        Self::new_sphere(BoundingSphere::new(Vec3::zeros(), radius))
    }

    /// Sphere with an explicit object-space offset
    pub fn new_sphere(origin: BoundingSphere) -> Self {
        Self::Sphere { origin, world: origin }
    }

    /// Recompute world bounds from the owner's transform
    ///
    /// Boxes become `origin * scale + translation`; spheres are translated only.
    pub fn update(&mut self, transform: &Transform3D) {
        match self {
            Self::Box { origin, world } => {
                *world = origin.scaled_translated(transform.scale, transform.translation);
            }
            Self::Sphere { origin, world } => {
                *world = origin.translated(transform.translation);
            }
        }
    }

    /// Copy with world bounds reset to the object-space volume
    pub fn fresh(&self) -> Self {
        match self {
            Self::Box { origin, .. } => Self::new_box(*origin),
            Self::Sphere { origin, .. } => Self::new_sphere(*origin),
        }
    }

    /// Centre of the world-space volume
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Box { world, .. } => world.center(),
            Self::Sphere { world, .. } => world.center,
        }
    }

    /// World-space box enclosing the volume
    pub fn world_aabb(&self) -> AABB {
        match self {
            Self::Box { world, .. } => *world,
            Self::Sphere { world, .. } => world.to_aabb(),
        }
    }

    /// Overlap test between current world volumes; symmetric
    pub fn intersects(&self, other: &CollisionPrimitive) -> bool {
        self.intersects_projected(other, Vec3::zeros())
    }

    /// Whether this volume, moved by `translation`, would overlap `other` where it is now
    pub fn intersects_projected(&self, other: &CollisionPrimitive, translation: Vec3) -> bool {
        match (self, other) {
            (Self::Box { world: a, .. }, Self::Box { world: b, .. }) => {
                a.translated(translation).intersects(b)
            }
            (Self::Box { world: a, .. }, Self::Sphere { world: b, .. }) => {
                a.translated(translation).intersects_sphere(b)
            }
            (Self::Sphere { world: a, .. }, Self::Box { world: b, .. }) => {
                a.translated(translation).intersects_aabb(b)
            }
            (Self::Sphere { world: a, .. }, Self::Sphere { world: b, .. }) => {
                a.translated(translation).intersects(b)
            }
        }
    }

    /// Distance along the ray to the volume
    ///
    /// Volumes behind the origin are missed; a ray starting inside hits at `0.0`.
    pub fn intersects_ray(&self, ray: &Ray) -> Option<f32> {
        let distance = match self {
            Self::Box { world, .. } => world.intersect_ray(ray),
            Self::Sphere { world, .. } => world.intersect_ray(ray),
        }?;
        (distance >= 0.0).then_some(distance)
    }

    /// Whether any part of the volume is inside the frustum
    pub fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        match self {
            Self::Box { world, .. } => frustum.intersects_aabb(world),
            Self::Sphere { world, .. } => frustum.intersects_sphere(world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn placed(mut primitive: CollisionPrimitive, translation: Vec3, scale: Vec3) -> CollisionPrimitive {
        primitive.update(&Transform3D::from_translation_scale(translation, scale));
        primitive
    }

    #[test]
    fn test_box_bounds_follow_scale_and_translation() {
        let primitive = placed(
            CollisionPrimitive::unit_box(),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(2.0, 4.0, 2.0),
        );
        let bounds = primitive.world_aabb();
        assert_relative_eq!(bounds.min, Vec3::new(9.0, -2.0, -1.0));
        assert_relative_eq!(bounds.max, Vec3::new(11.0, 2.0, 1.0));
    }

    #[test]
    fn test_box_bounds_ignore_rotation() {
        let mut transform = Transform3D::from_translation_scale(Vec3::zeros(), Vec3::new(4.0, 1.0, 1.0));
        let mut primitive = CollisionPrimitive::unit_box();
        primitive.update(&transform);
        let before = primitive.world_aabb();

        transform.rotate_around_y_by(90.0);
        primitive.update(&transform);
        assert_eq!(primitive.world_aabb(), before);
        assert_relative_eq!(primitive.world_aabb().max.x, 2.0);
    }

    #[test]
    fn test_sphere_radius_is_not_scaled() {
        let primitive = placed(CollisionPrimitive::sphere(1.0), Vec3::new(0.0, 3.0, 0.0), Vec3::repeat(5.0));
        let bounds = primitive.world_aabb();
        assert_relative_eq!(bounds.max.y - bounds.min.y, 2.0);
        assert_relative_eq!(primitive.center(), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_static_overlap_is_symmetric() {
        let shapes = [
            placed(CollisionPrimitive::unit_box(), Vec3::zeros(), Vec3::repeat(2.0)),
            placed(CollisionPrimitive::unit_box(), Vec3::new(1.5, 0.0, 0.0), Vec3::repeat(2.0)),
            placed(CollisionPrimitive::sphere(1.0), Vec3::new(2.5, 0.0, 0.0), Vec3::repeat(1.0)),
            placed(CollisionPrimitive::sphere(0.5), Vec3::new(0.0, 5.0, 0.0), Vec3::repeat(1.0)),
        ];
        for a in &shapes {
            for b in &shapes {
                assert_eq!(a.intersects(b), b.intersects(a));
            }
        }
        assert!(shapes[0].intersects(&shapes[1]));
        assert!(shapes[1].intersects(&shapes[2]));
        assert!(!shapes[0].intersects(&shapes[3]));
    }

    #[test]
    fn test_projected_overlap_is_not_symmetric() {
        let a = placed(CollisionPrimitive::unit_box(), Vec3::zeros(), Vec3::repeat(2.0));
        let b = placed(CollisionPrimitive::unit_box(), Vec3::new(3.0, 0.0, 0.0), Vec3::repeat(2.0));
        let step = Vec3::new(1.5, 0.0, 0.0);
        assert!(a.intersects_projected(&b, step));
        assert!(!b.intersects_projected(&a, step));
    }

    #[test]
    fn test_ray_from_inside_hits_box_and_sphere_at_zero() {
        let cube = placed(CollisionPrimitive::unit_box(), Vec3::zeros(), Vec3::repeat(2.0));
        let ball = placed(CollisionPrimitive::sphere(1.0), Vec3::zeros(), Vec3::repeat(1.0));
        let outside = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::z());
        let inside = Ray::new(Vec3::zeros(), Vec3::x());
        let behind = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::z());

        assert_relative_eq!(cube.intersects_ray(&outside).unwrap(), 9.0);
        assert_relative_eq!(ball.intersects_ray(&outside).unwrap(), 9.0, epsilon = 1e-5);
        assert_eq!(cube.intersects_ray(&inside), Some(0.0));
        assert_eq!(ball.intersects_ray(&inside), Some(0.0));
        assert!(cube.intersects_ray(&behind).is_none());
        assert!(ball.intersects_ray(&behind).is_none());
    }
}
