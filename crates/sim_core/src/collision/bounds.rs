//! Bounding volumes, rays and view frusta

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Copy moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Scale about the origin then translate
    ///
    /// Corners are re-sorted so negative scale factors still give a valid box.
    pub fn scaled_translated(&self, scale: Vec3, translation: Vec3) -> Self {
        let a = self.min.component_mul(&scale) + translation;
        let b = self.max.component_mul(&scale) + translation;
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Point inside or on the box closest to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.sup(&self.min).inf(&self.max)
    }

    /// Check if this AABB intersects another AABB (touching counts)
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Check if this AABB intersects a sphere
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let closest = self.closest_point(sphere.center);
        (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
    }

    /// Test ray intersection with this AABB using slab method
    ///
    /// Returns the distance to the entry point, or `0.0` when the ray starts inside.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv = |d: f32| if d != 0.0 { 1.0 / d } else { f32::INFINITY };
        let inv_dir = Vec3::new(inv(ray.direction.x), inv(ray.direction.y), inv(ray.direction.z));

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Copy moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if this sphere intersects a box
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.intersects_sphere(self)
    }

    /// Box enclosing the sphere
    pub fn to_aabb(&self) -> AABB {
        AABB::from_center_extents(self.center, Vec3::repeat(self.radius))
    }

    /// Test ray intersection with this sphere
    ///
    /// Returns the distance to the entry point, or `0.0` when the ray starts inside.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        // Solve |origin + t*direction - center|^2 = radius^2
        let oc = ray.origin - self.center;
        let c = oc.dot(&oc) - self.radius * self.radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        // Origin is outside, so both roots share a sign
        (t1 >= 0.0 && t2 >= 0.0).then_some(t1)
    }
}

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Plane defined by normal and distance from origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (normalized)
    pub normal: Vec3,
    /// Distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from normal and distance
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal: normal.normalize(), distance }
    }

    /// Build a plane from `(a, b, c, d)` coefficients, normalizing them
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.xyz();
        let length = normal.magnitude();
        if length <= f32::EPSILON {
            return Self { normal: Vec3::zeros(), distance: 0.0 };
        }
        Self {
            normal: normal / length,
            distance: coefficients.w / length,
        }
    }

    /// Calculate signed distance from plane to point
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }
}

/// Frustum for visibility culling
///
/// Plane normals point inwards, so a point is inside when its signed
/// distance to every plane is non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Six planes (left, right, bottom, top, near, far)
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from six planes
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extract frustum planes from a view-projection matrix
    ///
    /// Gribb-Hartmann extraction for an OpenGL-style clip volume
    /// (`-w <= x, y, z <= w`).
    pub fn from_matrix(vp_matrix: &Mat4) -> Self {
        let row = |i: usize| -> Vec4 { vp_matrix.row(i).transpose() };
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));
        Self {
            planes: [
                Plane::from_coefficients(r3 + r0),
                Plane::from_coefficients(r3 - r0),
                Plane::from_coefficients(r3 + r1),
                Plane::from_coefficients(r3 - r1),
                Plane::from_coefficients(r3 + r2),
                Plane::from_coefficients(r3 - r2),
            ],
        }
    }

    /// Check if a point lies inside the frustum
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Check if an AABB is inside or intersects the frustum
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        for plane in &self.planes {
            // Corner furthest along the plane normal
            let mut p = aabb.min;
            if plane.normal.x >= 0.0 { p.x = aabb.max.x; }
            if plane.normal.y >= 0.0 { p.y = aabb.max.y; }
            if plane.normal.z >= 0.0 { p.z = aabb.max.z; }

            if plane.distance_to_point(p) < 0.0 {
                return false;
            }
        }
        true
    }

    /// Check if a sphere is inside or intersects the frustum
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(sphere.center) >= -sphere.radius)
    }
}
