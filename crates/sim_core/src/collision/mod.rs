//! Collision detection
//!
//! Collidable actors own a [`CollisionPrimitive`] whose world bounds follow
//! their transform. Movement is validated *before* it happens: the mover's
//! primitive is projected by the staged translation and tested against every
//! other collidable in draw-partition order, stopping at the first hit.
//!
//! Two roles exist. Solids initiate tests and block movement; zones are passive
//! trigger volumes that can be hit but never test anything themselves.

mod bounds;
pub mod detector;
mod primitive;
mod response;

pub use bounds::{BoundingSphere, Frustum, Plane, Ray, AABB};
pub use primitive::CollisionPrimitive;
pub use response::{CollisionResponse, PlayerCollisionResponse};

use crate::actor::{ActorKey, ActorType};

/// How a collidable actor takes part in collision tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionRole {
    /// Initiates tests when it moves and blocks other movers
    Solid,
    /// Passive trigger volume
    Zone,
}

/// Collision capability attached to an actor
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    /// Test volume
    pub primitive: CollisionPrimitive,
    /// Participation role
    pub role: CollisionRole,
}

/// The actor a staged move ran into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collidee {
    /// Handle of the hit actor in its object manager
    pub key: ActorKey,
    /// Id of the hit actor
    pub id: String,
    /// Category of the hit actor
    pub actor_type: ActorType,
    /// Role of the hit actor
    pub role: CollisionRole,
}
