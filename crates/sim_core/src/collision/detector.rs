//! First-hit query for a staged move
//!
//! Pure functions over borrowed actors: nothing here mutates the scene.
//! Every mover scans every candidate, so the cost is linear per moving actor
//! and a pair of movers tests each other twice per tick.

use super::{Collidee, CollisionPrimitive};
use crate::actor::{Actor, ActorKey};
use crate::foundation::math::Vec3;

/// Test one candidate against the mover's projected primitive
pub fn test_candidate(
    mover: ActorKey,
    primitive: &CollisionPrimitive,
    translation: Vec3,
    candidate_key: ActorKey,
    candidate: &Actor,
) -> Option<Collidee> {
    if candidate_key == mover {
        return None;
    }
    let collision = candidate.collision()?;
    if !primitive.intersects_projected(&collision.primitive, translation) {
        return None;
    }
    Some(Collidee {
        key: candidate_key,
        id: candidate.id().to_string(),
        actor_type: candidate.actor_type(),
        role: collision.role,
    })
}

/// First candidate, in iteration order, that the projected primitive would overlap
///
/// Candidates are expected in opaque-then-transparent insertion order; the
/// mover itself is skipped by key.
pub fn find_first_collision<'a, I>(
    mover: ActorKey,
    primitive: &CollisionPrimitive,
    translation: Vec3,
    candidates: I,
) -> Option<Collidee>
where
    I: IntoIterator<Item = (ActorKey, &'a Actor)>,
{
    candidates
        .into_iter()
        .find_map(|(key, candidate)| test_candidate(mover, primitive, translation, key, candidate))
}
