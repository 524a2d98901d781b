//! Collision response hooks

use std::fmt;

use super::{Collidee, CollisionRole};
use crate::actor::ActorType;
use crate::events::{EventActionType, EventCategoryType, EventData, EventDispatcher};

/// Reaction to a blocked move
///
/// Runs after the staged move has been discarded. Responses communicate
/// through events only; anything structural (such as removing the collidee)
/// is published and applied at the next tick boundary.
pub trait CollisionResponse {
    /// Called once per tick in which the owner's move was blocked
    fn on_collision(&mut self, owner_id: &str, collidee: &Collidee, events: &EventDispatcher);

    /// Copy for actor duplication
    fn duplicate(&self) -> Box<dyn CollisionResponse>;
}

impl fmt::Debug for dyn CollisionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CollisionResponse")
    }
}

/// Player reaction: zones notify, pickups are collected
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerCollisionResponse;

impl PlayerCollisionResponse {
    fn publish(events: &EventDispatcher, event: EventData) {
        if let Err(err) = events.publish(event) {
            log::warn!("Player collision event dropped: {}", err);
        }
    }
}

impl CollisionResponse for PlayerCollisionResponse {
    fn on_collision(&mut self, owner_id: &str, collidee: &Collidee, events: &EventDispatcher) {
        if collidee.role == CollisionRole::Zone {
            log::debug!("'{}' entered zone '{}'", owner_id, collidee.id);
            Self::publish(
                events,
                EventData::new(EventActionType::OnZoneEnter, EventCategoryType::Player)
                    .with_sender(owner_id)
                    .with_text(collidee.id.as_str()),
            );
        } else if collidee.actor_type == ActorType::CollidablePickup {
            log::debug!("'{}' collected '{}'", owner_id, collidee.id);
            Self::publish(
                events,
                EventData::new(EventActionType::OnRemoveActor, EventCategoryType::SystemRemove)
                    .with_sender(owner_id)
                    .with_text(collidee.id.as_str()),
            );
            Self::publish(
                events,
                EventData::new(EventActionType::OnPickup, EventCategoryType::Player)
                    .with_sender(owner_id)
                    .with_text(collidee.id.as_str()),
            );
        }
    }

    fn duplicate(&self) -> Box<dyn CollisionResponse> {
        Box::new(*self)
    }
}
