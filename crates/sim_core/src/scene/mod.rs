//! Scene management
//!
//! The [`ObjectManager`] owns every live actor. Actors are partitioned into
//! an opaque and a transparent draw list when they are added, and the same
//! lists, in insertion order, drive update, draw and collision queries.

mod object_manager;

pub use object_manager::ObjectManager;
pub use crate::actor::controller::ActorLookup;

use thiserror::Error;

/// Scene errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// An actor with this id is already live
    #[error("Actor '{0}' already exists")]
    DuplicateActor(String),

    /// No archetype registered under this id
    #[error("Unknown archetype '{0}'")]
    UnknownArchetype(String),

    /// No live actor with this id
    #[error("Unknown actor '{0}'")]
    UnknownActor(String),
}
