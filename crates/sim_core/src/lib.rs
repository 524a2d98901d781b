//! # Sim Core
//!
//! A small real-time 3D scene simulation core.
//!
//! ## Features
//!
//! - **Actors & Controllers**: entities animated by composing independent,
//!   playable behavior units instead of subclassing
//! - **Object Management**: opaque/transparent partitions iterated in
//!   insertion order for update, draw and collision queries
//! - **Predictive Collision**: box/sphere primitives tested at their projected
//!   position before a move is committed, with passive trigger zones
//! - **Event Bus**: deferred, category-routed publish/subscribe that couples
//!   subsystems without static references
//! - **Cameras**: multiple viewpoints with one input-routing camera and any
//!   number of draw-active cameras
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sim_core::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, sim: &mut Simulation) -> Result<(), AppError> {
//!         let crate_box = Actor::new("crate", ActorType::CollidableArchitecture, Transform3D::from_translation(Vec3::zeros()))
//!             .with_collision(CollisionPrimitive::unit_box(), CollisionRole::Solid);
//!         sim.objects.add(crate_box)?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _sim: &mut Simulation) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _sim: &mut Simulation) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut sim = Simulation::new(SimConfig::default())?;
//!     let mut app = MyApp;
//!     sim.run_for(&mut app, &mut NullRenderer::new(), 60, 1.0 / 60.0)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod foundation;
pub mod config;
pub mod events;
pub mod input;
pub mod assets;
pub mod actor;
pub mod controllers;
pub mod collision;
pub mod scene;
pub mod camera;
pub mod render;

mod application;
mod context;
mod simulation;

pub use application::{Application, AppError};
pub use context::{DebugSettings, SimContext};
pub use simulation::{SimError, Simulation};

/// Common imports for simulation users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Simulation, SimError, SimContext,
        foundation::{
            math::{Vec2, Vec3, Mat4, Transform3D},
            time::{GameTime, CountdownTimer},
        },
        actor::{Actor, ActorKey, ActorType, StatusFlags, Material},
        actor::controller::{Controller, ControllerType, PlayStatus, UpdateContext},
        collision::{CollisionPrimitive, CollisionRole, Collidee},
        events::{EventActionType, EventArg, EventCategoryType, EventData, EventDispatcher},
        scene::ObjectManager,
        camera::{Camera3D, CameraManager, ProjectionParameters, Viewport},
        input::{InputSource, InputState, KeyCode},
        render::{NullRenderer, Renderer},
        core::config::SimConfig,
    };
}
