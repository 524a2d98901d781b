//! Application trait and lifecycle management

use crate::assets::AssetError;
use crate::events::EventError;
use crate::input::InputState;
use crate::scene::SceneError;
use crate::simulation::{SimError, Simulation};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to build a scene on the simulation core and drive it
/// with [`Simulation::run_for`].
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first tick. Use this to register assets and
    /// archetypes, add actors and cameras, and subscribe to events.
    fn initialize(&mut self, sim: &mut Simulation) -> Result<(), AppError>;

    /// Fill in input for the coming tick
    ///
    /// Called before every tick with the previous tick's state already rolled
    /// over. The default leaves input untouched.
    fn sample_input(&mut self, _tick: u64, _input: &mut InputState) {}

    /// Update the application
    ///
    /// Called after every simulation tick, once all actors and cameras have
    /// updated and the frame has been drawn.
    fn update(&mut self, sim: &mut Simulation) -> Result<(), AppError>;

    /// Cleanup the application
    ///
    /// Called once after the last tick.
    fn cleanup(&mut self, sim: &mut Simulation);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Simulation error propagated to application level
    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    /// Scene construction error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Asset lookup error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Event could not be published
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
