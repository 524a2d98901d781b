//! # Core Module
//!
//! Shared configuration for every subsystem of the simulation core.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for engine, events, scene and cameras

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    CameraConfig,
    EngineConfig,
    EventConfig,
    SceneConfig,
    SimConfig,
    Config,
    ConfigError,
    ConfigFormat,
};
