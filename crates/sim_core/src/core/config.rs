//! # Unified Configuration System
//!
//! Consolidates all configuration structures into a single, coherent system.
//!
//! ## Design Goals
//!
//! - **Centralized**: All configuration types in one place for easy discovery
//! - **Modular**: Clear separation between different subsystem configurations
//! - **Serializable**: Support for multiple config file formats (TOML, RON)
//! - **Type Safe**: Strong typing with validation and defaults
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Logging, debug features, tick rate
//! - **Event Config**: Event queue sizing
//! - **Scene Config**: Object partitioning and culling
//! - **Camera Config**: Camera list sizing and default projection

use serde::{Serialize, Deserialize};

use crate::camera::ProjectionParameters;

// Re-export from the config module for convenience
pub use crate::config::{Config, ConfigError, ConfigFormat};

/// # Engine Configuration
///
/// Core behavior configuration including logging and debug features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
    /// Target ticks per second for hosts that drive a fixed step
    pub target_fps: Option<u32>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
            target_fps: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Fixed tick length implied by `target_fps`
    pub fn fixed_delta(&self) -> Option<f32> {
        self.target_fps.filter(|fps| *fps > 0).map(|fps| 1.0 / fps as f32)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Event Configuration
///
/// Sizing for the deferred event queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Maximum number of events held between flushes
    pub queue_capacity: usize,
}

impl EventConfig {
    /// Create a new event configuration
    pub fn new() -> Self {
        Self { queue_capacity: 256 }
    }

    /// Set the queue capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Scene Configuration
///
/// Controls how the object manager partitions and culls actors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Drawable actors with alpha below this go to the transparent partition
    pub transparency_threshold: f32,
    /// Skip actors whose collision primitive lies outside the camera frustum
    pub frustum_culling: bool,
}

impl SceneConfig {
    /// Create a new scene configuration
    pub fn new() -> Self {
        Self {
            transparency_threshold: 1.0,
            frustum_culling: true,
        }
    }

    /// Enable or disable frustum culling
    pub fn with_frustum_culling(mut self, enabled: bool) -> Self {
        self.frustum_culling = enabled;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Camera Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Expected number of cameras, used to pre-size the camera list
    pub capacity: usize,
    /// Projection used by cameras built from configuration
    pub default_projection: ProjectionParameters,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            default_projection: ProjectionParameters::standard_deep_sixteen_nine(),
        }
    }
}

/// # Complete Simulation Configuration
///
/// Top-level configuration that encompasses all subsystems. This is the main
/// configuration structure applications should use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Event bus configuration
    pub events: EventConfig,
    /// Object manager configuration
    pub scene: SceneConfig,
    /// Camera manager configuration
    pub cameras: CameraConfig,
}

impl Config for SimConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.events.queue_capacity == 0 {
            return Err(ConfigError::Invalid("event queue capacity must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.scene.transparency_threshold) {
            return Err(ConfigError::Invalid(format!(
                "transparency threshold {} is outside [0, 1]",
                self.scene.transparency_threshold
            )));
        }
        self.cameras
            .default_projection
            .validate()
            .map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
