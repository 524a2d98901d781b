//! Loading and saving simulation settings
//!
//! Settings files are TOML or RON, picked by extension. Loading always
//! validates, so a [`Simulation`](crate::Simulation) is never built from
//! out-of-range values read off disk.

use std::fmt;
use std::path::{Path, PathBuf};

pub use serde::{Deserialize, Serialize};

/// On-disk format of a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Ron => f.write_str("RON"),
        }
    }
}

/// Settings that can be read from and written to disk
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Reject out-of-range values
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Parse settings text; missing fields take their defaults
    fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format,
                message: e.to_string(),
            })?,
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse {
                format,
                message: e.to_string(),
            })?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Render the settings in `format`
    fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        let rendered = match format {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| ConfigError::Serialize { format, message })
    }

    /// Read, parse and validate a settings file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents, format)?;
        log::info!("Loaded {} settings from {}", format, path.display());
        Ok(config)
    }

    /// Write the settings in the format implied by `path`
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.render(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Settings errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The text is not valid for its format
    #[error("Invalid {format} settings: {message}")]
    Parse {
        /// Format being read
        format: ConfigFormat,
        /// Parser message
        message: String,
    },

    /// The settings could not be rendered
    #[error("Cannot write {format} settings: {message}")]
    Serialize {
        /// Format being written
        format: ConfigFormat,
        /// Serializer message
        message: String,
    },

    /// The extension names no supported format
    #[error("Unsupported settings file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
