//! Content dictionaries
//!
//! Assets are loaded by the host and registered under string keys. The core
//! only ever holds shared, immutable `Arc` handles to them.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

/// Asset lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// A required key was never registered
    #[error("Asset '{key}' not found in dictionary '{dictionary}'")]
    Missing {
        /// Dictionary name
        dictionary: String,
        /// Requested key
        key: String,
    },
}

/// Geometry handle registered by the host
///
/// The renderer resolves the actual buffers from `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    /// Content key
    pub key: String,
    /// Number of vertices in the mesh
    pub vertex_count: u32,
}

impl Geometry {
    /// Create a geometry handle
    pub fn new(key: impl Into<String>, vertex_count: u32) -> Self {
        Self {
            key: key.into(),
            vertex_count,
        }
    }
}

/// Texture handle registered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Content key
    pub key: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Texture {
    /// Create a texture handle
    pub fn new(key: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
        }
    }
}

/// Named map from string keys to shared handles
#[derive(Debug)]
pub struct ContentDictionary<T> {
    name: String,
    entries: HashMap<String, Arc<T>>,
}

impl<T> ContentDictionary<T> {
    /// Create an empty dictionary
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Dictionary name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a value; returns `false` and keeps the old value if the key exists
    pub fn add(&mut self, key: impl Into<String>, value: T) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            log::warn!("Dictionary '{}' already contains '{}'", self.name, key);
            return false;
        }
        log::debug!("Dictionary '{}' registered '{}'", self.name, key);
        self.entries.insert(key, Arc::new(value));
        true
    }

    /// Optional lookup
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.entries.get(key).cloned()
    }

    /// Lookup that treats a miss as an error
    pub fn require(&self, key: &str) -> Result<Arc<T>, AssetError> {
        self.get(key).ok_or_else(|| AssetError::Missing {
            dictionary: self.name.clone(),
            key: key.to_string(),
        })
    }

    /// Remove an entry; outstanding handles stay valid
    pub fn remove(&mut self, key: &str) -> Option<Arc<T>> {
        self.entries.remove(key)
    }

    /// Whether the key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_lookup_reports_missing_key() {
        let mut textures = ContentDictionary::new("textures");
        assert!(textures.add("crate", Texture::new("crate", 256, 256)));
        assert!(!textures.add("crate", Texture::new("crate", 1, 1)));

        assert_eq!(textures.require("crate").unwrap().width, 256);
        assert_eq!(
            textures.require("grass"),
            Err(AssetError::Missing {
                dictionary: "textures".to_string(),
                key: "grass".to_string(),
            })
        );
        assert!(textures.get("grass").is_none());
    }

    #[test]
    fn test_handles_are_shared() {
        let mut meshes = ContentDictionary::new("geometry");
        meshes.add("cube", Geometry::new("cube", 36));
        let a = meshes.require("cube").unwrap();
        let b = meshes.require("cube").unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        meshes.remove("cube");
        assert_eq!(a.vertex_count, 36);
    }
}
