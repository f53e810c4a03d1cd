//! Spatial index configuration.
//!
//! [`IndexConfig`] controls the fan-out of every node in a fence's Hilbert
//! R-tree and the resolution of the Hilbert grid entries are keyed on.
use crate::error::{PicketError, Result};
use serde::de::Error;

/// Hilbert R-tree configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Minimum number of children a split node keeps.
    #[serde(default = "IndexConfig::default_min_children")]
    pub min_children: usize,

    /// Maximum number of children before a node overflows and splits.
    #[serde(default = "IndexConfig::default_max_children")]
    pub max_children: usize,

    /// Hilbert curve order; the grid has `2^(resolution - 1)` cells per axis.
    #[serde(default = "IndexConfig::default_resolution")]
    pub resolution: u32,
}

impl IndexConfig {
    pub const MAX_RESOLUTION: u32 = 32;

    const fn default_min_children() -> usize {
        50
    }

    const fn default_max_children() -> usize {
        200
    }

    const fn default_resolution() -> u32 {
        Self::MAX_RESOLUTION
    }

    pub fn with_min_children(mut self, min: usize) -> Self {
        self.min_children = min;
        self
    }

    pub fn with_max_children(mut self, max: usize) -> Self {
        self.max_children = max;
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Check that every overflowing node can be split into two halves that
    /// each keep at least `min_children`. A root split always yields two
    /// children, so `max_children` must be at least 2.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.min_children, self.max_children);
        if min == 0 || max < 2 || min > max || max + 1 < 2 * min {
            return Err(PicketError::InvalidCapacity { min, max });
        }

        if !(1..=Self::MAX_RESOLUTION).contains(&self.resolution) {
            return Err(PicketError::InvalidResolution(self.resolution));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: IndexConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: IndexConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read a TOML configuration file.
    ///
    /// # Errors
    ///
    /// [`PicketError::Io`] when the file cannot be read and
    /// [`PicketError::InvalidConfig`] when it does not parse or validate.
    #[cfg(feature = "toml")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PicketError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
            .map_err(|e| PicketError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_children: Self::default_min_children(),
            max_children: Self::default_max_children(),
            resolution: Self::default_resolution(),
        }
    }
}
