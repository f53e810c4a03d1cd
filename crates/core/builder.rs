//! Fence index builder for loading fences at startup.
//!
//! This module provides a builder that reads a directory of GeoJSON files
//! into a registry, one fence per file, named after the file.

use crate::compute::geojson::GeoJsonSource;
use crate::config::IndexConfig;
use crate::error::{PicketError, Result};
use crate::fence::{Fence, FenceIndex, SyncFenceIndex};
use std::path::{Path, PathBuf};

/// Fence name for a source file: the lower-cased file stem with every run of
/// characters outside `[a-z0-9]` collapsed to `-`, trimmed of leading and
/// trailing `-`.
///
/// # Examples
///
/// ```
/// use picket::builder::fence_name;
///
/// assert_eq!(fence_name("data/US Counties (2020).geojson"), "us-counties-2020");
/// assert_eq!(fence_name("/tmp/roads.json"), "roads");
/// ```
pub fn fence_name(path: impl AsRef<Path>) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mut name = String::with_capacity(stem.len());
    let mut pending_dash = false;
    for c in stem.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !name.is_empty() {
                name.push('-');
            }
            pending_dash = false;
            name.push(c);
        } else {
            pending_dash = true;
        }
    }
    name
}

/// Builder for a fence registry loaded from a directory of GeoJSON files.
#[derive(Debug)]
pub struct FenceIndexBuilder {
    directory: Option<PathBuf>,
    config: IndexConfig,
}

impl FenceIndexBuilder {
    /// Create a new builder with the default index configuration.
    pub fn new() -> Self {
        Self {
            directory: None,
            config: IndexConfig::default(),
        }
    }

    /// Set the directory holding the `*json` source files.
    pub fn directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.directory = Some(path.into());
        self
    }

    /// Set the index configuration every fence is built with.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    /// Build a thread-safe registry.
    pub fn build(self) -> Result<SyncFenceIndex> {
        self.build_unsync().map(SyncFenceIndex::from)
    }

    /// Build the plain registry.
    ///
    /// Without a directory the registry is empty. With one, files that cannot
    /// be read or parsed and features that fail to convert are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration or an unreadable
    /// directory, and [`PicketError::NoFences`] when a directory was given but
    /// no fence could be loaded from it.
    pub fn build_unsync(self) -> Result<FenceIndex> {
        self.config.validate()?;

        let mut index = FenceIndex::new();
        let Some(dir) = self.directory else {
            return Ok(index);
        };

        for path in source_files(&dir)? {
            let name = fence_name(&path);
            log::info!("Indexing {:?} from {}", name, path.display());

            match load_fence(&path, self.config) {
                Ok((fence, loaded)) => {
                    log::info!("Loaded {} features for {:?}", loaded, name);
                    index.set(name, fence);
                }
                Err(e) => log::warn!("Skipping fence {:?}: {}", name, e),
            }
        }

        if index.is_empty() {
            return Err(PicketError::NoFences(dir));
        }
        Ok(index)
    }
}

impl Default for FenceIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load every `*json` file in `dir` with the default configuration.
pub fn load_index(dir: impl Into<PathBuf>) -> Result<SyncFenceIndex> {
    FenceIndexBuilder::new().directory(dir).build()
}

/// Files directly in `dir` whose name ends in `json`, sorted by path.
fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| PicketError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_json = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with("json"));
        if is_json && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Build one fence from a file, returning it with the number of features indexed.
fn load_fence(path: &Path, config: IndexConfig) -> Result<(Fence, usize)> {
    let source = GeoJsonSource::open(path)?;
    let mut fence = Fence::new(config)?;
    let mut loaded = 0;

    for (i, feature) in source.features().enumerate() {
        match feature {
            Ok(feature) if feature.kind().is_point() => {}
            Ok(feature) => {
                if fence.add(feature) > 0 {
                    loaded += 1;
                }
            }
            Err(e) => log::warn!("Skipping feature {} in {}: {}", i, path.display(), e),
        }
    }
    Ok((fence, loaded))
}
