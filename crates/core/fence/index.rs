//! Unsynchronized name to fence registry.

use crate::error::{PicketError, Result};
use crate::fence::{Feature, Fence};
use picket_types::Coordinate;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A dictionary of named fences, for serving several data sets from one process.
///
/// Fences can be replaced or extended but never removed. Wrap it in a
/// [`SyncFenceIndex`](crate::SyncFenceIndex) to share it between threads.
#[derive(Debug, Default)]
pub struct FenceIndex {
    fences: FxHashMap<String, Fence>,
}

impl FenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `fence` under `name`, returning the fence it replaced.
    pub fn set(&mut self, name: impl Into<String>, fence: Fence) -> Option<Fence> {
        self.fences.insert(name.into(), fence)
    }

    pub fn get(&self, name: &str) -> Option<&Fence> {
        self.fences.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Fence> {
        self.fences.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fences.contains_key(name)
    }

    /// Add a feature to an existing fence, returning the index entries written.
    ///
    /// # Errors
    ///
    /// [`PicketError::FenceNotFound`] when no fence is stored under `name`.
    pub fn add(&mut self, name: &str, feature: Feature) -> Result<usize> {
        let fence = self
            .fences
            .get_mut(name)
            .ok_or_else(|| PicketError::FenceNotFound(name.to_string()))?;
        Ok(fence.add(feature))
    }

    /// Search the fence stored under `name`.
    ///
    /// # Errors
    ///
    /// [`PicketError::FenceNotFound`] when no fence is stored under `name`.
    pub fn search(
        &self,
        name: &str,
        point: Coordinate,
        tolerance: f64,
    ) -> Result<Vec<Arc<Feature>>> {
        let fence = self
            .fences
            .get(name)
            .ok_or_else(|| PicketError::FenceNotFound(name.to_string()))?;
        log::debug!(
            "Searching fence for latitude : {:.5}, longitude : {:.5} in {:?}",
            point.lat(),
            point.lon(),
            name
        );
        Ok(fence.search(point, tolerance))
    }

    /// Sorted snapshot of the fence names.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.fences.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fences.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fences.is_empty()
    }
}
