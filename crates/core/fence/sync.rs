//! Thread-safe wrapper for concurrent registry access.
//!
//! This module provides `SyncFenceIndex`, a [`FenceIndex`] behind a single
//! reader/writer lock. Searches and listings share the lock; `set` and `add`
//! take it exclusively, so readers never observe a half-applied write.

use crate::error::Result;
use crate::fence::{Feature, Fence, FenceIndex};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use picket_types::Coordinate;
use std::sync::Arc;

/// Thread-safe wrapper around `FenceIndex`.
///
/// Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct SyncFenceIndex {
    inner: Arc<RwLock<FenceIndex>>,
}

impl SyncFenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `fence` under `name`, returning the fence it replaced.
    pub fn set(&self, name: impl Into<String>, fence: Fence) -> Option<Fence> {
        self.inner.write().set(name, fence)
    }

    /// Read access to one fence. The registry stays read-locked while the guard lives.
    pub fn get(&self, name: &str) -> Option<MappedRwLockReadGuard<'_, Fence>> {
        RwLockReadGuard::try_map(self.inner.read(), |index| index.get(name)).ok()
    }

    /// Add a feature to an existing fence.
    pub fn add(&self, name: &str, feature: Feature) -> Result<usize> {
        self.inner.write().add(name, feature)
    }

    /// Search the fence stored under `name`.
    pub fn search(&self, name: &str, point: Coordinate, tolerance: f64) -> Result<Vec<Arc<Feature>>> {
        self.inner.read().search(name, point, tolerance)
    }

    /// Sorted snapshot of the fence names.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains(name)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl From<FenceIndex> for SyncFenceIndex {
    fn from(index: FenceIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }
}
