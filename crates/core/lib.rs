//! In-memory geofencing with Hilbert R-tree indexing and exact containment.
//!
//! ## Features
//! - **Fences**: named collections of polygon features, with holes, loaded from GeoJSON
//! - **Spatial indexing**: a Hilbert R-tree prunes candidates by bounding box
//! - **Exact containment**: winding-number tests filter the candidates
//! - **Tolerance queries**: a point plus a radius in meters becomes a geographic
//!   search box, widened over the poles and the antimeridian
//! - **Registry**: a name to fence mapping, with a reader/writer-locked variant
//!   for sharing between request handlers
//!
//! ```rust
//! use picket::{Fence, Coordinate};
//! use picket::geojson::feature_from_str;
//!
//! let mut fence = Fence::default();
//! fence.add(feature_from_str(
//!     r#"{"type": "Feature", "properties": {"name": "square"},
//!         "geometry": {"type": "Polygon",
//!                      "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10]]]}}"#,
//! )?);
//!
//! let found = fence.search(Coordinate::new(5.0, 5.0), 1.0);
//! assert_eq!(found[0].properties()["name"], "square");
//! assert!(fence.search(Coordinate::new(50.0, 50.0), 1.0).is_empty());
//! # Ok::<(), picket::PicketError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod fence;

pub use builder::{FenceIndexBuilder, fence_name, load_index};
pub use config::IndexConfig;
pub use error::{PicketError, Result};
pub use fence::{Feature, Fence, FenceIndex, Properties, SyncFenceIndex};

pub use compute::spatial::{HilbertRTree, tolerance_box};
pub use picket_types::{BoundingBox, Coordinate, GeometryError, GeometryKind, Polygon, Ring};

// Re-export GeoJSON utilities
pub use compute::geojson;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{FenceIndexBuilder, PicketError, Result};

    pub use crate::{Feature, Fence, FenceIndex, SyncFenceIndex};

    pub use crate::{BoundingBox, Coordinate, GeometryKind, Polygon, Ring};

    pub use crate::{IndexConfig, tolerance_box};

    pub use crate::geojson;
}
