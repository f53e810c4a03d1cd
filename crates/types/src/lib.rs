//! # picket-types
//!
//! Geometry engine for the Picket geofencing service.
//!
//! This crate provides the value types every fence is built from, along with
//! the exact geometric predicates used to filter index candidates:
//!
//! - **Coordinates**: [`Coordinate`], latitude/longitude in degrees
//! - **Bounding boxes**: [`BoundingBox`], validated axis-aligned rectangles
//! - **Rings and polygons**: [`Ring`], [`Polygon`] with winding-number containment
//!   and right-hand-rule orientation normalization
//! - **Geometry kinds**: [`GeometryKind`], the GeoJSON geometry tag of a feature
//!
//! All types are built on top of the `geo` crate's coordinate primitives.
//!
//! ## Examples
//!
//! ```rust
//! use picket_types::{Coordinate, Polygon, Ring};
//!
//! let square: Ring = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
//!     .into_iter()
//!     .map(|(lat, lon)| Coordinate::new(lat, lon))
//!     .collect();
//! let polygon = Polygon::from_exterior(square);
//!
//! assert!(polygon.contains(Coordinate::new(5.0, 5.0)));
//! assert!(!polygon.contains(Coordinate::new(50.0, 50.0)));
//! ```

pub mod bbox;
pub mod error;
pub mod geo;
pub mod polygon;

pub use crate::bbox::BoundingBox;
pub use crate::error::GeometryError;
pub use crate::geo::{Coordinate, GeometryKind};
pub use crate::polygon::{Polygon, Ring};
