//! Errors raised while constructing geometry.

use crate::geo::Coordinate;

/// Geometry construction failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A bounding box whose minimum exceeds its maximum on either axis.
    #[error("Invalid bounding box: min {min} > max {max}")]
    InvalidBoundingBox { min: Coordinate, max: Coordinate },

    /// A ring with no coordinate to seed a bounding box.
    #[error("Ring has no coordinates")]
    EmptyRing,
}
