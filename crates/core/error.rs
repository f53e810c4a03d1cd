//! Error types for fence construction, loading and lookup.

use picket_types::GeometryError;
use std::path::PathBuf;

/// Errors returned by the fence index, its configuration and the loader.
#[derive(Debug, thiserror::Error)]
pub enum PicketError {
    /// Invalid bounding box or empty ring while building geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Node capacity bounds that cannot produce valid splits.
    #[error("Invalid node capacity: min {min}, max {max}")]
    InvalidCapacity { min: usize, max: usize },

    /// Hilbert curve resolution outside `1..=32`.
    #[error("Invalid Hilbert resolution {0}, expected 1..=32")]
    InvalidResolution(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed input geometry.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fence index does not contain fence {0:?}")]
    FenceNotFound(String),

    #[error("No valid geojson fences at {}", .0.display())]
    NoFences(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PicketError>;

impl PicketError {
    /// Whether the error was caused by bad caller input rather than a missing fence or IO.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Geometry(_) | Self::Validation(_) | Self::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picket_types::Coordinate;

    #[test]
    fn test_geometry_errors_convert() {
        let err: PicketError = GeometryError::EmptyRing.into();
        assert!(matches!(err, PicketError::Geometry(GeometryError::EmptyRing)));
        assert!(err.is_invalid_input());

        let bbox = GeometryError::InvalidBoundingBox {
            min: Coordinate::new(1.0, 1.0),
            max: Coordinate::new(0.0, 0.0),
        };
        assert_eq!(
            PicketError::from(bbox).to_string(),
            "Invalid bounding box: min [1.00000, 1.00000] > max [0.00000, 0.00000]"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = PicketError::FenceNotFound("missing-fence".into());
        assert_eq!(
            err.to_string(),
            r#"Fence index does not contain fence "missing-fence""#
        );
        assert!(!err.is_invalid_input());
    }
}
