//! Geographic coordinates and geometry kinds.
//!
//! [`Coordinate`] wraps a `geo::Coord` (x = longitude, y = latitude) but is
//! always constructed latitude first, the order fences are queried in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate in degrees.
///
/// # Examples
///
/// ```
/// use picket_types::Coordinate;
///
/// let manila = Coordinate::new(14.5995, 120.9842);
/// assert_eq!(manila.lat(), 14.5995);
/// assert_eq!(manila.lon(), 120.9842);
/// assert_eq!(manila.to_string(), "[14.59950, 120.98420]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLon", into = "LatLon")]
pub struct Coordinate {
    inner: geo::Coord<f64>,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            inner: geo::coord! { x: lon, y: lat },
        }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.inner.y
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.inner.x
    }

    /// Access the inner `geo::Coord`.
    #[inline]
    pub fn inner(&self) -> &geo::Coord<f64> {
        &self.inner
    }

    /// Convert into the inner `geo::Coord`.
    #[inline]
    pub fn into_inner(self) -> geo::Coord<f64> {
        self.inner
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(inner: geo::Coord<f64>) -> Self {
        Self { inner }
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.inner
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo::Point::from(coordinate.inner)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5}, {:.5}]", self.lat(), self.lon())
    }
}

/// Serialized form of a [`Coordinate`].
#[derive(Clone, Copy, Serialize, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

impl From<LatLon> for Coordinate {
    fn from(value: LatLon) -> Self {
        Self::new(value.lat, value.lon)
    }
}

impl From<Coordinate> for LatLon {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.lat(),
            lon: value.lon(),
        }
    }
}

/// The GeoJSON geometry a feature was adapted from.
///
/// Serialized with the GeoJSON type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    #[serde(rename = "LineString")]
    Line,
    MultiPoint,
    #[serde(rename = "MultiLineString")]
    MultiLine,
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    /// Dimensionless kinds. These are never indexed for containment search.
    #[inline]
    pub fn is_point(self) -> bool {
        matches!(self, Self::Point | Self::MultiPoint)
    }

    /// The GeoJSON type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Line => "LineString",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLine => "MultiLineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_axes() {
        let c = Coordinate::new(39.74, -105.0);
        assert_eq!(c.lat(), 39.74);
        assert_eq!(c.lon(), -105.0);
        assert_eq!(c.inner().x, -105.0);
        assert_eq!(c.inner().y, 39.74);

        let point: geo::Point<f64> = c.into();
        assert_eq!(point.x(), -105.0);
        assert_eq!(point.y(), 39.74);
    }

    #[test]
    fn test_coordinate_serde() {
        let c = Coordinate::new(1.5, -2.5);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"lat":1.5,"lon":-2.5}"#);

        let parsed: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn test_geometry_kind_names() {
        assert_eq!(GeometryKind::Line.to_string(), "LineString");
        assert_eq!(
            serde_json::to_string(&GeometryKind::MultiLine).unwrap(),
            r#""MultiLineString""#
        );
        assert!(GeometryKind::Point.is_point());
        assert!(GeometryKind::MultiPoint.is_point());
        assert!(!GeometryKind::Line.is_point());
        assert!(!GeometryKind::MultiPolygon.is_point());
    }
}
