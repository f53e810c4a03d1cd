use crate::error::GeometryError;
use crate::geo::Coordinate;
use geo::Rect;
use std::fmt;

/// An axis-aligned bounding box in latitude/longitude space.
///
/// Wraps a `geo::Rect`. Unlike `Rect::new`, construction never reorders the
/// corners: a minimum greater than the maximum on either axis is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    rect: Rect<f64>,
}

impl BoundingBox {
    /// Create a bounding box from its minimum and maximum corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use picket_types::{BoundingBox, Coordinate};
    ///
    /// let bbox = BoundingBox::new(Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0));
    /// assert!(bbox.is_ok());
    ///
    /// let flipped = BoundingBox::new(Coordinate::new(10.0, 0.0), Coordinate::new(0.0, 10.0));
    /// assert!(flipped.is_err());
    /// ```
    pub fn new(min: Coordinate, max: Coordinate) -> Result<Self, GeometryError> {
        // Written so that NaN bounds are rejected as well.
        if !(min.lat() <= max.lat() && min.lon() <= max.lon()) {
            return Err(GeometryError::InvalidBoundingBox { min, max });
        }
        Ok(Self {
            rect: Rect::new(min.into_inner(), max.into_inner()),
        })
    }

    /// A degenerate box covering a single coordinate.
    pub fn from_coordinate(c: Coordinate) -> Self {
        Self {
            rect: Rect::new(c.into_inner(), c.into_inner()),
        }
    }

    /// The whole lat/lon domain: [-90, 90] x [-180, 180].
    pub fn world() -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: -180.0, y: -90.0 },
                geo::coord! { x: 180.0, y: 90.0 },
            ),
        }
    }

    /// The lower-left (south-west) corner.
    #[inline]
    pub fn min(&self) -> Coordinate {
        self.rect.min().into()
    }

    /// The upper-right (north-east) corner.
    #[inline]
    pub fn max(&self) -> Coordinate {
        self.rect.max().into()
    }

    /// Alias for [`BoundingBox::min`], the corner the index keys entries by.
    #[inline]
    pub fn lower_left(&self) -> Coordinate {
        self.min()
    }

    /// Alias for [`BoundingBox::max`].
    #[inline]
    pub fn upper_right(&self) -> Coordinate {
        self.max()
    }

    /// Extent along the latitude axis in degrees.
    pub fn lat_span(&self) -> f64 {
        self.rect.height()
    }

    /// Extent along the longitude axis in degrees.
    pub fn lon_span(&self) -> f64 {
        self.rect.width()
    }

    /// Access the underlying `geo::Rect`.
    #[inline]
    pub fn rect(&self) -> &Rect<f64> {
        &self.rect
    }

    /// Check if a coordinate lies inside or on the edge of this box.
    pub fn contains(&self, c: Coordinate) -> bool {
        let (min, max) = (self.rect.min(), self.rect.max());
        c.lon() >= min.x && c.lon() <= max.x && c.lat() >= min.y && c.lat() <= max.y
    }

    /// Check if two boxes overlap. Touching edges count as overlap.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let (a_min, a_max) = (self.rect.min(), self.rect.max());
        let (b_min, b_max) = (other.rect.min(), other.rect.max());
        !(a_max.x < b_min.x || a_min.x > b_max.x || a_max.y < b_min.y || a_min.y > b_max.y)
    }

    /// The tightest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> Self {
        let (a_min, a_max) = (self.rect.min(), self.rect.max());
        let (b_min, b_max) = (other.rect.min(), other.rect.max());
        Self {
            rect: Rect::new(
                geo::coord! { x: a_min.x.min(b_min.x), y: a_min.y.min(b_min.y) },
                geo::coord! { x: a_max.x.max(b_max.x), y: a_max.y.max(b_max.y) },
            ),
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min(), self.max())
    }
}
