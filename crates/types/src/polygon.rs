//! Rings and polygons with winding-number containment.
//!
//! Rings are implicitly closed: the edge from the last coordinate back to the
//! first is always part of the ring, and an explicit closing duplicate only
//! adds a zero-length edge. Polygons follow the right-hand rule once
//! constructed: the exterior ring is counter-clockwise and every hole is
//! clockwise.
//!
//! Containment uses exact `f64` arithmetic. Whether a point lying exactly on
//! an edge is inside is implementation-defined.

use crate::bbox::BoundingBox;
use crate::error::GeometryError;
use crate::geo::Coordinate;

/// An ordered loop of coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    coords: Vec<Coordinate>,
}

impl Ring {
    pub fn new(coords: Vec<Coordinate>) -> Self {
        Self { coords }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn push(&mut self, c: Coordinate) {
        self.coords.push(c);
    }

    /// Reverse the point order in place.
    pub fn reverse(&mut self) {
        self.coords.reverse();
    }

    /// Consecutive edges, including the closing edge back to the first point.
    fn edges(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.coords
            .iter()
            .copied()
            .zip(self.coords.iter().copied().cycle().skip(1))
    }

    /// Bounding box of every coordinate in the ring.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyRing`] when there is no coordinate to seed
    /// the box with.
    pub fn bounding_box(&self) -> Result<BoundingBox, GeometryError> {
        let (first, rest) = self.coords.split_first().ok_or(GeometryError::EmptyRing)?;

        let (mut min_lat, mut min_lon) = (first.lat(), first.lon());
        let (mut max_lat, mut max_lon) = (min_lat, min_lon);
        for c in rest {
            min_lat = min_lat.min(c.lat());
            max_lat = max_lat.max(c.lat());
            min_lon = min_lon.min(c.lon());
            max_lon = max_lon.max(c.lon());
        }

        BoundingBox::new(
            Coordinate::new(min_lat, min_lon),
            Coordinate::new(max_lat, max_lon),
        )
    }

    /// Shoelace-style orientation test with longitude as x and latitude as y.
    ///
    /// Returns `true` when the signed sum is non-negative, so rings without
    /// area count as clockwise.
    pub fn is_clockwise(&self) -> bool {
        let sum: f64 = self
            .edges()
            .map(|(cur, next)| (next.lon() - cur.lon()) * (next.lat() + cur.lat()))
            .sum();
        sum >= 0.0
    }

    /// Signed number of times the ring winds around `q`.
    pub fn winding_number(&self, q: Coordinate) -> i32 {
        let mut wn = 0;
        for (head, tail) in self.edges() {
            if head.lat() <= q.lat() {
                if tail.lat() > q.lat() && is_left(head, tail, q) > 0.0 {
                    wn += 1;
                }
            } else if tail.lat() <= q.lat() && is_left(head, tail, q) < 0.0 {
                wn -= 1;
            }
        }
        wn
    }

    /// Non-zero winding rule. Rings with fewer than three points contain nothing.
    pub fn contains(&self, q: Coordinate) -> bool {
        self.coords.len() >= 3 && self.winding_number(q) != 0
    }
}

impl From<Vec<Coordinate>> for Ring {
    fn from(coords: Vec<Coordinate>) -> Self {
        Self::new(coords)
    }
}

impl FromIterator<Coordinate> for Ring {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Cross product sign of `q` against the directed edge `head -> tail`.
///
/// Positive when `q` is left of the edge, negative when right, zero when collinear.
#[inline]
fn is_left(head: Coordinate, tail: Coordinate, q: Coordinate) -> f64 {
    (tail.lon() - head.lon()) * (q.lat() - head.lat())
        - (q.lon() - head.lon()) * (tail.lat() - head.lat())
}

/// An exterior ring with zero or more holes.
///
/// Holes are expected to lie inside the exterior ring; this is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    /// Create a polygon and normalize its ring orientation.
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        let mut polygon = Self { exterior, holes };
        polygon.normalize_orientation();
        polygon
    }

    /// A polygon without holes.
    pub fn from_exterior(exterior: Ring) -> Self {
        Self::new(exterior, Vec::new())
    }

    #[inline]
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    #[inline]
    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// Number of points in the exterior ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.exterior.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// Enforce the right-hand rule: exterior counter-clockwise, holes clockwise.
    ///
    /// Rings already wound correctly are left untouched.
    pub fn normalize_orientation(&mut self) {
        if self.exterior.is_clockwise() {
            self.exterior.reverse();
        }
        for hole in &mut self.holes {
            if !hole.is_clockwise() {
                hole.reverse();
            }
        }
    }

    /// Check if `q` is inside the exterior ring and outside every hole.
    pub fn contains(&self, q: Coordinate) -> bool {
        self.exterior.contains(q) && !self.holes.iter().any(|hole| hole.contains(q))
    }

    /// Bounding box of the exterior ring.
    pub fn bounding_box(&self) -> Result<BoundingBox, GeometryError> {
        self.exterior.bounding_box()
    }
}
