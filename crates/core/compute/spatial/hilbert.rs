//! Hilbert curve linearization of latitude/longitude coordinates.
//!
//! Each axis is quantized onto a `2^(resolution - 1)` grid and the cell is
//! mapped to its distance along the Hilbert curve covering that grid. Nearby
//! cells get nearby distances, which is what keeps the R-tree's key-ordered
//! leaves spatially compact.

use picket_types::Coordinate;

const LAT_OFFSET: f64 = 90.0;
const LAT_RANGE: f64 = 180.0;
const LON_OFFSET: f64 = 180.0;
const LON_RANGE: f64 = 360.0;

/// A Hilbert curve over the lat/lon domain at a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HilbertCurve {
    grid: u64,
}

impl HilbertCurve {
    /// Curve with `2^(resolution - 1)` cells per axis.
    ///
    /// `resolution` must be in `1..=32`; [`IndexConfig::validate`] enforces this
    /// before any curve is built. Out-of-range values are clamped.
    ///
    /// [`IndexConfig::validate`]: crate::config::IndexConfig::validate
    pub fn new(resolution: u32) -> Self {
        let shift = resolution.clamp(1, 32) - 1;
        Self { grid: 1u64 << shift }
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn grid_size(&self) -> u64 {
        self.grid
    }

    /// Grid ordinate for `value` on an axis spanning `[-offset, range - offset]`.
    ///
    /// Values outside the axis, and NaN, are clamped into `[0, grid - 1]`.
    #[inline]
    fn ordinate(&self, value: f64, offset: f64, range: f64) -> u64 {
        let scaled = (self.grid as f64 * (value + offset) / range).floor();
        // `as` saturates and maps NaN to zero.
        (scaled as u64).min(self.grid - 1)
    }

    /// Hilbert distance of the cell holding `c`, with longitude as x.
    pub fn key(&self, c: Coordinate) -> u64 {
        let x = self.ordinate(c.lon(), LON_OFFSET, LON_RANGE);
        let y = self.ordinate(c.lat(), LAT_OFFSET, LAT_RANGE);
        self.distance(x, y)
    }

    /// Distance along the curve of grid cell `(x, y)`.
    pub fn distance(&self, mut x: u64, mut y: u64) -> u64 {
        let n = self.grid;
        let mut d = 0u64;
        let mut s = n / 2;
        while s > 0 {
            let rx = u64::from(x & s > 0);
            let ry = u64::from(y & s > 0);
            d += s * s * ((3 * rx) ^ ry);
            rotate(n, &mut x, &mut y, rx, ry);
            s /= 2;
        }
        d
    }
}

/// Rotate and flip a quadrant so the sub-curve has the canonical orientation.
#[inline]
fn rotate(n: u64, x: &mut u64, y: &mut u64, rx: u64, ry: u64) {
    if ry == 0 {
        if rx == 1 {
            *x = n - 1 - *x;
            *y = n - 1 - *y;
        }
        std::mem::swap(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_first_order_curve() {
        let curve = HilbertCurve::new(2);
        assert_eq!(curve.grid_size(), 2);
        assert_eq!(curve.distance(0, 0), 0);
        assert_eq!(curve.distance(0, 1), 1);
        assert_eq!(curve.distance(1, 1), 2);
        assert_eq!(curve.distance(1, 0), 3);
    }

    #[test]
    fn test_curve_is_bijective_and_continuous() {
        let curve = HilbertCurve::new(5);
        let n = curve.grid_size();
        let mut by_distance = vec![(0, 0); (n * n) as usize];
        let mut seen = FxHashSet::default();

        for x in 0..n {
            for y in 0..n {
                let d = curve.distance(x, y);
                assert!(d < n * n);
                assert!(seen.insert(d), "distance {d} assigned twice");
                by_distance[d as usize] = (x, y);
            }
        }

        // Consecutive distances are always edge-adjacent cells.
        for pair in by_distance.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1);
        }
    }

    #[test]
    fn test_key_corners_and_clamping() {
        let curve = HilbertCurve::new(32);
        let max = curve.grid_size() - 1;

        assert_eq!(curve.key(Coordinate::new(-90.0, -180.0)), 0);
        assert_eq!(
            curve.key(Coordinate::new(90.0, 180.0)),
            curve.distance(max, max)
        );
        assert_eq!(
            curve.key(Coordinate::new(120.0, 500.0)),
            curve.key(Coordinate::new(90.0, 180.0))
        );
        assert_eq!(
            curve.key(Coordinate::new(f64::NAN, -400.0)),
            curve.key(Coordinate::new(-90.0, -180.0))
        );
    }

    #[test]
    fn test_resolution_one_is_a_single_cell() {
        let curve = HilbertCurve::new(1);
        assert_eq!(curve.grid_size(), 1);
        assert_eq!(curve.key(Coordinate::new(45.0, 45.0)), 0);
        assert_eq!(curve.key(Coordinate::new(-45.0, -45.0)), 0);
    }
}
