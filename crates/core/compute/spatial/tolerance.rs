//! Point plus radius to bounding box conversion.
//!
//! Computes the lat/lon rectangle enclosing every point within a great-circle
//! distance of a center, following Jan Matuschek's "Finding Points Within a
//! Distance of a Latitude/Longitude Using Bounding Coordinates". Boxes that
//! would reach over a pole or across the antimeridian are widened to the full
//! longitude range instead of wrapping.

use picket_types::{BoundingBox, Coordinate};
use std::f64::consts::{FRAC_PI_2, PI};

/// Mean earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Bounding box enclosing the disc of radius `meters` around `center`.
///
/// NaN or negative radii are treated as zero; a radius of half the earth's
/// circumference or more yields [`BoundingBox::world`].
///
/// # Examples
///
/// ```
/// use picket::compute::spatial::tolerance_box;
/// use picket_types::Coordinate;
///
/// let bbox = tolerance_box(Coordinate::new(0.0, 0.0), 111_000.0);
/// assert!((bbox.max().lat() - 1.0).abs() < 0.01);
/// assert!((bbox.min().lon() + 1.0).abs() < 0.01);
///
/// let polar = tolerance_box(Coordinate::new(89.9, 10.0), 50_000.0);
/// assert_eq!(polar.min().lon(), -180.0);
/// assert_eq!(polar.max().lon(), 180.0);
/// ```
pub fn tolerance_box(center: Coordinate, meters: f64) -> BoundingBox {
    let r = if meters > 0.0 {
        meters / EARTH_RADIUS_METERS
    } else {
        0.0
    };
    if r >= PI {
        return BoundingBox::world();
    }

    let lat = center.lat().clamp(-90.0, 90.0).to_radians();
    let lon = normalize_longitude(center.lon()).to_radians();

    let mut min_lat = lat - r;
    let mut max_lat = lat + r;
    let mut full_lon = false;

    if max_lat > FRAC_PI_2 {
        max_lat = FRAC_PI_2;
        full_lon = true;
    }
    if min_lat < -FRAC_PI_2 {
        min_lat = -FRAC_PI_2;
        full_lon = true;
    }

    let (mut min_lon, mut max_lon) = (-PI, PI);
    if !full_lon {
        let delta = (r.sin() / lat.cos()).clamp(-1.0, 1.0).asin();
        if lon - delta >= -PI && lon + delta <= PI {
            min_lon = lon - delta;
            max_lon = lon + delta;
        }
    }

    let to_lat = |rad: f64| rad.to_degrees().clamp(-90.0, 90.0);
    let to_lon = |rad: f64| {
        if rad <= -PI {
            -180.0
        } else if rad >= PI {
            180.0
        } else {
            rad.to_degrees().clamp(-180.0, 180.0)
        }
    };

    // Only a non-finite center gets here with unordered bounds.
    BoundingBox::new(
        Coordinate::new(to_lat(min_lat), to_lon(min_lon)),
        Coordinate::new(to_lat(max_lat), to_lon(max_lon)),
    )
    .unwrap_or_else(|_| BoundingBox::world())
}

/// Wrap a longitude into `[-180, 180]`. Values already in range are unchanged.
fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}
