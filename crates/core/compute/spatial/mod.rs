//! Spatial indexing: Hilbert curve keys, the Hilbert R-tree and tolerance boxes.

pub mod hilbert;
pub use hilbert::HilbertCurve;

pub mod rtree;
pub use rtree::HilbertRTree;

pub mod tolerance;
pub use tolerance::{EARTH_RADIUS_METERS, tolerance_box};
