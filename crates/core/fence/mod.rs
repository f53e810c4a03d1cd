//! Fences: named collections of polygon features behind a Hilbert R-tree.
//!
//! A [`Fence`] answers point queries in two phases. The tolerance box around
//! the query point is searched in the index for candidate features whose
//! polygon bounding boxes overlap it, then each candidate's polygons are
//! tested for exact containment of the point itself.

mod feature;
pub mod index;
pub mod sync;

pub use feature::{Feature, Properties};

use feature::FeatureId;
pub use index::FenceIndex;
pub use sync::SyncFenceIndex;

use crate::compute::spatial::{HilbertRTree, tolerance_box};
use crate::config::IndexConfig;
use crate::error::Result;
use picket_types::{BoundingBox, Coordinate};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::sync::Arc;

/// One named collection of indexed polygon features.
#[derive(Debug, Default)]
pub struct Fence {
    index: HilbertRTree<FeatureId>,
    features: Vec<Arc<Feature>>,
}

impl Fence {
    /// Create an empty fence.
    ///
    /// # Errors
    ///
    /// Fails only when `config` is not a valid index configuration.
    pub fn new(config: IndexConfig) -> Result<Self> {
        Ok(Self {
            index: HilbertRTree::new(config)?,
            features: Vec::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &IndexConfig {
        self.index.config()
    }

    /// Index `feature`, returning the number of index entries written.
    ///
    /// Point and multipoint features are never indexed. Every polygon with at
    /// least two exterior points gets one entry; a feature with no such polygon
    /// is dropped.
    pub fn add(&mut self, feature: Feature) -> usize {
        if feature.kind().is_point() {
            log::trace!("Skipping {} feature", feature.kind());
            return 0;
        }

        let boxes: SmallVec<[BoundingBox; 4]> = feature
            .polygons()
            .iter()
            .filter(|p| p.len() >= 2)
            .filter_map(|p| p.bounding_box().ok())
            .collect();
        if boxes.is_empty() {
            log::debug!("Dropping {} feature without indexable polygons", feature.kind());
            return 0;
        }

        let id = FeatureId(self.features.len());
        self.features.push(Arc::new(feature));
        for bbox in &boxes {
            self.index.insert(*bbox, id);
        }
        boxes.len()
    }

    /// Features with a polygon containing `point`, searching the box of
    /// `tolerance` meters around it. Each feature appears at most once.
    pub fn search(&self, point: Coordinate, tolerance: f64) -> Vec<Arc<Feature>> {
        let query = tolerance_box(point, tolerance);
        let mut seen = FxHashSet::default();

        self.index
            .search(&query)
            .into_iter()
            .filter(|id| seen.insert(**id))
            .map(|id| &self.features[id.0])
            .filter(|feature| feature.contains(point))
            .cloned()
            .collect()
    }

    /// Number of index entries (indexed polygons).
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of stored features.
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picket_types::{GeometryKind, Polygon, Ring};

    fn ring(points: &[(f64, f64)]) -> Ring {
        points
            .iter()
            .map(|&(lat, lon)| Coordinate::new(lat, lon))
            .collect()
    }

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::from_exterior(ring(&[(min, min), (min, max), (max, max), (max, min)]))
    }

    fn named(name: &str, kind: GeometryKind, polygons: Vec<Polygon>) -> Feature {
        let mut props = Properties::new();
        props.insert("name".into(), serde_json::json!(name));
        Feature::new(kind, polygons, props)
    }

    fn names(found: &[Arc<Feature>]) -> Vec<String> {
        let mut names: Vec<String> = found
            .iter()
            .map(|f| f.properties()["name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_square_fence() {
        let mut fence = Fence::default();
        assert_eq!(fence.add(named("square", GeometryKind::Polygon, vec![square(0.0, 10.0)])), 1);

        assert_eq!(names(&fence.search(Coordinate::new(5.0, 5.0), 1.0)), vec!["square"]);
        assert!(fence.search(Coordinate::new(50.0, 50.0), 1.0).is_empty());
    }

    #[test]
    fn test_tolerance_does_not_widen_containment() {
        let mut fence = Fence::default();
        fence.add(named("square", GeometryKind::Polygon, vec![square(0.0, 10.0)]));
        // The box overlaps, but the point itself is outside.
        assert!(fence.search(Coordinate::new(10.01, 5.0), 50_000.0).is_empty());
    }

    #[test]
    fn test_points_are_not_indexed() {
        let mut fence = Fence::default();
        let point = Polygon::from_exterior(ring(&[(1.0, 1.0)]));
        assert_eq!(fence.add(named("p", GeometryKind::Point, vec![point])), 0);
        assert_eq!(
            fence.add(named("mp", GeometryKind::MultiPoint, vec![square(0.0, 1.0)])),
            0
        );
        assert!(fence.is_empty());
        assert_eq!(fence.feature_count(), 0);
    }

    #[test]
    fn test_short_polygons_are_skipped() {
        let mut fence = Fence::default();
        let single = Polygon::from_exterior(ring(&[(1.0, 1.0)]));
        assert_eq!(fence.add(named("line", GeometryKind::Line, vec![single.clone()])), 0);
        assert_eq!(fence.feature_count(), 0);

        let written = fence.add(named(
            "mixed",
            GeometryKind::MultiPolygon,
            vec![single, square(0.0, 1.0), square(5.0, 6.0)],
        ));
        assert_eq!(written, 2);
        assert_eq!(fence.len(), 2);
        assert_eq!(fence.feature_count(), 1);
    }

    #[test]
    fn test_multipolygon_matched_once() {
        let mut fence = Fence::default();
        fence.add(named(
            "overlap",
            GeometryKind::MultiPolygon,
            vec![square(0.0, 10.0), square(2.0, 8.0)],
        ));

        let found = fence.search(Coordinate::new(5.0, 5.0), 1.0);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_hole_excluded_from_search() {
        let mut fence = Fence::default();
        let donut = Polygon::new(
            ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            vec![ring(&[(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0)])],
        );
        fence.add(named("donut", GeometryKind::Polygon, vec![donut]));

        assert!(fence.search(Coordinate::new(5.0, 5.0), 1.0).is_empty());
        assert_eq!(names(&fence.search(Coordinate::new(2.0, 2.0), 1.0)), vec!["donut"]);
    }

    #[test]
    fn test_many_features_with_small_nodes() {
        let config = IndexConfig::default()
            .with_min_children(2)
            .with_max_children(4);
        let mut fence = Fence::new(config).unwrap();
        for i in 0..100 {
            let lat = f64::from(i % 10) * 2.0;
            let lon = f64::from(i / 10) * 2.0;
            let poly = Polygon::from_exterior(ring(&[
                (lat, lon),
                (lat, lon + 1.0),
                (lat + 1.0, lon + 1.0),
                (lat + 1.0, lon),
            ]));
            fence.add(named(&format!("cell-{i}"), GeometryKind::Polygon, vec![poly]));
        }
        fence.index.check_invariants();

        assert_eq!(fence.len(), 100);
        assert_eq!(names(&fence.search(Coordinate::new(6.5, 8.5), 1.0)), vec!["cell-43"]);
        assert!(fence.search(Coordinate::new(7.5, 8.5), 1.0).is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Fence::new(IndexConfig::default().with_max_children(10)).is_err());
    }

    #[test]
    fn test_fence_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Fence>();
        assert_send_sync::<Feature>();
    }
}
