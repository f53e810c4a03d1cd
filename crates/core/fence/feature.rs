use picket_types::{Coordinate, GeometryKind, Polygon};

/// Opaque feature properties, passed through unmodified.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Position of a feature in its fence's feature list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FeatureId(pub(crate) usize);

/// A geometry with its properties.
///
/// Every geometry kind is carried as one or more polygons: lines become
/// rings through their vertices and points become single-coordinate rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    kind: GeometryKind,
    polygons: Vec<Polygon>,
    properties: Properties,
}

impl Feature {
    pub fn new(kind: GeometryKind, polygons: Vec<Polygon>, properties: Properties) -> Self {
        Self {
            kind,
            polygons,
            properties,
        }
    }

    #[inline]
    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Check if any of the feature's polygons contains `c`.
    pub fn contains(&self, c: Coordinate) -> bool {
        self.polygons.iter().any(|p| p.contains(c))
    }
}
