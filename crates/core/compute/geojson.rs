//! GeoJSON conversion for fence features.
//!
//! Every geometry is carried as polygons: polygon rings map one to one, lines
//! become rings through their vertices and points become rings of a single
//! coordinate (which are never indexed). Positions are `[lon, lat, ...]`.

use crate::error::{PicketError, Result};
use crate::fence::{Feature, Properties};
use geojson::feature::Id;
use geojson::{GeoJson, Geometry, Value};
use picket_types::{Coordinate, GeometryKind, Polygon, Ring};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Converts a GeoJSON feature into a fence [`Feature`].
///
/// The feature `id`, when present, is copied into the properties under `"id"`.
///
/// # Errors
///
/// [`PicketError::Validation`] for a missing geometry, a geometry collection,
/// a polygon without rings, an empty ring or multi geometry, or a position
/// with fewer than two values.
pub fn feature_from_geojson(feature: &geojson::Feature) -> Result<Feature> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| PicketError::Validation("Feature has no geometry".to_string()))?;

    let (kind, polygons) = match &geometry.value {
        Value::Point(position) => {
            let ring = Ring::new(vec![coordinate(position)?]);
            (GeometryKind::Point, vec![Polygon::from_exterior(ring)])
        }
        Value::MultiPoint(positions) => (
            GeometryKind::MultiPoint,
            vec![Polygon::from_exterior(ring(positions)?)],
        ),
        Value::LineString(line) => (
            GeometryKind::Line,
            vec![Polygon::from_exterior(ring(line)?)],
        ),
        Value::MultiLineString(lines) => (
            GeometryKind::MultiLine,
            non_empty(lines, "MultiLineString")?
                .iter()
                .map(|line| Ok(Polygon::from_exterior(ring(line)?)))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Polygon(rings) => (GeometryKind::Polygon, vec![polygon(rings)?]),
        Value::MultiPolygon(members) => (
            GeometryKind::MultiPolygon,
            non_empty(members, "MultiPolygon")?
                .iter()
                .map(|rings| polygon(rings))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::GeometryCollection(_) => {
            return Err(PicketError::Validation(
                "Unsupported geometry type GeometryCollection".to_string(),
            ));
        }
    };

    let mut properties = feature.properties.clone().unwrap_or_default();
    if let Some(id) = &feature.id {
        let id = match id {
            Id::String(s) => serde_json::Value::String(s.clone()),
            Id::Number(n) => serde_json::Value::Number(n.clone()),
        };
        properties.insert("id".to_string(), id);
    }

    Ok(Feature::new(kind, polygons, properties))
}

/// Parses a single GeoJSON Feature.
pub fn feature_from_str(geojson: &str) -> Result<Feature> {
    let feature: geojson::Feature = serde_json::from_str(geojson)?;
    feature_from_geojson(&feature)
}

/// A GeoJSON Point feature at `c` carrying `properties`.
pub fn point_feature(c: Coordinate, properties: Properties) -> geojson::Feature {
    geojson::Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![c.lon(), c.lat()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn coordinate(position: &[f64]) -> Result<Coordinate> {
    match position {
        [lon, lat, ..] => Ok(Coordinate::new(*lat, *lon)),
        _ => Err(PicketError::Validation(
            "Coordinate must have at least 2 values".to_string(),
        )),
    }
}

fn ring(positions: &[Vec<f64>]) -> Result<Ring> {
    if positions.is_empty() {
        return Err(PicketError::Validation("Ring has no coordinates".to_string()));
    }
    positions.iter().map(|p| coordinate(p)).collect()
}

fn non_empty<'a, T>(members: &'a [T], kind: &str) -> Result<&'a [T]> {
    if members.is_empty() {
        return Err(PicketError::Validation(format!("{kind} has no members")));
    }
    Ok(members)
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon> {
    let (exterior, holes) = rings.split_first().ok_or_else(|| {
        PicketError::Validation("Polygon must have at least one ring".to_string())
    })?;
    let holes = holes.iter().map(|h| ring(h)).collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(ring(exterior)?, holes))
}

/// A GeoJSON file holding a FeatureCollection, a single Feature or a bare geometry.
#[derive(Debug)]
pub struct GeoJsonSource {
    path: PathBuf,
    features: Vec<geojson::Feature>,
}

impl GeoJsonSource {
    /// Read and parse the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| PicketError::Io {
            path: path.clone(),
            source,
        })?;
        let geojson: GeoJson = serde_json::from_reader(BufReader::new(file))?;

        let features = match geojson {
            GeoJson::FeatureCollection(collection) => collection.features,
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::Geometry(geometry) => vec![geojson::Feature::from(geometry)],
        };
        Ok(Self { path, features })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of raw features in the file, including ones that fail to convert.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Converts each raw feature on demand.
    pub fn features(&self) -> impl Iterator<Item = Result<Feature>> + '_ {
        self.features.iter().map(feature_from_geojson)
    }
}
