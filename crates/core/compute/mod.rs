//! Spatial indexing and GeoJSON ingestion.

pub mod geojson;
pub mod spatial;
