//! Wire types for the HTTP API.

use picket::{Coordinate, Properties};
use serde::{Deserialize, Serialize};

/// Body of a search response.
///
/// `query` echoes the searched point as a GeoJSON Point feature, with every
/// extra query parameter as a string property. `result` holds the properties
/// of each matching feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub query: geojson::Feature,
    pub result: Vec<Properties>,
}

impl ResponseMessage {
    pub fn new(point: Coordinate, echoed: Properties, result: Vec<Properties>) -> Self {
        Self {
            query: picket::geojson::point_feature(point, echoed),
            result,
        }
    }
}

/// Body of a successful add.
pub const ADD_SUCCESS: &str = "success";
