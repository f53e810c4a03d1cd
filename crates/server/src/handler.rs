//! Request handlers shared by the fence and road registries.

use crate::protocol::{ADD_SUCCESS, ResponseMessage};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use picket::geojson::feature_from_str;
use picket::{Coordinate, PicketError, Properties, SyncFenceIndex};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Search radius used when `tolerance` is missing or not a float, in meters.
pub const DEFAULT_TOLERANCE_METERS: f64 = 1.0;

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Query param '{0}' required as float")]
    MissingParam(&'static str),

    #[error("Unable to read geojson feature: {0}")]
    InvalidFeature(#[source] PicketError),

    #[error(transparent)]
    Picket(#[from] PicketError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParam(_) | Self::InvalidFeature(_) => StatusCode::BAD_REQUEST,
            Self::Picket(PicketError::FenceNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Picket(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            Self::Picket(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// `GET /{registry}`: sorted fence names.
pub async fn list(State(index): State<SyncFenceIndex>) -> Json<Vec<String>> {
    Json(index.keys())
}

/// `POST /{registry}/:name/add`: index one GeoJSON feature.
#[tracing::instrument(skip(index, body), fields(bytes = body.len()))]
pub async fn add(
    State(index): State<SyncFenceIndex>,
    Path(name): Path<String>,
    body: String,
) -> Result<Json<&'static str>, ApiError> {
    let feature = feature_from_str(&body).map_err(ApiError::InvalidFeature)?;
    let written = index.add(&name, feature)?;
    debug!("Indexed {} polygons", written);
    Ok(Json(ADD_SUCCESS))
}

/// `GET /{registry}/:name/search?lat=..&lon=..[&tolerance=..]`.
#[tracing::instrument(skip(index, params))]
pub async fn search(
    State(index): State<SyncFenceIndex>,
    Path(name): Path<String>,
    Query(mut params): Query<BTreeMap<String, String>>,
) -> Result<Json<ResponseMessage>, ApiError> {
    let lat = take_float(&mut params, "lat").ok_or(ApiError::MissingParam("lat"))?;
    let lon = take_float(&mut params, "lon").ok_or(ApiError::MissingParam("lon"))?;
    let tolerance = take_float(&mut params, "tolerance").unwrap_or(DEFAULT_TOLERANCE_METERS);

    let point = Coordinate::new(lat, lon);
    let matches = index.search(&name, point, tolerance)?;
    debug!("Found {} matches around {}", matches.len(), point);

    let echoed: Properties = params
        .into_iter()
        .map(|(k, v)| (k, serde_json::Value::String(v)))
        .collect();
    let result = matches.iter().map(|f| f.properties().clone()).collect();

    Ok(Json(ResponseMessage::new(point, echoed, result)))
}

fn take_float(params: &mut BTreeMap<String, String>, key: &str) -> Option<f64> {
    params.remove(key).and_then(|v| v.trim().parse().ok())
}
