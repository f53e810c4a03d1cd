//! HTTP transport for Picket server
//!
//! Routes, served identically for the `fence` and `road` registries:
//! - `GET    /{registry}`                    - list fence names
//! - `POST   /{registry}/:name/add`          - add a GeoJSON feature
//! - `GET    /{registry}/:name/search`       - features containing `lat`/`lon`
//!
//! # Example
//!
//! ```ignore
//! use picket_server::{AppState, run_server};
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! run_server(listener, AppState::new(fences, roads), shutdown).await?;
//! ```

use crate::handler;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::header::SERVER;
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};
use picket::SyncFenceIndex;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 << 20;

const SERVER_NAME: &str = "picket";

/// The registries served by the router.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub fences: SyncFenceIndex,
    pub roads: SyncFenceIndex,
}

impl AppState {
    pub fn new(fences: SyncFenceIndex, roads: SyncFenceIndex) -> Self {
        Self { fences, roads }
    }
}

fn registry_routes(prefix: &str, index: SyncFenceIndex) -> Router {
    Router::new()
        .route(prefix, get(handler::list))
        .route(&format!("{prefix}/:name/add"), post(handler::add))
        .route(&format!("{prefix}/:name/search"), get(handler::search))
        .with_state(index)
}

async fn set_server_header(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(SERVER, HeaderValue::from_static(SERVER_NAME));
    response
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    registry_routes("/fence", state.fences)
        .merge(registry_routes("/road", state.roads))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::map_response(set_server_header))
}

/// Serve `state` on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the listener fails while serving.
pub async fn run_server(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!(
        "Fencing on address {} ({} fences, {} roads)",
        listener.local_addr()?,
        state.fences.len(),
        state.roads.len()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Done fencing");
    Ok(())
}
