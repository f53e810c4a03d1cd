//! Picket Server
//!
//! HTTP front end for Picket fence registries.
//!
//! Two registries are served side by side: `fence` (typically administrative
//! boundaries) and `road` (typically road geometries). Each can be listed,
//! extended with GeoJSON features and searched by point and tolerance.
//!
//! # Example
//!
//! ```ignore
//! use picket_server::{AppState, run_server};
//!
//! run_server(listener, AppState::new(fences, roads), shutdown).await?;
//! ```

pub mod handler;
pub mod protocol;
pub mod transport;

pub use handler::ApiError;
pub use protocol::ResponseMessage;
pub use transport::http::{AppState, router, run_server};
