//! Transport layer for Picket server
//!
//! Available transports:
//! - `http` - axum HTTP/JSON API

pub mod http;
