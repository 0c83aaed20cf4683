//! # HTTP Server Module
//!
//! Axum server exposing the dataset API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `POST /api/dataset/:name/record` - Insert a JSON payload
//! - `GET /api/dataset/:name/query` - Grouped and/or sorted query

pub mod config;
pub mod dataset_routes;
pub mod errors;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ProblemDetail, RestError, RestResult};
pub use server::{build_router, HttpServer};
