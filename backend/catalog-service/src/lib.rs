/// Catalog Service Library
///
/// REST service over a catalog of embeddable video records.
///
/// # Modules
///
/// - `storage`: `VideoStore` trait with in-memory, PostgreSQL and metered backends
/// - `handlers`: HTTP request handlers
/// - `routes`: route table shared by the binary and integration tests
/// - `middleware`: admin token guard and request timing
/// - `error`: error types and HTTP rendering
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors and the `/metrics` handler
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
