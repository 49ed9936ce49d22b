//! API Module
//!
//! HTTP handlers and routing for the cache inspection service.
//!
//! # Endpoints
//! - `PUT /cache/set` - Store a JSON value
//! - `GET /cache/get/:key` - Retrieve a fresh value
//! - `GET /cache/has/:key` - Check whether a fresh value exists
//! - `DELETE /cache/del/:key` - Delete a key
//! - `POST /cache/clear` - Remove every entry
//! - `GET /cache/keys` - List keys in insertion order
//! - `POST /cache/cleanup` - Sweep stale entries now
//! - `POST /cache/key`, `POST /cache/page-key` - Build canonical keys
//! - `GET /window` - Compute a virtual list window
//! - `GET /metrics` - Request timing report
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
