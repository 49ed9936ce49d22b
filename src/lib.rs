//! ERP Cache - client-side caching and rendering helpers
//!
//! A TTL cache with insertion-order eviction, a virtual list window
//! calculator and a named performance timer, plus a small HTTP service that
//! exposes them.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod perf;
pub mod tasks;
pub mod virtual_list;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_cleanup_task, CleanupTask};
