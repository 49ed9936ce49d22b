//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the cache is in use.
//!
//! # Tasks
//! - Cache cleanup: sweeps stale entries at a fixed interval until stopped

mod cleanup;

pub use cleanup::{spawn_cleanup_task, CleanupTask};
