//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_CLEANUP_INTERVAL_MS, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS};
use crate::virtual_list::DEFAULT_OVERSCAN;

/// Row height of the optimized order/product tables
const DEFAULT_ITEM_HEIGHT: u32 = 56;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    pub default_ttl_ms: u64,
    /// Interval between cleanup sweeps in milliseconds
    pub cleanup_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Default row height for window calculations
    pub item_height: u32,
    /// Default viewport height for window calculations
    pub viewport_height: u32,
    /// Default overscan rows for window calculations
    pub overscan: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CLEANUP_INTERVAL_MS` - Cleanup frequency in milliseconds (default: 60000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ITEM_HEIGHT` - Row height in pixels (default: 56)
    /// - `VIEWPORT_HEIGHT` - Viewport height in pixels (default: 600)
    /// - `OVERSCAN` - Overscan rows (default: 5)
    ///
    /// Unparseable values, and zero where zero is meaningless, fall back to
    /// the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: positive_env("MAX_ENTRIES", defaults.max_entries),
            default_ttl_ms: positive_env("DEFAULT_TTL_MS", defaults.default_ttl_ms),
            cleanup_interval_ms: positive_env("CLEANUP_INTERVAL_MS", defaults.cleanup_interval_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            item_height: positive_env("ITEM_HEIGHT", defaults.item_height),
            viewport_height: env_or("VIEWPORT_HEIGHT", defaults.viewport_height),
            overscan: env_or("OVERSCAN", defaults.overscan),
        }
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl_ms: DEFAULT_TTL_MS,
            cleanup_interval_ms: DEFAULT_CLEANUP_INTERVAL_MS,
            server_port: DEFAULT_SERVER_PORT,
            item_height: DEFAULT_ITEM_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn positive_env<T: FromStr + PartialOrd + Default>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| *v > T::default())
        .unwrap_or(default)
}
