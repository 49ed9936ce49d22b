//! Request DTOs for the service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::cache::{generate_cache_key, generate_page_cache_key};

/// Longest key accepted over HTTP
const MAX_KEY_LENGTH: usize = 256;

/// Request body for PUT /cache/set
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON payload
/// - `ttl_ms`: Optional TTL in milliseconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        if self.ttl_ms == Some(0) {
            return Some("ttl_ms must be positive".to_string());
        }
        None
    }
}

/// Request body for POST /cache/key
#[derive(Debug, Clone, Deserialize)]
pub struct KeyRequest {
    pub prefix: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl KeyRequest {
    pub fn to_key(&self) -> String {
        generate_cache_key(
            &self.prefix,
            self.params
                .iter()
                .map(|(name, value)| (name.as_str(), param_value_string(value))),
        )
    }
}

/// Request body for POST /cache/page-key
#[derive(Debug, Clone, Deserialize)]
pub struct PageKeyRequest {
    pub prefix: String,
    pub page: u64,
    pub size: u64,
    #[serde(default)]
    pub filters: Map<String, Value>,
}

impl PageKeyRequest {
    pub fn to_key(&self) -> String {
        generate_page_cache_key(
            &self.prefix,
            self.page,
            self.size,
            self.filters
                .iter()
                .map(|(name, value)| (name.as_str(), param_value_string(value))),
        )
    }
}

/// Query string for GET /window. Unset layout fields use the service defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowQuery {
    pub scroll_offset: u64,
    pub total: usize,
    pub item_height: Option<u32>,
    pub viewport_height: Option<u32>,
    pub overscan: Option<u32>,
}

/// Renders a JSON parameter the way it appears inside a cache key:
/// strings bare, everything else as JSON text.
pub fn param_value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
