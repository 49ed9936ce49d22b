//! Request and Response models for the service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{param_value_string, KeyRequest, PageKeyRequest, SetRequest, WindowQuery};
pub use responses::{
    CleanupResponse, DeleteResponse, GetResponse, HasResponse, HealthResponse, KeyResponse,
    KeysResponse, MessageResponse, MetricsResponse, SetResponse, StatsResponse, WindowResponse,
};
