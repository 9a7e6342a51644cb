//! Response DTOs.

use serde::{Deserialize, Serialize};

use ticketdesk_entity::timeline::TimelineEvent;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Timeline read response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    /// All visible events, oldest first.
    pub events: Vec<TimelineEvent>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database reachability.
    pub database: String,
    /// Object store provider in use.
    pub storage_provider: String,
}
