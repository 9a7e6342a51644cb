//! # ticketdesk-api
//!
//! HTTP API layer for TicketDesk built on Axum.
//!
//! Provides the timeline and comment lifecycle endpoints, the bearer-token
//! identity extractor, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
