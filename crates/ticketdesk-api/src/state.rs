//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use ticketdesk_auth::IdentityResolver;
use ticketdesk_core::config::AppConfig;
use ticketdesk_core::traits::ObjectStore;
use ticketdesk_service::{CommentService, TimelineService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Attachment payload store.
    pub object_store: Arc<dyn ObjectStore>,
    /// Bearer credential resolution.
    pub identity_resolver: Arc<IdentityResolver>,
    /// Comment lifecycle operations.
    pub comment_service: Arc<CommentService>,
    /// Derived timeline reads.
    pub timeline_service: Arc<TimelineService>,
}
