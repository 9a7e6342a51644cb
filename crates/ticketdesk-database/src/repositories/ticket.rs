//! Ticket repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use ticketdesk_core::error::{AppError, ErrorKind};
use ticketdesk_core::result::AppResult;
use ticketdesk_core::types::TicketId;
use ticketdesk_entity::ticket::Ticket;

use crate::stores::TicketStore;

/// Repository for tickets. Read-only: the intake/triage flow owns writes.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for TicketRepository {
    async fn find_by_id(&self, id: TicketId) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ticket", e))
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find ticket by key", e)
            })
    }
}
