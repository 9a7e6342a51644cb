//! Status-history repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use ticketdesk_core::error::{AppError, ErrorKind};
use ticketdesk_core::result::AppResult;
use ticketdesk_core::types::TicketId;
use ticketdesk_entity::history::{CreateStatusHistoryEntry, StatusHistoryEntry};

use crate::stores::StatusHistoryStore;

/// Repository for status-history entries. Append-only: no update or delete
/// statements exist for this table.
#[derive(Debug, Clone)]
pub struct StatusHistoryRepository {
    pool: PgPool,
}

impl StatusHistoryRepository {
    /// Create a new status-history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusHistoryStore for StatusHistoryRepository {
    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<StatusHistoryEntry>> {
        sqlx::query_as::<_, StatusHistoryEntry>(
            "SELECT * FROM ticket_status_history WHERE ticket_id = $1 \
             ORDER BY created_at ASC, seq ASC",
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list status history", e)
        })
    }

    async fn append(&self, data: &CreateStatusHistoryEntry) -> AppResult<StatusHistoryEntry> {
        sqlx::query_as::<_, StatusHistoryEntry>(
            "INSERT INTO ticket_status_history \
             (ticket_id, change_type, old_value, new_value, changed_by, reason, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.ticket_id)
        .bind(data.change_type)
        .bind(&data.old_value)
        .bind(&data.new_value)
        .bind(data.changed_by)
        .bind(&data.reason)
        .bind(&data.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append history entry", e)
        })
    }
}
