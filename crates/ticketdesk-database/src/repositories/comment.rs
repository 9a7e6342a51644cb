//! Comment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use ticketdesk_core::error::{AppError, ErrorKind};
use ticketdesk_core::result::AppResult;
use ticketdesk_core::types::{CommentId, TicketId};
use ticketdesk_entity::comment::{Comment, CreateComment};

use crate::stores::CommentStore;

/// Repository for ticket comments.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM ticket_comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT * FROM ticket_comments WHERE ticket_id = $1 ORDER BY created_at ASC, seq ASC",
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list ticket comments", e)
        })
    }

    async fn insert(&self, data: &CreateComment) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO ticket_comments \
             (ticket_id, author_id, author_role_at_time, content, is_internal) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.ticket_id)
        .bind(data.author_id)
        .bind(data.author_role_at_time)
        .bind(&data.content)
        .bind(data.is_internal)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    async fn update(&self, comment: &Comment) -> AppResult<Comment> {
        // author_id, created_at, and ticket_id are immutable by contract
        // and deliberately absent from the SET list.
        sqlx::query_as::<_, Comment>(
            "UPDATE ticket_comments \
             SET content = $2, updated_at = $3, edited_by = $4, edit_reason = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.updated_at)
        .bind(comment.edited_by)
        .bind(&comment.edit_reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update comment", e))
    }

    async fn delete(&self, id: CommentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ticket_comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete comment", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
