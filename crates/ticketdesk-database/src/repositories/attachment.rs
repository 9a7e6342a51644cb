//! Attachment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use ticketdesk_core::error::{AppError, ErrorKind};
use ticketdesk_core::result::AppResult;
use ticketdesk_core::types::{AttachmentId, CommentId, TicketId};
use ticketdesk_entity::attachment::{Attachment, CreateAttachment};

use crate::stores::AttachmentStore;

/// Repository for attachment rows.
#[derive(Debug, Clone)]
pub struct AttachmentRepository {
    pool: PgPool,
}

impl AttachmentRepository {
    /// Create a new attachment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentStore for AttachmentRepository {
    async fn find_by_id(&self, id: AttachmentId) -> AppResult<Option<Attachment>> {
        sqlx::query_as::<_, Attachment>("SELECT * FROM ticket_attachments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find attachment", e)
            })
    }

    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<Attachment>> {
        sqlx::query_as::<_, Attachment>(
            "SELECT * FROM ticket_attachments WHERE ticket_id = $1 \
             ORDER BY created_at ASC, seq ASC",
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list ticket attachments", e)
        })
    }

    async fn find_by_comment(&self, comment_id: CommentId) -> AppResult<Vec<Attachment>> {
        sqlx::query_as::<_, Attachment>(
            "SELECT * FROM ticket_attachments WHERE comment_id = $1 \
             ORDER BY created_at ASC, seq ASC",
        )
        .bind(comment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list comment attachments", e)
        })
    }

    async fn insert(&self, data: &CreateAttachment) -> AppResult<Attachment> {
        sqlx::query_as::<_, Attachment>(
            "INSERT INTO ticket_attachments \
             (ticket_id, comment_id, storage_path, original_filename, mime_type, size_bytes, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.ticket_id)
        .bind(data.comment_id)
        .bind(&data.storage_path)
        .bind(&data.original_filename)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(data.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create attachment", e))
    }

    async fn assign_to_comment(
        &self,
        id: AttachmentId,
        ticket_id: TicketId,
        comment_id: CommentId,
    ) -> AppResult<bool> {
        // The comment_id IS NULL guard keeps the association one-shot:
        // an attachment already owned by a comment is never re-homed.
        let result = sqlx::query(
            "UPDATE ticket_attachments SET comment_id = $3 \
             WHERE id = $1 AND ticket_id = $2 AND comment_id IS NULL",
        )
        .bind(id)
        .bind(ticket_id)
        .bind(comment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign attachment", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: AttachmentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ticket_attachments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete attachment", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_comment(&self, comment_id: CommentId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM ticket_attachments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete comment attachments", e)
            })?;

        Ok(result.rows_affected())
    }
}
