//! Attachment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ticketdesk_core::types::{AttachmentId, CommentId, TicketId, UserId};

/// A file attached to a ticket or to one of its comments.
///
/// `comment_id = None` means a general ticket attachment; `Some` means the
/// file is attached to that comment and is removed by the delete cascade
/// when the comment is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attachment {
    /// Unique attachment identifier.
    pub id: AttachmentId,
    /// The ticket this attachment belongs to.
    pub ticket_id: TicketId,
    /// The owning comment, if any.
    pub comment_id: Option<CommentId>,
    /// Path of the binary payload in the object store.
    pub storage_path: String,
    /// Original uploaded filename.
    pub original_filename: String,
    /// MIME type.
    pub mime_type: String,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Who uploaded the file.
    pub uploaded_by: UserId,
    /// When the attachment was created.
    pub created_at: DateTime<Utc>,
    /// Store-assigned insertion sequence, the timeline ordering tie-break.
    pub seq: i64,
}

/// Data required to create a new attachment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttachment {
    /// The ticket this attachment belongs to.
    pub ticket_id: TicketId,
    /// The owning comment, if any.
    pub comment_id: Option<CommentId>,
    /// Path of the binary payload in the object store.
    pub storage_path: String,
    /// Original uploaded filename.
    pub original_filename: String,
    /// MIME type.
    pub mime_type: String,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Who uploaded the file.
    pub uploaded_by: UserId,
}
