//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ticketdesk_core::types::{CommentId, TicketId, UserId};

use crate::identity::AuthorRole;

/// A comment on a support ticket.
///
/// `author_id`, `created_at`, and `ticket_id` are immutable after creation;
/// EditComment only touches the content and edit-metadata fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// The ticket this comment belongs to.
    pub ticket_id: TicketId,
    /// The comment author.
    pub author_id: UserId,
    /// The role the author held when the comment was created.
    pub author_role_at_time: AuthorRole,
    /// Comment body.
    pub content: String,
    /// Visible only to admin-equivalent actors when set.
    ///
    /// Only ever true when the author had admin role at creation time;
    /// non-admin requests are silently downgraded, never rejected.
    pub is_internal: bool,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited, if ever.
    pub updated_at: Option<DateTime<Utc>>,
    /// Who performed the last edit.
    pub edited_by: Option<UserId>,
    /// Why the last edit was made.
    pub edit_reason: Option<String>,
    /// Store-assigned insertion sequence, the timeline ordering tie-break.
    pub seq: i64,
}

impl Comment {
    /// Whether this comment has ever been edited.
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }
}

/// Data required to create a new comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// The ticket this comment belongs to.
    pub ticket_id: TicketId,
    /// The comment author.
    pub author_id: UserId,
    /// The author's role at creation time.
    pub author_role_at_time: AuthorRole,
    /// Comment body.
    pub content: String,
    /// Whether the comment is internal (admin-only).
    pub is_internal: bool,
}
