//! Derived timeline event model.
//!
//! Timeline events are never persisted. They are rebuilt on every read from
//! the four persisted record kinds and carry no independent lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ticketdesk_core::types::AttachmentId;

use crate::attachment::Attachment;

/// The kind of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    /// The ticket's creation fact.
    Created,
    /// A status or priority change.
    StatusChange,
    /// An assignment change.
    Assignment,
    /// A visible comment.
    Comment,
    /// A comment-edited audit entry.
    CommentEdit,
    /// A comment-deleted tombstone.
    CommentDeleted,
    /// A ticket-level (non-comment) attachment.
    Attachment,
}

/// A short attachment descriptor grouped under a comment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSummary {
    /// Attachment identifier.
    pub id: AttachmentId,
    /// Original uploaded filename.
    pub original_filename: String,
    /// MIME type.
    pub mime_type: String,
    /// Payload size in bytes.
    pub size_bytes: i64,
}

impl From<&Attachment> for AttachmentSummary {
    fn from(a: &Attachment) -> Self {
        Self {
            id: a.id,
            original_filename: a.original_filename.clone(),
            mime_type: a.mime_type.clone(),
            size_bytes: a.size_bytes,
        }
    }
}

/// One entry in a ticket's derived, time-ordered feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// The source row's identifier.
    pub id: Uuid,
    /// Event kind.
    pub kind: TimelineEventKind,
    /// When the underlying change happened.
    pub timestamp: DateTime<Utc>,
    /// Store insertion sequence of the source row; ordering tie-break.
    pub seq: i64,
    /// Display label for the acting user (`"system"` for system actions).
    pub actor: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer body, where the event has one (e.g., comment content).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Computed/structured details (e.g., `edited` flag on comments).
    pub metadata: serde_json::Value,
    /// Attachments grouped under this event (comment events only).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<AttachmentSummary>,
}

impl TimelineEvent {
    /// The total-order sort key: timestamp ascending, then insertion
    /// sequence. Never derived from event content.
    pub fn sort_key(&self) -> (DateTime<Utc>, i64) {
        (self.timestamp, self.seq)
    }
}
