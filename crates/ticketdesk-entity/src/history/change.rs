//! Status-history change type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of change a status-history entry records.
///
/// Covers both genuine ticket-field changes and the audit trail for
/// comment edit/delete events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "change_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Initial entry written by the intake flow.
    Created,
    /// Ticket status changed.
    StatusChange,
    /// Ticket assignee changed.
    Assignment,
    /// Ticket priority changed.
    PriorityChange,
    /// A comment was edited; `metadata.comment_id` links back.
    CommentEdited,
    /// A comment was deleted; this entry is its tombstone.
    CommentDeleted,
}

impl ChangeType {
    /// Return the change type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::StatusChange => "status_change",
            Self::Assignment => "assignment",
            Self::PriorityChange => "priority_change",
            Self::CommentEdited => "comment_edited",
            Self::CommentDeleted => "comment_deleted",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
