//! Status-history entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ticketdesk_core::types::{HistoryEntryId, TicketId, UserId};

use super::change::ChangeType;

/// An immutable, append-only record of a change on a ticket.
///
/// Never updated or deleted. Comment edit/delete events are recorded here
/// so the action itself stays visible in the timeline after the comment's
/// displayed content is overwritten or gone.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusHistoryEntry {
    /// Unique entry identifier.
    pub id: HistoryEntryId,
    /// The ticket this entry belongs to.
    pub ticket_id: TicketId,
    /// The kind of change recorded.
    pub change_type: ChangeType,
    /// Previous value, for field changes.
    pub old_value: Option<String>,
    /// New value, for field changes.
    pub new_value: Option<String>,
    /// Who made the change.
    pub changed_by: UserId,
    /// Free-form reason supplied with the change.
    pub reason: Option<String>,
    /// Structured details (e.g., `comment_id` for comment events).
    pub metadata: serde_json::Value,
    /// When the change occurred.
    pub created_at: DateTime<Utc>,
    /// Store-assigned insertion sequence, the timeline ordering tie-break.
    pub seq: i64,
}

/// Data required to append a new status-history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStatusHistoryEntry {
    /// The ticket this entry belongs to.
    pub ticket_id: TicketId,
    /// The kind of change recorded.
    pub change_type: ChangeType,
    /// Previous value, for field changes.
    pub old_value: Option<String>,
    /// New value, for field changes.
    pub new_value: Option<String>,
    /// Who made the change.
    pub changed_by: UserId,
    /// Free-form reason supplied with the change.
    pub reason: Option<String>,
    /// Structured details.
    pub metadata: serde_json::Value,
}
