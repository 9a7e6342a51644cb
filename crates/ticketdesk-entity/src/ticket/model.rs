//! Ticket entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ticketdesk_core::types::{TicketId, UserId};

use super::priority::TicketPriority;
use super::status::TicketStatus;

/// A support ticket.
///
/// Created once by the external intake flow and mutated by ticket edits;
/// never deleted by the timeline core.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: TicketId,
    /// Human-readable ticket key (e.g., `"TD-1042"`).
    pub key: String,
    /// The submitting user.
    pub owner_id: UserId,
    /// Short ticket subject.
    pub subject: String,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Current priority.
    pub priority: TicketPriority,
    /// Currently assigned support user, if any.
    pub assignee_id: Option<UserId>,
    /// When the ticket was created.
    pub created_at: DateTime<Utc>,
    /// When the ticket was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A caller-supplied ticket reference: either the UUID or the human key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketRef {
    /// Reference by UUID.
    Id(TicketId),
    /// Reference by human-readable key.
    Key(String),
}

impl FromStr for TicketRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<TicketId>() {
            Ok(id) => Ok(Self::Id(id)),
            Err(_) => Ok(Self::Key(s.to_string())),
        }
    }
}

impl fmt::Display for TicketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Key(key) => write!(f, "{key}"),
        }
    }
}
