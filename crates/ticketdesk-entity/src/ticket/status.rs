//! Ticket status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a support ticket.
///
/// Status transitions are driven by the external intake/triage flow; the
/// timeline core only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Newly opened, awaiting triage.
    Open,
    /// Being worked by support.
    InProgress,
    /// Waiting on the submitter.
    Waiting,
    /// Resolved, pending confirmation.
    Resolved,
    /// Closed.
    Closed,
}

impl TicketStatus {
    /// Return the status as a lowercase snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Waiting => "waiting",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
