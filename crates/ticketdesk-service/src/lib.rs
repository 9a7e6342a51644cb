//! # ticketdesk-service
//!
//! Business logic for TicketDesk: the comment lifecycle (add, edit,
//! cascading delete) and the derived timeline feed. Services orchestrate
//! record stores, the object store, and the authorization policy.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references to the store traits, so the
//! same service runs against PostgreSQL in production and the in-memory
//! stores in tests.

pub mod comment;
pub mod timeline;

pub use comment::CommentService;
pub use timeline::{TimelineService, build_timeline};

use ticketdesk_core::{AppError, AppResult};
use ticketdesk_database::TicketStore;
use ticketdesk_entity::ticket::{Ticket, TicketRef};

/// Resolves a ticket reference (UUID or human-readable key) to its row.
///
/// Shared by both services; a reference that matches nothing is a
/// `NotFound` here so callers never branch on the reference shape.
pub(crate) async fn resolve_ticket(
    tickets: &dyn TicketStore,
    ticket_ref: &TicketRef,
) -> AppResult<Ticket> {
    let found = match ticket_ref {
        TicketRef::Id(id) => tickets.find_by_id(*id).await?,
        TicketRef::Key(key) => tickets.find_by_key(key).await?,
    };
    found.ok_or_else(|| AppError::not_found(format!("Ticket not found: {ticket_ref}")))
}
