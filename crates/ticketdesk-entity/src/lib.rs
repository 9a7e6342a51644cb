//! # ticketdesk-entity
//!
//! Domain entity models for TicketDesk: tickets, comments, status-history
//! entries, attachments, actor identities, and the derived timeline events.

pub mod attachment;
pub mod comment;
pub mod history;
pub mod identity;
pub mod ticket;
pub mod timeline;

pub use attachment::Attachment;
pub use comment::Comment;
pub use history::{ChangeType, StatusHistoryEntry};
pub use identity::{AuthorRole, Identity, Role};
pub use ticket::{Ticket, TicketRef};
pub use timeline::{TimelineEvent, TimelineEventKind};
