//! Shared type definitions.

pub mod id;

pub use id::{AttachmentId, CommentId, HistoryEntryId, TicketId, UserId};
