//! Record-store traits for the four persisted record kinds.
//!
//! Each kind is independently created and mutated by its own code path;
//! the traits expose exactly the operations the timeline core needs.
//! PostgreSQL implementations live in [`crate::repositories`], the
//! in-memory implementation in [`crate::memory`].

use async_trait::async_trait;

use ticketdesk_core::AppResult;
use ticketdesk_core::types::{AttachmentId, CommentId, TicketId};
use ticketdesk_entity::attachment::{Attachment, CreateAttachment};
use ticketdesk_entity::comment::{Comment, CreateComment};
use ticketdesk_entity::history::{CreateStatusHistoryEntry, StatusHistoryEntry};
use ticketdesk_entity::ticket::Ticket;

/// Read access to tickets.
///
/// Tickets are created and mutated by the external intake/triage flow;
/// the timeline core only reads them.
#[async_trait]
pub trait TicketStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a ticket by its UUID.
    async fn find_by_id(&self, id: TicketId) -> AppResult<Option<Ticket>>;

    /// Find a ticket by its human-readable key.
    async fn find_by_key(&self, key: &str) -> AppResult<Option<Ticket>>;
}

/// Read/write access to comments.
#[async_trait]
pub trait CommentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a comment by ID.
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>>;

    /// All comments on a ticket, ordered by `(created_at, seq)`.
    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<Comment>>;

    /// Insert a new comment and return the stored row.
    async fn insert(&self, data: &CreateComment) -> AppResult<Comment>;

    /// Overwrite a comment's content and edit metadata.
    ///
    /// `author_id`, `created_at`, and `ticket_id` are never written.
    async fn update(&self, comment: &Comment) -> AppResult<Comment>;

    /// Delete a comment row. Returns `true` if a row was deleted.
    async fn delete(&self, id: CommentId) -> AppResult<bool>;
}

/// Append-only access to status-history entries.
#[async_trait]
pub trait StatusHistoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// All entries for a ticket, ordered by `(created_at, seq)`.
    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<StatusHistoryEntry>>;

    /// Append a new entry and return the stored row.
    async fn append(&self, data: &CreateStatusHistoryEntry) -> AppResult<StatusHistoryEntry>;
}

/// Read/write access to attachment rows.
#[async_trait]
pub trait AttachmentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an attachment by ID.
    async fn find_by_id(&self, id: AttachmentId) -> AppResult<Option<Attachment>>;

    /// All attachments on a ticket, ordered by `(created_at, seq)`.
    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<Attachment>>;

    /// All attachments owned by a comment.
    async fn find_by_comment(&self, comment_id: CommentId) -> AppResult<Vec<Attachment>>;

    /// Insert a new attachment row and return the stored row.
    async fn insert(&self, data: &CreateAttachment) -> AppResult<Attachment>;

    /// Associate a previously-uploaded, unassigned attachment with a comment.
    ///
    /// Only succeeds when the attachment belongs to `ticket_id` and its
    /// `comment_id` is currently null. Returns `true` on success.
    async fn assign_to_comment(
        &self,
        id: AttachmentId,
        ticket_id: TicketId,
        comment_id: CommentId,
    ) -> AppResult<bool>;

    /// Delete a single attachment row. Returns `true` if a row was deleted.
    async fn delete(&self, id: AttachmentId) -> AppResult<bool>;

    /// Delete all attachment rows owned by a comment in one batch.
    ///
    /// Returns the number of rows deleted.
    async fn delete_by_comment(&self, comment_id: CommentId) -> AppResult<u64>;
}
