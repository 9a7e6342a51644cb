//! PostgreSQL repository implementations of the record-store traits.

pub mod attachment;
pub mod comment;
pub mod status_history;
pub mod ticket;

pub use attachment::AttachmentRepository;
pub use comment::CommentRepository;
pub use status_history::StatusHistoryRepository;
pub use ticket::TicketRepository;
