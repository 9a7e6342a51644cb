//! # ticketdesk-database
//!
//! Record-store access for TicketDesk: the four store traits, their
//! PostgreSQL implementations, an in-memory implementation for single-node
//! and test use, connection pool management, and migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryRecordStore;
pub use stores::{AttachmentStore, CommentStore, StatusHistoryStore, TicketStore};
