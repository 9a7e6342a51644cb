//! Traits shared across TicketDesk crates.

pub mod object_store;

pub use object_store::ObjectStore;
