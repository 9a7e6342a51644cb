//! In-memory record store for single-node and test use.

pub mod store;

pub use store::MemoryRecordStore;
