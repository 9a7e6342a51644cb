//! Status-history entity.

pub mod change;
pub mod model;

pub use change::ChangeType;
pub use model::{CreateStatusHistoryEntry, StatusHistoryEntry};
