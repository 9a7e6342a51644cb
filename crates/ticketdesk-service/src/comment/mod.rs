//! Comment lifecycle: add, edit, and cascading delete.

pub mod service;

pub use service::{AddComment, CommentService, EditComment};
