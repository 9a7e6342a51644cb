//! HTTP request handlers, organized by domain.

pub mod attachment;
pub mod comment;
pub mod health;
pub mod timeline;
