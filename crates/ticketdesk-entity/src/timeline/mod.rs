//! Derived timeline event types.

pub mod event;

pub use event::{AttachmentSummary, TimelineEvent, TimelineEventKind};
