//! Request DTOs.

use serde::{Deserialize, Serialize};

use ticketdesk_core::types::AttachmentId;

/// Body for `POST /api/tickets/{ref}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    /// Comment body.
    pub content: String,
    /// Internal-note flag; silently ignored for non-admin callers.
    #[serde(default)]
    pub is_internal: bool,
    /// Previously-uploaded attachments to place under the comment.
    #[serde(default)]
    pub attachment_ids: Vec<AttachmentId>,
}

/// Body for `PUT /api/tickets/{ref}/comments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditCommentRequest {
    /// Replacement body.
    pub content: String,
    /// Optional audit reason.
    #[serde(default)]
    pub reason: Option<String>,
}
