//! Comment lifecycle operations with policy enforcement and the cascading
//! delete pipeline.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use ticketdesk_auth::policy;
use ticketdesk_core::traits::ObjectStore;
use ticketdesk_core::types::{AttachmentId, CommentId};
use ticketdesk_core::{AppError, AppResult};
use ticketdesk_database::{AttachmentStore, CommentStore, StatusHistoryStore, TicketStore};
use ticketdesk_entity::attachment::{Attachment, CreateAttachment};
use ticketdesk_entity::comment::{Comment, CreateComment};
use ticketdesk_entity::history::{ChangeType, CreateStatusHistoryEntry};
use ticketdesk_entity::identity::Identity;
use ticketdesk_entity::ticket::{Ticket, TicketRef};

use crate::resolve_ticket;

/// Default edit reason recorded when the caller supplies none.
const DEFAULT_EDIT_REASON: &str = "Content updated";

/// Input for adding a comment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AddComment {
    /// Comment body.
    pub content: String,
    /// Requested internal-note flag; downgraded for non-admin actors.
    pub is_internal: bool,
    /// Previously-uploaded attachments to pull under the new comment.
    pub attachment_ids: Vec<AttachmentId>,
}

/// Input for editing a comment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EditComment {
    /// Replacement body.
    pub content: String,
    /// Reason recorded in the audit trail.
    pub reason: Option<String>,
}

/// Handles the comment lifecycle and attachment management on tickets.
#[derive(Debug, Clone)]
pub struct CommentService {
    tickets: Arc<dyn TicketStore>,
    comments: Arc<dyn CommentStore>,
    history: Arc<dyn StatusHistoryStore>,
    attachments: Arc<dyn AttachmentStore>,
    objects: Arc<dyn ObjectStore>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        comments: Arc<dyn CommentStore>,
        history: Arc<dyn StatusHistoryStore>,
        attachments: Arc<dyn AttachmentStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            tickets,
            comments,
            history,
            attachments,
            objects,
        }
    }

    /// Adds a comment to a ticket.
    ///
    /// Non-admin actors cannot post internal notes; the flag is silently
    /// downgraded rather than rejected. Attachment re-association is
    /// best-effort per id and never fails the comment itself.
    pub async fn add_comment(
        &self,
        ticket_ref: &TicketRef,
        actor: &Identity,
        input: AddComment,
    ) -> AppResult<Comment> {
        let ticket = resolve_ticket(self.tickets.as_ref(), ticket_ref).await?;
        self.require_ticket_access(actor, &ticket)?;

        let content = input.content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Comment content cannot be empty"));
        }

        let is_internal = input.is_internal && actor.is_admin_equivalent();

        let comment = self
            .comments
            .insert(&CreateComment {
                ticket_id: ticket.id,
                author_id: actor.actor_id(),
                author_role_at_time: actor.author_role(),
                content: content.to_string(),
                is_internal,
            })
            .await?;

        for attachment_id in &input.attachment_ids {
            match self
                .attachments
                .assign_to_comment(*attachment_id, ticket.id, comment.id)
                .await
            {
                Ok(true) => {}
                Ok(false) => warn!(
                    attachment_id = %attachment_id,
                    comment_id = %comment.id,
                    "Skipping attachment association: not found, wrong ticket, or already assigned"
                ),
                Err(e) => warn!(
                    attachment_id = %attachment_id,
                    comment_id = %comment.id,
                    error = %e,
                    "Failed to associate attachment with comment"
                ),
            }
        }

        info!(
            comment_id = %comment.id,
            ticket_id = %ticket.id,
            is_internal = comment.is_internal,
            "Comment added"
        );
        Ok(comment)
    }

    /// Edits a comment's content, recording the edit in the audit trail.
    ///
    /// The `is_internal` flag is never re-evaluated on edit: a note posted
    /// internal stays internal regardless of who edits it.
    pub async fn edit_comment(
        &self,
        ticket_ref: &TicketRef,
        comment_id: CommentId,
        actor: &Identity,
        input: EditComment,
    ) -> AppResult<Comment> {
        let ticket = resolve_ticket(self.tickets.as_ref(), ticket_ref).await?;
        let mut comment = self.find_linked_comment(&ticket, comment_id).await?;

        if !policy::can_mutate_comment(actor, &comment) {
            return Err(AppError::forbidden(
                "Only the comment author or an admin can edit this comment",
            ));
        }

        let content = input.content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Comment content cannot be empty"));
        }

        let reason = input
            .reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDIT_REASON.to_string());

        comment.content = content.to_string();
        comment.updated_at = Some(chrono::Utc::now());
        comment.edited_by = Some(actor.actor_id());
        comment.edit_reason = Some(reason.clone());

        let updated = self.comments.update(&comment).await?;

        self.history
            .append(&CreateStatusHistoryEntry {
                ticket_id: ticket.id,
                change_type: ChangeType::CommentEdited,
                old_value: None,
                new_value: None,
                changed_by: actor.actor_id(),
                reason: Some(reason.clone()),
                metadata: json!({
                    "comment_id": comment_id,
                    "edit_reason": reason,
                }),
            })
            .await?;

        info!(comment_id = %comment_id, ticket_id = %ticket.id, "Comment edited");
        Ok(updated)
    }

    /// Deletes a comment and everything that hangs off it.
    ///
    /// Ordered pipeline: enumerate owned attachments, best-effort delete of
    /// each payload from the object store, batch-delete the attachment
    /// rows, delete the comment row, append the tombstone history entry.
    /// Payload deletion failures are logged and skipped; row deletions are
    /// fatal. A failure partway leaves already-performed cleanup in place,
    /// and retrying the delete is safe: a missing comment is `NotFound` and
    /// writes no second tombstone.
    pub async fn delete_comment(
        &self,
        ticket_ref: &TicketRef,
        comment_id: CommentId,
        actor: &Identity,
    ) -> AppResult<()> {
        let ticket = resolve_ticket(self.tickets.as_ref(), ticket_ref).await?;
        let comment = self.find_linked_comment(&ticket, comment_id).await?;

        if !policy::can_mutate_comment(actor, &comment) {
            return Err(AppError::forbidden(
                "Only the comment author or an admin can delete this comment",
            ));
        }

        let owned = self.attachments.find_by_comment(comment_id).await?;
        let had_attachments = !owned.is_empty();

        for attachment in &owned {
            if let Err(e) = self.objects.delete(&attachment.storage_path).await {
                warn!(
                    attachment_id = %attachment.id,
                    storage_path = %attachment.storage_path,
                    error = %e,
                    "Failed to delete attachment payload; continuing cascade"
                );
            }
        }

        let rows_deleted = self.attachments.delete_by_comment(comment_id).await?;

        // The row delete is the linearization point: a concurrent delete may
        // have won the race since the lookup above, and only the caller whose
        // delete actually removed the row gets to write the tombstone.
        if !self.comments.delete(comment_id).await? {
            return Err(AppError::not_found(format!(
                "Comment not found: {comment_id}"
            )));
        }

        self.history
            .append(&CreateStatusHistoryEntry {
                ticket_id: ticket.id,
                change_type: ChangeType::CommentDeleted,
                old_value: None,
                new_value: None,
                changed_by: actor.actor_id(),
                reason: None,
                metadata: json!({
                    "comment_id": comment_id,
                    "had_attachments": had_attachments,
                }),
            })
            .await?;

        info!(
            comment_id = %comment_id,
            ticket_id = %ticket.id,
            attachments_deleted = rows_deleted,
            "Comment deleted"
        );
        Ok(())
    }

    /// Uploads an attachment payload and records its row, unassigned to any
    /// comment. A later `add_comment` call may pull it under a comment.
    pub async fn upload_attachment(
        &self,
        ticket_ref: &TicketRef,
        actor: &Identity,
        filename: &str,
        mime_type: &str,
        data: Bytes,
    ) -> AppResult<Attachment> {
        let ticket = resolve_ticket(self.tickets.as_ref(), ticket_ref).await?;
        self.require_ticket_access(actor, &ticket)?;

        let filename = sanitize_filename(filename)?;
        let storage_path = format!("tickets/{}/{}/{}", ticket.id, Uuid::new_v4(), filename);
        let size_bytes = data.len() as i64;

        self.objects.write(&storage_path, data).await?;

        let inserted = self
            .attachments
            .insert(&CreateAttachment {
                ticket_id: ticket.id,
                comment_id: None,
                storage_path: storage_path.clone(),
                original_filename: filename,
                mime_type: mime_type.to_string(),
                size_bytes,
                uploaded_by: actor.actor_id(),
            })
            .await;

        match inserted {
            Ok(attachment) => {
                info!(
                    attachment_id = %attachment.id,
                    ticket_id = %ticket.id,
                    size_bytes,
                    "Attachment uploaded"
                );
                Ok(attachment)
            }
            Err(e) => {
                // Orphaned payload cleanup; the row is the source of truth.
                if let Err(cleanup) = self.objects.delete(&storage_path).await {
                    warn!(
                        storage_path = %storage_path,
                        error = %cleanup,
                        "Failed to clean up payload after row insert failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// Returns an attachment's row and payload.
    ///
    /// An attachment owned by an internal comment is only served to actors
    /// who can view that comment.
    pub async fn download_attachment(
        &self,
        ticket_ref: &TicketRef,
        attachment_id: AttachmentId,
        actor: &Identity,
    ) -> AppResult<(Attachment, Bytes)> {
        let ticket = resolve_ticket(self.tickets.as_ref(), ticket_ref).await?;
        self.require_ticket_access(actor, &ticket)?;

        let attachment = self
            .attachments
            .find_by_id(attachment_id)
            .await?
            .filter(|a| a.ticket_id == ticket.id)
            .ok_or_else(|| AppError::not_found(format!("Attachment not found: {attachment_id}")))?;

        if let Some(comment_id) = attachment.comment_id {
            let owner = self.find_linked_comment(&ticket, comment_id).await?;
            if !policy::can_view_comment(actor, &ticket, &owner) {
                return Err(AppError::forbidden("No access to this attachment"));
            }
        }

        let data = self.objects.read_bytes(&attachment.storage_path).await?;
        Ok((attachment, data))
    }

    /// Deletes a single attachment: best-effort payload delete, fatal row
    /// delete.
    pub async fn delete_attachment(
        &self,
        ticket_ref: &TicketRef,
        attachment_id: AttachmentId,
        actor: &Identity,
    ) -> AppResult<()> {
        let ticket = resolve_ticket(self.tickets.as_ref(), ticket_ref).await?;

        let attachment = self
            .attachments
            .find_by_id(attachment_id)
            .await?
            .filter(|a| a.ticket_id == ticket.id)
            .ok_or_else(|| AppError::not_found(format!("Attachment not found: {attachment_id}")))?;

        if !policy::can_delete_attachment(actor, &attachment) {
            return Err(AppError::forbidden(
                "Only the uploader or an admin can delete this attachment",
            ));
        }

        if let Err(e) = self.objects.delete(&attachment.storage_path).await {
            warn!(
                attachment_id = %attachment_id,
                storage_path = %attachment.storage_path,
                error = %e,
                "Failed to delete attachment payload; deleting row anyway"
            );
        }

        self.attachments.delete(attachment_id).await?;
        info!(attachment_id = %attachment_id, ticket_id = %ticket.id, "Attachment deleted");
        Ok(())
    }

    /// A comment looked up through a ticket must actually belong to that
    /// ticket; a mismatch is indistinguishable from a missing comment.
    async fn find_linked_comment(
        &self,
        ticket: &Ticket,
        comment_id: CommentId,
    ) -> AppResult<Comment> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.ticket_id == ticket.id)
            .ok_or_else(|| AppError::not_found(format!("Comment not found: {comment_id}")))
    }

    fn require_ticket_access(&self, actor: &Identity, ticket: &Ticket) -> AppResult<()> {
        if policy::can_access_ticket(actor, ticket) {
            Ok(())
        } else {
            Err(AppError::forbidden("No access to this ticket"))
        }
    }
}

/// Rejects path-traversal shapes and reduces the filename to its final
/// component.
fn sanitize_filename(filename: &str) -> AppResult<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::validation(format!(
            "Invalid attachment filename: '{filename}'"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("report.pdf").unwrap(), "report.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\dump.log").unwrap(), "dump.log");
    }

    #[test]
    fn test_sanitize_filename_rejects_empty() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("uploads/").is_err());
    }
}
