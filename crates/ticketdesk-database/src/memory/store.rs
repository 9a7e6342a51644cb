//! In-memory implementation of all four record-store traits.
//!
//! Backed by a single Tokio mutex, with a monotonically increasing `seq`
//! counter mirroring the BIGSERIAL columns of the PostgreSQL schema.
//! Suitable for single-node deployments and tests only.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use ticketdesk_core::AppResult;
use ticketdesk_core::types::{AttachmentId, CommentId, HistoryEntryId, TicketId};
use ticketdesk_entity::attachment::{Attachment, CreateAttachment};
use ticketdesk_entity::comment::{Comment, CreateComment};
use ticketdesk_entity::history::{CreateStatusHistoryEntry, StatusHistoryEntry};
use ticketdesk_entity::ticket::Ticket;

use crate::stores::{AttachmentStore, CommentStore, StatusHistoryStore, TicketStore};

/// Protected inner state.
#[derive(Debug)]
struct InnerState {
    tickets: Vec<Ticket>,
    comments: Vec<Comment>,
    history: Vec<StatusHistoryEntry>,
    attachments: Vec<Attachment>,
    /// Next insertion sequence, shared across tables like one would not do
    /// in PostgreSQL but strictly monotonic, which is all ordering needs.
    next_seq: i64,
}

impl InnerState {
    fn next_seq(&mut self) -> i64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

/// In-memory record store implementing all four store traits.
#[derive(Debug, Clone)]
pub struct MemoryRecordStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InnerState {
                tickets: Vec::new(),
                comments: Vec::new(),
                history: Vec::new(),
                attachments: Vec::new(),
                next_seq: 1,
            })),
        }
    }

    /// Seed a ticket row.
    ///
    /// Ticket creation belongs to the external intake flow, so the
    /// `TicketStore` trait has no insert; this inherent method stands in
    /// for that flow.
    pub async fn seed_ticket(&self, ticket: Ticket) {
        let mut state = self.state.lock().await;
        state.tickets.push(ticket);
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketStore for MemoryRecordStore {
    async fn find_by_id(&self, id: TicketId) -> AppResult<Option<Ticket>> {
        let state = self.state.lock().await;
        Ok(state.tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<Ticket>> {
        let state = self.state.lock().await;
        Ok(state.tickets.iter().find(|t| t.key == key).cloned())
    }
}

#[async_trait]
impl CommentStore for MemoryRecordStore {
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        let state = self.state.lock().await;
        Ok(state.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<Comment>> {
        let state = self.state.lock().await;
        let mut rows: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| (c.created_at, c.seq));
        Ok(rows)
    }

    async fn insert(&self, data: &CreateComment) -> AppResult<Comment> {
        let mut state = self.state.lock().await;
        let seq = state.next_seq();
        let comment = Comment {
            id: CommentId::from_uuid(Uuid::new_v4()),
            ticket_id: data.ticket_id,
            author_id: data.author_id,
            author_role_at_time: data.author_role_at_time,
            content: data.content.clone(),
            is_internal: data.is_internal,
            created_at: Utc::now(),
            updated_at: None,
            edited_by: None,
            edit_reason: None,
            seq,
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: &Comment) -> AppResult<Comment> {
        let mut state = self.state.lock().await;
        let row = state
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id)
            .ok_or_else(|| ticketdesk_core::AppError::not_found("Comment not found"))?;
        // Only the mutable columns are written; identity fields stay put.
        row.content = comment.content.clone();
        row.updated_at = comment.updated_at;
        row.edited_by = comment.edited_by;
        row.edit_reason = comment.edit_reason.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: CommentId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        Ok(state.comments.len() < before)
    }
}

#[async_trait]
impl StatusHistoryStore for MemoryRecordStore {
    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<StatusHistoryEntry>> {
        let state = self.state.lock().await;
        let mut rows: Vec<StatusHistoryEntry> = state
            .history
            .iter()
            .filter(|h| h.ticket_id == ticket_id)
            .cloned()
            .collect();
        rows.sort_by_key(|h| (h.created_at, h.seq));
        Ok(rows)
    }

    async fn append(&self, data: &CreateStatusHistoryEntry) -> AppResult<StatusHistoryEntry> {
        let mut state = self.state.lock().await;
        let seq = state.next_seq();
        let entry = StatusHistoryEntry {
            id: HistoryEntryId::from_uuid(Uuid::new_v4()),
            ticket_id: data.ticket_id,
            change_type: data.change_type,
            old_value: data.old_value.clone(),
            new_value: data.new_value.clone(),
            changed_by: data.changed_by,
            reason: data.reason.clone(),
            metadata: data.metadata.clone(),
            created_at: Utc::now(),
            seq,
        };
        state.history.push(entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl AttachmentStore for MemoryRecordStore {
    async fn find_by_id(&self, id: AttachmentId) -> AppResult<Option<Attachment>> {
        let state = self.state.lock().await;
        Ok(state.attachments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<Attachment>> {
        let state = self.state.lock().await;
        let mut rows: Vec<Attachment> = state
            .attachments
            .iter()
            .filter(|a| a.ticket_id == ticket_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| (a.created_at, a.seq));
        Ok(rows)
    }

    async fn find_by_comment(&self, comment_id: CommentId) -> AppResult<Vec<Attachment>> {
        let state = self.state.lock().await;
        let mut rows: Vec<Attachment> = state
            .attachments
            .iter()
            .filter(|a| a.comment_id == Some(comment_id))
            .cloned()
            .collect();
        rows.sort_by_key(|a| (a.created_at, a.seq));
        Ok(rows)
    }

    async fn insert(&self, data: &CreateAttachment) -> AppResult<Attachment> {
        let mut state = self.state.lock().await;
        let seq = state.next_seq();
        let attachment = Attachment {
            id: AttachmentId::from_uuid(Uuid::new_v4()),
            ticket_id: data.ticket_id,
            comment_id: data.comment_id,
            storage_path: data.storage_path.clone(),
            original_filename: data.original_filename.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            uploaded_by: data.uploaded_by,
            created_at: Utc::now(),
            seq,
        };
        state.attachments.push(attachment.clone());
        Ok(attachment)
    }

    async fn assign_to_comment(
        &self,
        id: AttachmentId,
        ticket_id: TicketId,
        comment_id: CommentId,
    ) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state
            .attachments
            .iter_mut()
            .find(|a| a.id == id && a.ticket_id == ticket_id && a.comment_id.is_none())
        {
            Some(row) => {
                row.comment_id = Some(comment_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: AttachmentId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.attachments.len();
        state.attachments.retain(|a| a.id != id);
        Ok(state.attachments.len() < before)
    }

    async fn delete_by_comment(&self, comment_id: CommentId) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.attachments.len();
        state.attachments.retain(|a| a.comment_id != Some(comment_id));
        Ok((before - state.attachments.len()) as u64)
    }
}
