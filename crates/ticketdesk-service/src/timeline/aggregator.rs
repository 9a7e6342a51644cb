//! Pure timeline aggregation.
//!
//! Turns the four persisted record kinds into one time-ordered feed. No
//! state survives between calls and nothing is memoized: the feed is
//! recomputed from the rows on every read, so it can never go stale after
//! a comment edit or delete.

use std::collections::HashMap;

use serde_json::json;

use ticketdesk_auth::policy;
use ticketdesk_core::types::CommentId;
use ticketdesk_entity::attachment::Attachment;
use ticketdesk_entity::comment::Comment;
use ticketdesk_entity::history::{ChangeType, StatusHistoryEntry};
use ticketdesk_entity::identity::{Identity, actor_label};
use ticketdesk_entity::ticket::Ticket;
use ticketdesk_entity::timeline::{AttachmentSummary, TimelineEvent, TimelineEventKind};

/// Builds the timeline for one ticket from its loaded rows.
///
/// The creation event is synthesized from the ticket row itself (seq 0, so
/// it sorts ahead of same-instant history); `created` history entries
/// written by the intake flow are skipped to avoid a duplicate. Comments
/// the actor may not view are dropped along with their attachments.
/// Output is ordered ascending by `(timestamp, seq)`.
pub fn build_timeline(
    ticket: &Ticket,
    history: &[StatusHistoryEntry],
    comments: &[Comment],
    attachments: &[Attachment],
    actor: &Identity,
) -> Vec<TimelineEvent> {
    let mut events = Vec::with_capacity(1 + history.len() + comments.len() + attachments.len());

    events.push(TimelineEvent {
        id: ticket.id.into_uuid(),
        kind: TimelineEventKind::Created,
        timestamp: ticket.created_at,
        seq: 0,
        actor: actor_label(ticket.owner_id),
        title: "Ticket created".to_string(),
        description: Some(ticket.subject.clone()),
        metadata: json!({ "key": ticket.key }),
        attachments: Vec::new(),
    });

    for entry in history {
        if let Some(event) = history_event(entry) {
            events.push(event);
        }
    }

    let mut by_comment: HashMap<CommentId, Vec<AttachmentSummary>> = HashMap::new();
    for attachment in attachments {
        match attachment.comment_id {
            Some(comment_id) => by_comment
                .entry(comment_id)
                .or_default()
                .push(AttachmentSummary::from(attachment)),
            None => events.push(TimelineEvent {
                id: attachment.id.into_uuid(),
                kind: TimelineEventKind::Attachment,
                timestamp: attachment.created_at,
                seq: attachment.seq,
                actor: actor_label(attachment.uploaded_by),
                title: format!("Attachment added: {}", attachment.original_filename),
                description: None,
                metadata: json!({
                    "mime_type": attachment.mime_type,
                    "size_bytes": attachment.size_bytes,
                }),
                attachments: Vec::new(),
            }),
        }
    }

    for comment in comments {
        if !policy::can_view_comment(actor, ticket, comment) {
            continue;
        }
        events.push(TimelineEvent {
            id: comment.id.into_uuid(),
            kind: TimelineEventKind::Comment,
            timestamp: comment.created_at,
            seq: comment.seq,
            actor: actor_label(comment.author_id),
            title: format!("Comment by {}", comment.author_role_at_time),
            description: Some(comment.content.clone()),
            metadata: json!({
                "is_internal": comment.is_internal,
                "edited": comment.is_edited(),
            }),
            attachments: by_comment.remove(&comment.id).unwrap_or_default(),
        });
    }

    events.sort_by_key(TimelineEvent::sort_key);
    events
}

/// Maps one history entry to its feed event. `created` entries duplicate
/// the synthesized creation event and yield nothing.
fn history_event(entry: &StatusHistoryEntry) -> Option<TimelineEvent> {
    let (kind, title) = match entry.change_type {
        ChangeType::Created => return None,
        ChangeType::StatusChange => (
            TimelineEventKind::StatusChange,
            field_change_title("Status", entry),
        ),
        ChangeType::PriorityChange => (
            TimelineEventKind::StatusChange,
            field_change_title("Priority", entry),
        ),
        ChangeType::Assignment => (
            TimelineEventKind::Assignment,
            match (&entry.old_value, &entry.new_value) {
                (_, Some(new)) => format!("Assigned to {new}"),
                (Some(_), None) => "Unassigned".to_string(),
                (None, None) => "Assignment changed".to_string(),
            },
        ),
        ChangeType::CommentEdited => (TimelineEventKind::CommentEdit, "Comment edited".to_string()),
        ChangeType::CommentDeleted => (
            TimelineEventKind::CommentDeleted,
            "Comment deleted".to_string(),
        ),
    };

    Some(TimelineEvent {
        id: entry.id.into_uuid(),
        kind,
        timestamp: entry.created_at,
        seq: entry.seq,
        actor: actor_label(entry.changed_by),
        title,
        description: entry.reason.clone(),
        metadata: entry.metadata.clone(),
        attachments: Vec::new(),
    })
}

fn field_change_title(field: &str, entry: &StatusHistoryEntry) -> String {
    match (&entry.old_value, &entry.new_value) {
        (Some(old), Some(new)) => format!("{field} changed from {old} to {new}"),
        (None, Some(new)) => format!("{field} set to {new}"),
        _ => format!("{field} changed"),
    }
}
