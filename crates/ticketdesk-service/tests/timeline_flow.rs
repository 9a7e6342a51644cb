//! End-to-end timeline behavior over the in-memory stores: the full
//! lifecycle of a ticket with a public comment, an internal comment with
//! an attachment, an edit, and a cascading delete, read back through the
//! feed as owner and as admin.

mod common;

use bytes::Bytes;

use ticketdesk_core::error::ErrorKind;
use ticketdesk_core::types::UserId;
use ticketdesk_database::StatusHistoryStore;
use ticketdesk_entity::history::{ChangeType, CreateStatusHistoryEntry};
use ticketdesk_entity::identity::{Identity, Role};
use ticketdesk_entity::ticket::TicketRef;
use ticketdesk_entity::timeline::TimelineEventKind;
use ticketdesk_service::comment::{AddComment, EditComment};

use common::harness;

#[tokio::test]
async fn timeline_requires_existing_ticket_and_access() {
    let h = harness().await;

    let err = h
        .timeline
        .get_timeline(
            &TicketRef::Key("TD-0000".to_string()),
            &Identity::user(h.owner, Role::User),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = h
        .timeline
        .get_timeline(
            &TicketRef::Id(h.ticket.id),
            &Identity::user(UserId::new(), Role::User),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn empty_ticket_still_has_creation_event() {
    let h = harness().await;
    let feed = h
        .timeline
        .get_timeline(&TicketRef::Id(h.ticket.id), &Identity::System)
        .await
        .unwrap();

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, TimelineEventKind::Created);
    assert_eq!(feed[0].metadata["key"], "TD-1042");
}

#[tokio::test]
async fn full_lifecycle_feed_as_owner_and_admin() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let owner = Identity::user(h.owner, Role::User);
    let admin_id = UserId::new();
    let admin = Identity::user(admin_id, Role::Admin);

    // c1: public comment from the owner.
    let c1 = h
        .comments
        .add_comment(
            &ticket_ref,
            &owner,
            AddComment {
                content: "Renewal key is rejected at activation".to_string(),
                is_internal: false,
                attachment_ids: Vec::new(),
            },
        )
        .await
        .unwrap();

    // a1 uploaded, then c2: internal comment from the admin owning a1.
    let a1 = h
        .comments
        .upload_attachment(
            &ticket_ref,
            &admin,
            "entitlements.json",
            "application/json",
            Bytes::from_static(b"{}"),
        )
        .await
        .unwrap();
    let c2 = h
        .comments
        .add_comment(
            &ticket_ref,
            &admin,
            AddComment {
                content: "Entitlement row missing, see export".to_string(),
                is_internal: true,
                attachment_ids: vec![a1.id],
            },
        )
        .await
        .unwrap();

    // A status change recorded by the triage flow.
    h.records
        .append(&CreateStatusHistoryEntry {
            ticket_id: h.ticket.id,
            change_type: ChangeType::StatusChange,
            old_value: Some("open".to_string()),
            new_value: Some("in_progress".to_string()),
            changed_by: admin_id,
            reason: None,
            metadata: serde_json::json!({}),
        })
        .await
        .unwrap();

    // Owner sees: created, c1, status change. Not c2, not a1.
    let as_owner = h.timeline.get_timeline(&ticket_ref, &owner).await.unwrap();
    let kinds: Vec<_> = as_owner.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TimelineEventKind::Created,
            TimelineEventKind::Comment,
            TimelineEventKind::StatusChange,
        ]
    );
    assert!(as_owner.iter().all(|e| e.attachments.is_empty()));

    // Admin additionally sees c2 with a1 grouped under it.
    let as_admin = h.timeline.get_timeline(&ticket_ref, &admin).await.unwrap();
    assert_eq!(as_admin.len(), 4);
    let c2_event = as_admin
        .iter()
        .find(|e| e.id == c2.id.into_uuid())
        .unwrap();
    assert_eq!(c2_event.attachments.len(), 1);
    assert_eq!(c2_event.attachments[0].original_filename, "entitlements.json");
    assert_eq!(c2_event.metadata["edited"], false);

    // Edit c1: the comment event shows the new content and the edit is a
    // separate audit event.
    h.comments
        .edit_comment(
            &ticket_ref,
            c1.id,
            &owner,
            EditComment {
                content: "Renewal key rejected with code 0x1F".to_string(),
                reason: Some("added error code".to_string()),
            },
        )
        .await
        .unwrap();

    let after_edit = h.timeline.get_timeline(&ticket_ref, &owner).await.unwrap();
    let c1_event = after_edit
        .iter()
        .find(|e| e.id == c1.id.into_uuid())
        .unwrap();
    assert_eq!(
        c1_event.description.as_deref(),
        Some("Renewal key rejected with code 0x1F")
    );
    assert_eq!(c1_event.metadata["edited"], true);
    assert!(
        after_edit
            .iter()
            .any(|e| e.kind == TimelineEventKind::CommentEdit)
    );

    // Delete c2: the comment and a1 vanish from the feed; only the
    // tombstone remains, visible to everyone with ticket access.
    h.comments
        .delete_comment(&ticket_ref, c2.id, &admin)
        .await
        .unwrap();

    let final_admin = h.timeline.get_timeline(&ticket_ref, &admin).await.unwrap();
    assert!(final_admin.iter().all(|e| e.id != c2.id.into_uuid()));
    assert!(
        final_admin
            .iter()
            .all(|e| e.attachments.iter().all(|a| a.id != a1.id))
    );
    let tombstone = final_admin
        .iter()
        .find(|e| e.kind == TimelineEventKind::CommentDeleted)
        .unwrap();
    assert_eq!(tombstone.metadata["had_attachments"], true);
    assert_eq!(tombstone.metadata["comment_id"], serde_json::json!(c2.id));

    // Two reads with no mutations in between are identical.
    let again = h.timeline.get_timeline(&ticket_ref, &admin).await.unwrap();
    assert_eq!(
        serde_json::to_value(&final_admin).unwrap(),
        serde_json::to_value(&again).unwrap()
    );
}

#[tokio::test]
async fn assignee_gets_ticket_access() {
    let h = harness().await;
    let assignee = UserId::new();
    let mut ticket = h.ticket.clone();
    ticket.id = ticketdesk_core::types::TicketId::new();
    ticket.key = "TD-1043".to_string();
    ticket.assignee_id = Some(assignee);
    h.records.seed_ticket(ticket.clone()).await;

    let feed = h
        .timeline
        .get_timeline(
            &TicketRef::Id(ticket.id),
            &Identity::user(assignee, Role::User),
        )
        .await
        .unwrap();
    assert_eq!(feed[0].kind, TimelineEventKind::Created);
}
