//! Integration tests for the comment lifecycle: add, edit, and the
//! cascading delete pipeline, driven entirely by the in-memory stores.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use ticketdesk_core::error::ErrorKind;
use ticketdesk_core::traits::ObjectStore;
use ticketdesk_core::types::{CommentId, TicketId, UserId};
use ticketdesk_core::{AppError, AppResult};
use ticketdesk_database::{
    AttachmentStore, CommentStore, MemoryRecordStore, StatusHistoryStore,
};
use ticketdesk_entity::comment::{Comment, CreateComment};
use ticketdesk_entity::history::ChangeType;
use ticketdesk_entity::identity::{Identity, Role};
use ticketdesk_entity::ticket::TicketRef;
use ticketdesk_service::CommentService;
use ticketdesk_service::comment::{AddComment, EditComment};
use ticketdesk_storage::MemoryObjectStore;

use common::harness;

fn add(content: &str, is_internal: bool) -> AddComment {
    AddComment {
        content: content.to_string(),
        is_internal,
        attachment_ids: Vec::new(),
    }
}

#[tokio::test]
async fn add_comment_validates_and_records_author_role() {
    let h = harness().await;
    let owner = Identity::user(h.owner, Role::User);
    let ticket_ref = TicketRef::Key(h.ticket.key.clone());

    let err = h
        .comments
        .add_comment(&ticket_ref, &owner, add("   ", false))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let comment = h
        .comments
        .add_comment(&ticket_ref, &owner, add("  It broke again  ", false))
        .await
        .unwrap();
    assert_eq!(comment.content, "It broke again");
    assert_eq!(comment.author_id, h.owner);
    assert!(!comment.is_internal);
}

#[tokio::test]
async fn internal_flag_downgraded_for_non_admin() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);

    let from_owner = h
        .comments
        .add_comment(
            &ticket_ref,
            &Identity::user(h.owner, Role::User),
            add("please make this private", true),
        )
        .await
        .unwrap();
    assert!(!from_owner.is_internal);

    let from_admin = h
        .comments
        .add_comment(
            &ticket_ref,
            &Identity::user(UserId::new(), Role::Admin),
            add("internal triage note", true),
        )
        .await
        .unwrap();
    assert!(from_admin.is_internal);
}

#[tokio::test]
async fn stranger_cannot_comment() {
    let h = harness().await;
    let err = h
        .comments
        .add_comment(
            &TicketRef::Id(h.ticket.id),
            &Identity::user(UserId::new(), Role::User),
            add("drive-by", false),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn uploaded_attachment_is_pulled_under_new_comment() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let owner = Identity::user(h.owner, Role::User);

    let uploaded = h
        .comments
        .upload_attachment(
            &ticket_ref,
            &owner,
            "error.log",
            "text/plain",
            Bytes::from_static(b"stack trace"),
        )
        .await
        .unwrap();
    assert!(uploaded.comment_id.is_none());
    assert!(h.objects.exists(&uploaded.storage_path).await.unwrap());

    let comment = h
        .comments
        .add_comment(
            &ticket_ref,
            &owner,
            AddComment {
                content: "log attached".to_string(),
                is_internal: false,
                attachment_ids: vec![uploaded.id],
            },
        )
        .await
        .unwrap();

    let owned = h.records.find_by_comment(comment.id).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, uploaded.id);
}

#[tokio::test]
async fn unknown_attachment_id_does_not_fail_the_comment() {
    let h = harness().await;
    let comment = h
        .comments
        .add_comment(
            &TicketRef::Id(h.ticket.id),
            &Identity::user(h.owner, Role::User),
            AddComment {
                content: "attachment went missing".to_string(),
                is_internal: false,
                attachment_ids: vec![ticketdesk_core::types::AttachmentId::new()],
            },
        )
        .await
        .unwrap();
    assert_eq!(comment.content, "attachment went missing");
}

#[tokio::test]
async fn edit_updates_content_and_appends_audit_entry() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let owner = Identity::user(h.owner, Role::User);

    let comment = h
        .comments
        .add_comment(&ticket_ref, &owner, add("orignal text", false))
        .await
        .unwrap();

    let edited = h
        .comments
        .edit_comment(
            &ticket_ref,
            comment.id,
            &owner,
            EditComment {
                content: "original text".to_string(),
                reason: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(edited.content, "original text");
    assert_eq!(edited.author_id, comment.author_id);
    assert_eq!(edited.created_at, comment.created_at);
    assert_eq!(edited.edit_reason.as_deref(), Some("Content updated"));
    assert!(edited.is_edited());

    let history = StatusHistoryStore::find_by_ticket(&h.records, h.ticket.id)
        .await
        .unwrap();
    let audit: Vec<_> = history
        .iter()
        .filter(|e| e.change_type == ChangeType::CommentEdited)
        .collect();
    assert_eq!(audit.len(), 1);
    assert_eq!(
        audit[0].metadata["comment_id"],
        serde_json::json!(comment.id)
    );
    assert_eq!(audit[0].metadata["edit_reason"], "Content updated");
}

#[tokio::test]
async fn non_author_non_admin_cannot_edit() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);

    let comment = h
        .comments
        .add_comment(
            &ticket_ref,
            &Identity::user(h.owner, Role::User),
            add("mine", false),
        )
        .await
        .unwrap();

    // Admins pass; an unrelated admin-equivalent edit is allowed.
    h.comments
        .edit_comment(
            &ticket_ref,
            comment.id,
            &Identity::user(UserId::new(), Role::Superadmin),
            EditComment {
                content: "cleaned up".to_string(),
                reason: Some("moderation".to_string()),
            },
        )
        .await
        .unwrap();

    let err = h
        .comments
        .edit_comment(
            &ticket_ref,
            comment.id,
            &Identity::user(UserId::new(), Role::User),
            EditComment {
                content: "hijack".to_string(),
                reason: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn edit_with_mismatched_ticket_is_not_found() {
    let h = harness().await;
    let comment = h
        .comments
        .add_comment(
            &TicketRef::Id(h.ticket.id),
            &Identity::user(h.owner, Role::User),
            add("right ticket", false),
        )
        .await
        .unwrap();

    let err = h
        .comments
        .edit_comment(
            &TicketRef::Key("TD-9999".to_string()),
            comment.id,
            &Identity::user(h.owner, Role::User),
            EditComment {
                content: "wrong ticket".to_string(),
                reason: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn delete_cascades_attachments_and_writes_one_tombstone() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let admin = Identity::user(UserId::new(), Role::Admin);

    let a1 = h
        .comments
        .upload_attachment(
            &ticket_ref,
            &admin,
            "dump-1.bin",
            "application/octet-stream",
            Bytes::from_static(b"one"),
        )
        .await
        .unwrap();
    let a2 = h
        .comments
        .upload_attachment(
            &ticket_ref,
            &admin,
            "dump-2.bin",
            "application/octet-stream",
            Bytes::from_static(b"two"),
        )
        .await
        .unwrap();

    let comment = h
        .comments
        .add_comment(
            &ticket_ref,
            &admin,
            AddComment {
                content: "crash dumps".to_string(),
                is_internal: true,
                attachment_ids: vec![a1.id, a2.id],
            },
        )
        .await
        .unwrap();

    h.comments
        .delete_comment(&ticket_ref, comment.id, &admin)
        .await
        .unwrap();

    assert!(CommentStore::find_by_id(&h.records, comment.id)
        .await
        .unwrap()
        .is_none());
    assert!(h.records.find_by_comment(comment.id).await.unwrap().is_empty());
    assert!(!h.objects.exists(&a1.storage_path).await.unwrap());
    assert!(!h.objects.exists(&a2.storage_path).await.unwrap());
    assert!(h.objects.is_empty().await);

    let history = StatusHistoryStore::find_by_ticket(&h.records, h.ticket.id)
        .await
        .unwrap();
    let tombstones: Vec<_> = history
        .iter()
        .filter(|e| e.change_type == ChangeType::CommentDeleted)
        .collect();
    assert_eq!(tombstones.len(), 1);
    assert_eq!(tombstones[0].metadata["had_attachments"], true);
}

#[tokio::test]
async fn redelete_is_not_found_and_writes_no_second_tombstone() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let owner = Identity::user(h.owner, Role::User);

    let comment = h
        .comments
        .add_comment(&ticket_ref, &owner, add("short-lived", false))
        .await
        .unwrap();

    h.comments
        .delete_comment(&ticket_ref, comment.id, &owner)
        .await
        .unwrap();

    let err = h
        .comments
        .delete_comment(&ticket_ref, comment.id, &owner)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let history = StatusHistoryStore::find_by_ticket(&h.records, h.ticket.id)
        .await
        .unwrap();
    let tombstones = history
        .iter()
        .filter(|e| e.change_type == ChangeType::CommentDeleted)
        .count();
    assert_eq!(tombstones, 1);

    // No attachments existed; the tombstone says so.
    let tombstone = history
        .iter()
        .find(|e| e.change_type == ChangeType::CommentDeleted)
        .unwrap();
    assert_eq!(tombstone.metadata["had_attachments"], false);
}

#[tokio::test]
async fn download_respects_internal_comment_visibility() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let admin = Identity::user(UserId::new(), Role::Admin);

    let uploaded = h
        .comments
        .upload_attachment(
            &ticket_ref,
            &admin,
            "internal-notes.txt",
            "text/plain",
            Bytes::from_static(b"do not share"),
        )
        .await
        .unwrap();

    // Freely downloadable while unassigned.
    let (_, data) = h
        .comments
        .download_attachment(&ticket_ref, uploaded.id, &Identity::user(h.owner, Role::User))
        .await
        .unwrap();
    assert_eq!(data.as_ref(), b"do not share");

    // Once pulled under an internal comment, the owner loses access.
    h.comments
        .add_comment(
            &ticket_ref,
            &admin,
            AddComment {
                content: "escalation details".to_string(),
                is_internal: true,
                attachment_ids: vec![uploaded.id],
            },
        )
        .await
        .unwrap();

    let err = h
        .comments
        .download_attachment(&ticket_ref, uploaded.id, &Identity::user(h.owner, Role::User))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let (_, data) = h
        .comments
        .download_attachment(&ticket_ref, uploaded.id, &admin)
        .await
        .unwrap();
    assert_eq!(data.as_ref(), b"do not share");
}

#[tokio::test]
async fn delete_attachment_removes_payload_and_row() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let owner = Identity::user(h.owner, Role::User);

    let uploaded = h
        .comments
        .upload_attachment(
            &ticket_ref,
            &owner,
            "screenshot.png",
            "image/png",
            Bytes::from_static(b"png bytes"),
        )
        .await
        .unwrap();

    let err = h
        .comments
        .delete_attachment(
            &ticket_ref,
            uploaded.id,
            &Identity::user(UserId::new(), Role::User),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    h.comments
        .delete_attachment(&ticket_ref, uploaded.id, &owner)
        .await
        .unwrap();
    assert!(!h.objects.exists(&uploaded.storage_path).await.unwrap());
    assert!(AttachmentStore::find_by_id(&h.records, uploaded.id)
        .await
        .unwrap()
        .is_none());
}

/// Comment store that widens the window between the service's existence
/// check and the row delete, so two in-flight deletes can interleave the
/// way they would against a slow database round-trip.
#[derive(Debug, Clone)]
struct SlowDeleteComments {
    inner: Arc<MemoryRecordStore>,
}

#[async_trait]
impl CommentStore for SlowDeleteComments {
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        CommentStore::find_by_id(self.inner.as_ref(), id).await
    }

    async fn find_by_ticket(&self, ticket_id: TicketId) -> AppResult<Vec<Comment>> {
        CommentStore::find_by_ticket(self.inner.as_ref(), ticket_id).await
    }

    async fn insert(&self, data: &CreateComment) -> AppResult<Comment> {
        CommentStore::insert(self.inner.as_ref(), data).await
    }

    async fn update(&self, comment: &Comment) -> AppResult<Comment> {
        CommentStore::update(self.inner.as_ref(), comment).await
    }

    async fn delete(&self, id: CommentId) -> AppResult<bool> {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        CommentStore::delete(self.inner.as_ref(), id).await
    }
}

#[tokio::test]
async fn concurrent_deletes_write_exactly_one_tombstone() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let owner = Identity::user(h.owner, Role::User);

    let stores: Arc<MemoryRecordStore> = Arc::new(h.records.clone());
    let service = CommentService::new(
        stores.clone(),
        Arc::new(SlowDeleteComments {
            inner: stores.clone(),
        }),
        stores.clone(),
        stores,
        h.objects.clone(),
    );

    let comment = service
        .add_comment(&ticket_ref, &owner, add("going away twice", false))
        .await
        .unwrap();

    // Both deletes pass the existence check before either row delete lands;
    // exactly one may claim the row and write the tombstone.
    let (first, second) = tokio::join!(
        service.delete_comment(&ticket_ref, comment.id, &owner),
        service.delete_comment(&ticket_ref, comment.id, &owner),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = outcomes.iter().find(|r| r.is_err()).unwrap();
    assert_eq!(loser.as_ref().unwrap_err().kind, ErrorKind::NotFound);

    let history = StatusHistoryStore::find_by_ticket(&h.records, h.ticket.id)
        .await
        .unwrap();
    let tombstones = history
        .iter()
        .filter(|e| e.change_type == ChangeType::CommentDeleted)
        .count();
    assert_eq!(tombstones, 1);
}

/// Object store whose deletes always fail, standing in for an unreachable
/// payload backend mid-cascade.
#[derive(Debug)]
struct UndeletableObjectStore {
    inner: MemoryObjectStore,
}

#[async_trait]
impl ObjectStore for UndeletableObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        self.inner.write(path, data).await
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(path).await
    }

    async fn delete(&self, _path: &str) -> AppResult<()> {
        Err(AppError::storage("Payload backend unreachable"))
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        self.inner.exists(path).await
    }
}

#[tokio::test]
async fn payload_delete_failure_does_not_abort_cascade() {
    let h = harness().await;
    let ticket_ref = TicketRef::Id(h.ticket.id);
    let admin = Identity::user(UserId::new(), Role::Admin);

    let stores: Arc<MemoryRecordStore> = Arc::new(h.records.clone());
    let objects = Arc::new(UndeletableObjectStore {
        inner: MemoryObjectStore::new(),
    });
    let service = CommentService::new(
        stores.clone(),
        stores.clone(),
        stores.clone(),
        stores,
        objects.clone(),
    );

    let attachment = service
        .upload_attachment(
            &ticket_ref,
            &admin,
            "core.dmp",
            "application/octet-stream",
            Bytes::from_static(b"dump"),
        )
        .await
        .unwrap();

    let comment = service
        .add_comment(
            &ticket_ref,
            &admin,
            AddComment {
                content: "attaching the dump".to_string(),
                is_internal: false,
                attachment_ids: vec![attachment.id],
            },
        )
        .await
        .unwrap();

    // The blob delete fails, the cascade continues: rows gone, one tombstone.
    service
        .delete_comment(&ticket_ref, comment.id, &admin)
        .await
        .unwrap();

    assert!(CommentStore::find_by_id(&h.records, comment.id)
        .await
        .unwrap()
        .is_none());
    assert!(h.records.find_by_comment(comment.id).await.unwrap().is_empty());
    // The orphaned payload stays behind in the backend.
    assert!(objects.exists(&attachment.storage_path).await.unwrap());

    let history = StatusHistoryStore::find_by_ticket(&h.records, h.ticket.id)
        .await
        .unwrap();
    let tombstones: Vec<_> = history
        .iter()
        .filter(|e| e.change_type == ChangeType::CommentDeleted)
        .collect();
    assert_eq!(tombstones.len(), 1);
    assert_eq!(tombstones[0].metadata["had_attachments"], true);
}
