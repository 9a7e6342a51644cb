//! Shared fixtures for service integration tests, built entirely on the
//! in-memory stores.

use std::sync::Arc;

use chrono::{Duration, Utc};

use ticketdesk_core::types::{TicketId, UserId};
use ticketdesk_database::MemoryRecordStore;
use ticketdesk_entity::ticket::{Ticket, TicketPriority, TicketStatus};
use ticketdesk_service::{CommentService, TimelineService};
use ticketdesk_storage::MemoryObjectStore;

pub struct Harness {
    pub records: MemoryRecordStore,
    pub objects: Arc<MemoryObjectStore>,
    pub comments: CommentService,
    pub timeline: TimelineService,
    pub ticket: Ticket,
    pub owner: UserId,
}

pub async fn harness() -> Harness {
    let records = MemoryRecordStore::new();
    let objects = Arc::new(MemoryObjectStore::new());

    let owner = UserId::new();
    let ticket = Ticket {
        id: TicketId::new(),
        key: "TD-1042".to_string(),
        owner_id: owner,
        subject: "Activation fails on renewal".to_string(),
        status: TicketStatus::Open,
        priority: TicketPriority::High,
        assignee_id: None,
        created_at: Utc::now() - Duration::hours(1),
        updated_at: Utc::now(),
    };
    records.seed_ticket(ticket.clone()).await;

    let tickets: Arc<MemoryRecordStore> = Arc::new(records.clone());
    let comments = CommentService::new(
        tickets.clone(),
        tickets.clone(),
        tickets.clone(),
        tickets.clone(),
        objects.clone(),
    );
    let timeline = TimelineService::new(
        tickets.clone(),
        tickets.clone(),
        tickets.clone(),
        tickets,
    );

    Harness {
        records,
        objects,
        comments,
        timeline,
        ticket,
        owner,
    }
}
