//! Timeline read service.

use std::sync::Arc;

use tracing::debug;

use ticketdesk_auth::policy;
use ticketdesk_core::{AppError, AppResult};
use ticketdesk_database::{AttachmentStore, CommentStore, StatusHistoryStore, TicketStore};
use ticketdesk_entity::identity::Identity;
use ticketdesk_entity::ticket::TicketRef;
use ticketdesk_entity::timeline::TimelineEvent;

use crate::resolve_ticket;
use crate::timeline::build_timeline;

/// Serves the derived timeline feed for a ticket.
///
/// Stateless between requests: every read loads the four record kinds and
/// rebuilds the feed from scratch. A failure reading any one source fails
/// the whole request; a partial feed is never served.
#[derive(Debug, Clone)]
pub struct TimelineService {
    tickets: Arc<dyn TicketStore>,
    comments: Arc<dyn CommentStore>,
    history: Arc<dyn StatusHistoryStore>,
    attachments: Arc<dyn AttachmentStore>,
}

impl TimelineService {
    /// Creates a new timeline service.
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        comments: Arc<dyn CommentStore>,
        history: Arc<dyn StatusHistoryStore>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            tickets,
            comments,
            history,
            attachments,
        }
    }

    /// Returns the access-filtered, time-ordered feed for a ticket.
    pub async fn get_timeline(
        &self,
        ticket_ref: &TicketRef,
        actor: &Identity,
    ) -> AppResult<Vec<TimelineEvent>> {
        let ticket = resolve_ticket(self.tickets.as_ref(), ticket_ref).await?;

        if !policy::can_access_ticket(actor, &ticket) {
            return Err(AppError::forbidden("No access to this ticket"));
        }

        // The source reads stay sequential for a single ticket; a feed is
        // built from one pass over the stores, never from racing reads.
        let history = self.history.find_by_ticket(ticket.id).await?;
        let comments = self.comments.find_by_ticket(ticket.id).await?;
        let attachments = self.attachments.find_by_ticket(ticket.id).await?;

        let events = build_timeline(&ticket, &history, &comments, &attachments, actor);
        debug!(ticket_id = %ticket.id, events = events.len(), "Timeline built");
        Ok(events)
    }
}
