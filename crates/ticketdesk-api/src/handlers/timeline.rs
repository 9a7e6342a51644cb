//! Timeline read handler.

use axum::Json;
use axum::extract::{Path, State};

use ticketdesk_entity::ticket::TicketRef;

use crate::dto::response::{ApiResponse, TimelineResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/tickets/{ref}/timeline
pub async fn get_timeline(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(ticket_ref): Path<String>,
) -> Result<Json<ApiResponse<TimelineResponse>>, ApiError> {
    let ticket_ref = parse_ref(&ticket_ref);
    let events = state
        .timeline_service
        .get_timeline(&ticket_ref, &identity)
        .await?;
    Ok(Json(ApiResponse::ok(TimelineResponse { events })))
}

/// Parses a path segment as a UUID or a human-readable ticket key.
pub(crate) fn parse_ref(raw: &str) -> TicketRef {
    raw.parse().unwrap_or_else(|_| TicketRef::Key(raw.to_string()))
}
