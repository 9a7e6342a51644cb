//! Comment lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use ticketdesk_core::types::CommentId;
use ticketdesk_entity::comment::Comment;
use ticketdesk_service::comment::{AddComment, EditComment};

use crate::dto::request::{AddCommentRequest, EditCommentRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::timeline::parse_ref;
use crate::state::AppState;

/// POST /api/tickets/{ref}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(ticket_ref): Path<String>,
    Json(body): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), ApiError> {
    let comment = state
        .comment_service
        .add_comment(
            &parse_ref(&ticket_ref),
            &identity,
            AddComment {
                content: body.content,
                is_internal: body.is_internal,
                attachment_ids: body.attachment_ids,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(comment))))
}

/// PUT /api/tickets/{ref}/comments/{id}
pub async fn edit_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path((ticket_ref, comment_id)): Path<(String, CommentId)>,
    Json(body): Json<EditCommentRequest>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    let comment = state
        .comment_service
        .edit_comment(
            &parse_ref(&ticket_ref),
            comment_id,
            &identity,
            EditComment {
                content: body.content,
                reason: body.reason,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(comment)))
}

/// DELETE /api/tickets/{ref}/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path((ticket_ref, comment_id)): Path<(String, CommentId)>,
) -> Result<StatusCode, ApiError> {
    state
        .comment_service
        .delete_comment(&parse_ref(&ticket_ref), comment_id, &identity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
