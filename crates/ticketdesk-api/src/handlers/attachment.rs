//! Attachment upload and delete handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use ticketdesk_core::error::AppError;
use ticketdesk_core::types::AttachmentId;
use ticketdesk_entity::attachment::Attachment;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::timeline::parse_ref;
use crate::state::AppState;

/// POST /api/tickets/{ref}/attachments — multipart upload
///
/// Expects a single `file` field; the payload lands in the object store
/// unassigned to any comment.
pub async fn upload_attachment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(ticket_ref): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Attachment>>), ApiError> {
    let ticket_ref = parse_ref(&ticket_ref);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::validation("Multipart field 'file' has no filename"))?;
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;

        let attachment = state
            .comment_service
            .upload_attachment(&ticket_ref, &identity, &filename, &mime_type, data)
            .await?;
        return Ok((StatusCode::CREATED, Json(ApiResponse::ok(attachment))));
    }

    Err(AppError::validation("Missing multipart field 'file'").into())
}

/// GET /api/tickets/{ref}/attachments/{id}
pub async fn download_attachment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path((ticket_ref, attachment_id)): Path<(String, AttachmentId)>,
) -> Result<axum::response::Response, ApiError> {
    let (attachment, data) = state
        .comment_service
        .download_attachment(&parse_ref(&ticket_ref), attachment_id, &identity)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, attachment.mime_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment.original_filename),
        ),
    ];
    Ok((headers, data).into_response())
}

/// DELETE /api/tickets/{ref}/attachments/{id}
pub async fn delete_attachment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path((ticket_ref, attachment_id)): Path<(String, AttachmentId)>,
) -> Result<StatusCode, ApiError> {
    state
        .comment_service
        .delete_attachment(&parse_ref(&ticket_ref), attachment_id, &identity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
