//! Route definitions for the TicketDesk HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;

    let api_routes = Router::new()
        .route(
            "/tickets/{ticket_ref}/timeline",
            get(handlers::timeline::get_timeline),
        )
        .route(
            "/tickets/{ticket_ref}/comments",
            post(handlers::comment::add_comment),
        )
        .route(
            "/tickets/{ticket_ref}/comments/{comment_id}",
            put(handlers::comment::edit_comment).delete(handlers::comment::delete_comment),
        )
        .route(
            "/tickets/{ticket_ref}/attachments",
            post(handlers::attachment::upload_attachment),
        )
        .route(
            "/tickets/{ticket_ref}/attachments/{attachment_id}",
            get(handlers::attachment::download_attachment)
                .delete(handlers::attachment::delete_attachment),
        )
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
