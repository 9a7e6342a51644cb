//! Application builder — wires stores, services, and the router into a
//! running Axum server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use ticketdesk_auth::IdentityResolver;
use ticketdesk_core::config::AppConfig;
use ticketdesk_core::error::AppError;
use ticketdesk_database::repositories::{
    AttachmentRepository, CommentRepository, StatusHistoryRepository, TicketRepository,
};
use ticketdesk_service::{CommentService, TimelineService};
use ticketdesk_storage::build_object_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from prepared state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Wires the PostgreSQL-backed stores and services into `AppState`.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    let object_store = build_object_store(&config.storage).await?;

    let tickets = Arc::new(TicketRepository::new(db_pool.clone()));
    let comments = Arc::new(CommentRepository::new(db_pool.clone()));
    let history = Arc::new(StatusHistoryRepository::new(db_pool.clone()));
    let attachments = Arc::new(AttachmentRepository::new(db_pool.clone()));

    let comment_service = Arc::new(CommentService::new(
        tickets.clone(),
        comments.clone(),
        history.clone(),
        attachments.clone(),
        object_store.clone(),
    ));
    let timeline_service = Arc::new(TimelineService::new(
        tickets,
        comments,
        history,
        attachments,
    ));

    let identity_resolver = Arc::new(IdentityResolver::new(&config.auth));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        object_store,
        identity_resolver,
        comment_service,
        timeline_service,
    })
}

/// Runs the TicketDesk server with the given configuration and pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, db_pool).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("TicketDesk server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
}
