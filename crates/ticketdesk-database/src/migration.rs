//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use ticketdesk_core::error::{AppError, ErrorKind};

/// Apply any migrations not yet recorded in `_sqlx_migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Migration run failed", e))?;

    info!("Schema migrations up to date");
    Ok(())
}
