//! PostgreSQL connection pool.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use ticketdesk_core::config::DatabaseConfig;
use ticketdesk_core::error::{AppError, ErrorKind};

/// Owns the sqlx pool for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool using the settings from `[database]`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            "Opening PostgreSQL pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Could not open database pool", e)
            })?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }

    /// Round-trip query used by the health endpoint.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Strip the password from a connection URL before it reaches the logs.
fn redact_url(url: &str) -> String {
    let Some((head, tail)) = url.split_once('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    match head.rfind(':') {
        Some(colon) if colon > scheme_end => format!("{}:****@{tail}", &head[..colon]),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_password_only_when_present() {
        assert_eq!(
            redact_url("postgres://ticketdesk:hunter2@db:5432/ticketdesk"),
            "postgres://ticketdesk:****@db:5432/ticketdesk"
        );
        assert_eq!(
            redact_url("postgres://db:5432/ticketdesk"),
            "postgres://db:5432/ticketdesk"
        );
        assert_eq!(
            redact_url("postgres://ticketdesk@db/ticketdesk"),
            "postgres://ticketdesk@db/ticketdesk"
        );
    }
}
