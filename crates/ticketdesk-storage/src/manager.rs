//! Config-driven object-store construction.

use std::sync::Arc;

use tracing::info;

use ticketdesk_core::config::storage::StorageConfig;
use ticketdesk_core::error::AppError;
use ticketdesk_core::result::AppResult;
use ticketdesk_core::traits::ObjectStore;

use crate::providers::local::LocalObjectStore;
use crate::providers::memory::MemoryObjectStore;

/// Build the configured object-store provider.
pub async fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    info!(provider = %config.provider, "Initializing object store");

    match config.provider.as_str() {
        "local" => {
            let store = LocalObjectStore::new(&config.local_root).await?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryObjectStore::new())),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider: '{other}'. Expected 'local' or 'memory'"
        ))),
    }
}
