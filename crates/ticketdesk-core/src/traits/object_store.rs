//! Object-store trait for pluggable attachment payload backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for attachment payload backends.
///
/// Implementations exist for the local filesystem and an in-memory store.
/// The [`ObjectStore`] trait is defined here in `ticketdesk-core` and
/// implemented in `ticketdesk-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes to the given path, creating parents as needed.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Read the payload at the given path into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Delete the payload at the given path.
    ///
    /// Deleting a path that does not exist is **not** an error: the delete
    /// cascade must stay idempotent under retry.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a payload exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
