//! # ticketdesk-storage
//!
//! Object-store providers for attachment payloads. The [`ObjectStore`]
//! trait is defined in `ticketdesk-core`; this crate provides the local
//! filesystem and in-memory implementations plus the config-driven builder.
//!
//! [`ObjectStore`]: ticketdesk_core::traits::ObjectStore

pub mod manager;
pub mod providers;

pub use manager::build_object_store;
pub use providers::local::LocalObjectStore;
pub use providers::memory::MemoryObjectStore;
