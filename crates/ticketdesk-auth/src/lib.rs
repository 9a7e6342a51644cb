//! # ticketdesk-auth
//!
//! Identity resolution (JWT access tokens and the internal service
//! credential) and the pure authorization policy used by both the comment
//! lifecycle and the timeline aggregator.

pub mod jwt;
pub mod policy;
pub mod resolver;

pub use resolver::IdentityResolver;
