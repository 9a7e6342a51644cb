//! JWT access-token claims and validation.

pub mod claims;
pub mod decoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
