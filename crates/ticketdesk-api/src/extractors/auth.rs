//! `AuthUser` extractor — pulls the bearer credential from the
//! Authorization header and resolves it to an identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use ticketdesk_core::error::AppError;
use ticketdesk_entity::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted caller identity available in handlers.
///
/// Resolves either a JWT access token or the internal service token;
/// the handlers never see the raw credential.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    /// Returns the inner identity.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let identity = state.identity_resolver.resolve(token)?;
        Ok(AuthUser(identity))
    }
}
