//! Bearer credential resolution.

use tracing::debug;

use ticketdesk_core::config::auth::AuthConfig;
use ticketdesk_core::error::AppError;
use ticketdesk_core::types::UserId;
use ticketdesk_entity::identity::Identity;

use crate::jwt::JwtDecoder;

/// Resolves a bearer credential into an [`Identity`].
///
/// Two credential shapes are accepted: the shared internal service token,
/// which resolves to [`Identity::System`], and a JWT access token minted by
/// the identity provider, which resolves to [`Identity::User`]. Anything
/// else is rejected as unauthorized.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    decoder: JwtDecoder,
    service_token: Option<String>,
}

impl IdentityResolver {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoder: JwtDecoder::new(config),
            service_token: config.service_token.clone(),
        }
    }

    /// Resolves the raw bearer token into an identity.
    pub fn resolve(&self, token: &str) -> Result<Identity, AppError> {
        if let Some(expected) = &self.service_token {
            if !expected.is_empty() && token == expected {
                debug!("Resolved service credential to system identity");
                return Ok(Identity::System);
            }
        }

        let claims = self.decoder.decode_access_token(token)?;
        Ok(Identity::User {
            id: UserId::from_uuid(claims.sub),
            role: claims.role,
        })
    }
}
