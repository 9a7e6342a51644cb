//! Identity resolution configuration.

use serde::{Deserialize, Serialize};

/// Settings for resolving inbound credentials to identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to verify access tokens (HS256).
    pub jwt_secret: String,
    /// Shared secret presented by trusted internal callers.
    ///
    /// Requests carrying this token resolve to the distinguished system
    /// actor. Disabled when unset.
    #[serde(default)]
    pub service_token: Option<String>,
}
