//! Actor identity and role types.

pub mod role;

pub use role::Role;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ticketdesk_core::types::UserId;

/// The user ID recorded for actions taken by the system actor.
pub const SYSTEM_USER_ID: UserId = UserId(Uuid::nil());

/// The role a comment author held at creation time, fixed on the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "author_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    /// An ordinary platform user.
    User,
    /// An admin-equivalent actor (admin or superadmin).
    Admin,
    /// The distinguished system actor.
    System,
}

impl AuthorRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::System => "system",
        }
    }
}

impl fmt::Display for AuthorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resolved identity of an inbound caller.
///
/// Always passed explicitly through every core operation — never inferred
/// from request headers or call origin inside the services. The `System`
/// variant is the distinguished internal actor with admin-equivalent
/// rights; trusted internal callers resolve to it instead of receiving an
/// ambient bypass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    /// An authenticated human user.
    User {
        /// The user's ID.
        id: UserId,
        /// The user's role at token-issuance time.
        role: Role,
    },
    /// The trusted internal system actor.
    System,
}

impl Identity {
    /// Create a user identity.
    pub fn user(id: UserId, role: Role) -> Self {
        Self::User { id, role }
    }

    /// Whether this identity carries admin-equivalent rights.
    pub fn is_admin_equivalent(&self) -> bool {
        match self {
            Self::User { role, .. } => role.is_admin_equivalent(),
            Self::System => true,
        }
    }

    /// The user ID, if this is a human actor.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::User { id, .. } => Some(*id),
            Self::System => None,
        }
    }

    /// The ID recorded on rows written by this actor.
    ///
    /// System actions are recorded under [`SYSTEM_USER_ID`].
    pub fn actor_id(&self) -> UserId {
        self.user_id().unwrap_or(SYSTEM_USER_ID)
    }

    /// The author role recorded on comments created by this actor.
    pub fn author_role(&self) -> AuthorRole {
        match self {
            Self::User { role, .. } if role.is_admin_equivalent() => AuthorRole::Admin,
            Self::User { .. } => AuthorRole::User,
            Self::System => AuthorRole::System,
        }
    }
}

/// Display label for an actor ID, used on timeline events.
///
/// The nil UUID is the system actor and renders as `"system"`.
pub fn actor_label(id: UserId) -> String {
    if id == SYSTEM_USER_ID {
        "system".to_string()
    } else {
        id.to_string()
    }
}

impl FromStr for AuthorRole {
    type Err = ticketdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "system" => Ok(Self::System),
            _ => Err(ticketdesk_core::AppError::validation(format!(
                "Invalid author role: '{s}'. Expected one of: user, admin, system"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_role_derivation() {
        let admin = Identity::user(UserId::new(), Role::Admin);
        let superadmin = Identity::user(UserId::new(), Role::Superadmin);
        let user = Identity::user(UserId::new(), Role::User);

        assert_eq!(admin.author_role(), AuthorRole::Admin);
        assert_eq!(superadmin.author_role(), AuthorRole::Admin);
        assert_eq!(user.author_role(), AuthorRole::User);
        assert_eq!(Identity::System.author_role(), AuthorRole::System);
    }

    #[test]
    fn test_system_actor_is_admin_equivalent() {
        assert!(Identity::System.is_admin_equivalent());
        assert_eq!(Identity::System.user_id(), None);
        assert_eq!(Identity::System.actor_id(), SYSTEM_USER_ID);
    }

    #[test]
    fn test_actor_label() {
        assert_eq!(actor_label(SYSTEM_USER_ID), "system");
        let id = UserId::new();
        assert_eq!(actor_label(id), id.to_string());
    }
}
