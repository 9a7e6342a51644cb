//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles carried by authenticated users.
///
/// Roles are ordered by privilege level: Superadmin > Admin > User.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An ordinary platform user (ticket submitter).
    User,
    /// A support admin: sees internal comments, moderates any comment.
    Admin,
    /// A superadmin: admin rights plus platform administration.
    Superadmin,
}

impl Role {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Superadmin => 3,
            Self::Admin => 2,
            Self::User => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &Role) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Whether this role carries admin-equivalent rights.
    pub fn is_admin_equivalent(&self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ticketdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            _ => Err(ticketdesk_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: user, admin, superadmin"
            ))),
        }
    }
}
