//! Authenticated identity and role types.
//!
//! An [`Identity`] is created from a login or register response and destroyed
//! on logout. It is held exclusively by the top-level application state for
//! the lifetime of the open application instance; nothing is persisted.

use serde::{Deserialize, Serialize};

/// Account role, which drives navigation and routing.
///
/// Students get the chat/library/dashboard navigation; teachers get the
/// management dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages books and sees aggregate analytics.
    Teacher,
    /// Browses the library, reads, and chats with the assistant.
    Student,
}

impl Role {
    /// Human-readable label for headers and the profile screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Teacher => "Teacher",
            Self::Student => "Student",
        }
    }

    /// The other role, for the auth form toggle.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Teacher => Self::Student,
            Self::Student => Self::Teacher,
        }
    }
}

/// The current authenticated user.
///
/// Produced by the auth service on login or register. No credentials are
/// stored here; the password never leaves the form layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_labels() {
        assert_eq!(Role::Teacher.label(), "Teacher");
        assert_eq!(Role::Student.label(), "Student");
    }
}
