//! Session-related types.

use mediflux_core::Role;

use super::User;

/// The signed-in identity as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSession {
    pub user: User,
    pub role: Role,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// Encoded session token, as persisted under `authToken`.
    pub token: String,
    pub role: Role,
    pub user: User,
}

/// Demo accounts shown on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoCredentials {
    pub admin: DemoAccount,
    pub patient: DemoAccount,
}

/// A single demo email/password pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: &'static str,
    pub password: &'static str,
}
