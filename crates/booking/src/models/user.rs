//! User domain types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use mediflux_core::{Email, Role, UserId};

/// A patient or admin account.
///
/// The password is stored in plaintext; this is a local demo store, not an
/// identity provider. `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (`patient-001`, `admin-001`, or generated).
    pub id: UserId,
    /// Login email, unique across users.
    pub email: Email,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Age in years, patients only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl User {
    /// Whether this account is a patient.
    #[must_use]
    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("age", &self.age)
            .finish()
    }
}

/// A user record before an ID has been assigned.
#[derive(Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub age: Option<u32>,
}

impl NewUser {
    /// Attach an ID, producing the stored record.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            name: self.name,
            role: self.role,
            age: self.age,
        }
    }
}

/// Sign-up form input.
///
/// Fields are raw strings; validation happens in
/// [`AuthService::register`](crate::services::auth::AuthService::register).
#[derive(Debug)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: SecretString,
    pub age: Option<u32>,
}

/// Profile changes requested by the signed-in user.
///
/// `None` leaves the field unchanged. ID and role are never editable.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub age: Option<u32>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none() && self.age.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn john() -> User {
        User {
            id: UserId::new("patient-001"),
            email: Email::parse("john.doe@email.com").unwrap(),
            password: "patient123".to_owned(),
            name: "John Doe".to_owned(),
            role: Role::Patient,
            age: Some(34),
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", john());
        assert!(debug.contains("John Doe"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("patient123"));
    }

    #[test]
    fn test_json_layout() {
        let value = serde_json::to_value(john()).unwrap();
        assert_eq!(value["id"], "patient-001");
        assert_eq!(value["role"], "patient");
        assert_eq!(value["age"], 34);
    }

    #[test]
    fn test_age_is_optional() {
        let json = r#"{"id":"admin-001","email":"admin@mediflux.com","password":"admin123","name":"Admin User","role":"admin"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.age, None);
        assert!(!user.is_patient());
        assert!(!serde_json::to_string(&user).unwrap().contains("age"));
    }

    #[test]
    fn test_empty_profile_update() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            age: Some(35),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
