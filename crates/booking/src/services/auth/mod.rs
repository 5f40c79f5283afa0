//! Authentication service.
//!
//! Provides login, sign-up and the persisted session (token, role, user).
//! Passwords are compared in plaintext and tokens are unsigned; see
//! [`token`] for the format.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{TokenClaims, TokenError};

use chrono::{TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};

use mediflux_core::{Email, Role};

use crate::db::{DataService, fixtures};
use crate::models::{
    CurrentSession, DemoAccount, DemoCredentials, LoginSession, NewUser, ProfileUpdate,
    Registration, User,
};
use crate::services::latency::{Latency, Operation};
use crate::storage::StorageService;

/// Default token lifetime, in hours.
pub const DEFAULT_TOKEN_MAX_AGE_HOURS: i64 = 24;

/// Authentication service.
///
/// Cheap to clone; clones share the same storage.
#[derive(Debug, Clone)]
pub struct AuthService {
    data: DataService,
    latency: Latency,
    token_max_age: TimeDelta,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(data: DataService, latency: Latency, token_max_age: TimeDelta) -> Self {
        Self {
            data,
            latency,
            token_max_age,
        }
    }

    fn storage(&self) -> &StorageService {
        self.data.storage()
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Find the account matching `email` and `password` exactly.
    #[must_use]
    pub fn validate_credentials(&self, email: &str, password: &SecretString) -> Option<User> {
        self.data
            .users()
            .find_by_email(email)
            .filter(|user| user.password == password.expose_secret())
    }

    /// Login with email and password, persisting the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or the
    /// password is wrong. No session key is written in that case.
    /// Returns `AuthError::SessionNotPersisted` if the session could not be
    /// stored; any partially written keys are removed.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginSession, AuthError> {
        self.latency.simulate(Operation::Login).await;

        let Some(user) = self.validate_credentials(email, password) else {
            tracing::warn!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let token = TokenClaims::for_user(&user, Utc::now())
            .encode()
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to encode session token");
                AuthError::SessionNotPersisted
            })?;

        let storage = self.storage();
        let persisted = storage.set_auth_token(&token)
            && storage.set_current_role(user.role)
            && storage.set_current_user(&user);
        if !persisted {
            storage.clear_auth_data();
            return Err(AuthError::SessionNotPersisted);
        }

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(LoginSession {
            token,
            role: user.role,
            user,
        })
    }

    /// Register a new patient account.
    ///
    /// Does not sign the user in; see [`Self::register_and_login`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if email, name or password is empty.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::DuplicateEmail` if the email is already registered.
    pub async fn register(&self, registration: &Registration) -> Result<User, AuthError> {
        self.latency.simulate(Operation::Register).await;

        let email = required(&registration.email, "email")?;
        let email = Email::parse(email)?;
        let name = required(&registration.name, "name")?;
        let password = registration.password.expose_secret();
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let users = self.data.users();
        if users.find_by_email(email.as_str()).is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let user = users.add(NewUser {
            email,
            password: password.to_owned(),
            name: name.to_owned(),
            role: Role::Patient,
            age: registration.age,
        })?;

        tracing::info!(user_id = %user.id, "Patient registered");
        Ok(user)
    }

    /// Register, then immediately log in with the same credentials.
    ///
    /// # Errors
    ///
    /// Any [`Self::register`] error. Returns
    /// `AuthError::LoginAfterRegistration` if the account was created but the
    /// login step failed.
    pub async fn register_and_login(
        &self,
        registration: &Registration,
    ) -> Result<LoginSession, AuthError> {
        let user = self.register(registration).await?;
        self.login(user.email.as_str(), &registration.password)
            .await
            .map_err(|e| {
                tracing::warn!(user_id = %user.id, error = %e, "Login after registration failed");
                AuthError::LoginAfterRegistration
            })
    }

    /// Clear the persisted session.
    pub fn logout(&self) {
        self.storage().clear_auth_data();
        tracing::info!("User logged out");
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Whether `token` identifies a live session.
    ///
    /// Invalid when absent, undecodable, older than the configured maximum
    /// age, or naming a user that no longer exists. Never errors.
    #[must_use]
    pub fn validate_token(&self, token: Option<&str>) -> bool {
        let Some(token) = token else {
            return false;
        };

        let claims = match TokenClaims::decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejecting undecodable token");
                return false;
            }
        };

        if claims.is_expired(Utc::now(), self.token_max_age) {
            tracing::debug!(user_id = %claims.id, "Rejecting expired token");
            return false;
        }

        self.data.users().find_by_id(&claims.id).is_some()
    }

    /// The stored session token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage().auth_token()
    }

    /// The stored session role.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.storage().current_role()
    }

    /// The stored user and role, when both are present.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentSession> {
        let storage = self.storage();
        let user = storage.current_user()?;
        let role = storage.current_role()?;
        Some(CurrentSession { user, role })
    }

    /// Whether token, role and user are all stored and agree with each other.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let (Some(token), Some(session)) = (self.token(), self.current_user()) else {
            return false;
        };

        TokenClaims::decode(&token)
            .is_ok_and(|claims| claims.matches(&session.user, session.role))
    }

    /// Startup check: keep the stored session only if it is still valid.
    ///
    /// An invalid or inconsistent session is cleared. A valid one has its user
    /// snapshot refreshed from the `users` collection.
    #[must_use]
    pub fn restore_session(&self) -> Option<CurrentSession> {
        let token = self.token();
        if !self.validate_token(token.as_deref()) || !self.is_authenticated() {
            if token.is_some() {
                tracing::info!("Stored session is no longer valid, clearing it");
                self.storage().clear_auth_data();
            }
            return None;
        }

        let session = self.current_user()?;
        let user = self.data.users().find_by_id(&session.user.id)?;
        self.storage().set_current_user(&user);
        Some(CurrentSession {
            user,
            role: session.role,
        })
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// The signed-in patient.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if nobody is signed in.
    /// Returns `AuthError::NotAPatient` if the session role is not patient.
    pub async fn get_patient_profile(&self) -> Result<User, AuthError> {
        self.latency.simulate(Operation::Profile).await;

        let session = self.current_user().ok_or(AuthError::NotAuthenticated)?;
        if session.role != Role::Patient {
            return Err(AuthError::NotAPatient);
        }
        Ok(session.user)
    }

    /// Update the signed-in user's profile and refresh the session copy.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if nobody is signed in.
    /// Returns `AuthError::MissingField` if a provided name or password is empty.
    /// Returns `AuthError::InvalidEmail` if a provided email is malformed.
    /// Returns `AuthError::DuplicateEmail` if the new email belongs to another user.
    /// Returns `AuthError::UserNotFound` if the account no longer exists.
    pub async fn update_profile(&self, changes: ProfileUpdate) -> Result<User, AuthError> {
        self.latency.simulate(Operation::Profile).await;

        let session = self.current_user().ok_or(AuthError::NotAuthenticated)?;
        let users = self.data.users();

        let email = match changes.email.as_deref() {
            Some(email) => {
                let email = Email::parse(required(email, "email")?)?;
                let taken = users
                    .find_by_email(email.as_str())
                    .is_some_and(|other| other.id != session.user.id);
                if taken {
                    return Err(AuthError::DuplicateEmail);
                }
                Some(email)
            }
            None => None,
        };
        let name = changes
            .name
            .as_deref()
            .map(|name| required(name, "name").map(str::to_owned))
            .transpose()?;
        let password = match &changes.password {
            Some(secret) if secret.expose_secret().is_empty() => {
                return Err(AuthError::MissingField("password"));
            }
            Some(secret) => Some(secret.expose_secret().to_owned()),
            None => None,
        };

        let updated = users
            .update(&session.user.id, |user| {
                if let Some(email) = email {
                    user.email = email;
                }
                if let Some(name) = name {
                    user.name = name;
                }
                if let Some(password) = password {
                    user.password = password;
                }
                if changes.age.is_some() {
                    user.age = changes.age;
                }
            })?
            .ok_or(AuthError::UserNotFound)?;

        self.storage().set_current_user(&updated);
        tracing::info!(user_id = %updated.id, "Profile updated");
        Ok(updated)
    }

    /// Demo accounts for the login screen.
    #[must_use]
    pub const fn demo_credentials() -> DemoCredentials {
        DemoCredentials {
            admin: DemoAccount {
                email: fixtures::ADMIN_EMAIL,
                password: fixtures::ADMIN_PASSWORD,
            },
            patient: DemoAccount {
                email: fixtures::DEMO_PATIENT_EMAIL,
                password: fixtures::PATIENT_PASSWORD,
            },
        }
    }
}

/// Trim `value`, rejecting it if nothing is left.
fn required<'v>(value: &'v str, field: &'static str) -> Result<&'v str, AuthError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(value)
    }
}
