//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] mediflux_core::EmailError),

    /// A required registration or profile field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Email already belongs to another account.
    #[error("Email already registered. Please log in.")]
    DuplicateEmail,

    /// No signed-in user.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Signed in, but not as a patient.
    #[error("Not authorized or not a patient")]
    NotAPatient,

    /// The signed-in user's record no longer exists.
    #[error("user not found")]
    UserNotFound,

    /// Session keys could not all be written.
    #[error("failed to persist session")]
    SessionNotPersisted,

    /// Sign-up succeeded but the follow-up login did not.
    #[error("Registration successful but login failed. Please try logging in.")]
    LoginAfterRegistration,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(RepositoryError),
}

impl AuthError {
    /// Secondary explanation shown under the main message, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCredentials => Some("Email or password is incorrect."),
            Self::DuplicateEmail => Some("An account with this email address already exists."),
            _ => None,
        }
    }
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => Self::DuplicateEmail,
            other => Self::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_details() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials.");
        assert_eq!(
            AuthError::InvalidCredentials.details(),
            Some("Email or password is incorrect.")
        );
        assert_eq!(AuthError::MissingField("name").to_string(), "name is required");
        assert_eq!(AuthError::NotAuthenticated.details(), None);
    }

    #[test]
    fn test_conflict_maps_to_duplicate_email() {
        let err = AuthError::from(RepositoryError::Conflict("email already exists".to_owned()));
        assert!(matches!(err, AuthError::DuplicateEmail));

        let err = AuthError::from(RepositoryError::WriteFailed("users"));
        assert!(matches!(err, AuthError::Repository(_)));
    }
}
