//! Unified error handling.
//!
//! Provides a unified `AppError` type that every layer's error converts into,
//! with a coarse [`ErrorKind`] for callers that branch on the failure class
//! and a user-facing message that never leaks storage internals.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::appointments::AppointmentError;
use crate::services::auth::AuthError;
use crate::state::StateError;

/// Application-level error type for the booking core.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Appointment workflow operation failed.
    #[error(transparent)]
    Appointment(#[from] AppointmentError),

    /// Data access failed outside a service call.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store could not be opened or seeded.
    #[error("Startup error: {0}")]
    State(#[from] StateError),
}

/// Failure class of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotAuthenticated,
    AccessDenied,
    NotFound,
    Validation,
    InvalidCredentials,
    Conflict,
    Storage,
    Internal,
}

impl AppError {
    /// The failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) | AuthError::MissingField(_) => ErrorKind::Validation,
                AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
                AuthError::DuplicateEmail => ErrorKind::Conflict,
                AuthError::NotAuthenticated => ErrorKind::NotAuthenticated,
                AuthError::NotAPatient => ErrorKind::AccessDenied,
                AuthError::UserNotFound => ErrorKind::NotFound,
                AuthError::SessionNotPersisted | AuthError::Repository(_) => ErrorKind::Storage,
                AuthError::LoginAfterRegistration => ErrorKind::Internal,
            },
            Self::Appointment(err) => match err {
                AppointmentError::NotAuthenticated => ErrorKind::NotAuthenticated,
                AppointmentError::AccessDenied => ErrorKind::AccessDenied,
                AppointmentError::DoctorNotFound | AppointmentError::AppointmentNotFound => {
                    ErrorKind::NotFound
                }
                AppointmentError::InvalidStatus(_)
                | AppointmentError::InvalidTransition { .. }
                | AppointmentError::Validation(_) => ErrorKind::Validation,
                AppointmentError::Repository(_) => ErrorKind::Storage,
            },
            Self::Repository(RepositoryError::Conflict(_)) => ErrorKind::Conflict,
            Self::Repository(RepositoryError::WriteFailed(_) | RepositoryError::Unreadable(_))
            | Self::State(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to show an end user.
    ///
    /// Storage failures collapse to a generic message; everything else is the
    /// error's own text. Callers log the full error separately.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Storage => "Something went wrong. Please try again.".to_string(),
            _ => self.to_string(),
        }
    }

    /// Secondary explanation, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&'static str> {
        match self {
            Self::Auth(err) => err.details(),
            _ => None,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
