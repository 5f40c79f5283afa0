//! Appointment workflow error types.

use thiserror::Error;

use mediflux_core::AppointmentStatus;

use crate::db::RepositoryError;

/// Errors returned by [`AppointmentService`](super::AppointmentService).
#[derive(Debug, Error)]
pub enum AppointmentError {
    /// No signed-in user.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Signed in, but not as an admin.
    #[error("Access denied - Admin only")]
    AccessDenied,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Appointment not found")]
    AppointmentNotFound,

    /// The requested status is not one of the four known values.
    #[error("Invalid appointment status")]
    InvalidStatus(String),

    /// Only raised when transition enforcement is switched on.
    #[error("Cannot change appointment status from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// Malformed input.
    #[error("{0}")]
    Validation(&'static str),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
