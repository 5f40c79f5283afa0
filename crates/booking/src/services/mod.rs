//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Login, sign-up and the persisted session
//! - `appointments` - Role-gated booking workflow and dashboard stats
//! - `latency` - Simulated per-operation network delay

pub mod appointments;
pub mod auth;
pub mod latency;

pub use appointments::{AppointmentError, AppointmentService};
pub use auth::{AuthError, AuthService};
pub use latency::{Latency, Operation};
