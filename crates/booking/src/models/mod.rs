//! Domain models for booking.
//!
//! All records serialize with camelCase field names so the persisted layout
//! matches the key-value layout documented in [`crate::storage::keys`].

pub mod appointment;
pub mod doctor;
pub mod session;
pub mod stats;
pub mod user;

pub use appointment::{Appointment, AppointmentRequest, NewAppointment};
pub use doctor::{AvailabilityWindow, ContactInfo, Doctor};
pub use session::{CurrentSession, DemoAccount, DemoCredentials, LoginSession};
pub use stats::{AdminStats, DashboardStats, PatientStats};
pub use user::{NewUser, ProfileUpdate, Registration, User};
