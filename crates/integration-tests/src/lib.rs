//! Integration tests for MediFlux.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mediflux-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `booking_flow` - Patient request through admin decision
//! - `auth_session` - Login, registration and session restore across services
//! - `storage_persistence` - File-backed store shared between contexts
//!
//! Helpers here build seeded contexts with latency switched off.

use std::path::Path;

use secrecy::SecretString;

use mediflux_booking::config::BookingConfig;
use mediflux_booking::db::fixtures;
use mediflux_booking::models::LoginSession;
use mediflux_booking::services::AuthError;
use mediflux_booking::state::{BookingContext, StateError};

/// Configuration used by every test: no latency, everything else default.
#[must_use]
pub fn test_config() -> BookingConfig {
    BookingConfig::default().without_latency()
}

/// A seeded in-memory context.
///
/// # Errors
///
/// Returns `StateError` if seeding fails.
pub fn memory_context() -> Result<BookingContext, StateError> {
    BookingContext::in_memory(test_config())
}

/// A seeded context backed by `store.json` inside `dir`.
///
/// # Errors
///
/// Returns `StateError` if the file cannot be read or seeding fails.
pub fn file_context(dir: &Path) -> Result<BookingContext, StateError> {
    BookingContext::open(test_config().with_store_path(dir.join("store.json")))
}

/// Log in as the seeded admin.
///
/// # Errors
///
/// Returns `AuthError` if the login fails.
pub async fn login_admin(ctx: &BookingContext) -> Result<LoginSession, AuthError> {
    ctx.auth()
        .login(
            fixtures::ADMIN_EMAIL,
            &SecretString::from(fixtures::ADMIN_PASSWORD),
        )
        .await
}

/// Log in as John Doe, the demo patient.
///
/// # Errors
///
/// Returns `AuthError` if the login fails.
pub async fn login_john(ctx: &BookingContext) -> Result<LoginSession, AuthError> {
    ctx.auth()
        .login(
            fixtures::DEMO_PATIENT_EMAIL,
            &SecretString::from(fixtures::PATIENT_PASSWORD),
        )
        .await
}
