//! Session and account commands.

use secrecy::SecretString;
use tracing::{info, warn};

use mediflux_booking::error::Result;
use mediflux_booking::models::{ProfileUpdate, Registration};
use mediflux_booking::services::AuthService;
use mediflux_booking::state::BookingContext;

use super::show_user;

pub fn demo() {
    let demo = AuthService::demo_credentials();
    info!("Admin:   {} / {}", demo.admin.email, demo.admin.password);
    info!("Patient: {} / {}", demo.patient.email, demo.patient.password);
}

/// Log in and persist the session.
///
/// # Errors
///
/// Returns an error if the credentials are wrong or the session cannot be stored.
pub async fn login(ctx: &BookingContext, email: &str, password: String) -> Result<()> {
    let session = ctx
        .auth()
        .login(email.trim(), &SecretString::from(password))
        .await?;
    info!("Logged in as {} ({})", session.user.name, session.role);
    Ok(())
}

pub fn logout(ctx: &BookingContext) {
    ctx.auth().logout();
    info!("Logged out.");
}

/// Register a patient account, then log in as it.
///
/// # Errors
///
/// Returns an error if validation fails, the email is taken, or the login
/// step fails.
pub async fn register(
    ctx: &BookingContext,
    email: String,
    name: String,
    password: String,
    age: Option<u32>,
) -> Result<()> {
    let registration = Registration {
        email,
        name,
        password: SecretString::from(password),
        age,
    };
    let session = ctx.auth().register_and_login(&registration).await?;
    info!("Welcome, {}! Your patient ID is {}.", session.user.name, session.user.id);
    Ok(())
}

pub fn whoami(ctx: &BookingContext) {
    match ctx.auth().current_user() {
        Some(session) if ctx.auth().is_authenticated() => show_user(&session.user),
        _ => warn!("Not logged in."),
    }
}

/// Show the signed-in user's profile, or apply the given changes.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the changes are rejected.
pub async fn profile(
    ctx: &BookingContext,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    age: Option<u32>,
) -> Result<()> {
    let changes = ProfileUpdate {
        name,
        email,
        password: password.map(SecretString::from),
        age,
    };

    let user = if changes.is_empty() {
        ctx.appointments().get_patient_profile().await?
    } else {
        let user = ctx.auth().update_profile(changes).await?;
        info!("Profile updated.");
        user
    };
    show_user(&user);
    Ok(())
}
