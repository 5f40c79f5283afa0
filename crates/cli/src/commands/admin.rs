//! Admin workflow commands.
//!
//! Every command here requires an admin session.

use tracing::info;

use mediflux_booking::error::Result;
use mediflux_booking::state::BookingContext;

use super::{show_appointments, show_user};

/// List patient accounts.
///
/// # Errors
///
/// Returns an error unless the session role is admin.
pub async fn patients(ctx: &BookingContext) -> Result<()> {
    let patients = ctx.appointments().get_all_patients().await?;
    for patient in &patients {
        show_user(patient);
    }
    info!("{} patients.", patients.len());
    Ok(())
}

/// List appointments awaiting a decision.
///
/// # Errors
///
/// Returns an error unless the session role is admin.
pub async fn pending(ctx: &BookingContext) -> Result<()> {
    show_appointments(&ctx.appointments().get_pending_appointments().await?);
    Ok(())
}

/// List every appointment.
///
/// # Errors
///
/// Returns an error unless the session role is admin.
pub async fn all(ctx: &BookingContext) -> Result<()> {
    show_appointments(&ctx.appointments().get_all_appointments().await?);
    Ok(())
}

/// Set an appointment's status.
///
/// # Errors
///
/// Returns an error if the ID or status is invalid, the session role is not
/// admin, or the appointment does not exist.
pub async fn status(ctx: &BookingContext, id: &str, status: &str) -> Result<()> {
    let appointment = ctx
        .appointments()
        .update_appointment_status(id, status)
        .await?;
    info!("{} is now {}.", appointment.id, appointment.status);
    Ok(())
}
