//! Patient booking commands.

use chrono::NaiveDate;
use tracing::info;

use mediflux_booking::error::Result;
use mediflux_booking::models::AppointmentRequest;
use mediflux_booking::state::BookingContext;
use mediflux_core::DoctorId;

use super::{show_appointments, show_doctors};

pub async fn doctors(ctx: &BookingContext) {
    show_doctors(&ctx.appointments().get_patient_doctors().await);
}

/// Request an appointment for the signed-in patient.
///
/// # Errors
///
/// Returns an error if nobody is signed in, the input is invalid, or the
/// doctor does not exist.
pub async fn request(
    ctx: &BookingContext,
    doctor: String,
    date: NaiveDate,
    time: String,
    reason: Option<String>,
) -> Result<()> {
    let appointment = ctx
        .appointments()
        .request_appointment(AppointmentRequest {
            doctor_id: DoctorId::new(doctor),
            date,
            time,
            reason,
        })
        .await?;

    info!(
        "Requested {} with {} on {} at {} (status: {}).",
        appointment.id, appointment.doctor.name, appointment.date, appointment.time, appointment.status
    );
    Ok(())
}

/// List the signed-in user's appointments.
///
/// # Errors
///
/// Returns an error if nobody is signed in.
pub async fn appointments(ctx: &BookingContext) -> Result<()> {
    show_appointments(&ctx.appointments().get_patient_appointments().await?);
    Ok(())
}
