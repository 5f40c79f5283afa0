//! Subcommand implementations.
//!
//! Output goes through `tracing::info!` so it honours `RUST_LOG` like the
//! rest of the binary.

pub mod admin;
pub mod patient;
pub mod report;
pub mod session;
pub mod store;

use tracing::info;

use mediflux_booking::models::{Appointment, Doctor, User};

/// One line per appointment.
fn show_appointments(appointments: &[Appointment]) {
    if appointments.is_empty() {
        info!("No appointments.");
        return;
    }

    for appointment in appointments {
        let reason = if appointment.reason.is_empty() {
            String::new()
        } else {
            format!(" - {}", appointment.reason)
        };
        info!(
            "{}  {} {}  {:<10} {} with {}{reason}",
            appointment.id,
            appointment.date,
            appointment.time,
            appointment.status,
            appointment.patient.name,
            appointment.doctor.name,
        );
    }
}

fn show_doctors(doctors: &[Doctor]) {
    for doctor in doctors {
        info!(
            "{}  {} ({})  {}  {}",
            doctor.id,
            doctor.name,
            doctor.specialization,
            doctor.contact_info.phone,
            doctor.contact_info.email,
        );
        for window in &doctor.availability {
            info!("    {:<9} {}-{}", window.day, window.start_time, window.end_time);
        }
    }
}

fn show_user(user: &User) {
    let age = user.age.map(|age| format!(", age {age}")).unwrap_or_default();
    info!("{}  {} <{}> [{}]{age}", user.id, user.name, user.email, user.role);
}
