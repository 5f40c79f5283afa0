//! Reporting commands.

use chrono::NaiveDate;
use tracing::info;

use mediflux_booking::error::Result;
use mediflux_booking::models::DashboardStats;
use mediflux_booking::state::BookingContext;

use super::show_appointments;

/// Show dashboard counters for the session role.
///
/// # Errors
///
/// Returns an error if nobody is signed in.
pub async fn stats(ctx: &BookingContext) -> Result<()> {
    match ctx.appointments().get_dashboard_stats().await? {
        DashboardStats::Admin(stats) => {
            info!("Patients:             {}", stats.total_patients);
            info!("Doctors:              {}", stats.total_doctors);
            info!("Appointments:         {}", stats.total_appointments);
            info!("Pending appointments: {}", stats.pending_appointments);
        }
        DashboardStats::Patient(stats) => {
            info!("Appointments: {}", stats.total_appointments);
            info!("Upcoming:     {}", stats.upcoming_appointments);
            info!("Pending:      {}", stats.pending_appointments);
            info!("Completed:    {}", stats.completed_appointments);
            info!("Today:        {}", stats.today_appointments);
        }
    }
    Ok(())
}

/// List appointments between `start` and `end`, inclusive.
///
/// # Errors
///
/// Returns an error if nobody is signed in or `start` is after `end`.
pub async fn range(ctx: &BookingContext, start: NaiveDate, end: NaiveDate) -> Result<()> {
    show_appointments(
        &ctx.appointments()
            .get_appointments_by_date_range(start, end)
            .await?,
    );
    Ok(())
}
