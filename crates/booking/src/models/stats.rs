//! Dashboard statistics.

use serde::Serialize;

/// Role-specific dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardStats {
    Admin(AdminStats),
    Patient(PatientStats),
}

/// Clinic-wide counters shown to admins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_patients: usize,
    pub pending_appointments: usize,
    pub total_doctors: usize,
    pub total_appointments: usize,
}

/// Counters over the signed-in patient's own appointments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    pub total_appointments: usize,
    /// Pending or confirmed.
    pub upcoming_appointments: usize,
    pub completed_appointments: usize,
    pub pending_appointments: usize,
    /// Dated today (UTC).
    pub today_appointments: usize,
}
