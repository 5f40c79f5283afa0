//! Simulated network latency.
//!
//! Every public service call waits for a per-operation delay before touching
//! storage, so callers exercise their loading states the way they would
//! against a real backend.

use std::time::Duration;

/// Service operations with a distinct simulated delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    Profile,
    Doctors,
    Patients,
    PatientAppointments,
    PendingAppointments,
    RequestAppointment,
    UpdateStatus,
    DashboardStats,
    AllAppointments,
    DateRange,
}

impl Operation {
    /// Delay applied before the operation runs.
    #[must_use]
    pub const fn delay(self) -> Duration {
        let millis = match self {
            Self::Register => 800,
            Self::Login | Self::RequestAppointment => 500,
            Self::UpdateStatus => 400,
            Self::PatientAppointments | Self::PendingAppointments | Self::DateRange => 300,
            Self::Patients => 250,
            Self::Profile | Self::Doctors | Self::DashboardStats | Self::AllAppointments => 200,
        };
        Duration::from_millis(millis)
    }
}

/// Latency switch shared by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    enabled: bool,
}

impl Latency {
    /// Sleep before every operation.
    #[must_use]
    pub const fn simulated() -> Self {
        Self { enabled: true }
    }

    /// Never sleep. Used by tests and scripted runs.
    #[must_use]
    pub const fn none() -> Self {
        Self { enabled: false }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Wait out the delay for `operation`, if enabled.
    pub async fn simulate(self, operation: Operation) {
        if self.enabled {
            tokio::time::sleep(operation.delay()).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays() {
        assert_eq!(Operation::Register.delay(), Duration::from_millis(800));
        assert_eq!(Operation::Login.delay(), Duration::from_millis(500));
        assert_eq!(Operation::Patients.delay(), Duration::from_millis(250));
        assert_eq!(Operation::Doctors.delay(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency_sleeps() {
        let start = tokio::time::Instant::now();
        Latency::simulated().simulate(Operation::UpdateStatus).await;
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_latency_returns_immediately() {
        let start = tokio::time::Instant::now();
        Latency::none().simulate(Operation::Register).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
