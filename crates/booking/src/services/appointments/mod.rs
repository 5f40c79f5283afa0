//! Appointment workflow service.
//!
//! Role gates and status validation on top of the data layer. The caller's
//! identity is whatever session the [auth service](super::auth) persisted:
//! admin operations check the stored role, patient operations the stored
//! user.

mod error;

pub use error::AppointmentError;

use chrono::{NaiveDate, NaiveTime, Utc};

use mediflux_core::{AppointmentId, AppointmentStatus, Role};

use crate::db::DataService;
use crate::models::{
    AdminStats, Appointment, AppointmentRequest, DashboardStats, Doctor, NewAppointment,
    PatientStats, User,
};
use crate::services::latency::{Latency, Operation};

/// Appointment workflow service.
///
/// Cheap to clone; clones share the same storage.
#[derive(Debug, Clone)]
pub struct AppointmentService {
    data: DataService,
    latency: Latency,
    enforce_transitions: bool,
}

impl AppointmentService {
    /// Create a new appointment service.
    ///
    /// With `enforce_transitions` set, status updates must follow
    /// [`AppointmentStatus::can_transition_to`]. Otherwise any status may be
    /// set from any other.
    #[must_use]
    pub const fn new(data: DataService, latency: Latency, enforce_transitions: bool) -> Self {
        Self {
            data,
            latency,
            enforce_transitions,
        }
    }

    fn session_user(&self) -> Result<User, AppointmentError> {
        self.data
            .storage()
            .current_user()
            .ok_or(AppointmentError::NotAuthenticated)
    }

    fn require_admin(&self) -> Result<(), AppointmentError> {
        if self.data.storage().current_role() == Some(Role::Admin) {
            Ok(())
        } else {
            Err(AppointmentError::AccessDenied)
        }
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// The signed-in user's appointments.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::NotAuthenticated` if nobody is signed in.
    pub async fn get_patient_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.latency.simulate(Operation::PatientAppointments).await;

        let user = self.session_user()?;
        Ok(self.data.appointments().find_by_patient_id(&user.id))
    }

    /// Every doctor. Needs no session.
    pub async fn get_patient_doctors(&self) -> Vec<Doctor> {
        self.latency.simulate(Operation::Doctors).await;
        self.data.doctors().all()
    }

    /// Request an appointment for the signed-in user.
    ///
    /// The new appointment is `pending` and snapshots the session user and
    /// the doctor record. Availability and double-booking are not checked.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::NotAuthenticated` if nobody is signed in.
    /// Returns `AppointmentError::Validation` if the doctor ID is blank or the
    /// time is not `HH:MM`.
    /// Returns `AppointmentError::DoctorNotFound` if the doctor does not exist;
    /// nothing is written in that case.
    pub async fn request_appointment(
        &self,
        request: AppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        self.latency.simulate(Operation::RequestAppointment).await;

        let patient = self.session_user()?;

        if request.doctor_id.as_str().trim().is_empty() {
            return Err(AppointmentError::Validation("Doctor is required"));
        }
        let time = request.time.trim();
        if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            return Err(AppointmentError::Validation("Time must be in HH:MM format"));
        }

        let doctor = self
            .data
            .doctors()
            .find_by_id(&request.doctor_id)
            .ok_or(AppointmentError::DoctorNotFound)?;

        let appointment = self.data.appointments().add(NewAppointment {
            patient,
            doctor,
            date: request.date,
            time: time.to_owned(),
            reason: request.reason.unwrap_or_default().trim().to_owned(),
            status: AppointmentStatus::Pending,
        })?;

        tracing::info!(
            appointment_id = %appointment.id,
            patient_id = %appointment.patient.id,
            doctor_id = %appointment.doctor.id,
            date = %appointment.date,
            "Appointment requested"
        );
        Ok(appointment)
    }

    /// The signed-in user's current account record.
    ///
    /// Falls back to the session snapshot if the account has since been
    /// removed from the `users` collection.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::NotAuthenticated` if nobody is signed in.
    pub async fn get_patient_profile(&self) -> Result<User, AppointmentError> {
        self.latency.simulate(Operation::Profile).await;

        let user = self.session_user()?;
        Ok(self.data.users().find_by_id(&user.id).unwrap_or(user))
    }

    // =========================================================================
    // Admin Operations
    // =========================================================================

    /// Every patient account.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::AccessDenied` unless the session role is admin.
    pub async fn get_all_patients(&self) -> Result<Vec<User>, AppointmentError> {
        self.latency.simulate(Operation::Patients).await;
        self.require_admin()?;
        Ok(self.data.users().patients())
    }

    /// Every doctor, admin view.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::AccessDenied` unless the session role is admin.
    pub async fn get_all_doctors(&self) -> Result<Vec<Doctor>, AppointmentError> {
        self.latency.simulate(Operation::Doctors).await;
        self.require_admin()?;
        Ok(self.data.doctors().all())
    }

    /// Appointments awaiting a decision.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::AccessDenied` unless the session role is admin.
    pub async fn get_pending_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.latency.simulate(Operation::PendingAppointments).await;
        self.require_admin()?;
        Ok(self
            .data
            .appointments()
            .find_by_status(AppointmentStatus::Pending))
    }

    /// Every appointment.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::AccessDenied` unless the session role is admin.
    pub async fn get_all_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.latency.simulate(Operation::AllAppointments).await;
        self.require_admin()?;
        Ok(self.data.appointments().all())
    }

    /// Set an appointment's status.
    ///
    /// `status` is one of `pending`, `confirmed`, `completed`, `cancelled`.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::Validation` if `id` is blank. This is checked
    /// before anything else.
    /// Returns `AppointmentError::AccessDenied` unless the session role is admin.
    /// Returns `AppointmentError::InvalidStatus` if `status` is unknown; the
    /// appointment is left untouched.
    /// Returns `AppointmentError::InvalidTransition` if enforcement is on and
    /// the move is not allowed.
    /// Returns `AppointmentError::AppointmentNotFound` if `id` is unknown.
    pub async fn update_appointment_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Appointment, AppointmentError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppointmentError::Validation("Valid appointment ID is required"));
        }

        self.latency.simulate(Operation::UpdateStatus).await;
        self.require_admin()?;

        let status: AppointmentStatus = status.parse().map_err(|_| {
            tracing::warn!(appointment_id = id, status, "Rejected unknown appointment status");
            AppointmentError::InvalidStatus(status.to_owned())
        })?;

        let id = AppointmentId::new(id);
        let appointments = self.data.appointments();

        if self.enforce_transitions {
            let current = appointments
                .find_by_id(&id)
                .ok_or(AppointmentError::AppointmentNotFound)?;
            if !current.status.can_transition_to(status) {
                return Err(AppointmentError::InvalidTransition {
                    from: current.status,
                    to: status,
                });
            }
        }

        let updated = appointments
            .update(&id, |appointment| appointment.status = status)?
            .ok_or(AppointmentError::AppointmentNotFound)?;

        tracing::info!(appointment_id = %updated.id, status = %status, "Appointment status updated");
        Ok(updated)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Dashboard counters for the session role.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::NotAuthenticated` if there is no session
    /// role, or the role is patient and no user is stored.
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, AppointmentError> {
        self.latency.simulate(Operation::DashboardStats).await;

        match self.data.storage().current_role() {
            Some(Role::Admin) => Ok(DashboardStats::Admin(AdminStats {
                total_patients: self.data.users().patients().len(),
                pending_appointments: self
                    .data
                    .appointments()
                    .find_by_status(AppointmentStatus::Pending)
                    .len(),
                total_doctors: self.data.doctors().all().len(),
                total_appointments: self.data.appointments().all().len(),
            })),
            Some(Role::Patient) => {
                let user = self.session_user()?;
                let appointments = self.data.appointments().find_by_patient_id(&user.id);
                Ok(DashboardStats::Patient(patient_stats(
                    &appointments,
                    Utc::now().date_naive(),
                )))
            }
            None => Err(AppointmentError::NotAuthenticated),
        }
    }

    /// Appointments dated from `start` to `end`, both inclusive.
    ///
    /// Admins see every appointment; patients see only their own.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::Validation` if `start` is after `end`.
    /// Returns `AppointmentError::NotAuthenticated` if there is no session.
    pub async fn get_appointments_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.latency.simulate(Operation::DateRange).await;

        if start > end {
            return Err(AppointmentError::Validation(
                "Start date must not be after end date",
            ));
        }

        let in_range = self.data.appointments().find_by_date_range(start, end);
        match self.data.storage().current_role() {
            Some(Role::Admin) => Ok(in_range),
            Some(Role::Patient) => {
                let user = self.session_user()?;
                Ok(in_range
                    .into_iter()
                    .filter(|appointment| appointment.is_for_patient(&user))
                    .collect())
            }
            None => Err(AppointmentError::NotAuthenticated),
        }
    }
}

fn patient_stats(appointments: &[Appointment], today: NaiveDate) -> PatientStats {
    let count = |predicate: fn(&Appointment) -> bool| {
        appointments.iter().filter(|a| predicate(a)).count()
    };

    PatientStats {
        total_appointments: appointments.len(),
        upcoming_appointments: count(|a| a.status.is_upcoming()),
        completed_appointments: count(|a| a.status == AppointmentStatus::Completed),
        pending_appointments: count(|a| a.status == AppointmentStatus::Pending),
        today_appointments: appointments.iter().filter(|a| a.date == today).count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeDelta;
    use mediflux_core::DoctorId;

    use super::*;
    use crate::db::fixtures;
    use crate::storage::StorageService;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn service_with(enforce_transitions: bool) -> AppointmentService {
        let data = DataService::new(Arc::new(StorageService::in_memory()));
        data.initialize_data_as_of(today()).unwrap();
        AppointmentService::new(data, Latency::none(), enforce_transitions)
    }

    fn service() -> AppointmentService {
        service_with(false)
    }

    fn sign_in(service: &AppointmentService, email: &str) {
        let user = service.data.users().find_by_email(email).unwrap();
        let storage = service.data.storage();
        storage.set_current_role(user.role);
        storage.set_current_user(&user);
    }

    fn as_admin(service: &AppointmentService) {
        sign_in(service, fixtures::ADMIN_EMAIL);
    }

    fn as_john(service: &AppointmentService) {
        sign_in(service, fixtures::DEMO_PATIENT_EMAIL);
    }

    fn request(doctor_id: &str) -> AppointmentRequest {
        AppointmentRequest {
            doctor_id: DoctorId::new(doctor_id),
            date: today() + TimeDelta::days(7),
            time: "10:30".to_owned(),
            reason: Some("Annual physical".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_patient_appointments_are_own_only() {
        let service = service();
        assert!(matches!(
            service.get_patient_appointments().await,
            Err(AppointmentError::NotAuthenticated)
        ));

        as_john(&service);
        let appointments = service.get_patient_appointments().await.unwrap();
        assert_eq!(appointments.len(), 2);
        assert!(appointments.iter().all(|a| a.patient.id == "patient-001"));
    }

    #[tokio::test]
    async fn test_doctors_are_public() {
        let service = service();
        assert_eq!(service.get_patient_doctors().await.len(), 5);
    }

    #[tokio::test]
    async fn test_request_appointment() {
        let service = service();
        as_john(&service);

        let appointment = service.request_appointment(request("doc-001")).await.unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.doctor.name, "Dr. Sarah Johnson");
        assert_eq!(appointment.patient.name, "John Doe");
        assert_eq!(appointment.reason, "Annual physical");
        assert!(appointment.id.as_str().starts_with("apt-"));
        assert_eq!(service.data.appointments().all().len(), 6);
    }

    #[tokio::test]
    async fn test_request_without_reason_stores_empty_reason() {
        let service = service();
        as_john(&service);

        let mut req = request("doc-002");
        req.reason = None;
        let appointment = service.request_appointment(req).await.unwrap();
        assert_eq!(appointment.reason, "");
    }

    #[tokio::test]
    async fn test_request_unknown_doctor_writes_nothing() {
        let service = service();
        as_john(&service);

        let result = service.request_appointment(request("doc-999")).await;
        assert!(matches!(result, Err(AppointmentError::DoctorNotFound)));
        assert_eq!(service.data.appointments().all().len(), 5);
    }

    #[tokio::test]
    async fn test_request_validation() {
        let service = service();
        assert!(matches!(
            service.request_appointment(request("doc-001")).await,
            Err(AppointmentError::NotAuthenticated)
        ));

        as_john(&service);
        assert!(matches!(
            service.request_appointment(request("  ")).await,
            Err(AppointmentError::Validation(_))
        ));

        let mut bad_time = request("doc-001");
        bad_time.time = "half past ten".to_owned();
        assert!(matches!(
            service.request_appointment(bad_time).await,
            Err(AppointmentError::Validation("Time must be in HH:MM format"))
        ));
        assert_eq!(service.data.appointments().all().len(), 5);
    }

    #[tokio::test]
    async fn test_snapshot_survives_user_update() {
        let service = service();
        as_john(&service);
        let appointment = service.request_appointment(request("doc-001")).await.unwrap();

        service
            .data
            .users()
            .update(&appointment.patient.id, |user| user.name = "Jonathan Doe".to_owned())
            .unwrap();

        let stored = service.data.appointments().find_by_id(&appointment.id).unwrap();
        assert_eq!(stored.patient.name, "John Doe");
        assert_eq!(
            service.get_patient_profile().await.unwrap().name,
            "Jonathan Doe"
        );
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let service = service();
        as_john(&service);

        assert!(matches!(
            service.get_all_patients().await,
            Err(AppointmentError::AccessDenied)
        ));
        assert!(matches!(
            service.get_all_doctors().await,
            Err(AppointmentError::AccessDenied)
        ));
        assert!(matches!(
            service.get_pending_appointments().await,
            Err(AppointmentError::AccessDenied)
        ));
        assert!(matches!(
            service.get_all_appointments().await,
            Err(AppointmentError::AccessDenied)
        ));
        assert!(matches!(
            service.update_appointment_status("apt-001", "confirmed").await,
            Err(AppointmentError::AccessDenied)
        ));

        as_admin(&service);
        assert_eq!(service.get_all_patients().await.unwrap().len(), 5);
        assert_eq!(service.get_all_doctors().await.unwrap().len(), 5);
        assert_eq!(service.get_pending_appointments().await.unwrap().len(), 3);
        assert_eq!(service.get_all_appointments().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_update_status() {
        let service = service();
        as_admin(&service);

        let updated = service
            .update_appointment_status("apt-001", "confirmed")
            .await
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Confirmed);

        let pending = service.get_pending_appointments().await.unwrap();
        assert!(pending.iter().all(|a| a.id != "apt-001"));
    }

    #[tokio::test]
    async fn test_update_status_rejections() {
        let service = service();

        assert!(matches!(
            service.update_appointment_status("   ", "confirmed").await,
            Err(AppointmentError::Validation("Valid appointment ID is required"))
        ));

        as_admin(&service);
        assert!(matches!(
            service.update_appointment_status("apt-001", "done").await,
            Err(AppointmentError::InvalidStatus(s)) if s == "done"
        ));
        assert_eq!(
            service
                .data
                .appointments()
                .find_by_id(&"apt-001".into())
                .unwrap()
                .status,
            AppointmentStatus::Pending
        );

        assert!(matches!(
            service.update_appointment_status("apt-999", "confirmed").await,
            Err(AppointmentError::AppointmentNotFound)
        ));
    }

    #[tokio::test]
    async fn test_padded_status_is_rejected() {
        let service = service();
        as_admin(&service);

        for status in [" confirmed\n", "confirmed ", "\tcancelled"] {
            assert!(matches!(
                service.update_appointment_status("apt-003", status).await,
                Err(AppointmentError::InvalidStatus(s)) if s == status
            ));
        }
        assert_eq!(
            service
                .data
                .appointments()
                .find_by_id(&"apt-003".into())
                .unwrap()
                .status,
            AppointmentStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_transitions_are_lenient_by_default() {
        let service = service();
        as_admin(&service);

        let reopened = service
            .update_appointment_status("apt-004", "pending")
            .await
            .unwrap();
        assert_eq!(reopened.status, AppointmentStatus::Pending);
    }

    #[tokio::test]
    async fn test_enforced_transitions() {
        let service = service_with(true);
        as_admin(&service);

        assert!(matches!(
            service.update_appointment_status("apt-004", "pending").await,
            Err(AppointmentError::InvalidTransition {
                from: AppointmentStatus::Completed,
                to: AppointmentStatus::Pending,
            })
        ));
        assert!(service
            .update_appointment_status("apt-002", "completed")
            .await
            .is_ok());
        assert!(matches!(
            service.update_appointment_status("apt-999", "confirmed").await,
            Err(AppointmentError::AppointmentNotFound)
        ));
    }

    #[tokio::test]
    async fn test_admin_stats_count_all_appointments() {
        let service = service();
        as_admin(&service);

        let stats = service.get_dashboard_stats().await.unwrap();
        assert_eq!(
            stats,
            DashboardStats::Admin(AdminStats {
                total_patients: 5,
                pending_appointments: 3,
                total_doctors: 5,
                total_appointments: 5,
            })
        );
    }

    #[tokio::test]
    async fn test_patient_stats() {
        let service = service();
        assert!(matches!(
            service.get_dashboard_stats().await,
            Err(AppointmentError::NotAuthenticated)
        ));

        as_john(&service);
        let DashboardStats::Patient(stats) = service.get_dashboard_stats().await.unwrap() else {
            panic!("expected patient stats");
        };
        assert_eq!(stats.total_appointments, 2);
        assert_eq!(stats.upcoming_appointments, 1);
        assert_eq!(stats.completed_appointments, 1);
        assert_eq!(stats.pending_appointments, 1);
    }

    #[test]
    fn test_patient_stats_today() {
        let appointments = fixtures::appointments(today());
        let johns: Vec<_> = appointments
            .into_iter()
            .filter(|a| a.patient.id == "patient-001")
            .collect();

        let tomorrow = today() + TimeDelta::days(1);
        assert_eq!(patient_stats(&johns, tomorrow).today_appointments, 1);
        assert_eq!(patient_stats(&johns, today()).today_appointments, 0);
    }

    #[tokio::test]
    async fn test_date_range_is_role_aware() {
        let service = service();
        let start = today() - TimeDelta::days(1);
        let end = today() + TimeDelta::days(2);

        assert!(matches!(
            service.get_appointments_by_date_range(start, end).await,
            Err(AppointmentError::NotAuthenticated)
        ));

        as_admin(&service);
        let all = service.get_appointments_by_date_range(start, end).await.unwrap();
        let ids: Vec<_> = all.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["apt-001", "apt-002", "apt-004"]);

        as_john(&service);
        let own = service.get_appointments_by_date_range(start, end).await.unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|a| a.patient.id == "patient-001"));

        assert!(matches!(
            service.get_appointments_by_date_range(end, start).await,
            Err(AppointmentError::Validation(_))
        ));
    }
}
