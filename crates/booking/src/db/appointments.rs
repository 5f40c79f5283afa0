//! Appointment repository.

use chrono::NaiveDate;

use mediflux_core::{AppointmentId, AppointmentStatus, UserId};

use super::{RepositoryError, generate_id, load, write};
use crate::models::{Appointment, NewAppointment};
use crate::storage::{StorageService, keys};

/// Repository for the `appointments` collection.
pub struct AppointmentRepository<'a> {
    storage: &'a StorageService,
}

impl<'a> AppointmentRepository<'a> {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(storage: &'a StorageService) -> Self {
        Self { storage }
    }

    /// Get an appointment by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &AppointmentId) -> Option<Appointment> {
        self.storage
            .appointments()
            .into_iter()
            .find(|appointment| &appointment.id == id)
    }

    /// Appointments whose patient snapshot has `patient_id`.
    #[must_use]
    pub fn find_by_patient_id(&self, patient_id: &UserId) -> Vec<Appointment> {
        self.filter(|appointment| &appointment.patient.id == patient_id)
    }

    /// Appointments currently in `status`.
    #[must_use]
    pub fn find_by_status(&self, status: AppointmentStatus) -> Vec<Appointment> {
        self.filter(|appointment| appointment.status == status)
    }

    /// Appointments dated between `start` and `end`, both inclusive.
    #[must_use]
    pub fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Appointment> {
        self.filter(|appointment| (start..=end).contains(&appointment.date))
    }

    /// Every appointment, in creation order.
    #[must_use]
    pub fn all(&self) -> Vec<Appointment> {
        self.storage.appointments()
    }

    fn filter(&self, predicate: impl Fn(&Appointment) -> bool) -> Vec<Appointment> {
        self.storage
            .appointments()
            .into_iter()
            .filter(|appointment| predicate(appointment))
            .collect()
    }

    /// Append an appointment with a generated `apt-...` ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn add(&self, new_appointment: NewAppointment) -> Result<Appointment, RepositoryError> {
        let mut appointments: Vec<Appointment> = load(self.storage, keys::APPOINTMENTS)?;
        let appointment = new_appointment.with_id(AppointmentId::new(generate_id("apt")));
        appointments.push(appointment.clone());
        write(
            self.storage.set_appointments(&appointments),
            keys::APPOINTMENTS,
        )?;

        tracing::debug!(
            appointment_id = %appointment.id,
            doctor_id = %appointment.doctor.id,
            "Appointment added"
        );
        Ok(appointment)
    }

    /// Apply `change` to the appointment with `id` and persist the result.
    ///
    /// Returns `Ok(None)` if no such appointment exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn update(
        &self,
        id: &AppointmentId,
        change: impl FnOnce(&mut Appointment),
    ) -> Result<Option<Appointment>, RepositoryError> {
        let mut appointments: Vec<Appointment> = load(self.storage, keys::APPOINTMENTS)?;
        let Some(appointment) = appointments
            .iter_mut()
            .find(|appointment| &appointment.id == id)
        else {
            return Ok(None);
        };

        change(appointment);
        let updated = appointment.clone();
        write(
            self.storage.set_appointments(&appointments),
            keys::APPOINTMENTS,
        )?;
        Ok(Some(updated))
    }

    /// Remove the appointment with `id`. Returns `true` if one was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn delete(&self, id: &AppointmentId) -> Result<bool, RepositoryError> {
        let mut appointments: Vec<Appointment> = load(self.storage, keys::APPOINTMENTS)?;
        let before = appointments.len();
        appointments.retain(|appointment| &appointment.id != id);
        if appointments.len() == before {
            return Ok(false);
        }

        write(
            self.storage.set_appointments(&appointments),
            keys::APPOINTMENTS,
        )?;
        Ok(true)
    }
}
