//! Appointment domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use mediflux_core::{AppointmentId, AppointmentStatus, DoctorId};

use super::{Doctor, User};

/// A booked (or requested) appointment.
///
/// `patient` and `doctor` are snapshots copied when the appointment was
/// created. Later changes to the user or doctor record do not show up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(alias = "_id")]
    pub id: AppointmentId,
    pub patient: User,
    pub doctor: Doctor,
    pub date: NaiveDate,
    /// Slot start, `HH:MM`.
    pub time: String,
    #[serde(default)]
    pub reason: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Whether this appointment belongs to the given patient.
    #[must_use]
    pub fn is_for_patient(&self, patient: &User) -> bool {
        self.patient.id == patient.id
    }
}

/// An appointment record before an ID has been assigned.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient: User,
    pub doctor: Doctor,
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// Attach an ID, producing the stored record.
    #[must_use]
    pub fn with_id(self, id: AppointmentId) -> Appointment {
        Appointment {
            id,
            patient: self.patient,
            doctor: self.doctor,
            date: self.date,
            time: self.time,
            reason: self.reason,
            status: self.status,
        }
    }
}

/// A patient's booking form.
#[derive(Debug, Clone)]
pub struct AppointmentRequest {
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
    /// Requested slot, `HH:MM`.
    pub time: String,
    pub reason: Option<String>,
}
