//! Seed data written by [`DataService::initialize_data`](super::DataService::initialize_data).

use chrono::{NaiveDate, TimeDelta};

use mediflux_core::{AppointmentId, AppointmentStatus, DoctorId, Email, Role, UserId};

use crate::models::{Appointment, AvailabilityWindow, ContactInfo, Doctor, User};

/// Email of the seeded admin account.
pub const ADMIN_EMAIL: &str = "admin@mediflux.com";

/// Password of the seeded admin account.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Email of the patient offered as a demo login.
pub const DEMO_PATIENT_EMAIL: &str = "john.doe@email.com";

/// Password shared by every seeded patient.
pub const PATIENT_PASSWORD: &str = "patient123";

/// The single admin account.
#[must_use]
pub fn default_admin() -> User {
    User {
        id: UserId::new("admin-001"),
        email: Email::from_static(ADMIN_EMAIL),
        password: ADMIN_PASSWORD.to_owned(),
        name: "Admin User".to_owned(),
        role: Role::Admin,
        age: None,
    }
}

/// The five seeded patients.
#[must_use]
pub fn patients() -> Vec<User> {
    [
        ("patient-001", DEMO_PATIENT_EMAIL, "John Doe", 34),
        ("patient-002", "jane.smith@email.com", "Jane Smith", 28),
        ("patient-003", "bob.johnson@email.com", "Bob Johnson", 45),
        ("patient-004", "alice.brown@email.com", "Alice Brown", 52),
        ("patient-005", "mike.wilson@email.com", "Mike Wilson", 39),
    ]
    .into_iter()
    .map(|(id, email, name, age)| User {
        id: UserId::new(id),
        email: Email::from_static(email),
        password: PATIENT_PASSWORD.to_owned(),
        name: name.to_owned(),
        role: Role::Patient,
        age: Some(age),
    })
    .collect()
}

/// Patients followed by the admin, as stored under `users`.
#[must_use]
pub fn users() -> Vec<User> {
    let mut users = patients();
    users.push(default_admin());
    users
}

fn weekdays(days: &[&str], start: &str, end: &str) -> Vec<AvailabilityWindow> {
    days.iter()
        .map(|day| AvailabilityWindow::new(day, start, end))
        .collect()
}

fn doctor(
    id: &str,
    name: &str,
    specialization: &str,
    phone: &str,
    email: &str,
    availability: Vec<AvailabilityWindow>,
) -> Doctor {
    Doctor {
        id: DoctorId::new(id),
        name: name.to_owned(),
        specialization: specialization.to_owned(),
        contact_info: ContactInfo {
            phone: phone.to_owned(),
            email: email.to_owned(),
        },
        availability,
    }
}

/// The five seeded doctors.
#[must_use]
pub fn doctors() -> Vec<Doctor> {
    const MON_THU: [&str; 4] = ["Monday", "Tuesday", "Wednesday", "Thursday"];

    let with_friday = |mut hours: Vec<AvailabilityWindow>, start: &str, end: &str| {
        hours.push(AvailabilityWindow::new("Friday", start, end));
        hours
    };

    vec![
        doctor(
            "doc-001",
            "Dr. Sarah Johnson",
            "Cardiology",
            "+1 (555) 123-4567",
            "sarah.johnson@mediflux.com",
            with_friday(weekdays(&MON_THU, "09:00", "17:00"), "09:00", "15:00"),
        ),
        doctor(
            "doc-002",
            "Dr. Michael Chen",
            "Dermatology",
            "+1 (555) 234-5678",
            "michael.chen@mediflux.com",
            with_friday(
                weekdays(&["Monday", "Tuesday", "Wednesday"], "10:00", "18:00"),
                "09:00",
                "16:00",
            ),
        ),
        doctor(
            "doc-003",
            "Dr. Emily Rodriguez",
            "Pediatrics",
            "+1 (555) 345-6789",
            "emily.rodriguez@mediflux.com",
            with_friday(weekdays(&MON_THU, "08:00", "16:00"), "08:00", "14:00"),
        ),
        doctor(
            "doc-004",
            "Dr. James Wilson",
            "Orthopedics",
            "+1 (555) 456-7890",
            "james.wilson@mediflux.com",
            weekdays(
                &["Tuesday", "Wednesday", "Thursday", "Friday"],
                "09:00",
                "17:00",
            ),
        ),
        doctor(
            "doc-005",
            "Dr. Lisa Thompson",
            "General Practice",
            "+1 (555) 567-8901",
            "lisa.thompson@mediflux.com",
            with_friday(weekdays(&MON_THU, "07:00", "19:00"), "07:00", "17:00"),
        ),
    ]
}

/// The five seeded appointments, dated relative to `today`.
///
/// Patient and doctor fields are snapshots of the seeded records.
#[must_use]
pub fn appointments(today: NaiveDate) -> Vec<Appointment> {
    let patients = patients();
    let doctors = doctors();

    [
        ("apt-001", 0, 0, 1, "10:00", "Regular checkup", AppointmentStatus::Pending),
        ("apt-002", 1, 1, 2, "14:00", "Skin consultation", AppointmentStatus::Confirmed),
        ("apt-003", 2, 2, 3, "09:30", "Child vaccination", AppointmentStatus::Pending),
        ("apt-004", 0, 4, -1, "11:00", "Follow-up appointment", AppointmentStatus::Completed),
        ("apt-005", 3, 3, 5, "15:30", "Knee pain evaluation", AppointmentStatus::Pending),
    ]
    .into_iter()
    .filter_map(|(id, patient, doctor, offset_days, time, reason, status)| {
        Some(Appointment {
            id: AppointmentId::new(id),
            patient: patients.get(patient)?.clone(),
            doctor: doctors.get(doctor)?.clone(),
            date: today + TimeDelta::days(offset_days),
            time: time.to_owned(),
            reason: reason.to_owned(),
            status,
        })
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_counts() {
        assert_eq!(patients().len(), 5);
        assert_eq!(users().len(), 6);
        assert_eq!(doctors().len(), 5);
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(appointments(today).len(), 5);
    }

    #[test]
    fn test_emails_are_unique() {
        let emails: HashSet<_> = users().into_iter().map(|u| u.email).collect();
        assert_eq!(emails.len(), 6);
    }

    #[test]
    fn test_appointment_dates_are_relative() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let appointments = appointments(today);

        let first = appointments.first().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert_eq!(first.patient.name, "John Doe");
        assert_eq!(first.doctor.name, "Dr. Sarah Johnson");

        let past = appointments.iter().find(|a| a.id == "apt-004").unwrap();
        assert_eq!(past.date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(past.doctor.id, "doc-005");
    }

    #[test]
    fn test_doctor_hours() {
        let doctors = doctors();
        let michael = doctors.iter().find(|d| d.id == "doc-002").unwrap();
        assert_eq!(michael.availability.len(), 4);
        assert!(michael.availability.iter().all(|w| w.day != "Thursday"));

        let james = doctors.iter().find(|d| d.id == "doc-004").unwrap();
        assert!(james.availability.iter().all(|w| w.day != "Monday"));
    }
}
