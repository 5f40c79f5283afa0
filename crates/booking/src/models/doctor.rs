//! Doctor domain types.

use serde::{Deserialize, Serialize};

use mediflux_core::DoctorId;

/// A doctor patients can book with.
///
/// Seeded from fixtures. The seed JSON carries the ID as `_id`, so both
/// spellings are accepted on read; writes always use `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(alias = "_id")]
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
    pub contact_info: ContactInfo,
    /// Weekly opening hours, in display order.
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

/// How to reach a doctor's office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

/// One day's opening hours, e.g. Monday 09:00-17:00.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilityWindow {
    /// Create a window for `day` from `start_time` to `end_time` (`HH:MM`).
    #[must_use]
    pub fn new(day: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            day: day.to_owned(),
            start_time: start_time.to_owned(),
            end_time: end_time.to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_underscore_id() {
        let json = r#"{
            "_id": "doc-001",
            "name": "Dr. Sarah Johnson",
            "specialization": "Cardiology",
            "contactInfo": {"phone": "+1 (555) 123-4567", "email": "sarah.johnson@mediflux.com"},
            "availability": [{"day": "Monday", "startTime": "09:00", "endTime": "17:00"}]
        }"#;
        let doctor: Doctor = serde_json::from_str(json).unwrap();
        assert_eq!(doctor.id, "doc-001");
        assert_eq!(doctor.availability.len(), 1);
        assert_eq!(doctor.availability.first().unwrap().start_time, "09:00");

        let written = serde_json::to_value(&doctor).unwrap();
        assert_eq!(written["id"], "doc-001");
        assert!(written.get("_id").is_none());
        assert_eq!(written["contactInfo"]["phone"], "+1 (555) 123-4567");
    }

    #[test]
    fn test_missing_availability_defaults_to_empty() {
        let json = r#"{"id":"doc-9","name":"Dr. X","specialization":"GP","contactInfo":{"phone":"1","email":"x@y"}}"#;
        let doctor: Doctor = serde_json::from_str(json).unwrap();
        assert!(doctor.availability.is_empty());
    }
}
