//! Doctor repository.

use mediflux_core::DoctorId;

use super::{RepositoryError, generate_id, load, write};
use crate::models::Doctor;
use crate::storage::{StorageService, keys};

/// Repository for the `doctors` collection.
pub struct DoctorRepository<'a> {
    storage: &'a StorageService,
}

impl<'a> DoctorRepository<'a> {
    /// Create a new doctor repository.
    #[must_use]
    pub const fn new(storage: &'a StorageService) -> Self {
        Self { storage }
    }

    /// Get a doctor by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &DoctorId) -> Option<Doctor> {
        self.storage
            .doctors()
            .into_iter()
            .find(|doctor| &doctor.id == id)
    }

    /// Every doctor, in stored order.
    #[must_use]
    pub fn all(&self) -> Vec<Doctor> {
        self.storage.doctors()
    }

    /// Append a doctor. An empty ID is replaced with a generated `doc-...` ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID is already in use.
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn add(&self, mut doctor: Doctor) -> Result<Doctor, RepositoryError> {
        if doctor.id.as_str().is_empty() {
            doctor.id = DoctorId::new(generate_id("doc"));
        }

        let mut doctors: Vec<Doctor> = load(self.storage, keys::DOCTORS)?;
        if doctors.iter().any(|existing| existing.id == doctor.id) {
            return Err(RepositoryError::Conflict(format!(
                "doctor {} already exists",
                doctor.id
            )));
        }

        doctors.push(doctor.clone());
        write(self.storage.set_doctors(&doctors), keys::DOCTORS)?;
        Ok(doctor)
    }

    /// Apply `change` to the doctor with `id` and persist the result.
    ///
    /// Returns `Ok(None)` if no such doctor exists. Existing appointments keep
    /// their doctor snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn update(
        &self,
        id: &DoctorId,
        change: impl FnOnce(&mut Doctor),
    ) -> Result<Option<Doctor>, RepositoryError> {
        let mut doctors: Vec<Doctor> = load(self.storage, keys::DOCTORS)?;
        let Some(doctor) = doctors.iter_mut().find(|doctor| &doctor.id == id) else {
            return Ok(None);
        };

        change(doctor);
        let updated = doctor.clone();
        write(self.storage.set_doctors(&doctors), keys::DOCTORS)?;
        Ok(Some(updated))
    }

    /// Remove the doctor with `id`. Returns `true` if one was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn delete(&self, id: &DoctorId) -> Result<bool, RepositoryError> {
        let mut doctors: Vec<Doctor> = load(self.storage, keys::DOCTORS)?;
        let before = doctors.len();
        doctors.retain(|doctor| &doctor.id != id);
        if doctors.len() == before {
            return Ok(false);
        }

        write(self.storage.set_doctors(&doctors), keys::DOCTORS)?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::fixtures;
    use crate::models::ContactInfo;

    fn seeded() -> StorageService {
        let storage = StorageService::in_memory();
        storage.set_doctors(&fixtures::doctors());
        storage
    }

    fn locum(id: &str) -> Doctor {
        Doctor {
            id: DoctorId::new(id),
            name: "Dr. Locum".to_owned(),
            specialization: "General Practice".to_owned(),
            contact_info: ContactInfo {
                phone: "+1 (555) 000-0000".to_owned(),
                email: "locum@mediflux.com".to_owned(),
            },
            availability: Vec::new(),
        }
    }

    #[test]
    fn test_find_by_id() {
        let storage = seeded();
        let doctors = DoctorRepository::new(&storage);

        let sarah = doctors.find_by_id(&DoctorId::new("doc-001")).unwrap();
        assert_eq!(sarah.name, "Dr. Sarah Johnson");
        assert!(doctors.find_by_id(&DoctorId::new("doc-404")).is_none());
    }

    #[test]
    fn test_add_generates_missing_id() {
        let storage = seeded();
        let doctors = DoctorRepository::new(&storage);

        let added = doctors.add(locum("")).unwrap();
        assert!(added.id.as_str().starts_with("doc-"));
        assert_eq!(doctors.all().len(), 6);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let storage = seeded();
        let doctors = DoctorRepository::new(&storage);

        assert!(matches!(
            doctors.add(locum("doc-001")),
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[test]
    fn test_update_and_delete() {
        let storage = seeded();
        let doctors = DoctorRepository::new(&storage);
        let id = DoctorId::new("doc-004");

        let updated = doctors
            .update(&id, |doctor| doctor.specialization = "Sports Medicine".to_owned())
            .unwrap()
            .unwrap();
        assert_eq!(updated.specialization, "Sports Medicine");

        assert!(doctors.delete(&id).unwrap());
        assert!(doctors.find_by_id(&id).is_none());
        assert!(doctors.update(&id, |_| {}).unwrap().is_none());
    }
}
