//! Data access over the storage adapter.
//!
//! # Collections
//!
//! - `users` - Patients and the seeded admin ([`UserRepository`])
//! - `doctors` - Seeded doctors ([`DoctorRepository`])
//! - `appointments` - Appointment requests ([`AppointmentRepository`])
//!
//! Each collection is one JSON array under a fixed key. Every write reads the
//! whole array, changes a copy and writes the whole array back. Lookups are
//! linear scans; the data set is fixture-sized.

pub mod appointments;
pub mod doctors;
pub mod fixtures;
pub mod users;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use appointments::AppointmentRepository;
pub use doctors::DoctorRepository;
pub use users::UserRepository;

use crate::storage::{StorageService, keys};

/// Length of the random suffix in generated IDs.
const ID_SUFFIX_LEN: usize = 9;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A collection could not be written back to storage.
    #[error("failed to write collection `{0}`")]
    WriteFailed(&'static str),

    /// A stored collection exists but does not decode. Nothing was written.
    #[error("stored collection `{0}` could not be decoded")]
    Unreadable(&'static str),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Generate a pseudo-unique ID: `prefix-<unix millis>-<9 base36 chars>`.
///
/// Uniqueness is probabilistic. Good enough for a single local user.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
        .collect();

    format!("{prefix}-{millis}-{suffix}")
}

/// Entry point to the collection repositories.
///
/// Cheap to clone; clones share the same storage.
#[derive(Debug, Clone)]
pub struct DataService {
    storage: Arc<StorageService>,
}

impl DataService {
    /// Create a data service over `storage`.
    #[must_use]
    pub const fn new(storage: Arc<StorageService>) -> Self {
        Self { storage }
    }

    /// The underlying storage adapter.
    #[must_use]
    pub fn storage(&self) -> &StorageService {
        &self.storage
    }

    /// Repository for the `users` collection.
    #[must_use]
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.storage)
    }

    /// Repository for the `doctors` collection.
    #[must_use]
    pub fn doctors(&self) -> DoctorRepository<'_> {
        DoctorRepository::new(&self.storage)
    }

    /// Repository for the `appointments` collection.
    #[must_use]
    pub fn appointments(&self) -> AppointmentRepository<'_> {
        AppointmentRepository::new(&self.storage)
    }

    /// Seed users, doctors and appointments unless already done.
    ///
    /// Returns `true` if seeding happened, `false` if the store was already
    /// initialized.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteFailed` if any collection cannot be
    /// written. The `initialized` flag is only set after all three succeed.
    pub fn initialize_data(&self) -> Result<bool, RepositoryError> {
        self.initialize_data_as_of(Utc::now().date_naive())
    }

    /// [`Self::initialize_data`] with seeded appointment dates relative to `today`.
    ///
    /// # Errors
    ///
    /// See [`Self::initialize_data`].
    pub fn initialize_data_as_of(&self, today: NaiveDate) -> Result<bool, RepositoryError> {
        if self.storage.is_initialized() {
            tracing::debug!("Store already initialized, skipping seed");
            return Ok(false);
        }

        let users = fixtures::users();
        let doctors = fixtures::doctors();
        let appointments = fixtures::appointments(today);

        write(self.storage.set_users(&users), keys::USERS)?;
        write(self.storage.set_doctors(&doctors), keys::DOCTORS)?;
        write(
            self.storage.set_appointments(&appointments),
            keys::APPOINTMENTS,
        )?;
        write(self.storage.set_initialized(), keys::INITIALIZED)?;

        tracing::info!(
            users = users.len(),
            doctors = doctors.len(),
            appointments = appointments.len(),
            "Mock data initialized"
        );
        Ok(true)
    }

    /// Drop the seeded collections and the `initialized` flag, then seed again.
    ///
    /// Session keys are left alone.
    ///
    /// # Errors
    ///
    /// See [`Self::initialize_data`].
    pub fn reset_data(&self) -> Result<(), RepositoryError> {
        for key in [
            keys::INITIALIZED,
            keys::USERS,
            keys::DOCTORS,
            keys::APPOINTMENTS,
        ] {
            self.storage.remove(key);
        }

        tracing::info!("Store reset");
        self.initialize_data().map(|_| ())
    }
}

/// Load a collection for modification, refusing to proceed if it is unreadable.
pub(crate) fn load<T: DeserializeOwned>(
    storage: &StorageService,
    collection: &'static str,
) -> Result<Vec<T>, RepositoryError> {
    storage
        .load_collection(collection)
        .ok_or(RepositoryError::Unreadable(collection))
}

/// Turn a storage write flag into a repository result.
pub(crate) const fn write(ok: bool, collection: &'static str) -> Result<(), RepositoryError> {
    if ok {
        Ok(())
    } else {
        Err(RepositoryError::WriteFailed(collection))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn data() -> DataService {
        DataService::new(Arc::new(StorageService::in_memory()))
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("apt");
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.first().copied(), Some("apt"));
        assert!(parts.get(1).unwrap().parse::<i64>().is_ok());

        let suffix = parts.get(2).unwrap();
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_generate_id_varies() {
        assert_ne!(generate_id("patient"), generate_id("patient"));
    }

    #[test]
    fn test_initialize_data_seeds_once() {
        let data = data();
        assert!(data.initialize_data().unwrap());
        assert_eq!(data.doctors().all().len(), 5);
        assert_eq!(data.users().all().len(), 6);
        assert_eq!(data.appointments().all().len(), 5);

        data.appointments().delete(&"apt-001".into()).unwrap();
        assert!(!data.initialize_data().unwrap());
        assert_eq!(data.appointments().all().len(), 4);
    }

    #[test]
    fn test_reset_data_restores_fixtures_and_keeps_session() {
        let data = data();
        data.initialize_data().unwrap();
        data.appointments().delete(&"apt-001".into()).unwrap();
        data.storage().set_auth_token("token");

        data.reset_data().unwrap();
        assert_eq!(data.appointments().all().len(), 5);
        assert_eq!(data.storage().auth_token().as_deref(), Some("token"));
    }

    #[test]
    fn test_write_helper() {
        assert!(write(true, keys::USERS).is_ok());
        assert!(matches!(
            write(false, keys::USERS),
            Err(RepositoryError::WriteFailed("users"))
        ));
    }
}
