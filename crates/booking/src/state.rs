//! Booking context shared by every caller.

use std::sync::Arc;

use crate::config::BookingConfig;
use crate::db::{DataService, RepositoryError};
use crate::services::{AppointmentService, AuthService};
use crate::storage::{FileStore, StorageError, StorageService};

/// Error opening a booking context.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to open store: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to seed store: {0}")]
    Repository(#[from] RepositoryError),
}

/// Handle to the booking core: configuration, storage and services.
///
/// This struct is cheaply cloneable via `Arc`; clones share the same store.
#[derive(Debug, Clone)]
pub struct BookingContext {
    inner: Arc<BookingContextInner>,
}

#[derive(Debug)]
struct BookingContextInner {
    config: BookingConfig,
    data: DataService,
    auth: AuthService,
    appointments: AppointmentService,
}

impl BookingContext {
    /// Assemble the services over an existing storage adapter.
    ///
    /// Does not seed; see [`Self::open`].
    #[must_use]
    pub fn new(config: BookingConfig, storage: StorageService) -> Self {
        let data = DataService::new(Arc::new(storage));
        let latency = config.latency();
        let auth = AuthService::new(data.clone(), latency, config.token_max_age);
        let appointments =
            AppointmentService::new(data.clone(), latency, config.enforce_status_transitions);

        Self {
            inner: Arc::new(BookingContextInner {
                config,
                data,
                auth,
                appointments,
            }),
        }
    }

    /// Open the store described by `config` and seed it on first use.
    ///
    /// Uses a [`FileStore`] when `store_path` is set, memory otherwise.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Storage` if the store file cannot be read.
    /// Returns `StateError::Repository` if seeding fails.
    pub fn open(config: BookingConfig) -> Result<Self, StateError> {
        let storage = match &config.store_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Opening file store");
                StorageService::new(FileStore::open(path)?)
            }
            None => StorageService::in_memory(),
        };
        let storage = if config.key_prefix.is_empty() {
            storage
        } else {
            storage.with_prefix(config.key_prefix.clone())
        };

        let context = Self::new(config, storage);
        context.data().initialize_data()?;
        Ok(context)
    }

    /// Seeded in-memory context. Never touches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Repository` if seeding fails.
    pub fn in_memory(mut config: BookingConfig) -> Result<Self, StateError> {
        config.store_path = None;
        Self::open(config)
    }

    /// Get a reference to the booking configuration.
    #[must_use]
    pub fn config(&self) -> &BookingConfig {
        &self.inner.config
    }

    /// Get a reference to the storage adapter.
    #[must_use]
    pub fn storage(&self) -> &StorageService {
        self.inner.data.storage()
    }

    /// Get a reference to the data access layer.
    #[must_use]
    pub fn data(&self) -> &DataService {
        &self.inner.data
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the appointment service.
    #[must_use]
    pub fn appointments(&self) -> &AppointmentService {
        &self.inner.appointments
    }
}
