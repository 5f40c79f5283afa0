//! Storage adapter.
//!
//! [`StorageService`] wraps a [`KeyValueStore`] backend and owns JSON
//! encoding and key namespacing. Every operation swallows faults: failures
//! are logged and reported as the neutral value (`None` or `false`), never
//! propagated.
//!
//! # Layout
//!
//! | key            | value           |
//! |----------------|-----------------|
//! | `authToken`    | session token   |
//! | `user`         | `User`          |
//! | `role`         | `"admin"` / `"patient"` |
//! | `users`        | `User[]`        |
//! | `doctors`      | `Doctor[]`      |
//! | `appointments` | `Appointment[]` |
//! | `initialized`  | `true`          |

mod backend;

pub use backend::{FileStore, KeyValueStore, MemoryStore, StorageError};

use std::borrow::Cow;

use serde::Serialize;
use serde::de::DeserializeOwned;

use mediflux_core::Role;

use crate::models::{Appointment, Doctor, User};

/// Fixed storage keys.
pub mod keys {
    /// Encoded session token.
    pub const AUTH_TOKEN: &str = "authToken";

    /// Snapshot of the signed-in user.
    pub const USER: &str = "user";

    /// Role of the signed-in user.
    pub const ROLE: &str = "role";

    /// All user accounts.
    pub const USERS: &str = "users";

    /// All doctors.
    pub const DOCTORS: &str = "doctors";

    /// All appointments.
    pub const APPOINTMENTS: &str = "appointments";

    /// Set once fixtures have been seeded.
    pub const INITIALIZED: &str = "initialized";
}

/// JSON key-value adapter over a pluggable backend.
pub struct StorageService {
    backend: Box<dyn KeyValueStore>,
    prefix: String,
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl StorageService {
    /// Wrap a backend with no key prefix.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            prefix: String::new(),
        }
    }

    /// Convenience constructor over a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Namespace every key with `prefix` (e.g. `mediflux:`).
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn namespaced<'k>(&self, key: &'k str) -> Cow<'k, str> {
        if self.prefix.is_empty() {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(format!("{}{key}", self.prefix))
        }
    }

    // =========================================================================
    // Generic Operations
    // =========================================================================

    /// Read and decode the value under `key`.
    ///
    /// Returns `None` when the key is absent, empty, unreadable or does not
    /// decode as `T`.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(&self.namespaced(key)) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                tracing::error!(key, error = %e, "Error reading from storage");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(key, error = %e, "Error decoding stored value");
                None
            }
        }
    }

    /// Read the array under `key` ahead of a read-modify-write.
    ///
    /// An absent key is an empty list. Returns `None` if the stored value
    /// cannot be read or any element fails to decode, so the caller never
    /// writes a partial list over it.
    #[must_use]
    pub fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let raw = match self.backend.get(&self.namespaced(key)) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Some(Vec::new()),
            Err(e) => {
                tracing::error!(key, error = %e, "Error reading from storage");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| tracing::error!(key, error = %e, "Stored collection does not decode"))
            .ok()
    }

    /// Encode and store `value` under `key`.
    ///
    /// Returns `false` if encoding or the write failed.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(key, error = %e, "Error encoding value for storage");
                return false;
            }
        };

        match self.backend.set(&self.namespaced(key), &encoded) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key, error = %e, "Error writing to storage");
                false
            }
        }
    }

    /// Remove `key`. Returns `false` if the backend failed.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.remove(&self.namespaced(key)) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key, error = %e, "Error removing storage key");
                false
            }
        }
    }

    /// Remove every key in this adapter's namespace.
    ///
    /// Without a prefix this clears the whole backend.
    pub fn clear(&self) -> bool {
        let result = if self.prefix.is_empty() {
            self.backend.clear()
        } else {
            self.backend.keys().and_then(|keys| {
                keys.iter()
                    .filter(|key| key.starts_with(&self.prefix))
                    .try_for_each(|key| self.backend.remove(key))
            })
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Error clearing storage");
                false
            }
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// The stored session token.
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.get(keys::AUTH_TOKEN)
    }

    pub fn set_auth_token(&self, token: &str) -> bool {
        self.set(keys::AUTH_TOKEN, token)
    }

    pub fn remove_auth_token(&self) -> bool {
        self.remove(keys::AUTH_TOKEN)
    }

    /// The stored snapshot of the signed-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.get(keys::USER)
    }

    pub fn set_current_user(&self, user: &User) -> bool {
        self.set(keys::USER, user)
    }

    pub fn remove_current_user(&self) -> bool {
        self.remove(keys::USER)
    }

    /// The stored role of the signed-in user.
    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        self.get(keys::ROLE)
    }

    pub fn set_current_role(&self, role: Role) -> bool {
        self.set(keys::ROLE, &role)
    }

    pub fn remove_current_role(&self) -> bool {
        self.remove(keys::ROLE)
    }

    /// Remove all three session keys.
    pub fn clear_auth_data(&self) {
        self.remove_auth_token();
        self.remove_current_user();
        self.remove_current_role();
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// All users, empty when none are stored.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.get(keys::USERS).unwrap_or_default()
    }

    pub fn set_users(&self, users: &[User]) -> bool {
        self.set(keys::USERS, users)
    }

    /// All doctors, empty when none are stored.
    #[must_use]
    pub fn doctors(&self) -> Vec<Doctor> {
        self.get(keys::DOCTORS).unwrap_or_default()
    }

    pub fn set_doctors(&self, doctors: &[Doctor]) -> bool {
        self.set(keys::DOCTORS, doctors)
    }

    /// All appointments, empty when none are stored.
    #[must_use]
    pub fn appointments(&self) -> Vec<Appointment> {
        self.get(keys::APPOINTMENTS).unwrap_or_default()
    }

    pub fn set_appointments(&self, appointments: &[Appointment]) -> bool {
        self.set(keys::APPOINTMENTS, appointments)
    }

    // =========================================================================
    // Seeding Flag
    // =========================================================================

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.get::<bool>(keys::INITIALIZED) == Some(true)
    }

    pub fn set_initialized(&self) -> bool {
        self.set(keys::INITIALIZED, &true)
    }
}
