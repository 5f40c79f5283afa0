//! User repository.

use mediflux_core::{Role, UserId};

use super::{RepositoryError, generate_id, load, write};
use crate::models::{NewUser, User};
use crate::storage::{StorageService, keys};

/// Repository for the `users` collection.
pub struct UserRepository<'a> {
    storage: &'a StorageService,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(storage: &'a StorageService) -> Self {
        Self { storage }
    }

    /// Get a user by exact email match.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.storage
            .users()
            .into_iter()
            .find(|user| user.email.as_str() == email)
    }

    /// Get a user by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &UserId) -> Option<User> {
        self.storage.users().into_iter().find(|user| &user.id == id)
    }

    /// Every account, admins included.
    #[must_use]
    pub fn all(&self) -> Vec<User> {
        self.storage.users()
    }

    /// Every patient account.
    #[must_use]
    pub fn patients(&self) -> Vec<User> {
        self.storage
            .users()
            .into_iter()
            .filter(|user| user.role == Role::Patient)
            .collect()
    }

    /// Append a new user with a generated ID (`patient-...` / `admin-...`).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn add(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users: Vec<User> = load(self.storage, keys::USERS)?;
        if users.iter().any(|user| user.email == new_user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let id = UserId::new(generate_id(new_user.role.as_str()));
        let user = new_user.with_id(id);
        users.push(user.clone());
        write(self.storage.set_users(&users), keys::USERS)?;

        tracing::debug!(user_id = %user.id, role = %user.role, "User added");
        Ok(user)
    }

    /// Apply `change` to the user with `id` and persist the result.
    ///
    /// Returns `Ok(None)` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn update(
        &self,
        id: &UserId,
        change: impl FnOnce(&mut User),
    ) -> Result<Option<User>, RepositoryError> {
        let mut users: Vec<User> = load(self.storage, keys::USERS)?;
        let Some(user) = users.iter_mut().find(|user| &user.id == id) else {
            return Ok(None);
        };

        change(user);
        let updated = user.clone();
        write(self.storage.set_users(&users), keys::USERS)?;
        Ok(Some(updated))
    }

    /// Remove the user with `id`.
    ///
    /// Returns `true` if a user was removed. Appointments keep their patient
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteFailed` if the collection cannot be written.
    /// Returns `RepositoryError::Unreadable` if the stored collection does not
    /// decode; it is left as is.
    pub fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let mut users: Vec<User> = load(self.storage, keys::USERS)?;
        let before = users.len();
        users.retain(|user| &user.id != id);
        if users.len() == before {
            return Ok(false);
        }

        write(self.storage.set_users(&users), keys::USERS)?;
        Ok(true)
    }
}
