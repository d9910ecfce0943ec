//! # User Repository
//!
//! Shelf operations for staff accounts and the credential check behind
//! login. Admin CRUD only reaches waiter accounts; the kitchen and manager
//! accounts ship with the demo data and stay as they are.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use comanda_core::types::{Role, User};

use crate::error::{StoreError, StoreResult};
use crate::store::Shelves;

/// Repository for staff account operations.
#[derive(Clone)]
pub struct UserRepository {
    shelves: Arc<Shelves>,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub(crate) fn new(shelves: Arc<Shelves>) -> Self {
        UserRepository { shelves }
    }

    /// Lists waiter accounts, sorted by display name.
    ///
    /// Kitchen and manager accounts are fixtures, not floor staff, so the
    /// admin waiter screen never sees them.
    pub async fn list_waiters(&self) -> Vec<User> {
        let shelf = self.shelves.users.read().await;
        let mut waiters: Vec<User> = shelf
            .values()
            .filter(|u| u.role == Role::Waiter)
            .cloned()
            .collect();
        waiters.sort_by(|a, b| a.name.cmp(&b.name));
        waiters
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> Option<User> {
        self.shelves.users.read().await.get(id).cloned()
    }

    /// Gets a user by login username.
    pub async fn get_by_username(&self, username: &str) -> Option<User> {
        let shelf = self.shelves.users.read().await;
        shelf.values().find(|u| u.username == username).cloned()
    }

    /// Inserts a new staff account.
    ///
    /// ## Returns
    /// * `Err(StoreError::Duplicate)` - ID or username already taken
    pub async fn insert(&self, user: &User) -> StoreResult<User> {
        debug!(username = %user.username, "Inserting user");

        let mut shelf = self.shelves.users.write().await;
        if shelf.contains_key(&user.id) {
            return Err(StoreError::duplicate("id", &user.id));
        }
        if shelf.values().any(|u| u.username == user.username) {
            return Err(StoreError::duplicate("username", &user.username));
        }
        shelf.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    /// Replaces a waiter account's stored state, touching `updated_at`.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Account doesn't exist
    /// * `Err(StoreError::ReservedAccount)` - Target is the kitchen or
    ///   manager fixture
    /// * `Err(StoreError::Duplicate)` - New username collides with another
    ///   account
    pub async fn update(&self, user: &User) -> StoreResult<User> {
        debug!(id = %user.id, "Updating user");

        let mut shelf = self.shelves.users.write().await;

        let stored_role = shelf
            .get(&user.id)
            .ok_or_else(|| StoreError::not_found("User", &user.id))?
            .role;
        if stored_role != Role::Waiter {
            return Err(StoreError::ReservedAccount {
                username: user.username.clone(),
            });
        }
        if shelf
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(StoreError::duplicate("username", &user.username));
        }

        let mut stored = user.clone();
        stored.updated_at = Utc::now();
        shelf.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    /// Removes a waiter account.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Account doesn't exist
    /// * `Err(StoreError::ReservedAccount)` - Target is the kitchen or
    ///   manager fixture
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting user");

        let mut shelf = self.shelves.users.write().await;
        let stored = shelf
            .get(id)
            .ok_or_else(|| StoreError::not_found("User", id))?;
        if stored.role != Role::Waiter {
            return Err(StoreError::ReservedAccount {
                username: stored.username.clone(),
            });
        }
        shelf.remove(id);
        Ok(())
    }

    /// Checks login credentials against the sign-in screen's role tab.
    ///
    /// A missing username, a wrong password, and a role mismatch (waiter
    /// credentials on the kitchen tab) all come back as the same
    /// `BadCredentials`, so the login screen never reveals which part
    /// failed.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> StoreResult<User> {
        debug!(username = %username, ?role, "Authenticating user");

        let shelf = self.shelves.users.read().await;
        match shelf.values().find(|u| u.username == username) {
            Some(user) if user.password == password && user.role == role => Ok(user.clone()),
            _ => Err(StoreError::BadCredentials),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
