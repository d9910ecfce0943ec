//! # Authentication
//!
//! Login and the session token every other operation takes.
//!
//! ## Role Gates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Role      can_serve   can_cook   is_manager                            │
//! │  ───────   ─────────   ────────   ──────────                            │
//! │  Waiter        ✓           -          -      floor, delivery, payment   │
//! │  Kitchen       -           ✓          -      accept and finish orders   │
//! │  Manager       ✓           ✓          ✓      everything + admin         │
//! │                                                                         │
//! │  Operations call session.require_*() before touching any state.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use comanda_core::types::Role;
use comanda_store::Store;

use crate::error::{ServiceError, ServiceResult};

/// Proof of a successful login, passed back into every gated operation.
///
/// The session is plain data: the presentation layer holds it for the
/// signed-in user and sends it along with each call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub username: String,
    /// Display name shown in the UI shell.
    pub name: String,
    pub role: Role,
}

impl Session {
    /// Gate for floor operations (services, carts, delivery, payment).
    pub fn require_serve(&self) -> ServiceResult<()> {
        if self.role.can_serve() {
            Ok(())
        } else {
            Err(ServiceError::forbidden(format!(
                "Role '{:?}' cannot run floor service",
                self.role
            )))
        }
    }

    /// Gate for kitchen operations (accepting and finishing orders).
    pub fn require_cook(&self) -> ServiceResult<()> {
        if self.role.can_cook() {
            Ok(())
        } else {
            Err(ServiceError::forbidden(format!(
                "Role '{:?}' cannot work kitchen orders",
                self.role
            )))
        }
    }

    /// Gate for administration (menu, categories, tables, staff).
    pub fn require_manager(&self) -> ServiceResult<()> {
        if self.role.is_manager() {
            Ok(())
        } else {
            Err(ServiceError::forbidden(format!(
                "Role '{:?}' cannot administer the restaurant",
                self.role
            )))
        }
    }
}

/// Login operations.
#[derive(Clone)]
pub struct AuthService {
    store: Store,
}

impl AuthService {
    /// Creates a new AuthService.
    pub fn new(store: Store) -> Self {
        AuthService { store }
    }

    /// Checks credentials against the chosen role tab and opens a session.
    ///
    /// A wrong password, an unknown username, and waiter credentials on the
    /// kitchen tab all come back as the same generic AUTH_ERROR, so the
    /// login screen cannot be used to enumerate usernames or roles.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> ServiceResult<Session> {
        debug!(username = %username, ?role, "login");

        let user = self
            .store
            .users()
            .authenticate(username, password, role)
            .await?;

        info!(username = %user.username, role = ?user.role, "User signed in");

        Ok(Session {
            user_id: user.id,
            username: user.username,
            name: user.name,
            role: user.role,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
