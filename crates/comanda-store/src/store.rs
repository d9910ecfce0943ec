//! # Store
//!
//! Owns the shelves and hands out repositories.
//!
//! ## Shelf Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Store                                        │
//! │                                                                         │
//! │  tables:     RwLock<HashMap<id, Arc<Mutex<Table>>>>                     │
//! │              ──────────────────────┬───────────────                     │
//! │              the outer map changes │ rarely (admin adds/removes);       │
//! │              each table has its own│ mutex, so operations on            │
//! │              DIFFERENT tables run in parallel and operations on         │
//! │              the SAME table queue up one at a time                      │
//! │                                                                         │
//! │  menu:       RwLock<HashMap<id, MenuItem>>                              │
//! │  categories: RwLock<Vec<String>>          (insertion order = UI order)  │
//! │  users:      RwLock<HashMap<id, User>>                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use comanda_store::Store;
//!
//! // Demo venue with tables, menu, and staff
//! let store = Store::with_demo_data();
//!
//! // Use repositories
//! let floor = store.tables().list_active().await;
//! let menu = store.menu().list_available().await;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use comanda_core::types::{MenuItem, Table, User};

use crate::repository::{MenuRepository, TableRepository, UserRepository};
use crate::seed;

/// The shared shelves behind every repository.
pub(crate) struct Shelves {
    pub(crate) tables: RwLock<HashMap<String, Arc<Mutex<Table>>>>,
    pub(crate) menu: RwLock<HashMap<String, MenuItem>>,
    pub(crate) categories: RwLock<Vec<String>>,
    pub(crate) users: RwLock<HashMap<String, User>>,
}

/// Handle to the in-memory state.
///
/// Cheap to clone; all clones see the same shelves. The service layer
/// keeps one and asks it for repositories per operation.
#[derive(Clone)]
pub struct Store {
    shelves: Arc<Shelves>,
}

impl Store {
    /// Creates a store with empty shelves (used by tests and tooling).
    pub fn empty() -> Self {
        Store {
            shelves: Arc::new(Shelves {
                tables: RwLock::new(HashMap::new()),
                menu: RwLock::new(HashMap::new()),
                categories: RwLock::new(Vec::new()),
                users: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Creates a store seeded with the demo venue.
    ///
    /// All tables start available with no service; live floor state only
    /// enters through the floor operations.
    pub fn with_demo_data() -> Self {
        let now = Utc::now();

        let tables: HashMap<String, Arc<Mutex<Table>>> = seed::demo_tables()
            .into_iter()
            .map(|t| (t.id.clone(), Arc::new(Mutex::new(t))))
            .collect();
        let menu: HashMap<String, MenuItem> = seed::demo_menu(now)
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect();
        let users: HashMap<String, User> = seed::demo_users(now)
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();
        let categories = seed::DEMO_CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .collect();

        Store {
            shelves: Arc::new(Shelves {
                tables: RwLock::new(tables),
                menu: RwLock::new(menu),
                categories: RwLock::new(categories),
                users: RwLock::new(users),
            }),
        }
    }

    /// Returns the table repository.
    pub fn tables(&self) -> TableRepository {
        TableRepository::new(self.shelves.clone())
    }

    /// Returns the menu repository.
    pub fn menu(&self) -> MenuRepository {
        MenuRepository::new(self.shelves.clone())
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.shelves.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_has_nothing() {
        let store = Store::empty();
        assert!(store.tables().list().await.is_empty());
        assert!(store.menu().list().await.is_empty());
        assert!(store.menu().list_categories().await.is_empty());
    }

    #[tokio::test]
    async fn test_demo_store_is_seeded() {
        let store = Store::with_demo_data();

        assert_eq!(store.tables().list().await.len(), 12);
        assert_eq!(store.menu().list().await.len(), 14);
        assert_eq!(store.menu().list_categories().await.len(), 4);
        assert_eq!(store.users().list_waiters().await.len(), 4);
    }

    #[tokio::test]
    async fn test_clones_share_shelves() {
        let store = Store::empty();
        let clone = store.clone();

        let table = Table::new("t1", 1, 4);
        store.tables().insert(&table).await.unwrap();

        assert_eq!(clone.tables().list().await.len(), 1);
    }
}
