// =============================================================================
// comanda-store: State Layer
// =============================================================================
// In-memory state for the POS. Owns every table, menu item, category, and
// staff account, and hands out repositories that read and mutate them.
// Business rules live in comanda-core; this crate only keeps state
// consistent under concurrent access.
// =============================================================================

//! # Comanda Store
//!
//! In-memory state layer for the POS backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Store                              │
//! │                 (cheap to clone, shared state)              │
//! └───────────────┬───────────────┬───────────────┬─────────────┘
//!                 │               │               │
//!                 ▼               ▼               ▼
//!         TableRepository  MenuRepository  UserRepository
//!                 │               │               │
//!                 ▼               ▼               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Shelves                             │
//! │  tables:     RwLock<HashMap<id, Arc<Mutex<Table>>>>         │
//! │  menu:       RwLock<HashMap<id, MenuItem>>                  │
//! │  categories: RwLock<Vec<String>>                            │
//! │  users:      RwLock<HashMap<id, User>>                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Each table sits behind its own mutex. Operations against the SAME table
//! run one at a time, in arrival order; operations against different tables
//! run in parallel. Mutations clone the table, work on the clone, and commit
//! it back only on success, so a failed operation never leaves a table
//! half-changed.
//!
//! ## Usage
//! ```rust,ignore
//! use comanda_core::types::Role;
//! use comanda_store::Store;
//!
//! let store = Store::with_demo_data();
//! let floor = store.tables().list_active().await;
//! let user = store
//!     .users()
//!     .authenticate("john", "waiter123", Role::Waiter)
//!     .await?;
//! ```

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use repository::{MenuRepository, TableRepository, UserRepository};
pub use store::Store;
