//! # Repository Module
//!
//! Shelf repository implementations for Comanda POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts shelf access behind a clean API.     │
//! │                                                                         │
//! │  Service Operation                                                     │
//! │       │                                                                 │
//! │       │  store.tables().with_table(id, |t| ...)                        │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  TableRepository                                                       │
//! │  ├── list / get_by_id / get_by_number                                  │
//! │  ├── insert / save / delete                                            │
//! │  └── with_table(&self, id, f)     ← serialized read-modify-write       │
//! │       │                                                                 │
//! │       │  lock, clone, mutate, commit                                    │
//! │       ▼                                                                 │
//! │  In-memory shelves                                                     │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Uniqueness/reference guards live in one place                       │
//! │  • The locking discipline is impossible to bypass                      │
//! │  • Can swap in a database later without touching services              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`TableRepository`] - Floor tables and the per-table operation lock
//! - [`MenuRepository`] - Menu items and categories
//! - [`UserRepository`] - Staff roster and authentication

pub mod menu;
pub mod table;
pub mod user;

pub use menu::MenuRepository;
pub use table::TableRepository;
pub use user::UserRepository;
