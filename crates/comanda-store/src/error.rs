//! # Store Error Types
//!
//! Error types for state-layer operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Shelf guard fails (missing id, duplicate number, ...)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (in comanda-service) ← Serialized for frontend           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// State-layer operation errors.
///
/// These errors come from the shelves themselves: identity, uniqueness,
/// and reference guards. Business rule violations live in comanda-core.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found on its shelf.
    ///
    /// ## When This Occurs
    /// - Looking up an id that was never inserted
    /// - Operating on an entity deleted by another session
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Uniqueness guard violation.
    ///
    /// ## When This Occurs
    /// - Inserting a table with an existing floor number
    /// - Creating a waiter with a taken username
    /// - Adding a category that already exists
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Entity cannot be removed while something still points at it.
    ///
    /// ## When This Occurs
    /// - Deleting a category that menu items still use
    /// - Deleting a table that has orders from the current service
    #[error("{entity} '{name}' is still referenced by {references} record(s)")]
    StillReferenced {
        entity: String,
        name: String,
        references: usize,
    },

    /// Built-in accounts cannot be managed through the roster.
    ///
    /// ## When This Occurs
    /// - Editing or deleting the kitchen or manager account
    #[error("Account '{username}' is reserved and cannot be changed")]
    ReservedAccount { username: String },

    /// Sign-in failed.
    ///
    /// Deliberately carries no detail: the message never reveals whether
    /// the username or the password was wrong.
    #[error("Invalid username or password")]
    BadCredentials,
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
