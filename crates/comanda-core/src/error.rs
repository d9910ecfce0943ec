//! # Error Types
//!
//! Domain-specific error types for comanda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comanda-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  comanda-store errors (separate crate)                                 │
//! │  └── StoreError       - Missing/duplicate/referenced entities          │
//! │                                                                         │
//! │  comanda-service errors (separate crate)                               │
//! │  └── ServiceError     - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ServiceError → UI    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (table number, order id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::{OrderStatus, TableStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order cannot be found on the table being operated on.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Requested status change is not a legal transition.
    ///
    /// ## When This Occurs
    /// - Skipping a stage (pending → done)
    /// - Regressing (done → preparing)
    /// - Advancing a delivered order
    ///
    /// Re-applying the current status is NOT an error; it is a no-op so
    /// that retried calls never double-fire side effects.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Table already has orders in flight; service cannot be restarted.
    ///
    /// ## When This Occurs
    /// - Starting service on an occupied table that has orders
    /// - Releasing an occupied table that has orders
    ///
    /// The caller should continue the existing service instead.
    #[error("Table {number} already has service in progress")]
    ServiceInProgress { number: u32 },

    /// Table is not available for the requested action.
    ///
    /// ## When This Occurs
    /// - Reserving a table that is occupied or already reserved
    #[error("Table {number} is {status}, not available")]
    TableNotAvailable { number: u32, status: TableStatus },

    /// Releasing a table that is already available.
    #[error("Table {number} is already available")]
    AlreadyAvailable { number: u32 },

    /// Table still has orders that were not delivered.
    ///
    /// ## When This Occurs
    /// - Closing a table while the kitchen is still working
    /// - Deactivating a table mid-service
    #[error("Table {number} has {remaining} undelivered order(s)")]
    UndeliveredOrders { number: u32, remaining: usize },

    /// Cart has no items to send.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Cart line lookup failed.
    #[error("Item {line_id} is not in the cart")]
    ItemNotInCart { line_id: String },

    /// Table has no orders to settle.
    ///
    /// ## When This Occurs
    /// - Completing payment twice (the first call closed the table)
    /// - Requesting settlement for a table that never ordered
    #[error("Table {number} has no open bill")]
    NoOpenBill { number: u32 },

    /// Custom split amounts do not cover the bill exactly.
    ///
    /// `remaining_cents` is signed: positive means the payers assigned too
    /// little, negative means too much.
    #[error("Split amounts do not match the bill total: remaining {remaining_cents} cents")]
    SplitMismatch { remaining_cents: i64 },

    /// By-items split claimed a different quantity than was ordered.
    #[error("Item '{name}': ordered {ordered}, claimed {claimed}")]
    ItemClaimMismatch {
        name: String,
        ordered: i64,
        claimed: i64,
    },

    /// By-items split referenced an item that is not on the bill.
    #[error("Item {menu_item_id} is not on this bill")]
    ItemNotOnBill { menu_item_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., forbidden characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidTransition {
            order_id: "ord-1".to_string(),
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
        };
        assert_eq!(
            err.to_string(),
            "Order ord-1 cannot move from pending to delivered"
        );

        let err = CoreError::UndeliveredOrders {
            number: 4,
            remaining: 2,
        };
        assert_eq!(err.to_string(), "Table 4 has 2 undelivered order(s)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "notes".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "notes must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "seats".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
