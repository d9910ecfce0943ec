//! # Service Error Type
//!
//! Unified error type returned by every service operation.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Error Flow in Comanda POS                             │
//! │                                                                         │
//! │  Presentation                Service Layer                              │
//! │  ────────────                ─────────────                              │
//! │                                                                         │
//! │  floor.send_cart(...)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Operation                                                       │  │
//! │  │  Result<T, ServiceError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store error?  ─── StoreError::NotFound ──────────┐              │  │
//! │  │         │                                         │              │  │
//! │  │         ▼                                         ▼              │  │
//! │  │  Rule broken?  ─── CoreError::EmptyCart ──── ServiceError ─────► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The caller receives { code, message }; the message is shown to the    │
//! │  user verbatim, the code drives what the UI does next.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recoverability
//! No code here is fatal. NOT_FOUND usually means a stale screen (refresh),
//! INVALID_STATE means the user must pick a different action, CONFLICT means
//! pick a different value, VALIDATION_ERROR means fix the input.

use serde::Serialize;

use comanda_core::CoreError;
use comanda_store::StoreError;

/// Error returned from service operations.
///
/// ## Serialization
/// This is what the presentation layer receives when an operation fails:
/// ```json
/// {
///   "code": "INVALID_STATE",
///   "message": "Table 5 already has service in progress"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for service responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await floor.startService(tableId);
/// } catch (e) {
///   switch (e.code) {
///     case 'INVALID_STATE':
///       toast(e.message);        // pick a different action
///       break;
///     case 'NOT_FOUND':
///       refreshFloor();          // screen was stale
///       break;
///     case 'FORBIDDEN':
///       showRoleHint();
///       break;
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced table/order/item/user does not exist (stale view)
    NotFound,

    /// Input failed validation (bad range, empty cart, split mismatch)
    ValidationError,

    /// Operation not legal in the entity's current state
    InvalidState,

    /// Uniqueness or referential conflict (duplicate number, category in use)
    Conflict,

    /// Bad credentials (message stays generic on purpose)
    AuthError,

    /// Caller's role may not perform this operation
    Forbidden,

    /// Unexpected internal failure
    Internal,
}

impl ServiceError {
    /// Creates a new service error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ServiceError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ServiceError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::InvalidState, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::Conflict, message)
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::Forbidden, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::Internal, message)
    }
}

/// Converts business rule violations to service errors.
///
/// Messages pass through verbatim; only the code is decided here.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::OrderNotFound(_)
            | CoreError::ItemNotInCart { .. }
            | CoreError::NoOpenBill { .. } => ErrorCode::NotFound,

            CoreError::InvalidTransition { .. }
            | CoreError::ServiceInProgress { .. }
            | CoreError::TableNotAvailable { .. }
            | CoreError::AlreadyAvailable { .. }
            | CoreError::UndeliveredOrders { .. } => ErrorCode::InvalidState,

            CoreError::EmptyCart
            | CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::SplitMismatch { .. }
            | CoreError::ItemClaimMismatch { .. }
            | CoreError::ItemNotOnBill { .. }
            | CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ServiceError::new(code, err.to_string())
    }
}

/// Converts store errors to service errors.
impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ServiceError::not_found(&entity, &id),
            StoreError::Duplicate { field, value } => ServiceError::conflict(format!(
                "{} '{}' already exists",
                field, value
            )),
            StoreError::StillReferenced { .. } => ServiceError::conflict(err.to_string()),
            StoreError::ReservedAccount { username } => ServiceError::forbidden(format!(
                "Account '{}' is managed by the system and cannot be changed",
                username
            )),
            StoreError::BadCredentials => {
                ServiceError::new(ErrorCode::AuthError, "Invalid username or password")
            }
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Convenience type alias for Results with ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================
