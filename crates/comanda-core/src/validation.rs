//! # Validation Module
//!
//! Input validation utilities for Comanda POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service Operation (Rust)                                     │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  ├── Uniqueness checks (table number, username)                        │
//! │  └── Reference checks (category in use, orders on table)               │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use comanda_core::validation::{validate_item_name, validate_quantity};
//!
//! // Validate before creating a menu item
//! validate_item_name("Artisan Burger").unwrap();
//!
//! // Validate before a cart operation
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{EQUAL_SPLIT_MAX, EQUAL_SPLIT_MIN, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 100 characters
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Pasta Carbonara").is_ok());
/// assert!(validate_item_name("").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a category name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if name.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a staff display name.
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a sign-in username.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_username;
///
/// assert!(validate_username("john").is_ok());
/// assert!(validate_username("").is_err());
/// assert!(validate_username("has space").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    // Check for valid characters (alphanumeric, hyphen, underscore)
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a sign-in password.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 6 and 100 characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < 6 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        });
    }

    if password.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a kitchen note attached to a cart line.
///
/// ## Rules
/// - Can be empty (most lines carry no note)
/// - Maximum 200 characters
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.trim().len() > 200 {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a payer name on a split bill.
pub fn validate_payer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "payer name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "payer name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  Waiter enters quantity: 5                                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_items_to_cart                          │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a payer's share in cents on a custom split.
///
/// ## Rules
/// - Must be positive (> 0)
/// - A payer cannot cover zero or a negative amount
pub fn validate_share_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "share amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a tip rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Preset rates are 0, 500, 1000, 1500 but any value in range is accepted
pub fn validate_tip_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tip_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates the number of ways for an equal split.
///
/// ## Rules
/// - Must be between EQUAL_SPLIT_MIN (2) and EQUAL_SPLIT_MAX (10)
pub fn validate_split_ways(ways: u32) -> ValidationResult<()> {
    if !(EQUAL_SPLIT_MIN..=EQUAL_SPLIT_MAX).contains(&ways) {
        return Err(ValidationError::OutOfRange {
            field: "ways".to_string(),
            min: EQUAL_SPLIT_MIN as i64,
            max: EQUAL_SPLIT_MAX as i64,
        });
    }

    Ok(())
}

/// Validates a floor table number.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed 999
pub fn validate_table_number(number: u32) -> ValidationResult<()> {
    if number == 0 {
        return Err(ValidationError::MustBePositive {
            field: "number".to_string(),
        });
    }

    if number > 999 {
        return Err(ValidationError::OutOfRange {
            field: "number".to_string(),
            min: 1,
            max: 999,
        });
    }

    Ok(())
}

/// Validates a table's seating capacity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed 50
pub fn validate_seats(seats: u32) -> ValidationResult<()> {
    if seats == 0 {
        return Err(ValidationError::MustBePositive {
            field: "seats".to_string(),
        });
    }

    if seats > 50 {
        return Err(ValidationError::OutOfRange {
            field: "seats".to_string(),
            min: 1,
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
