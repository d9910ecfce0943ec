//! # comanda-core: Pure Business Logic for Comanda POS
//!
//! This crate is the **heart** of Comanda POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Comanda POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript)                        │   │
//! │  │    Floor UI ──► Cart UI ──► Kitchen UI ──► Payment UI          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              comanda-service (Operation Layer)                  │   │
//! │  │    start_service, send_cart, advance_order, complete_payment   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ comanda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │  billing  │  │   │
//! │  │   │  MenuItem │  │   Money   │  │  lifecycle│  │   Bill    │  │   │
//! │  │   │   Table   │  │  TipCalc  │  │  machine  │  │  splits   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO CLOCK READS • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 comanda-store (State Layer)                     │   │
//! │  │         in-memory shelves, per-table locks, seed data           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Table, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`order`] - Order lifecycle state machine
//! - [`cart`] - Staged cart math (merge, quantities, totals)
//! - [`billing`] - Bill computation and split plans
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Time Is Passed In**: Nothing here reads the clock; callers supply `now`
//!
//! ## Example Usage
//!
//! ```rust
//! use comanda_core::money::Money;
//! use comanda_core::types::TipRate;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(10000); // $100.00
//!
//! // Calculate a 10% tip
//! let tip_rate = TipRate::from_bps(1000);
//! let tip = subtotal.calculate_tip(tip_rate);
//! assert_eq!(tip.cents(), 1000);
//!
//! // Split the grand total three ways, exactly
//! let shares = (subtotal + tip).split_even(3);
//! assert_eq!(shares.iter().map(|s| s.cents()).sum::<i64>(), 11000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use comanda_core::Money` instead of
// `use comanda_core::money::Money`

pub use billing::{Bill, CustomShare, ItemAssignment, ItemClaims, PayerShare, Settlement, SplitPlan};
pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, Transition};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single table cart
///
/// ## Business Reason
/// Prevents runaway carts and keeps kitchen tickets printable.
/// Can be made configurable per venue in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per venue in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Minimum number of ways for an equal split
pub const EQUAL_SPLIT_MIN: u32 = 2;

/// Maximum number of ways for an equal split
///
/// ## Business Reason
/// Beyond ten payers the floor staff splits across multiple settlements;
/// the payment terminal UI shows at most ten share rows.
pub const EQUAL_SPLIT_MAX: u32 = 10;

/// Tip rates offered by the payment screen, in display order.
///
/// The engine accepts any rate (see [`types::TipRate`]); these are the
/// one-tap presets.
pub const TIP_PRESETS: [TipRate; 4] = [
    TipRate::from_bps(0),
    TipRate::from_bps(500),
    TipRate::from_bps(1000),
    TipRate::from_bps(1500),
];
