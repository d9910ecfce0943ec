//! # Domain Types
//!
//! Core domain types used throughout Comanda POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │      Table      │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  number (biz)   │   │  username (biz) │       │
//! │  │  price_cents    │   │  status         │   │  role           │       │
//! │  │  category       │   │  orders, waiter │   │  name           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TipRate      │   │   OrderStatus   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Pending        │   │  Credit  Debit  │       │
//! │  │  1000 = 10%     │   │  Preparing      │   │  Cash    Pix    │       │
//! │  └─────────────────┘   │  Done           │   └─────────────────┘       │
//! │                        │  Delivered      │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: opaque string - immutable, used for relations
//! - Business ID: (table number, username, etc.) - human-readable, unique

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::order::Order;

// =============================================================================
// Tip Rate
// =============================================================================

/// Tip rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (one of the standard tip presets)
///
/// The UI offers preset rates (see [`crate::TIP_PRESETS`]) but the engine
/// accepts any rate the caller supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TipRate(u32);

impl TipRate {
    /// Creates a tip rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TipRate(bps)
    }

    /// Creates a tip rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TipRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tip rate.
    #[inline]
    pub const fn zero() -> Self {
        TipRate(0)
    }

    /// Checks if tip rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TipRate {
    fn default() -> Self {
        TipRate::zero()
    }
}

// =============================================================================
// Role
// =============================================================================

/// Staff role, controls which operations a user may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Runs the floor: services, carts, delivery, payment.
    Waiter,
    /// Runs the kitchen: accepts and finishes orders.
    Kitchen,
    /// Full access, including administration.
    Manager,
}

impl Role {
    /// Can run floor operations (service, cart, delivery, payment).
    #[inline]
    pub const fn can_serve(&self) -> bool {
        matches!(self, Role::Waiter | Role::Manager)
    }

    /// Can move orders through the kitchen stages.
    #[inline]
    pub const fn can_cook(&self) -> bool {
        matches!(self, Role::Kitchen | Role::Manager)
    }

    /// Can administer menu, tables, and staff.
    #[inline]
    pub const fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle stage of an order sent to the kitchen.
///
/// Transition rules live in [`crate::order`]; this is just the data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Sent to the kitchen, not yet started.
    Pending,
    /// Kitchen is working on it.
    Preparing,
    /// Ready for pickup by the waiter.
    Done,
    /// Handed to the guests (terminal).
    Delivered,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Lowercase names matching the serialized form, used in error messages.
impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Done => "done",
            OrderStatus::Delivered => "delivered",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Table Status
// =============================================================================

/// Occupancy state of a floor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// Free, ready for guests or a reservation.
    Available,
    /// Guests seated, service in progress.
    Occupied,
    /// Held for expected guests.
    Reserved,
}

impl Default for TableStatus {
    fn default() -> Self {
        TableStatus::Available
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit card on the table-side terminal.
    Credit,
    /// Debit card on the table-side terminal.
    Debit,
    /// Physical cash payment.
    Cash,
    /// Instant transfer (Pix).
    Pix,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink guests can order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier.
    pub id: String,

    /// Display name shown on the menu and on order tickets.
    pub name: String,

    /// Optional description shown on the menu.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Category name (e.g. "Appetizers"). Must exist in the category list.
    pub category: String,

    /// Optional image URL for the menu card.
    pub image_url: Option<String>,

    /// Whether the item can currently be ordered (kitchen may 86 a dish).
    pub available: bool,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line on an order or in a cart.
/// Uses snapshot pattern to freeze menu data at the moment of ordering:
/// later price or name edits on the menu never change what the guest owes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub menu_item_id: String,
    /// Item name at time of ordering (frozen).
    pub name_snapshot: String,
    /// Unit price in cents at time of ordering (frozen).
    pub unit_price_cents: i64,
    /// Quantity ordered.
    pub quantity: i64,
    /// Free-text note for the kitchen ("no onions"). Normalized: trimmed,
    /// empty becomes None.
    pub notes: Option<String>,
}

impl OrderItem {
    /// Creates a line from a menu item, freezing its name and price.
    pub fn from_menu_item(
        id: impl Into<String>,
        item: &MenuItem,
        quantity: i64,
        notes: Option<String>,
    ) -> Self {
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        OrderItem {
            id: id.into(),
            menu_item_id: item.id.clone(),
            name_snapshot: item.name.clone(),
            unit_price_cents: item.price_cents,
            quantity,
            notes,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total (unit price × quantity) as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Two lines merge in a cart only if both the item and the note match.
    /// "Burger, no onions" and "Burger" stay separate lines.
    #[inline]
    pub fn merges_with(&self, menu_item_id: &str, notes: Option<&str>) -> bool {
        self.menu_item_id == menu_item_id && self.notes.as_deref() == notes
    }
}

// =============================================================================
// User
// =============================================================================

/// A staff member who can sign in.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    /// Display name ("John Silva").
    pub name: String,
    /// Sign-in name, unique across all users.
    pub username: String,
    /// Demo credential, compared verbatim by `authenticate`. Never leaves
    /// the process: skipped on serialization, empty when absent on input.
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password: String,
    pub role: Role,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Table
// =============================================================================

/// A floor table: occupancy state plus everything ordered during the
/// current service.
///
/// ## Where the Cart Lives
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  The waiter's draft cart is terminal-side state ([`crate::cart`]),      │
/// │  NOT part of the table. The table only sees the result of a send:       │
/// │                                                                         │
/// │  draft cart ──send──► orders[n]  (a NEW order per send,                 │
/// │                                   batches never merge)                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Table {
    pub id: String,

    /// Floor number shown to staff, unique across all tables.
    pub number: u32,

    /// Seating capacity.
    pub seats: u32,

    pub status: TableStatus,

    /// Orders sent during the current service, oldest first.
    pub orders: Vec<Order>,

    /// Waiter running the current service or holding the reservation.
    pub waiter_id: Option<String>,

    /// Inactive tables are hidden from the floor but kept for history.
    pub active: bool,
}

impl Table {
    /// Creates a fresh, available table with no service.
    pub fn new(id: impl Into<String>, number: u32, seats: u32) -> Self {
        Table {
            id: id.into(),
            number,
            seats,
            status: TableStatus::Available,
            orders: Vec::new(),
            waiter_id: None,
            active: true,
        }
    }

    /// True if at least one order was sent during the current service.
    #[inline]
    pub fn has_orders(&self) -> bool {
        !self.orders.is_empty()
    }

    /// Number of orders not yet delivered.
    pub fn undelivered_count(&self) -> usize {
        self.orders
            .iter()
            .filter(|o| o.status != OrderStatus::Delivered)
            .count()
    }

    /// Finds an order on this table by id.
    pub fn find_order_mut(&mut self, order_id: &str) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == order_id)
    }

    /// Sum of all sent order totals for the current service.
    pub fn orders_subtotal(&self) -> Money {
        self.orders
            .iter()
            .fold(Money::zero(), |acc, o| acc + o.total())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
