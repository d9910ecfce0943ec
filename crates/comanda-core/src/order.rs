//! # Order Lifecycle
//!
//! The kitchen order state machine.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order State Machine                                │
//! │                                                                         │
//! │   pending ──► preparing ──► done ──► delivered (terminal)               │
//! │                                                                         │
//! │   sent_at      preparing_at   done_at   delivered_at                    │
//! │   (at send)    (stamped on    (stamped  (stamped on                     │
//! │                 entry)         on entry) entry)                         │
//! │                                                                         │
//! │   Kitchen advances:  pending → preparing → done                         │
//! │   Waiter advances:   done → delivered                                   │
//! │   (role checks live in the service layer)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! 1. Orders only move FORWARD, one stage at a time. No skipping, no regress.
//! 2. Re-applying the current status is a no-op, never an error. Callers can
//!    retry safely without double-firing side effects.
//! 3. Each stage stamps its timestamp exactly once, on first entry.
//! 4. `delivered` is terminal: nothing moves out of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderItem, OrderStatus};

// =============================================================================
// Status Progression
// =============================================================================

impl OrderStatus {
    /// The single legal next stage, if any.
    #[inline]
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Done),
            OrderStatus::Done => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// True once the order can never move again.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A batch of items sent to the kitchen in one go.
///
/// Every send creates a NEW order; batches are never merged, even when the
/// items are identical. Each order moves through the kitchen independently.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,

    /// Floor number of the table this order belongs to.
    pub table_number: u32,

    /// Waiter who sent the order.
    pub waiter_id: String,

    /// Snapshot lines, frozen at send time.
    pub items: Vec<OrderItem>,

    pub status: OrderStatus,

    /// Sum of line totals, frozen at send time.
    pub total_cents: i64,

    /// When the order record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the order was sent to the kitchen. Equals `created_at` today;
    /// kept as its own stamp so the pending stage reads like every other.
    #[ts(as = "String")]
    pub sent_at: DateTime<Utc>,

    /// When the kitchen started working on it.
    #[ts(as = "Option<String>")]
    pub preparing_at: Option<DateTime<Utc>>,

    /// When the kitchen finished it.
    #[ts(as = "Option<String>")]
    pub done_at: Option<DateTime<Utc>>,

    /// When the waiter handed it to the guests.
    #[ts(as = "Option<String>")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a pending order from cart lines at send time.
    ///
    /// ## Rules
    /// - At least one line is required; an empty send is rejected.
    /// - The total is computed here and frozen; later menu edits never
    ///   change what was sent.
    pub fn place(
        id: impl Into<String>,
        table_number: u32,
        waiter_id: impl Into<String>,
        items: Vec<OrderItem>,
        now: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if items.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let total_cents = items.iter().map(|i| i.line_total().cents()).sum();
        Ok(Order {
            id: id.into(),
            table_number,
            waiter_id: waiter_id.into(),
            items,
            status: OrderStatus::Pending,
            total_cents,
            created_at: now,
            sent_at: now,
            preparing_at: None,
            done_at: None,
            delivered_at: None,
        })
    }

    /// Returns the frozen order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// When the order entered the given stage, if it has.
    ///
    /// `pending` maps to `sent_at` (an order is born pending).
    pub fn stamped_at(&self, status: OrderStatus) -> Option<DateTime<Utc>> {
        match status {
            OrderStatus::Pending => Some(self.sent_at),
            OrderStatus::Preparing => self.preparing_at,
            OrderStatus::Done => self.done_at,
            OrderStatus::Delivered => self.delivered_at,
        }
    }

    /// Moves the order to `to`, enforcing strict staging.
    ///
    /// ## Returns
    /// - `Ok(Transition::Applied { .. })` when the order moved
    /// - `Ok(Transition::AlreadyAt(..))` when `to` is the current status
    ///   (idempotent retry, nothing touched)
    /// - `Err(CoreError::InvalidTransition { .. })` for skips, regressions,
    ///   and moves out of a terminal stage
    pub fn advance(&mut self, to: OrderStatus, now: DateTime<Utc>) -> CoreResult<Transition> {
        let from = self.status;

        if to == from {
            return Ok(Transition::AlreadyAt(to));
        }

        if from.next() != Some(to) {
            return Err(CoreError::InvalidTransition {
                order_id: self.id.clone(),
                from,
                to,
            });
        }

        self.status = to;
        match to {
            // Stamps are write-once: first entry wins, retries and manual
            // status edits cannot clobber an earlier stamp.
            OrderStatus::Preparing => {
                self.preparing_at.get_or_insert(now);
            }
            OrderStatus::Done => {
                self.done_at.get_or_insert(now);
            }
            OrderStatus::Delivered => {
                self.delivered_at.get_or_insert(now);
            }
            OrderStatus::Pending => {}
        }

        Ok(Transition::Applied { from, to })
    }
}

// =============================================================================
// Transition Outcome
// =============================================================================

/// What `Order::advance` did. Callers use this to decide whether to
/// persist and what to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The order moved one stage forward.
    Applied { from: OrderStatus, to: OrderStatus },
    /// The order was already at the requested status; nothing changed.
    AlreadyAt(OrderStatus),
}

impl Transition {
    /// True if the order actually changed.
    #[inline]
    pub fn changed(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
