//! # Draft Cart Registry
//!
//! Holds the waiter's in-progress cart for each table being attended.
//!
//! ## Thread Safety
//! Carts live behind a single `Mutex` because:
//! 1. Multiple operations may touch carts concurrently
//! 2. Only one operation should modify a cart at a time
//! 3. Cart edits are tiny; one lock for the whole registry is enough
//!
//! ## Why Carts Are Not on the Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The cart is DRAFT state: editable, not yet visible to the kitchen,     │
//! │  and never part of the bill. It only becomes real when sent, at        │
//! │  which point it turns into a new Order under the table's lock.         │
//! │                                                                         │
//! │  add_to_cart ───► registry[table] ───send_cart───► table.orders[n]     │
//! │                                                                         │
//! │  Losing a draft (process restart) loses nothing the kitchen or the     │
//! │  bill ever knew about.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use comanda_core::types::OrderItem;
use comanda_core::Cart;

/// Registry of draft carts, keyed by table id.
///
/// A table with no entry simply has an empty draft.
#[derive(Debug, Default)]
pub struct DraftCarts {
    carts: Mutex<HashMap<String, Cart>>,
}

impl DraftCarts {
    /// Creates an empty registry.
    pub fn new() -> Self {
        DraftCarts {
            carts: Mutex::new(HashMap::new()),
        }
    }

    /// Executes a function with read access to a table's draft cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = drafts.with_cart("t1", |cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, table_id: &str, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let carts = self.carts.lock().expect("cart registry mutex poisoned");
        match carts.get(table_id) {
            Some(cart) => f(cart),
            None => f(&Cart::new()),
        }
    }

    /// Executes a function with write access to a table's draft cart,
    /// creating the draft on first touch.
    pub fn with_cart_mut<F, R>(&self, table_id: &str, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut carts = self.carts.lock().expect("cart registry mutex poisoned");
        let cart = carts.entry(table_id.to_string()).or_default();
        f(cart)
    }

    /// Returns a snapshot of a table's draft cart.
    pub fn snapshot(&self, table_id: &str) -> Cart {
        self.with_cart(table_id, |cart| cart.clone())
    }

    /// Drains a table's draft lines in one atomic step, leaving the draft
    /// empty. Lines another terminal stages afterwards land in the fresh
    /// draft and are never lost.
    pub fn take(&self, table_id: &str) -> Vec<OrderItem> {
        let mut carts = self.carts.lock().expect("cart registry mutex poisoned");
        match carts.get_mut(table_id) {
            Some(cart) => cart.take_lines(),
            None => Vec::new(),
        }
    }

    /// Puts drained lines back at the front of a table's draft. Used when
    /// a send fails after the drain: the staged cart must survive.
    pub fn restore(&self, table_id: &str, lines: Vec<OrderItem>) {
        if lines.is_empty() {
            return;
        }
        let mut carts = self.carts.lock().expect("cart registry mutex poisoned");
        carts
            .entry(table_id.to_string())
            .or_default()
            .restore_lines(lines);
    }

    /// Drops a table's draft entirely (after a send, or when the table is
    /// released or closed).
    pub fn discard(&self, table_id: &str) {
        let mut carts = self.carts.lock().expect("cart registry mutex poisoned");
        carts.remove(table_id);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
