//! # Cart
//!
//! The staged items of a table, before they are sent to the kitchen.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations (per table)                          │
//! │                                                                         │
//! │  Waiter Action            Service Operation        Cart Change          │
//! │  ─────────────            ─────────────────        ───────────          │
//! │                                                                         │
//! │  Tap Menu Item ──────────► add_to_cart ──────────► merge or push line   │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_line ─────► line.quantity = n    │
//! │                                                                         │
//! │  Tap Remove ─────────────► remove_cart_line ─────► lines.remove(i)      │
//! │                                                                         │
//! │  Send to Kitchen ────────► send_cart ────────────► take_lines() → Order │
//! │                                                                         │
//! │  NOTE: A cart is the terminal's draft for one table. No Order, bill,    │
//! │        or other terminal sees it until send_cart turns it into an       │
//! │        Order; the math here is single-threaded and pure.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Merge Identity
//! Lines are unique by (menu item, note). "Burger" and "Burger, no onions"
//! are different lines; adding "Burger" twice increases the quantity of the
//! existing line instead of duplicating it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::OrderItem;

// =============================================================================
// Cart
// =============================================================================

/// Staged order lines for one table.
///
/// ## Invariants
/// - Lines are unique by (menu_item_id, notes); adding a match merges
/// - Quantity is always > 0 (updating to 0 removes the line)
/// - Maximum lines: [`crate::MAX_CART_ITEMS`]
/// - Maximum quantity per line: [`crate::MAX_ITEM_QUANTITY`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Lines in the cart.
    pub lines: Vec<OrderItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a line to the cart, merging with an existing matching line.
    ///
    /// ## Behavior
    /// - If a line with the same (menu item, note) exists: its quantity
    ///   grows and it keeps its earlier frozen price
    /// - Otherwise: the new line is appended
    ///
    /// ## Returns
    /// - `Err(CoreError::QuantityTooLarge)` if the merged quantity would
    ///   exceed the per-line maximum
    /// - `Err(CoreError::CartTooLarge)` if the cart is at its line cap
    pub fn add_line(&mut self, line: OrderItem) -> CoreResult<()> {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.merges_with(&line.menu_item_id, line.notes.as_deref()))
        {
            let new_qty = existing.quantity + line.quantity;
            if new_qty > crate::MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: crate::MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= crate::MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: crate::MAX_CART_ITEMS,
            });
        }
        if line.quantity > crate::MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity,
                max: crate::MAX_ITEM_QUANTITY,
            });
        }

        self.lines.push(line);
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity 0 (or less) removes the line
    /// - Unknown line id returns an error
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_line(line_id);
        }

        if quantity > crate::MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: crate::MAX_ITEM_QUANTITY,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = quantity;
            Ok(())
        } else {
            Err(CoreError::ItemNotInCart {
                line_id: line_id.to_string(),
            })
        }
    }

    /// Removes a line from the cart by line id.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != line_id);

        if self.lines.len() == initial_len {
            Err(CoreError::ItemNotInCart {
                line_id: line_id.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Drains the cart, returning its lines for order placement.
    pub fn take_lines(&mut self) -> Vec<OrderItem> {
        std::mem::take(&mut self.lines)
    }

    /// Puts previously drained lines back at the front of the cart,
    /// ahead of anything staged since the drain.
    ///
    /// The lines were already validated when first added, so the size
    /// guards do not re-apply here.
    pub fn restore_lines(&mut self, mut lines: Vec<OrderItem>) {
        lines.append(&mut self.lines);
        self.lines = lines;
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the staged subtotal in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total().cents()).sum()
    }

    /// Calculates the staged subtotal as Money.
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for UI badges.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal_cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MenuItem;
    use chrono::Utc;

    fn menu_item(id: &str, price_cents: i64) -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            description: None,
            price_cents,
            category: "Main Courses".to_string(),
            image_url: None,
            available: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn line(line_id: &str, item: &MenuItem, qty: i64, notes: Option<&str>) -> OrderItem {
        OrderItem::from_menu_item(line_id, item, qty, notes.map(|n| n.to_string()))
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);

        cart.add_line(line("l1", &burger, 2, None)).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal_cents(), 10580);
    }

    #[test]
    fn test_add_same_item_merges() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);

        cart.add_line(line("l1", &burger, 2, None)).unwrap();
        cart.add_line(line("l2", &burger, 3, None)).unwrap();

        assert_eq!(cart.line_count(), 1); // Still one line
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_different_notes_stay_separate() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);

        cart.add_line(line("l1", &burger, 1, None)).unwrap();
        cart.add_line(line("l2", &burger, 1, Some("no onions"))).unwrap();
        cart.add_line(line("l3", &burger, 1, Some("no onions"))).unwrap();

        assert_eq!(cart.line_count(), 2);
        let noted = cart
            .lines
            .iter()
            .find(|l| l.notes.as_deref() == Some("no onions"))
            .unwrap();
        assert_eq!(noted.quantity, 2);
    }

    #[test]
    fn test_merge_keeps_first_frozen_price() {
        let mut cart = Cart::new();
        let mut burger = menu_item("m1", 5290);

        cart.add_line(line("l1", &burger, 1, None)).unwrap();

        // Price changes on the menu between taps
        burger.price_cents = 6000;
        cart.add_line(line("l2", &burger, 1, None)).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].unit_price_cents, 5290);
        assert_eq!(cart.subtotal_cents(), 10580);
    }

    #[test]
    fn test_merge_respects_max_quantity() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);

        cart.add_line(line("l1", &burger, crate::MAX_ITEM_QUANTITY, None))
            .unwrap();
        let err = cart.add_line(line("l2", &burger, 1, None)).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_cart_line_cap() {
        let mut cart = Cart::new();
        for i in 0..crate::MAX_CART_ITEMS {
            let item = menu_item(&format!("m{i}"), 100);
            cart.add_line(line(&format!("l{i}"), &item, 1, None)).unwrap();
        }

        let extra = menu_item("overflow", 100);
        let err = cart.add_line(line("lx", &extra, 1, None)).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);
        cart.add_line(line("l1", &burger, 2, None)).unwrap();

        cart.update_quantity("l1", 5).unwrap();
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);
        cart.add_line(line("l1", &burger, 2, None)).unwrap();

        cart.update_quantity("l1", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_missing_line_fails() {
        let mut cart = Cart::new();
        let err = cart.update_quantity("nope", 3).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotInCart { .. }));
    }

    #[test]
    fn test_remove_missing_line_fails() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);
        cart.add_line(line("l1", &burger, 1, None)).unwrap();

        assert!(cart.remove_line("l1").is_ok());
        let err = cart.remove_line("l1").unwrap_err();
        assert!(matches!(err, CoreError::ItemNotInCart { .. }));
    }

    #[test]
    fn test_take_lines_drains() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);
        cart.add_line(line("l1", &burger, 2, None)).unwrap();

        let lines = cart.take_lines();
        assert_eq!(lines.len(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_restore_lines_go_ahead_of_newer_lines() {
        let mut cart = Cart::new();
        let burger = menu_item("m1", 5290);
        let soda = menu_item("m2", 800);
        cart.add_line(line("l1", &burger, 1, None)).unwrap();

        let drained = cart.take_lines();
        cart.add_line(line("l2", &soda, 1, None)).unwrap();

        cart.restore_lines(drained);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.lines[0].id, "l1");
        assert_eq!(cart.lines[1].id, "l2");
    }
}
