//! # Checkout Operations
//!
//! Bill preview, splits, and payment.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Flow                                    │
//! │                                                                         │
//! │  preview_bill ──────────► pure read: bill + shares for the chosen      │
//! │  (any time, even with     tip and split. Undelivered orders only       │
//! │   orders still cooking)   flag a warning, never block the preview.     │
//! │                                                                         │
//! │  complete_payment ──────► under the table lock, in one step:           │
//! │  (all delivered only)     1. validate the split against live state     │
//! │                           2. produce the receipt                        │
//! │                           3. close the table (orders cleared,          │
//! │                              waiter freed, available again)            │
//! │                                                                         │
//! │  A second complete_payment finds no orders → "no open bill".           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All money math lives in `comanda-core::billing`; this module only decides
//! when it runs and what happens to the table afterwards.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use comanda_core::billing::{PayerShare, Settlement, SplitPlan};
use comanda_core::types::{PaymentMethod, TableStatus, TipRate};
use comanda_core::validation::validate_tip_rate_bps;
use comanda_core::CoreError;
use comanda_store::Store;

use crate::auth::Session;
use crate::error::{ServiceError, ServiceResult};

/// A previewed bill: totals, shares, and the kitchen-progress warning.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPreview {
    pub table_number: u32,
    pub subtotal_cents: i64,
    pub tip_rate_bps: u32,
    pub tip_cents: i64,
    pub total_cents: i64,
    /// Orders not yet delivered. Previewing is allowed anyway; payment is
    /// not.
    pub undelivered_orders: usize,
    pub shares: Vec<PayerShare>,
}

/// The record handed back once a table has paid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: String,
    pub table_number: u32,
    pub timestamp: String,
    pub items: Vec<ReceiptLine>,
    pub subtotal_cents: i64,
    pub tip_rate_bps: u32,
    pub tip_cents: i64,
    pub total_cents: i64,
    pub shares: Vec<PayerShare>,
    pub method: PaymentMethod,
}

/// One printed line: order lines pass through as sent, never re-merged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub notes: Option<String>,
}

/// Checkout operations: previewing and settling bills.
#[derive(Clone)]
pub struct CheckoutService {
    store: Store,
}

impl CheckoutService {
    /// Creates a new CheckoutService.
    pub fn new(store: Store) -> Self {
        CheckoutService { store }
    }

    /// Computes the bill and shares for a tip and split without touching
    /// the table.
    ///
    /// Waiters use this at the table while guests argue over the split;
    /// calling it repeatedly with different plans is free.
    pub async fn preview_bill(
        &self,
        actor: &Session,
        table_id: &str,
        tip_rate_bps: u32,
        plan: &SplitPlan,
    ) -> ServiceResult<BillPreview> {
        actor.require_serve()?;
        debug!(table_id = %table_id, tip_rate_bps, "preview_bill");

        validate_tip_rate_bps(tip_rate_bps).map_err(CoreError::from)?;

        let table = self
            .store
            .tables()
            .get_by_id(table_id)
            .await
            .ok_or_else(|| ServiceError::not_found("Table", table_id))?;

        let settlement = Settlement::compute(&table, TipRate::from_bps(tip_rate_bps), plan)?;

        Ok(BillPreview {
            table_number: settlement.bill.table_number,
            subtotal_cents: settlement.bill.subtotal_cents,
            tip_rate_bps: settlement.bill.tip_rate_bps,
            tip_cents: settlement.bill.tip_cents,
            total_cents: settlement.bill.total_cents,
            undelivered_orders: table.undelivered_count(),
            shares: settlement.shares,
        })
    }

    /// Settles the bill and closes the table, atomically.
    ///
    /// ## Rules
    /// - Every order must be delivered; the kitchen cannot still be cooking
    ///   food someone is paying for.
    /// - The split is validated against the table's live state under its
    ///   lock, so a concurrent send cannot slip items past the settlement.
    /// - Closing clears orders and the waiter and frees the table; a repeat
    ///   call therefore finds no open bill.
    pub async fn complete_payment(
        &self,
        actor: &Session,
        table_id: &str,
        tip_rate_bps: u32,
        plan: &SplitPlan,
        method: PaymentMethod,
    ) -> ServiceResult<Receipt> {
        actor.require_serve()?;
        debug!(table_id = %table_id, tip_rate_bps, method = ?method, "complete_payment");

        validate_tip_rate_bps(tip_rate_bps).map_err(CoreError::from)?;
        let tip_rate = TipRate::from_bps(tip_rate_bps);
        let now = Utc::now();
        let receipt_number = generate_receipt_number();

        let receipt = self
            .store
            .tables()
            .with_table(table_id, |table| {
                let remaining = table.undelivered_count();
                if remaining > 0 {
                    return Err(CoreError::UndeliveredOrders {
                        number: table.number,
                        remaining,
                    }
                    .into());
                }

                let settlement = Settlement::compute(table, tip_rate, plan)?;

                let items = table
                    .orders
                    .iter()
                    .flat_map(|order| order.items.iter())
                    .map(|line| ReceiptLine {
                        name: line.name_snapshot.clone(),
                        quantity: line.quantity,
                        unit_price_cents: line.unit_price_cents,
                        line_total_cents: line.line_total().cents(),
                        notes: line.notes.clone(),
                    })
                    .collect();

                let receipt = Receipt {
                    receipt_number: receipt_number.clone(),
                    table_number: table.number,
                    timestamp: now.to_rfc3339(),
                    items,
                    subtotal_cents: settlement.bill.subtotal_cents,
                    tip_rate_bps: settlement.bill.tip_rate_bps,
                    tip_cents: settlement.bill.tip_cents,
                    total_cents: settlement.bill.total_cents,
                    shares: settlement.shares,
                    method,
                };

                table.orders.clear();
                table.waiter_id = None;
                table.status = TableStatus::Available;

                Ok::<_, ServiceError>(receipt)
            })
            .await?;

        info!(
            receipt = %receipt.receipt_number,
            table = %receipt.table_number,
            total = %receipt.total_cents,
            method = ?receipt.method,
            "Payment completed, table closed"
        );
        Ok(receipt)
    }
}

/// Builds a human-readable receipt number: date-time plus a short
/// discriminator for same-second receipts.
fn generate_receipt_number() -> String {
    let now = Utc::now();
    let random = now.timestamp_subsec_nanos() % 10000;
    format!("{}-{:04}", now.format("%y%m%d-%H%M%S"), random)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::floor::FloorService;
    use comanda_core::billing::{CustomShare, ItemAssignment, ItemClaims};
    use comanda_core::types::{OrderStatus, Role, TableStatus};

    fn waiter() -> Session {
        Session {
            user_id: "1".to_string(),
            username: "john".to_string(),
            name: "John Silva".to_string(),
            role: Role::Waiter,
        }
    }

    fn cook() -> Session {
        Session {
            user_id: "kitchen".to_string(),
            username: "kitchen".to_string(),
            name: "Kitchen".to_string(),
            role: Role::Kitchen,
        }
    }

    /// Seeded ids: Artisan Burger 5290, Soda 800.
    const BURGER: &str = "5";
    const SODA: &str = "10";

    struct Fixture {
        floor: FloorService,
        checkout: CheckoutService,
    }

    fn fixture() -> Fixture {
        let store = Store::with_demo_data();
        Fixture {
            floor: FloorService::new(store.clone()),
            checkout: CheckoutService::new(store),
        }
    }

    /// Sends one burger and two sodas to table 5 (subtotal 6890).
    async fn run_up_a_bill(fx: &Fixture) -> String {
        fx.floor.start_service(&waiter(), "5").await.unwrap();
        fx.floor
            .add_to_cart(&waiter(), "5", BURGER, 1, None)
            .await
            .unwrap();
        fx.floor
            .add_to_cart(&waiter(), "5", SODA, 2, None)
            .await
            .unwrap();
        fx.floor.send_cart(&waiter(), "5").await.unwrap().id
    }

    async fn deliver(fx: &Fixture, order_id: &str) {
        for target in [OrderStatus::Preparing, OrderStatus::Done] {
            fx.floor
                .advance_order(&cook(), "5", order_id, target)
                .await
                .unwrap();
        }
        fx.floor
            .advance_order(&waiter(), "5", order_id, OrderStatus::Delivered)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_preview_totals_and_warning_flag() {
        let fx = fixture();
        run_up_a_bill(&fx).await;

        // Still pending in the kitchen: preview works, flagged
        let preview = fx
            .checkout
            .preview_bill(&waiter(), "5", 1000, &SplitPlan::Full)
            .await
            .unwrap();

        assert_eq!(preview.subtotal_cents, 6890);
        assert_eq!(preview.tip_cents, 689);
        assert_eq!(preview.total_cents, 7579);
        assert_eq!(preview.undelivered_orders, 1);
        assert_eq!(preview.shares.len(), 1);
        assert_eq!(preview.shares[0].payer, "Table 5");
    }

    #[tokio::test]
    async fn test_preview_equal_split_shares_sum_exactly() {
        let fx = fixture();
        run_up_a_bill(&fx).await;

        let preview = fx
            .checkout
            .preview_bill(&waiter(), "5", 0, &SplitPlan::Equal { ways: 3 })
            .await
            .unwrap();

        let sum: i64 = preview.shares.iter().map(|s| s.amount_cents).sum();
        assert_eq!(sum, preview.total_cents);
        assert_eq!(preview.shares.len(), 3);
        // 6890 / 3: the earlier guests absorb the odd cents
        assert_eq!(preview.shares[0].amount_cents, 2297);
        assert_eq!(preview.shares[2].amount_cents, 2296);
    }

    #[tokio::test]
    async fn test_preview_custom_mismatch_reports_delta() {
        let fx = fixture();
        run_up_a_bill(&fx).await;

        let plan = SplitPlan::Custom {
            shares: vec![
                CustomShare {
                    payer: "Ana".to_string(),
                    amount_cents: 3000,
                },
                CustomShare {
                    payer: "Bruno".to_string(),
                    amount_cents: 3000,
                },
            ],
        };
        let err = fx
            .checkout
            .preview_bill(&waiter(), "5", 0, &plan)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        // 6890 billed, 6000 assigned: 890 still uncovered
        assert!(err.message.contains("890"));
    }

    #[tokio::test]
    async fn test_preview_without_orders_is_not_found() {
        let fx = fixture();
        let err = fx
            .checkout
            .preview_bill(&waiter(), "5", 0, &SplitPlan::Full)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Table 5 has no open bill");
    }

    #[tokio::test]
    async fn test_payment_blocked_until_delivered() {
        let fx = fixture();
        let order_id = run_up_a_bill(&fx).await;

        let err = fx
            .checkout
            .complete_payment(&waiter(), "5", 1000, &SplitPlan::Full, PaymentMethod::Cash)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message, "Table 5 has 1 undelivered order(s)");

        deliver(&fx, &order_id).await;
        let receipt = fx
            .checkout
            .complete_payment(&waiter(), "5", 1000, &SplitPlan::Full, PaymentMethod::Cash)
            .await
            .unwrap();
        assert_eq!(receipt.total_cents, 7579);
    }

    #[tokio::test]
    async fn test_payment_closes_table_and_repeat_fails() {
        let fx = fixture();
        let order_id = run_up_a_bill(&fx).await;
        deliver(&fx, &order_id).await;

        let receipt = fx
            .checkout
            .complete_payment(
                &waiter(),
                "5",
                1500,
                &SplitPlan::Equal { ways: 2 },
                PaymentMethod::Credit,
            )
            .await
            .unwrap();

        assert_eq!(receipt.table_number, 5);
        assert_eq!(receipt.subtotal_cents, 6890);
        assert_eq!(receipt.tip_cents, 1034); // 15% of 6890, half-up
        assert_eq!(receipt.total_cents, 7924);
        assert_eq!(receipt.items.len(), 2);
        let sum: i64 = receipt.shares.iter().map(|s| s.amount_cents).sum();
        assert_eq!(sum, receipt.total_cents);

        // Closed: available, empty, and unpayable a second time
        let table = fx.floor.get_table("5").await.unwrap();
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.orders.is_empty());
        assert!(table.waiter_id.is_none());

        let err = fx
            .checkout
            .complete_payment(&waiter(), "5", 0, &SplitPlan::Full, PaymentMethod::Cash)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Table 5 has no open bill");
    }

    #[tokio::test]
    async fn test_by_items_settlement() {
        let fx = fixture();
        let order_id = run_up_a_bill(&fx).await;
        deliver(&fx, &order_id).await;

        let plan = SplitPlan::ByItems {
            claims: vec![
                ItemClaims {
                    payer: "Ana".to_string(),
                    assignments: vec![ItemAssignment {
                        menu_item_id: BURGER.to_string(),
                        quantity: 1,
                    }],
                },
                ItemClaims {
                    payer: "Bruno".to_string(),
                    assignments: vec![ItemAssignment {
                        menu_item_id: SODA.to_string(),
                        quantity: 2,
                    }],
                },
            ],
        };
        let receipt = fx
            .checkout
            .complete_payment(&waiter(), "5", 1000, &plan, PaymentMethod::Pix)
            .await
            .unwrap();

        // Tip 689 split by weight 5290:1600 → 529 and 160
        let ana = receipt.shares.iter().find(|s| s.payer == "Ana").unwrap();
        let bruno = receipt.shares.iter().find(|s| s.payer == "Bruno").unwrap();
        assert_eq!(ana.amount_cents, 5290 + 529);
        assert_eq!(bruno.amount_cents, 1600 + 160);
        assert_eq!(
            ana.amount_cents + bruno.amount_cents,
            receipt.total_cents
        );
    }

    #[tokio::test]
    async fn test_bad_tip_rate_rejected() {
        let fx = fixture();
        run_up_a_bill(&fx).await;

        let err = fx
            .checkout
            .preview_bill(&waiter(), "5", 10_001, &SplitPlan::Full)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_kitchen_cannot_checkout() {
        let fx = fixture();
        let err = fx
            .checkout
            .preview_bill(&cook(), "5", 0, &SplitPlan::Full)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
