//! # Billing and Split Engine
//!
//! Computes the bill for a table's service and divides it between payers.
//!
//! ## Billing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Billing Flow                                    │
//! │                                                                         │
//! │  table.orders ──► subtotal ──► + tip (rate × subtotal) ──► total        │
//! │                                                                         │
//! │                              total                                      │
//! │                                │                                        │
//! │              ┌─────────────────┼──────────────────┐                     │
//! │              ▼                 ▼                  ▼                     │
//! │          Full            Equal { ways }     Custom { shares }           │
//! │       one payer,        largest-remainder   caller-supplied amounts,    │
//! │       whole total       cent distribution   must cover total exactly    │
//! │                                                                         │
//! │                         ByItems { claims }                              │
//! │              every ordered unit claimed exactly once;                   │
//! │              tip shared in proportion to items claimed                  │
//! │                                                                         │
//! │  INVARIANT: for every plan, the payer shares sum to total exactly.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Only SENT orders are billed; staged cart lines are invisible here.
//! - Prices come from the frozen order lines, never from the live menu.
//! - Tips are computed on the subtotal, using any rate the caller supplies
//!   (the UI offers [`crate::TIP_PRESETS`]).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Table, TipRate};
use crate::validation::{validate_payer_name, validate_share_cents, validate_split_ways};

// =============================================================================
// Bill
// =============================================================================

/// The computed bill for one table's service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Floor number of the billed table.
    pub table_number: u32,

    /// Sum of all sent order totals.
    pub subtotal_cents: i64,

    /// Tip rate applied, in basis points.
    pub tip_rate_bps: u32,

    /// Tip amount (subtotal × rate, half-up rounding).
    pub tip_cents: i64,

    /// Grand total: subtotal + tip.
    pub total_cents: i64,
}

impl Bill {
    /// Computes the bill for a table's current service.
    ///
    /// ## Returns
    /// `Err(CoreError::NoOpenBill)` when no order was ever sent. A table
    /// with only staged cart lines has nothing to bill yet.
    pub fn for_table(table: &Table, tip_rate: TipRate) -> CoreResult<Self> {
        if !table.has_orders() {
            return Err(CoreError::NoOpenBill {
                number: table.number,
            });
        }

        let subtotal = table.orders_subtotal();
        let tip = subtotal.calculate_tip(tip_rate);
        Ok(Bill {
            table_number: table.number,
            subtotal_cents: subtotal.cents(),
            tip_rate_bps: tip_rate.bps(),
            tip_cents: tip.cents(),
            total_cents: (subtotal + tip).cents(),
        })
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the tip as Money.
    #[inline]
    pub fn tip(&self) -> Money {
        Money::from_cents(self.tip_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Split Plans
// =============================================================================

/// How the table wants to divide the bill.
///
/// The four plans are mutually exclusive; every settlement uses exactly one.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitPlan {
    /// One payer covers the whole total.
    Full,

    /// The total is divided into `ways` near-equal shares.
    /// `ways` must be between 2 and 10.
    Equal { ways: u32 },

    /// Each payer covers a caller-chosen amount.
    /// The amounts must sum to the total exactly.
    Custom { shares: Vec<CustomShare> },

    /// Each payer claims specific ordered units and owes their cost plus a
    /// proportional slice of the tip. Every unit must be claimed exactly once.
    ByItems { claims: Vec<ItemClaims> },
}

/// One payer's chosen amount on a custom split.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomShare {
    pub payer: String,
    pub amount_cents: i64,
}

/// One payer's claimed items on a by-items split.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemClaims {
    pub payer: String,
    pub assignments: Vec<ItemAssignment>,
}

/// A claimed quantity of one menu item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemAssignment {
    pub menu_item_id: String,
    pub quantity: i64,
}

// =============================================================================
// Settlement
// =============================================================================

/// What one payer owes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayerShare {
    pub payer: String,
    pub amount_cents: i64,
}

impl PayerShare {
    /// Returns the owed amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// A validated bill division: the bill plus who owes what.
///
/// ## Invariant
/// `shares` always sum to `bill.total_cents` exactly, for every plan.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    pub bill: Bill,
    pub shares: Vec<PayerShare>,
}

impl Settlement {
    /// Computes and validates a settlement for the table under the given plan.
    ///
    /// This is a pure calculation: the table is not mutated and no payment
    /// is recorded. The service layer persists the outcome.
    pub fn compute(table: &Table, tip_rate: TipRate, plan: &SplitPlan) -> CoreResult<Self> {
        let bill = Bill::for_table(table, tip_rate)?;

        let shares = match plan {
            SplitPlan::Full => vec![PayerShare {
                payer: format!("Table {}", table.number),
                amount_cents: bill.total_cents,
            }],
            SplitPlan::Equal { ways } => split_equal(&bill, *ways)?,
            SplitPlan::Custom { shares } => split_custom(&bill, shares)?,
            SplitPlan::ByItems { claims } => split_by_items(&bill, table, claims)?,
        };

        Ok(Settlement { bill, shares })
    }
}

/// Divides the total into near-equal shares via largest remainder.
fn split_equal(bill: &Bill, ways: u32) -> CoreResult<Vec<PayerShare>> {
    validate_split_ways(ways)?;

    let shares = bill
        .total()
        .split_even(ways)
        .into_iter()
        .enumerate()
        .map(|(i, amount)| PayerShare {
            payer: format!("Guest {}", i + 1),
            amount_cents: amount.cents(),
        })
        .collect();
    Ok(shares)
}

/// Validates caller-chosen amounts against the total.
fn split_custom(bill: &Bill, shares: &[CustomShare]) -> CoreResult<Vec<PayerShare>> {
    if shares.is_empty() {
        return Err(ValidationError::Required {
            field: "splits".to_string(),
        }
        .into());
    }

    let mut assigned: i64 = 0;
    for share in shares {
        validate_payer_name(&share.payer)?;
        validate_share_cents(share.amount_cents)?;
        assigned += share.amount_cents;
    }

    let remaining = bill.total_cents - assigned;
    if remaining != 0 {
        return Err(CoreError::SplitMismatch {
            remaining_cents: remaining,
        });
    }

    Ok(shares
        .iter()
        .map(|s| PayerShare {
            payer: s.payer.trim().to_string(),
            amount_cents: s.amount_cents,
        })
        .collect())
}

/// One claimable slice of ordered units, priced as it was sent.
struct LedgerEntry {
    menu_item_id: String,
    unit_price_cents: i64,
    remaining: i64,
}

/// Prices claimed units against the orders and spreads the tip
/// proportionally.
///
/// ## Coverage Rule
/// For every distinct menu item on the bill, the claimed quantity across
/// all payers must equal the ordered quantity. Unknown items, unclaimed
/// units, and over-claims all fail.
///
/// ## Price Drift
/// If the same item was sent at different prices in different orders,
/// claims consume units oldest-first, so earlier payers get the earlier
/// price. Deterministic for any claim order.
fn split_by_items(bill: &Bill, table: &Table, claims: &[ItemClaims]) -> CoreResult<Vec<PayerShare>> {
    if claims.is_empty() {
        return Err(ValidationError::Required {
            field: "claims".to_string(),
        }
        .into());
    }

    // Flatten the sent order lines into a FIFO ledger of priced units.
    let mut ledger: Vec<LedgerEntry> = Vec::new();
    let mut ordered: HashMap<String, i64> = HashMap::new();
    let mut names: HashMap<String, String> = HashMap::new();
    for order in &table.orders {
        for line in &order.items {
            ledger.push(LedgerEntry {
                menu_item_id: line.menu_item_id.clone(),
                unit_price_cents: line.unit_price_cents,
                remaining: line.quantity,
            });
            *ordered.entry(line.menu_item_id.clone()).or_insert(0) += line.quantity;
            names
                .entry(line.menu_item_id.clone())
                .or_insert_with(|| line.name_snapshot.clone());
        }
    }

    // Tally claimed quantities and validate payers up front.
    let mut claimed: HashMap<String, i64> = HashMap::new();
    for claim in claims {
        validate_payer_name(&claim.payer)?;
        for assignment in &claim.assignments {
            if assignment.quantity <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "claimed quantity".to_string(),
                }
                .into());
            }
            if !ordered.contains_key(&assignment.menu_item_id) {
                return Err(CoreError::ItemNotOnBill {
                    menu_item_id: assignment.menu_item_id.clone(),
                });
            }
            *claimed.entry(assignment.menu_item_id.clone()).or_insert(0) += assignment.quantity;
        }
    }

    // Every ordered unit must be claimed exactly once, no more, no less.
    for (menu_item_id, &ordered_qty) in &ordered {
        let claimed_qty = claimed.get(menu_item_id).copied().unwrap_or(0);
        if claimed_qty != ordered_qty {
            return Err(CoreError::ItemClaimMismatch {
                name: names
                    .get(menu_item_id)
                    .cloned()
                    .unwrap_or_else(|| menu_item_id.clone()),
                ordered: ordered_qty,
                claimed: claimed_qty,
            });
        }
    }

    // Price each payer's claims by consuming ledger units oldest-first.
    let mut items_cents: Vec<i64> = Vec::with_capacity(claims.len());
    for claim in claims {
        let mut cost: i64 = 0;
        for assignment in &claim.assignments {
            let mut needed = assignment.quantity;
            for entry in ledger
                .iter_mut()
                .filter(|e| e.menu_item_id == assignment.menu_item_id)
            {
                if needed == 0 {
                    break;
                }
                let take = needed.min(entry.remaining);
                cost += take * entry.unit_price_cents;
                entry.remaining -= take;
                needed -= take;
            }
        }
        items_cents.push(cost);
    }

    // Tip is shared in proportion to what each payer claimed.
    // Zero subtotal (all free items) means zero tip shares.
    let tip_shares = bill.tip().allocate(&items_cents);

    Ok(claims
        .iter()
        .zip(items_cents.iter().zip(tip_shares))
        .map(|(claim, (items, tip))| PayerShare {
            payer: claim.payer.trim().to_string(),
            amount_cents: items + tip.cents(),
        })
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
