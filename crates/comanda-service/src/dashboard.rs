//! # Dashboard
//!
//! Read-only boards: the manager's house snapshot, the kitchen queue, and
//! the delivery run.
//!
//! ## Who Watches What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  House snapshot   ► managers. Table and order counts by status,         │
//! │                     open revenue, items sold, occupancy rate.           │
//! │  Kitchen queue    ► kitchen staff. Pending and preparing orders,        │
//! │                     oldest first, with the notes cooks must read.       │
//! │  Delivery run     ► floor staff. Plated orders waiting to go out.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every board is a snapshot: it reads the tables one by one and never
//! blocks a running service. A board can trail an in-flight write by one
//! table; the next refresh catches up.

use serde::Serialize;

use comanda_core::order::Order;
use comanda_core::types::{OrderStatus, TableStatus};
use comanda_store::Store;

use crate::auth::Session;
use crate::error::ServiceResult;

/// One table on the house snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub id: String,
    pub number: u32,
    pub seats: u32,
    pub status: TableStatus,
    pub waiter_id: Option<String>,
    pub order_count: usize,
    pub undelivered_orders: usize,
    pub subtotal_cents: i64,
}

/// The whole house at a glance.
///
/// Revenue and items-sold cover CURRENT orders only: settled services left
/// their tables at payment and are gone from this view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub tables: Vec<TableSummary>,
    pub tables_available: usize,
    pub tables_occupied: usize,
    pub tables_reserved: usize,
    /// Occupied share of the active floor, in basis points.
    pub occupancy_bps: u32,
    pub open_orders: usize,
    pub pending_orders: usize,
    pub preparing_orders: usize,
    pub done_orders: usize,
    pub delivered_orders: usize,
    pub revenue_cents: i64,
    pub items_sold: i64,
}

/// One line on a kitchen or delivery ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketLine {
    pub name: String,
    pub quantity: i64,
    pub notes: Option<String>,
}

/// One order on the kitchen queue or the delivery run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub order_id: String,
    pub table_number: u32,
    pub status: OrderStatus,
    pub sent_at: String,
    pub items: Vec<TicketLine>,
}

/// Read-only views over the whole floor.
#[derive(Clone)]
pub struct DashboardService {
    store: Store,
}

impl DashboardService {
    /// Creates a new DashboardService.
    pub fn new(store: Store) -> Self {
        DashboardService { store }
    }

    /// The manager's house overview: every active table with its service
    /// state, plus counts, open revenue, and the occupancy rate.
    pub async fn snapshot(&self, actor: &Session) -> ServiceResult<DashboardSnapshot> {
        actor.require_manager()?;

        let tables = self.store.tables().list_active().await;

        let mut summaries = Vec::with_capacity(tables.len());
        let mut tables_available = 0;
        let mut tables_occupied = 0;
        let mut tables_reserved = 0;
        let mut by_status = [0usize; 4];
        let mut revenue_cents = 0;
        let mut items_sold = 0;

        for table in &tables {
            match table.status {
                TableStatus::Available => tables_available += 1,
                TableStatus::Occupied => tables_occupied += 1,
                TableStatus::Reserved => tables_reserved += 1,
            }
            for order in &table.orders {
                let slot = match order.status {
                    OrderStatus::Pending => 0,
                    OrderStatus::Preparing => 1,
                    OrderStatus::Done => 2,
                    OrderStatus::Delivered => 3,
                };
                by_status[slot] += 1;
                items_sold += order.items.iter().map(|i| i.quantity).sum::<i64>();
            }
            let subtotal_cents = table.orders_subtotal().cents();
            revenue_cents += subtotal_cents;

            summaries.push(TableSummary {
                id: table.id.clone(),
                number: table.number,
                seats: table.seats,
                status: table.status,
                waiter_id: table.waiter_id.clone(),
                order_count: table.orders.len(),
                undelivered_orders: table.undelivered_count(),
                subtotal_cents,
            });
        }

        let occupancy_bps = if tables.is_empty() {
            0
        } else {
            (tables_occupied * 10_000 / tables.len()) as u32
        };

        Ok(DashboardSnapshot {
            tables: summaries,
            tables_available,
            tables_occupied,
            tables_reserved,
            occupancy_bps,
            open_orders: by_status.iter().sum(),
            pending_orders: by_status[0],
            preparing_orders: by_status[1],
            done_orders: by_status[2],
            delivered_orders: by_status[3],
            revenue_cents,
            items_sold,
        })
    }

    /// Orders the kitchen still has to cook, oldest first.
    ///
    /// Pending and preparing orders only: once a ticket is plated it
    /// moves to the delivery run.
    pub async fn kitchen_queue(&self, actor: &Session) -> ServiceResult<Vec<KitchenTicket>> {
        actor.require_cook()?;
        Ok(self
            .collect_tickets(|order| {
                matches!(order.status, OrderStatus::Pending | OrderStatus::Preparing)
            })
            .await)
    }

    /// Plated orders waiting to go out to their tables, oldest first.
    pub async fn delivery_queue(&self, actor: &Session) -> ServiceResult<Vec<KitchenTicket>> {
        actor.require_serve()?;
        Ok(self
            .collect_tickets(|order| order.status == OrderStatus::Done)
            .await)
    }

    async fn collect_tickets<F>(&self, keep: F) -> Vec<KitchenTicket>
    where
        F: Fn(&Order) -> bool,
    {
        let tables = self.store.tables().list_active().await;

        let mut picked: Vec<(u32, Order)> = tables
            .iter()
            .flat_map(|table| {
                table
                    .orders
                    .iter()
                    .filter(|order| keep(order))
                    .map(|order| (table.number, order.clone()))
            })
            .collect();
        picked.sort_by_key(|(_, order)| order.sent_at);

        picked
            .into_iter()
            .map(|(table_number, order)| KitchenTicket {
                order_id: order.id,
                table_number,
                status: order.status,
                sent_at: order.sent_at.to_rfc3339(),
                items: order
                    .items
                    .into_iter()
                    .map(|item| TicketLine {
                        name: item.name_snapshot,
                        quantity: item.quantity,
                        notes: item.notes,
                    })
                    .collect(),
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::floor::FloorService;
    use comanda_core::types::Role;

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

    fn manager() -> Session {
        Session {
            user_id: "manager".to_string(),
            username: "admin".to_string(),
            name: "Admin Manager".to_string(),
            role: Role::Manager,
        }
    }

    struct Fixture {
        floor: FloorService,
        dashboard: DashboardService,
    }

    fn fixture() -> Fixture {
        let store = Store::with_demo_data();
        Fixture {
            floor: FloorService::new(store.clone()),
            dashboard: DashboardService::new(store),
        }
    }

    async fn send_one_burger(f: &Fixture, table_id: &str) -> String {
        f.floor
            .add_to_cart(&waiter(), table_id, "5", 1, None)
            .await
            .unwrap();
        f.floor.send_cart(&waiter(), table_id).await.unwrap().id
    }

    #[tokio::test]
    async fn test_snapshot_counts_the_house() {
        let f = fixture();

        f.floor.start_service(&waiter(), "2").await.unwrap();
        f.floor.reserve(&waiter(), "4").await.unwrap();
        let order_id = send_one_burger(&f, "1").await;
        f.floor
            .advance_order(&cook(), "1", &order_id, OrderStatus::Preparing)
            .await
            .unwrap();
        send_one_burger(&f, "1").await;

        let snap = f.dashboard.snapshot(&manager()).await.unwrap();
        assert_eq!(snap.tables.len(), 12);
        assert_eq!(snap.tables_occupied, 2);
        assert_eq!(snap.tables_reserved, 1);
        assert_eq!(snap.tables_available, 9);
        // 2 occupied of 12 active
        assert_eq!(snap.occupancy_bps, 1666);

        assert_eq!(snap.open_orders, 2);
        assert_eq!(snap.pending_orders, 1);
        assert_eq!(snap.preparing_orders, 1);
        assert_eq!(snap.done_orders, 0);
        assert_eq!(snap.revenue_cents, 2 * 5290);
        assert_eq!(snap.items_sold, 2);

        // Sorted by floor number; table 1 carries both open orders
        assert_eq!(snap.tables[0].number, 1);
        assert_eq!(snap.tables[0].order_count, 2);
        assert_eq!(snap.tables[0].undelivered_orders, 2);
        assert_eq!(snap.tables[0].subtotal_cents, 2 * 5290);
        assert_eq!(snap.tables[1].waiter_id, Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_snapshot_is_manager_only() {
        let f = fixture();

        let err = f.dashboard.snapshot(&waiter()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = f.dashboard.snapshot(&cook()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn test_kitchen_queue_runs_oldest_first() {
        let f = fixture();

        let first = send_one_burger(&f, "3").await;
        f.floor
            .add_to_cart(&waiter(), "5", "10", 2, Some("no ice".to_string()))
            .await
            .unwrap();
        let second = f.floor.send_cart(&waiter(), "5").await.unwrap().id;

        let queue = f.dashboard.kitchen_queue(&cook()).await.unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].order_id, first);
        assert_eq!(queue[0].table_number, 3);
        assert_eq!(queue[1].order_id, second);
        assert_eq!(queue[1].items[0].notes, Some("no ice".to_string()));
        assert_eq!(queue[1].items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_tickets_move_from_kitchen_to_delivery() {
        let f = fixture();
        let order_id = send_one_burger(&f, "3").await;

        f.floor
            .advance_order(&cook(), "3", &order_id, OrderStatus::Preparing)
            .await
            .unwrap();
        f.floor
            .advance_order(&cook(), "3", &order_id, OrderStatus::Done)
            .await
            .unwrap();

        assert!(f.dashboard.kitchen_queue(&cook()).await.unwrap().is_empty());
        let run = f.dashboard.delivery_queue(&waiter()).await.unwrap();
        assert_eq!(run.len(), 1);
        assert_eq!(run[0].status, OrderStatus::Done);

        // Delivered orders leave both boards
        f.floor
            .advance_order(&waiter(), "3", &order_id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert!(f.dashboard.delivery_queue(&waiter()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_queue_role_gates() {
        let f = fixture();

        let err = f.dashboard.kitchen_queue(&waiter()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = f.dashboard.delivery_queue(&cook()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
