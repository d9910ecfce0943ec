//! # Floor Operations
//!
//! Everything a waiter does at a table: starting and releasing services,
//! staging carts, sending to the kitchen, moving orders along, closing.
//!
//! ## A Service, End to End
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Table Service Flow                               │
//! │                                                                         │
//! │  start_service ──► add_to_cart ──► send_cart ──► advance_order ──►      │
//! │  (occupied +       (draft only,    (NEW pending   (kitchen: pending     │
//! │   waiter set)       merged by       Order under     → preparing → done; │
//! │                     item+notes)     table lock)     waiter: → delivered)│
//! │                                                                         │
//! │                                       │ another round? back to          │
//! │                                       ▼ add_to_cart (a NEW order        │
//! │                                         per send, never merged)         │
//! │                                                                         │
//! │  close_table ◄── all orders delivered (payment in checkout does         │
//! │                  this, or the waiter closes a zero-bill table)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Every mutation goes through the store's per-table lock: simultaneous
//! actions on one table run in arrival order, actions on different tables
//! run in parallel. Draft carts are terminal-side and never contended by
//! other tables' work.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use comanda_core::order::Order;
use comanda_core::types::{MenuItem, OrderItem, OrderStatus, Table, TableStatus};
use comanda_core::validation::validate_quantity;
use comanda_core::{Cart, CartTotals, CoreError};
use comanda_store::Store;

use crate::auth::Session;
use crate::carts::DraftCarts;
use crate::error::{ServiceError, ServiceResult};

/// Floor operations: table services, carts, kitchen progress, closing.
#[derive(Clone)]
pub struct FloorService {
    store: Store,
    drafts: Arc<DraftCarts>,
}

impl FloorService {
    /// Creates a new FloorService with its own draft cart registry.
    ///
    /// Each terminal process gets its own registry; the shared truth is the
    /// store behind it.
    pub fn new(store: Store) -> Self {
        FloorService {
            store,
            drafts: Arc::new(DraftCarts::new()),
        }
    }

    // =========================================================================
    // Floor Reads
    // =========================================================================

    /// Lists the tables shown on the floor, sorted by number.
    pub async fn list_tables(&self) -> Vec<Table> {
        self.store.tables().list_active().await
    }

    /// Lists what guests can order right now (86'd items hidden).
    pub async fn list_menu(&self) -> Vec<MenuItem> {
        self.store.menu().list_available().await
    }

    /// Lists categories in menu display order, for the ordering screen tabs.
    pub async fn list_categories(&self) -> Vec<String> {
        self.store.menu().list_categories().await
    }

    /// Gets one table's current state.
    pub async fn get_table(&self, table_id: &str) -> ServiceResult<Table> {
        self.store
            .tables()
            .get_by_id(table_id)
            .await
            .ok_or_else(|| ServiceError::not_found("Table", table_id))
    }

    /// Resumes attending an occupied table. Pure read: navigation into a
    /// running service mutates nothing.
    pub async fn continue_service(&self, actor: &Session, table_id: &str) -> ServiceResult<Table> {
        actor.require_serve()?;

        let table = self.get_table(table_id).await?;
        if table.status != TableStatus::Occupied {
            return Err(CoreError::TableNotAvailable {
                number: table.number,
                status: table.status,
            }
            .into());
        }
        Ok(table)
    }

    // =========================================================================
    // Service Lifecycle
    // =========================================================================

    /// Seats guests: the table becomes occupied and the acting waiter takes
    /// it.
    ///
    /// ## Rules
    /// - Allowed from available, reserved (the expected guests arrived), or
    ///   occupied with zero orders (re-claiming a stale service).
    /// - An occupied table WITH orders is someone's running service; use
    ///   `continue_service`.
    pub async fn start_service(&self, actor: &Session, table_id: &str) -> ServiceResult<Table> {
        actor.require_serve()?;
        debug!(table_id = %table_id, waiter = %actor.username, "start_service");

        let table = self
            .store
            .tables()
            .with_table(table_id, |table| {
                require_on_floor(table)?;
                if table.status == TableStatus::Occupied && table.has_orders() {
                    return Err(CoreError::ServiceInProgress {
                        number: table.number,
                    }
                    .into());
                }
                table.status = TableStatus::Occupied;
                table.waiter_id = Some(actor.user_id.clone());
                Ok::<_, ServiceError>(table.clone())
            })
            .await?;

        info!(table = %table.number, waiter = %actor.username, "Service started");
        Ok(table)
    }

    /// Holds an available table for expected guests.
    pub async fn reserve(&self, actor: &Session, table_id: &str) -> ServiceResult<Table> {
        actor.require_serve()?;
        debug!(table_id = %table_id, "reserve");

        let table = self
            .store
            .tables()
            .with_table(table_id, |table| {
                require_on_floor(table)?;
                if table.status != TableStatus::Available {
                    return Err(CoreError::TableNotAvailable {
                        number: table.number,
                        status: table.status,
                    }
                    .into());
                }
                table.status = TableStatus::Reserved;
                table.waiter_id = Some(actor.user_id.clone());
                Ok::<_, ServiceError>(table.clone())
            })
            .await?;

        info!(table = %table.number, "Table reserved");
        Ok(table)
    }

    /// Frees a table that never got anywhere: a reservation that fell
    /// through, or an occupied table where nothing was ever sent.
    pub async fn release(&self, actor: &Session, table_id: &str) -> ServiceResult<Table> {
        actor.require_serve()?;
        debug!(table_id = %table_id, "release");

        let table = self
            .store
            .tables()
            .with_table(table_id, |table| {
                match table.status {
                    TableStatus::Available => {
                        return Err(CoreError::AlreadyAvailable {
                            number: table.number,
                        }
                        .into());
                    }
                    TableStatus::Occupied if table.has_orders() => {
                        return Err(CoreError::ServiceInProgress {
                            number: table.number,
                        }
                        .into());
                    }
                    TableStatus::Reserved | TableStatus::Occupied => {}
                }
                table.status = TableStatus::Available;
                table.waiter_id = None;
                Ok::<_, ServiceError>(table.clone())
            })
            .await?;

        self.drafts.discard(table_id);
        info!(table = %table.number, "Table released");
        Ok(table)
    }

    // =========================================================================
    // Draft Cart
    // =========================================================================

    /// Returns the draft cart staged for a table on this terminal.
    pub fn get_cart(&self, table_id: &str) -> Cart {
        self.drafts.snapshot(table_id)
    }

    /// Stages an item on a table's draft cart.
    ///
    /// ## Merge Rules
    /// Lines merge only when BOTH the menu item and the note match:
    /// "Burger" twice becomes one line of two; "Burger" and "Burger, no
    /// onions" stay separate lines so the kitchen sees each instruction.
    pub async fn add_to_cart(
        &self,
        actor: &Session,
        table_id: &str,
        menu_item_id: &str,
        quantity: i64,
        notes: Option<String>,
    ) -> ServiceResult<CartTotals> {
        actor.require_serve()?;
        debug!(table_id = %table_id, menu_item_id = %menu_item_id, quantity, "add_to_cart");

        validate_quantity(quantity).map_err(CoreError::from)?;

        let item = self
            .store
            .menu()
            .get_by_id(menu_item_id)
            .await
            .ok_or_else(|| ServiceError::not_found("Menu item", menu_item_id))?;
        if !item.available {
            return Err(ServiceError::validation(format!(
                "'{}' is currently unavailable",
                item.name
            )));
        }

        let line = OrderItem::from_menu_item(Uuid::new_v4().to_string(), &item, quantity, notes);
        self.drafts.with_cart_mut(table_id, |cart| {
            cart.add_line(line)?;
            Ok::<_, ServiceError>(CartTotals::from(&*cart))
        })
    }

    /// Changes a staged line's quantity; zero or less removes the line.
    pub fn update_cart_line(
        &self,
        actor: &Session,
        table_id: &str,
        line_id: &str,
        quantity: i64,
    ) -> ServiceResult<CartTotals> {
        actor.require_serve()?;

        self.drafts.with_cart_mut(table_id, |cart| {
            cart.update_quantity(line_id, quantity)?;
            Ok::<_, ServiceError>(CartTotals::from(&*cart))
        })
    }

    /// Removes a staged line.
    pub fn remove_cart_line(
        &self,
        actor: &Session,
        table_id: &str,
        line_id: &str,
    ) -> ServiceResult<CartTotals> {
        actor.require_serve()?;

        self.drafts.with_cart_mut(table_id, |cart| {
            cart.remove_line(line_id)?;
            Ok::<_, ServiceError>(CartTotals::from(&*cart))
        })
    }

    /// Throws away everything staged for a table.
    pub fn clear_cart(&self, actor: &Session, table_id: &str) -> ServiceResult<()> {
        actor.require_serve()?;
        self.drafts.discard(table_id);
        Ok(())
    }

    // =========================================================================
    // Kitchen
    // =========================================================================

    /// Sends the staged cart to the kitchen as a NEW pending order.
    ///
    /// ## Rules
    /// - The cart must not be empty.
    /// - Every send creates its own order; two identical sends make two
    ///   orders. Batches are never merged.
    /// - The table becomes occupied and assigned to the acting waiter, so a
    ///   direct order on a free table also opens the service.
    pub async fn send_cart(&self, actor: &Session, table_id: &str) -> ServiceResult<Order> {
        actor.require_serve()?;
        debug!(table_id = %table_id, waiter = %actor.username, "send_cart");

        // Drain the live draft in one step: lines staged on another terminal
        // after this point stay in the draft for the next send.
        let lines = self.drafts.take(table_id);
        let order_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let placed = self
            .store
            .tables()
            .with_table(table_id, |table| {
                require_on_floor(table)?;
                let order = Order::place(
                    order_id.clone(),
                    table.number,
                    actor.user_id.clone(),
                    lines.clone(),
                    now,
                )?;
                table.orders.push(order.clone());
                table.status = TableStatus::Occupied;
                table.waiter_id = Some(actor.user_id.clone());
                Ok::<_, ServiceError>(order)
            })
            .await;

        let order = match placed {
            Ok(order) => order,
            Err(err) => {
                // A failed send must not eat the staged cart.
                self.drafts.restore(table_id, lines);
                return Err(err);
            }
        };
        info!(
            order_id = %order.id,
            table = %order.table_number,
            total = %order.total_cents,
            lines = order.items.len(),
            "Order sent to kitchen"
        );
        Ok(order)
    }

    /// Moves one order a single stage forward.
    ///
    /// ## Who May Advance What
    /// - `pending → preparing`, `preparing → done`: kitchen staff
    /// - `done → delivered`: floor staff
    ///
    /// Re-requesting the order's current status is an idempotent no-op, so
    /// a double-tap on the kitchen screen never errors or re-stamps.
    pub async fn advance_order(
        &self,
        actor: &Session,
        table_id: &str,
        order_id: &str,
        target: OrderStatus,
    ) -> ServiceResult<Order> {
        match target {
            OrderStatus::Preparing | OrderStatus::Done => actor.require_cook()?,
            OrderStatus::Delivered => actor.require_serve()?,
            OrderStatus::Pending => {}
        }
        debug!(table_id = %table_id, order_id = %order_id, target = %target, "advance_order");

        let now = Utc::now();
        let (order, transition) = self
            .store
            .tables()
            .with_table(table_id, |table| {
                let order = table
                    .find_order_mut(order_id)
                    .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;
                let transition = order.advance(target, now)?;
                Ok::<_, ServiceError>((order.clone(), transition))
            })
            .await?;

        if transition.changed() {
            info!(order_id = %order.id, table = %order.table_number, status = %order.status, "Order advanced");
        }
        Ok(order)
    }

    // =========================================================================
    // Closing
    // =========================================================================

    /// Ends a service: clears the table's orders and waiter, frees the
    /// table.
    ///
    /// Requires every order delivered (or none at all). Payment calls this
    /// through checkout; calling it directly only makes sense for tables
    /// that never ran up a bill.
    pub async fn close_table(&self, actor: &Session, table_id: &str) -> ServiceResult<Table> {
        actor.require_serve()?;
        debug!(table_id = %table_id, "close_table");

        let table = self
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
                table.orders.clear();
                table.waiter_id = None;
                table.status = TableStatus::Available;
                Ok::<_, ServiceError>(table.clone())
            })
            .await?;

        self.drafts.discard(table_id);
        info!(table = %table.number, "Table closed");
        Ok(table)
    }
}

/// Retired tables take no service of any kind.
fn require_on_floor(table: &Table) -> ServiceResult<()> {
    if table.active {
        Ok(())
    } else {
        Err(ServiceError::invalid_state(format!(
            "Table {} is retired from the floor",
            table.number
        )))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use comanda_core::types::Role;

    fn waiter() -> Session {
        Session {
            user_id: "1".to_string(),
            username: "john".to_string(),
            name: "John Silva".to_string(),
            role: Role::Waiter,
        }
    }

    fn second_waiter() -> Session {
        Session {
            user_id: "2".to_string(),
            username: "mary".to_string(),
            name: "Mary Santos".to_string(),
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

    fn demo_floor() -> FloorService {
        FloorService::new(Store::with_demo_data())
    }

    /// Seeded menu item id for "Artisan Burger" (5290 cents).
    const BURGER: &str = "5";
    /// Seeded menu item id for "Soda" (800 cents).
    const SODA: &str = "10";

    async fn send_one_order(floor: &FloorService, table_id: &str) -> Order {
        floor
            .add_to_cart(&waiter(), table_id, BURGER, 1, None)
            .await
            .unwrap();
        floor.send_cart(&waiter(), table_id).await.unwrap()
    }

    async fn deliver(floor: &FloorService, table_id: &str, order_id: &str) {
        for target in [OrderStatus::Preparing, OrderStatus::Done] {
            floor
                .advance_order(&cook(), table_id, order_id, target)
                .await
                .unwrap();
        }
        floor
            .advance_order(&waiter(), table_id, order_id, OrderStatus::Delivered)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_start_service_occupies_and_assigns() {
        let floor = demo_floor();

        let table = floor.start_service(&waiter(), "3").await.unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.waiter_id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_start_service_on_running_service_fails() {
        let floor = demo_floor();
        floor.start_service(&waiter(), "3").await.unwrap();
        send_one_order(&floor, "3").await;

        let err = floor.start_service(&second_waiter(), "3").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message, "Table 3 already has service in progress");

        // The running service is reachable read-only
        let table = floor.continue_service(&second_waiter(), "3").await.unwrap();
        assert_eq!(table.orders.len(), 1);
    }

    #[tokio::test]
    async fn test_start_service_reclaims_orderless_table() {
        let floor = demo_floor();
        floor.start_service(&waiter(), "3").await.unwrap();

        // Nothing sent yet, so another waiter may take it over
        let table = floor.start_service(&second_waiter(), "3").await.unwrap();
        assert_eq!(table.waiter_id.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_reserve_then_arrival() {
        let floor = demo_floor();

        let table = floor.reserve(&waiter(), "4").await.unwrap();
        assert_eq!(table.status, TableStatus::Reserved);
        assert_eq!(table.waiter_id.as_deref(), Some("1"));

        // Reserving again fails; the guests arriving starts the service
        let err = floor.reserve(&second_waiter(), "4").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        let table = floor.start_service(&waiter(), "4").await.unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
    }

    #[tokio::test]
    async fn test_release_paths() {
        let floor = demo_floor();

        // Releasing an available table is already done
        let err = floor.release(&waiter(), "6").await.unwrap_err();
        assert_eq!(err.message, "Table 6 is already available");

        // Reservation fell through
        floor.reserve(&waiter(), "6").await.unwrap();
        let table = floor.release(&waiter(), "6").await.unwrap();
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.waiter_id.is_none());

        // Occupied with orders cannot be released
        floor.start_service(&waiter(), "6").await.unwrap();
        send_one_order(&floor, "6").await;
        let err = floor.release(&waiter(), "6").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }

    #[tokio::test]
    async fn test_cart_merges_by_item_and_notes() {
        let floor = demo_floor();

        floor.add_to_cart(&waiter(), "3", BURGER, 1, None).await.unwrap();
        floor.add_to_cart(&waiter(), "3", BURGER, 2, None).await.unwrap();
        let totals = floor
            .add_to_cart(&waiter(), "3", BURGER, 1, Some("no onions".to_string()))
            .await
            .unwrap();

        // Plain burgers merged into one line; the noted burger stays its own
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 4);
        assert_eq!(totals.subtotal_cents, 4 * 5290);
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_unknown_and_unavailable() {
        let floor = demo_floor();

        let err = floor
            .add_to_cart(&waiter(), "3", "ghost-item", 1, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        floor
            .store
            .menu()
            .set_availability(BURGER, false)
            .await
            .unwrap();
        let err = floor
            .add_to_cart(&waiter(), "3", BURGER, 1, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_send_empty_cart_fails() {
        let floor = demo_floor();
        let err = floor.send_cart(&waiter(), "3").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cart is empty");
    }

    #[tokio::test]
    async fn test_each_send_creates_a_new_order() {
        let floor = demo_floor();
        floor.start_service(&waiter(), "3").await.unwrap();

        let first = send_one_order(&floor, "3").await;
        // Draft is gone after a successful send
        assert!(floor.get_cart("3").is_empty());

        // Identical items again: a second, distinct order
        let second = send_one_order(&floor, "3").await;
        assert_ne!(first.id, second.id);

        let table = floor.get_table("3").await.unwrap();
        assert_eq!(table.orders.len(), 2);
        assert!(table.orders.iter().all(|o| o.status == OrderStatus::Pending));
    }

    #[tokio::test]
    async fn test_send_cart_opens_service_directly() {
        let floor = demo_floor();

        // No start_service call; the send itself seats the table
        let order = send_one_order(&floor, "7").await;
        assert_eq!(order.table_number, 7);

        let table = floor.get_table("7").await.unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.waiter_id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_failed_send_keeps_the_cart() {
        let store = Store::with_demo_data();
        let floor = FloorService::new(store.clone());

        floor
            .add_to_cart(&waiter(), "8", BURGER, 1, None)
            .await
            .unwrap();
        store
            .tables()
            .with_table("8", |table| {
                table.active = false;
                Ok::<_, comanda_store::StoreError>(())
            })
            .await
            .unwrap();

        let err = floor.send_cart(&waiter(), "8").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        // The staged line survives the failed send
        let cart = floor.get_cart("8");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.subtotal_cents(), 5290);
    }

    #[tokio::test]
    async fn test_advance_roles_by_stage() {
        let floor = demo_floor();
        let order = send_one_order(&floor, "3").await;

        // Waiter may not run the kitchen stages
        let err = floor
            .advance_order(&waiter(), "3", &order.id, OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        floor
            .advance_order(&cook(), "3", &order.id, OrderStatus::Preparing)
            .await
            .unwrap();
        floor
            .advance_order(&cook(), "3", &order.id, OrderStatus::Done)
            .await
            .unwrap();

        // Kitchen may not deliver
        let err = floor
            .advance_order(&cook(), "3", &order.id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let delivered = floor
            .advance_order(&waiter(), "3", &order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert!(delivered.delivered_at.is_some());
    }

    #[tokio::test]
    async fn test_advance_skip_rejected_and_retry_safe() {
        let floor = demo_floor();
        let order = send_one_order(&floor, "3").await;

        let err = floor
            .advance_order(&cook(), "3", &order.id, OrderStatus::Done)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(
            err.message,
            format!("Order {} cannot move from pending to done", order.id)
        );

        let first = floor
            .advance_order(&cook(), "3", &order.id, OrderStatus::Preparing)
            .await
            .unwrap();
        // Double-tap: same target again must change nothing
        let retry = floor
            .advance_order(&cook(), "3", &order.id, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(retry.preparing_at, first.preparing_at);
    }

    #[tokio::test]
    async fn test_advance_unknown_order() {
        let floor = demo_floor();
        floor.start_service(&waiter(), "3").await.unwrap();

        let err = floor
            .advance_order(&cook(), "3", "ghost", OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_close_requires_all_delivered() {
        let floor = demo_floor();
        let order = send_one_order(&floor, "3").await;

        let err = floor.close_table(&waiter(), "3").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message, "Table 3 has 1 undelivered order(s)");

        deliver(&floor, "3", &order.id).await;
        let table = floor.close_table(&waiter(), "3").await.unwrap();
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.orders.is_empty());
        assert!(table.waiter_id.is_none());
    }

    #[tokio::test]
    async fn test_close_zero_bill_table() {
        let floor = demo_floor();
        floor.start_service(&waiter(), "3").await.unwrap();
        floor.add_to_cart(&waiter(), "3", SODA, 1, None).await.unwrap();

        // Nothing was ever sent; closing is fine and drops the draft
        let table = floor.close_table(&waiter(), "3").await.unwrap();
        assert_eq!(table.status, TableStatus::Available);
        assert!(floor.get_cart("3").is_empty());
    }

    #[tokio::test]
    async fn test_kitchen_cannot_run_floor_ops() {
        let floor = demo_floor();
        let err = floor.start_service(&cook(), "3").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sends_append_both_orders() {
        // Two terminals, one table: the per-table lock must keep both sends.
        let store = Store::with_demo_data();
        let terminal_a = FloorService::new(store.clone());
        let terminal_b = FloorService::new(store.clone());

        terminal_a
            .add_to_cart(&waiter(), "9", BURGER, 1, None)
            .await
            .unwrap();
        terminal_b
            .add_to_cart(&second_waiter(), "9", SODA, 2, None)
            .await
            .unwrap();

        let a = tokio::spawn({
            let floor = terminal_a.clone();
            async move { floor.send_cart(&waiter(), "9").await }
        });
        let b = tokio::spawn({
            let floor = terminal_b.clone();
            async move { floor.send_cart(&second_waiter(), "9").await }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let table = store.tables().get_by_id("9").await.unwrap();
        assert_eq!(table.orders.len(), 2);
        let total: i64 = table.orders.iter().map(|o| o.total_cents).sum();
        assert_eq!(total, 5290 + 2 * 800);
    }
}
