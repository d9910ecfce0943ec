// =============================================================================
// comanda-service: Operation Layer
// =============================================================================
// Every operation a POS terminal can run: signing in, floor service, carts,
// kitchen progress, checkout, dashboards, and administration. Each operation
// checks the caller's role, validates input, runs the business rules from
// comanda-core against the state in comanda-store, and maps every failure
// to a coded ServiceError the frontend can match on.
// =============================================================================

//! # Comanda Service
//!
//! The operation layer of the POS backend.
//!
//! ## Module Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          comanda-service                                │
//! │                                                                         │
//! │  auth       Sign-in and the Session role gates every operation takes    │
//! │  floor      Table services, draft carts, sending, kitchen progress      │
//! │  checkout   Bill previews, splits, payment, receipts                    │
//! │  dashboard  House snapshot, kitchen queue, delivery run                 │
//! │  admin      Manager CRUD: menu, categories, tables, waiters             │
//! │  carts      The terminal-side draft cart registry                       │
//! │  error      ServiceError and the wire-facing error codes                │
//! │  telemetry  Tracing subscriber setup                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use comanda_core::types::Role;
//! use comanda_service::Services;
//! use comanda_store::Store;
//!
//! comanda_service::init_tracing();
//!
//! let services = Services::new(Store::with_demo_data());
//! let session = services.auth.login("john", "waiter123", Role::Waiter).await?;
//! services.floor.start_service(&session, table_id).await?;
//! ```

pub mod admin;
pub mod auth;
pub mod carts;
pub mod checkout;
pub mod dashboard;
pub mod error;
pub mod floor;
pub mod telemetry;

pub use admin::{AdminService, MenuItemInput, WaiterInput, WaiterUpdate};
pub use auth::{AuthService, Session};
pub use carts::DraftCarts;
pub use checkout::{BillPreview, CheckoutService, Receipt, ReceiptLine};
pub use dashboard::{DashboardService, DashboardSnapshot, KitchenTicket, TableSummary, TicketLine};
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use floor::FloorService;
pub use telemetry::init_tracing;

use comanda_store::Store;

/// Every service a terminal needs, built over one shared store.
///
/// ## Example
/// ```rust,ignore
/// let services = Services::new(Store::with_demo_data());
/// let session = services.auth.login("admin", "admin123", Role::Manager).await?;
/// let menu = services.admin.list_menu(&session).await?;
/// ```
pub struct Services {
    pub auth: AuthService,
    pub floor: FloorService,
    pub checkout: CheckoutService,
    pub dashboard: DashboardService,
    pub admin: AdminService,
}

impl Services {
    /// Wires every service to the same store.
    pub fn new(store: Store) -> Self {
        Services {
            auth: AuthService::new(store.clone()),
            floor: FloorService::new(store.clone()),
            checkout: CheckoutService::new(store.clone()),
            dashboard: DashboardService::new(store.clone()),
            admin: AdminService::new(store),
        }
    }
}
