//! # Administration
//!
//! Manager-only CRUD: menu items, categories, floor tables, waiter accounts.
//!
//! ## What Edits Can and Cannot Touch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu edits      ► future carts only. Sent orders carry name and       │
//! │                    price snapshots; no edit rewrites a bill.            │
//! │  Category edits  ► renames cascade to every item; deletion only        │
//! │                    when the category is empty.                          │
//! │  Table edits     ► retiring or deleting requires the table idle;       │
//! │                    a running service always finishes first.             │
//! │  Staff edits     ► waiter accounts only; the kitchen and manager        │
//! │                    accounts are fixtures and refuse changes.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use comanda_core::types::{MenuItem, Role, Table, TableStatus, User};
use comanda_core::validation::{
    validate_category_name, validate_display_name, validate_item_name, validate_password,
    validate_price_cents, validate_seats, validate_table_number, validate_username,
};
use comanda_core::CoreError;
use comanda_store::Store;

use crate::auth::Session;
use crate::error::{ServiceError, ServiceResult};

/// Fields a manager fills in when creating or editing a menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub category: String,
    pub image_url: Option<String>,
}

/// Fields for a new waiter account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiterInput {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Fields for editing a waiter account. A missing password keeps the
/// current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiterUpdate {
    pub name: String,
    pub username: String,
    pub password: Option<String>,
}

/// Manager-only administration operations.
#[derive(Clone)]
pub struct AdminService {
    store: Store,
}

impl AdminService {
    /// Creates a new AdminService.
    pub fn new(store: Store) -> Self {
        AdminService { store }
    }

    // =========================================================================
    // Menu Items
    // =========================================================================

    /// Lists the whole catalog, 86'd items included.
    pub async fn list_menu(&self, actor: &Session) -> ServiceResult<Vec<MenuItem>> {
        actor.require_manager()?;
        Ok(self.store.menu().list().await)
    }

    /// Adds a dish or drink to the menu.
    pub async fn create_menu_item(
        &self,
        actor: &Session,
        input: MenuItemInput,
    ) -> ServiceResult<MenuItem> {
        actor.require_manager()?;
        debug!(name = %input.name, "create_menu_item");

        validate_item_name(&input.name).map_err(CoreError::from)?;
        validate_price_cents(input.price_cents).map_err(CoreError::from)?;
        validate_category_name(&input.category).map_err(CoreError::from)?;

        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            description: input.description,
            price_cents: input.price_cents,
            category: input.category,
            image_url: input.image_url,
            available: true,
            created_at: now,
            updated_at: now,
        };
        let item = self.store.menu().insert(&item).await?;

        info!(id = %item.id, name = %item.name, "Menu item created");
        Ok(item)
    }

    /// Edits a menu item. Only future cart lines see the change; every
    /// order already sent keeps its frozen name and price.
    pub async fn update_menu_item(
        &self,
        actor: &Session,
        id: &str,
        input: MenuItemInput,
    ) -> ServiceResult<MenuItem> {
        actor.require_manager()?;
        debug!(id = %id, "update_menu_item");

        validate_item_name(&input.name).map_err(CoreError::from)?;
        validate_price_cents(input.price_cents).map_err(CoreError::from)?;
        validate_category_name(&input.category).map_err(CoreError::from)?;

        let mut item = self
            .store
            .menu()
            .get_by_id(id)
            .await
            .ok_or_else(|| ServiceError::not_found("Menu item", id))?;
        item.name = input.name.trim().to_string();
        item.description = input.description;
        item.price_cents = input.price_cents;
        item.category = input.category;
        item.image_url = input.image_url;

        let item = self.store.menu().update(&item).await?;
        info!(id = %item.id, "Menu item updated");
        Ok(item)
    }

    /// 86's an item or brings it back, without touching anything else.
    pub async fn set_item_availability(
        &self,
        actor: &Session,
        id: &str,
        available: bool,
    ) -> ServiceResult<MenuItem> {
        actor.require_manager()?;
        let item = self.store.menu().set_availability(id, available).await?;
        info!(id = %item.id, available, "Menu item availability set");
        Ok(item)
    }

    /// Removes an item from the catalog. Past orders keep their snapshots.
    pub async fn delete_menu_item(&self, actor: &Session, id: &str) -> ServiceResult<()> {
        actor.require_manager()?;
        self.store.menu().delete(id).await?;
        info!(id = %id, "Menu item deleted");
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Lists categories in menu display order.
    pub async fn list_categories(&self, actor: &Session) -> ServiceResult<Vec<String>> {
        actor.require_manager()?;
        Ok(self.store.menu().list_categories().await)
    }

    /// Appends a new category to the menu.
    pub async fn create_category(&self, actor: &Session, name: &str) -> ServiceResult<()> {
        actor.require_manager()?;
        validate_category_name(name).map_err(CoreError::from)?;

        self.store.menu().add_category(name.trim()).await?;
        info!(name = %name, "Category created");
        Ok(())
    }

    /// Renames a category, retagging every item in it atomically.
    ///
    /// ## Returns
    /// How many menu items moved to the new name.
    pub async fn rename_category(
        &self,
        actor: &Session,
        old: &str,
        new: &str,
    ) -> ServiceResult<usize> {
        actor.require_manager()?;
        validate_category_name(new).map_err(CoreError::from)?;

        let retagged = self.store.menu().rename_category(old, new.trim()).await?;
        info!(old = %old, new = %new, retagged, "Category renamed");
        Ok(retagged)
    }

    /// Removes an empty category.
    pub async fn delete_category(&self, actor: &Session, name: &str) -> ServiceResult<()> {
        actor.require_manager()?;
        self.store.menu().delete_category(name).await?;
        info!(name = %name, "Category deleted");
        Ok(())
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Lists every table, retired ones included.
    pub async fn list_tables(&self, actor: &Session) -> ServiceResult<Vec<Table>> {
        actor.require_manager()?;
        Ok(self.store.tables().list().await)
    }

    /// Adds a table to the floor.
    pub async fn create_table(
        &self,
        actor: &Session,
        number: u32,
        seats: u32,
    ) -> ServiceResult<Table> {
        actor.require_manager()?;
        debug!(number, seats, "create_table");

        validate_table_number(number).map_err(CoreError::from)?;
        validate_seats(seats).map_err(CoreError::from)?;

        let table = Table::new(Uuid::new_v4().to_string(), number, seats);
        let table = self.store.tables().insert(&table).await?;

        info!(number = %table.number, "Table created");
        Ok(table)
    }

    /// Changes a table's floor number or seat count.
    pub async fn update_table(
        &self,
        actor: &Session,
        id: &str,
        number: u32,
        seats: u32,
    ) -> ServiceResult<Table> {
        actor.require_manager()?;
        debug!(id = %id, number, seats, "update_table");

        validate_table_number(number).map_err(CoreError::from)?;
        validate_seats(seats).map_err(CoreError::from)?;

        let mut table = self
            .store
            .tables()
            .get_by_id(id)
            .await
            .ok_or_else(|| ServiceError::not_found("Table", id))?;
        table.number = number;
        table.seats = seats;

        self.store.tables().save(&table).await?;
        info!(id = %id, number, "Table updated");
        Ok(table)
    }

    /// Puts a table on the floor or retires it from service.
    ///
    /// Retiring requires the table idle: a running service or reservation
    /// always finishes first.
    pub async fn set_table_active(
        &self,
        actor: &Session,
        id: &str,
        active: bool,
    ) -> ServiceResult<Table> {
        actor.require_manager()?;
        debug!(id = %id, active, "set_table_active");

        let table = self
            .store
            .tables()
            .with_table(id, |table| {
                if !active && table.status != TableStatus::Available {
                    return Err(CoreError::TableNotAvailable {
                        number: table.number,
                        status: table.status,
                    }
                    .into());
                }
                table.active = active;
                Ok::<_, ServiceError>(table.clone())
            })
            .await?;

        info!(number = %table.number, active, "Table activity set");
        Ok(table)
    }

    /// Removes a table entirely. Only an idle table can go.
    pub async fn delete_table(&self, actor: &Session, id: &str) -> ServiceResult<()> {
        actor.require_manager()?;
        debug!(id = %id, "delete_table");

        let table = self
            .store
            .tables()
            .get_by_id(id)
            .await
            .ok_or_else(|| ServiceError::not_found("Table", id))?;
        if table.status != TableStatus::Available {
            return Err(CoreError::TableNotAvailable {
                number: table.number,
                status: table.status,
            }
            .into());
        }

        self.store.tables().delete(id).await?;
        info!(number = %table.number, "Table deleted");
        Ok(())
    }

    // =========================================================================
    // Waiters
    // =========================================================================

    /// Lists waiter accounts, sorted by name.
    pub async fn list_waiters(&self, actor: &Session) -> ServiceResult<Vec<User>> {
        actor.require_manager()?;
        Ok(self.store.users().list_waiters().await)
    }

    /// Creates a waiter account.
    pub async fn create_waiter(
        &self,
        actor: &Session,
        input: WaiterInput,
    ) -> ServiceResult<User> {
        actor.require_manager()?;
        debug!(username = %input.username, "create_waiter");

        validate_display_name(&input.name).map_err(CoreError::from)?;
        validate_username(&input.username).map_err(CoreError::from)?;
        validate_password(&input.password).map_err(CoreError::from)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            username: input.username.trim().to_string(),
            password: input.password,
            role: Role::Waiter,
            created_at: now,
            updated_at: now,
        };
        let user = self.store.users().insert(&user).await?;

        info!(username = %user.username, "Waiter created");
        Ok(user)
    }

    /// Edits a waiter account. Leaving the password out keeps the current
    /// one.
    pub async fn update_waiter(
        &self,
        actor: &Session,
        id: &str,
        input: WaiterUpdate,
    ) -> ServiceResult<User> {
        actor.require_manager()?;
        debug!(id = %id, "update_waiter");

        validate_display_name(&input.name).map_err(CoreError::from)?;
        validate_username(&input.username).map_err(CoreError::from)?;
        if let Some(password) = &input.password {
            validate_password(password).map_err(CoreError::from)?;
        }

        let mut user = self
            .store
            .users()
            .get_by_id(id)
            .await
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        user.name = input.name.trim().to_string();
        user.username = input.username.trim().to_string();
        if let Some(password) = input.password {
            user.password = password;
        }

        let user = self.store.users().update(&user).await?;
        info!(username = %user.username, "Waiter updated");
        Ok(user)
    }

    /// Removes a waiter account.
    pub async fn delete_waiter(&self, actor: &Session, id: &str) -> ServiceResult<()> {
        actor.require_manager()?;
        self.store.users().delete(id).await?;
        info!(id = %id, "Waiter deleted");
        Ok(())
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

    fn manager() -> Session {
        Session {
            user_id: "manager".to_string(),
            username: "admin".to_string(),
            name: "Admin Manager".to_string(),
            role: Role::Manager,
        }
    }

    fn waiter() -> Session {
        Session {
            user_id: "1".to_string(),
            username: "john".to_string(),
            name: "John Silva".to_string(),
            role: Role::Waiter,
        }
    }

    fn demo_admin() -> AdminService {
        AdminService::new(Store::with_demo_data())
    }

    fn item_input(name: &str, category: &str, price_cents: i64) -> MenuItemInput {
        MenuItemInput {
            name: name.to_string(),
            description: None,
            price_cents,
            category: category.to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_only_managers_administer() {
        let admin = demo_admin();
        let err = admin.list_menu(&waiter()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = admin.create_table(&waiter(), 20, 4).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn test_create_menu_item_in_known_category() {
        let admin = demo_admin();

        let item = admin
            .create_menu_item(&manager(), item_input("Feijoada", "Main Courses", 6490))
            .await
            .unwrap();
        assert!(item.available);
        assert_eq!(item.price_cents, 6490);

        let err = admin
            .create_menu_item(&manager(), item_input("Ghost Dish", "Nonexistent", 100))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_menu_item_validation() {
        let admin = demo_admin();

        let err = admin
            .create_menu_item(&manager(), item_input("", "Desserts", 100))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = admin
            .create_menu_item(&manager(), item_input("Free Lunch", "Desserts", -1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_price_edit_never_rewrites_sent_orders() {
        let store = Store::with_demo_data();
        let admin = AdminService::new(store.clone());
        let floor = FloorService::new(store.clone());

        // Send one Artisan Burger (id "5", 5290) to table 3
        floor.add_to_cart(&waiter(), "3", "5", 1, None).await.unwrap();
        floor.send_cart(&waiter(), "3").await.unwrap();

        // Manager doubles the price afterwards
        admin
            .update_menu_item(
                &manager(),
                "5",
                item_input("Artisan Burger", "Main Courses", 9990),
            )
            .await
            .unwrap();

        let table = store.tables().get_by_id("3").await.unwrap();
        assert_eq!(table.orders[0].total_cents, 5290);
        assert_eq!(table.orders[0].items[0].unit_price_cents, 5290);
    }

    #[tokio::test]
    async fn test_category_rename_cascades() {
        let admin = demo_admin();

        let retagged = admin
            .rename_category(&manager(), "Beverages", "Drinks")
            .await
            .unwrap();
        assert_eq!(retagged, 4);

        let menu = admin.list_menu(&manager()).await.unwrap();
        assert!(menu.iter().any(|i| i.category == "Drinks"));
        assert!(menu.iter().all(|i| i.category != "Beverages"));
    }

    #[tokio::test]
    async fn test_category_delete_guards() {
        let admin = demo_admin();

        let err = admin
            .delete_category(&manager(), "Desserts")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        // Reassign every dessert, then deletion goes through
        let desserts: Vec<MenuItem> = admin
            .list_menu(&manager())
            .await
            .unwrap()
            .into_iter()
            .filter(|i| i.category == "Desserts")
            .collect();
        for item in desserts {
            let mut input = item_input(&item.name, "Appetizers", item.price_cents);
            input.description = item.description.clone();
            admin
                .update_menu_item(&manager(), &item.id, input)
                .await
                .unwrap();
        }
        admin.delete_category(&manager(), "Desserts").await.unwrap();

        let err = admin
            .create_category(&manager(), "Appetizers")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_table_crud_and_duplicate_number() {
        let admin = demo_admin();

        let table = admin.create_table(&manager(), 13, 6).await.unwrap();
        assert_eq!(table.seats, 6);

        let err = admin.create_table(&manager(), 13, 2).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "number '13' already exists");

        let updated = admin
            .update_table(&manager(), &table.id, 14, 8)
            .await
            .unwrap();
        assert_eq!(updated.number, 14);

        admin.delete_table(&manager(), &table.id).await.unwrap();
        let err = admin
            .delete_table(&manager(), &table.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_busy_table_cannot_be_retired_or_deleted() {
        let store = Store::with_demo_data();
        let admin = AdminService::new(store.clone());
        let floor = FloorService::new(store.clone());

        floor.start_service(&waiter(), "2").await.unwrap();

        let err = admin
            .set_table_active(&manager(), "2", false)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message, "Table 2 is occupied, not available");

        let err = admin.delete_table(&manager(), "2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        // An undelivered order holds the table just as firmly
        floor.add_to_cart(&waiter(), "3", "5", 1, None).await.unwrap();
        floor.send_cart(&waiter(), "3").await.unwrap();
        let err = admin
            .set_table_active(&manager(), "3", false)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        // Released again, retiring works and hides it from the floor
        floor.release(&waiter(), "2").await.unwrap();
        let table = admin.set_table_active(&manager(), "2", false).await.unwrap();
        assert!(!table.active);
        assert!(floor.list_tables().await.iter().all(|t| t.number != 2));
    }

    #[tokio::test]
    async fn test_waiter_crud() {
        let admin = demo_admin();

        let created = admin
            .create_waiter(
                &manager(),
                WaiterInput {
                    name: "Carla Lima".to_string(),
                    username: "carla".to_string(),
                    password: "waiter123".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.role, Role::Waiter);

        // Password survives an update that omits it
        let updated = admin
            .update_waiter(
                &manager(),
                &created.id,
                WaiterUpdate {
                    name: "Carla de Lima".to_string(),
                    username: "carla".to_string(),
                    password: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.password, "waiter123");

        admin.delete_waiter(&manager(), &created.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_waiter_duplicate_username() {
        let admin = demo_admin();
        let err = admin
            .create_waiter(
                &manager(),
                WaiterInput {
                    name: "John Again".to_string(),
                    username: "john".to_string(),
                    password: "waiter123".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_fixture_accounts_protected() {
        let admin = demo_admin();

        let err = admin.delete_waiter(&manager(), "kitchen").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = admin
            .update_waiter(
                &manager(),
                "manager",
                WaiterUpdate {
                    name: "Renamed".to_string(),
                    username: "admin".to_string(),
                    password: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let admin = demo_admin();
        let err = admin
            .create_waiter(
                &manager(),
                WaiterInput {
                    name: "Shorty".to_string(),
                    username: "shorty".to_string(),
                    password: "123".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("at least 6"));
    }
}
