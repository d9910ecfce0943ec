//! # Table Repository
//!
//! Shelf operations for floor tables, including the per-table lock that
//! serializes service operations.
//!
//! ## Per-Table Serialization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              How Concurrent Floor Operations Behave                     │
//! │                                                                         │
//! │  Waiter A: add items to table 5 ──┐                                    │
//! │  Waiter B: send table 5 to kitchen ├──► same mutex → run one at a time │
//! │  Kitchen:  advance table 5 order ──┘      (in arrival order)           │
//! │                                                                         │
//! │  Waiter C: add items to table 8 ────► different mutex → runs in        │
//! │                                        parallel with all of the above  │
//! │                                                                         │
//! │  Each operation: lock → clone → mutate the clone → commit on Ok.       │
//! │  An operation that fails commits NOTHING; the table stays exactly      │
//! │  as the previous operation left it.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use comanda_core::types::Table;

use crate::error::{StoreError, StoreResult};
use crate::store::Shelves;

/// Repository for floor table operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.tables();
///
/// // Snapshot the floor
/// let floor = repo.list_active().await;
///
/// // Serialized read-modify-write on one table
/// repo.with_table("3", |table| {
///     table.status = TableStatus::Occupied;
///     Ok(())
/// }).await?;
/// ```
#[derive(Clone)]
pub struct TableRepository {
    shelves: Arc<Shelves>,
}

impl TableRepository {
    /// Creates a new TableRepository.
    pub(crate) fn new(shelves: Arc<Shelves>) -> Self {
        TableRepository { shelves }
    }

    /// Lists all tables, sorted by floor number.
    pub async fn list(&self) -> Vec<Table> {
        let shelf = self.shelves.tables.read().await;
        let mut tables = Vec::with_capacity(shelf.len());
        for slot in shelf.values() {
            tables.push(slot.lock().await.clone());
        }
        tables.sort_by_key(|t| t.number);
        tables
    }

    /// Lists tables shown on the floor (active only), sorted by number.
    pub async fn list_active(&self) -> Vec<Table> {
        let mut tables = self.list().await;
        tables.retain(|t| t.active);
        tables
    }

    /// Gets a table snapshot by its ID.
    ///
    /// ## Returns
    /// * `Some(Table)` - A clone of the table's current state
    /// * `None` - No table with that ID
    pub async fn get_by_id(&self, id: &str) -> Option<Table> {
        let slot = self.shelves.tables.read().await.get(id).cloned()?;
        let table = slot.lock().await;
        Some(table.clone())
    }

    /// Gets a table snapshot by its floor number.
    pub async fn get_by_number(&self, number: u32) -> Option<Table> {
        let shelf = self.shelves.tables.read().await;
        for slot in shelf.values() {
            let table = slot.lock().await;
            if table.number == number {
                return Some(table.clone());
            }
        }
        None
    }

    /// Inserts a new table.
    ///
    /// ## Returns
    /// * `Ok(Table)` - Inserted table
    /// * `Err(StoreError::Duplicate)` - ID or floor number already taken
    pub async fn insert(&self, table: &Table) -> StoreResult<Table> {
        debug!(number = %table.number, "Inserting table");

        let mut shelf = self.shelves.tables.write().await;

        if shelf.contains_key(&table.id) {
            return Err(StoreError::duplicate("id", &table.id));
        }
        for slot in shelf.values() {
            if slot.lock().await.number == table.number {
                return Err(StoreError::duplicate("number", table.number.to_string()));
            }
        }

        shelf.insert(table.id.clone(), Arc::new(Mutex::new(table.clone())));
        Ok(table.clone())
    }

    /// Saves a table's full state, keyed by id: replaces the stored table
    /// when the id exists, inserts it when it doesn't (admin edits: number,
    /// seats, active).
    ///
    /// ## Returns
    /// * `Err(StoreError::Duplicate)` - Floor number taken by another table
    pub async fn save(&self, table: &Table) -> StoreResult<()> {
        debug!(id = %table.id, "Saving table");

        // Write lock on the shelf so two saves cannot race a number swap.
        let mut shelf = self.shelves.tables.write().await;

        for (other_id, other) in shelf.iter() {
            if other_id != &table.id && other.lock().await.number == table.number {
                return Err(StoreError::duplicate("number", table.number.to_string()));
            }
        }

        match shelf.get(&table.id) {
            Some(slot) => *slot.lock().await = table.clone(),
            None => {
                shelf.insert(table.id.clone(), Arc::new(Mutex::new(table.clone())));
            }
        }
        Ok(())
    }

    /// Removes a table from the floor.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Table doesn't exist
    /// * `Err(StoreError::StillReferenced)` - Table still holds orders from
    ///   an open service
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting table");

        let mut shelf = self.shelves.tables.write().await;

        let slot = shelf
            .get(id)
            .ok_or_else(|| StoreError::not_found("Table", id))?;

        {
            let table = slot.lock().await;
            if table.has_orders() {
                return Err(StoreError::StillReferenced {
                    entity: "Table".to_string(),
                    name: table.number.to_string(),
                    references: table.orders.len(),
                });
            }
        }

        shelf.remove(id);
        Ok(())
    }

    /// Runs a read-modify-write operation on one table, serialized against
    /// every other operation on the same table.
    ///
    /// ## Commit Discipline
    /// The closure receives a CLONE of the table. Only when it returns `Ok`
    /// does the clone replace the stored state; on `Err` the table is left
    /// untouched, however far the closure got.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let order_id = repo.with_table(table_id, |table| {
    ///     let order = build_order(table)?;   // may fail halfway
    ///     table.orders.push(order.clone());
    ///     table.status = TableStatus::Occupied;
    ///     Ok(order.id)
    /// }).await?;
    /// ```
    pub async fn with_table<F, R, E>(&self, id: &str, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Table) -> Result<R, E>,
        E: From<StoreError>,
    {
        // Clone the slot handle out so the shelf lock is not held while
        // the operation runs.
        let slot = self
            .shelves
            .tables
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| E::from(StoreError::not_found("Table", id)))?;

        let mut stored = slot.lock().await;
        let mut draft = stored.clone();
        let value = f(&mut draft)?;
        *stored = draft;
        Ok(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
