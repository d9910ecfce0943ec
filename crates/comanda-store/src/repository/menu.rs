//! # Menu Repository
//!
//! Shelf operations for menu items and their categories. Categories are a
//! managed list, not free-form strings: every item must point at a category
//! that exists, and a category with items on it cannot be removed.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use comanda_core::types::MenuItem;

use crate::error::{StoreError, StoreResult};
use crate::store::Shelves;

/// Repository for menu item and category operations.
#[derive(Clone)]
pub struct MenuRepository {
    shelves: Arc<Shelves>,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub(crate) fn new(shelves: Arc<Shelves>) -> Self {
        MenuRepository { shelves }
    }

    // =========================================================================
    // Menu Items
    // =========================================================================

    /// Lists all menu items, sorted by name.
    pub async fn list(&self) -> Vec<MenuItem> {
        let shelf = self.shelves.menu.read().await;
        let mut items: Vec<MenuItem> = shelf.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    /// Lists menu items currently offered to guests (available only).
    pub async fn list_available(&self) -> Vec<MenuItem> {
        let mut items = self.list().await;
        items.retain(|i| i.available);
        items
    }

    /// Lists menu items in one category, sorted by name.
    pub async fn list_by_category(&self, category: &str) -> Vec<MenuItem> {
        let mut items = self.list().await;
        items.retain(|i| i.category == category);
        items
    }

    /// Gets a menu item by ID.
    pub async fn get_by_id(&self, id: &str) -> Option<MenuItem> {
        self.shelves.menu.read().await.get(id).cloned()
    }

    /// Inserts a new menu item.
    ///
    /// ## Returns
    /// * `Err(StoreError::Duplicate)` - ID already taken
    /// * `Err(StoreError::NotFound)` - Item points at an unknown category
    pub async fn insert(&self, item: &MenuItem) -> StoreResult<MenuItem> {
        debug!(name = %item.name, "Inserting menu item");

        self.require_category(&item.category).await?;

        let mut shelf = self.shelves.menu.write().await;
        if shelf.contains_key(&item.id) {
            return Err(StoreError::duplicate("id", &item.id));
        }
        shelf.insert(item.id.clone(), item.clone());
        Ok(item.clone())
    }

    /// Replaces a menu item's stored state, touching `updated_at`.
    ///
    /// Orders already placed keep their frozen name and price; only future
    /// cart lines see the edit.
    pub async fn update(&self, item: &MenuItem) -> StoreResult<MenuItem> {
        debug!(id = %item.id, "Updating menu item");

        self.require_category(&item.category).await?;

        let mut shelf = self.shelves.menu.write().await;
        if !shelf.contains_key(&item.id) {
            return Err(StoreError::not_found("Menu item", &item.id));
        }

        let mut stored = item.clone();
        stored.updated_at = Utc::now();
        shelf.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    /// Flips a single item's availability without editing anything else.
    pub async fn set_availability(&self, id: &str, available: bool) -> StoreResult<MenuItem> {
        debug!(id = %id, available, "Setting menu item availability");

        let mut shelf = self.shelves.menu.write().await;
        let item = shelf
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Menu item", id))?;
        item.available = available;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    /// Removes a menu item from the catalog.
    ///
    /// Past orders are untouched: they carry their own name and price
    /// snapshots and never point back at the catalog.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting menu item");

        let mut shelf = self.shelves.menu.write().await;
        if shelf.remove(id).is_none() {
            return Err(StoreError::not_found("Menu item", id));
        }
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Lists categories in menu display order.
    pub async fn list_categories(&self) -> Vec<String> {
        self.shelves.categories.read().await.clone()
    }

    /// Appends a new category to the menu.
    pub async fn add_category(&self, name: &str) -> StoreResult<()> {
        debug!(name = %name, "Adding category");

        let mut categories = self.shelves.categories.write().await;
        if categories.iter().any(|c| c == name) {
            return Err(StoreError::duplicate("category", name));
        }
        categories.push(name.to_string());
        Ok(())
    }

    /// Renames a category and retags every item in it.
    ///
    /// ## Returns
    /// * `Ok(usize)` - How many menu items were retagged
    pub async fn rename_category(&self, old: &str, new: &str) -> StoreResult<usize> {
        debug!(old = %old, new = %new, "Renaming category");

        let mut categories = self.shelves.categories.write().await;
        if old != new && categories.iter().any(|c| c == new) {
            return Err(StoreError::duplicate("category", new));
        }
        let slot = categories
            .iter_mut()
            .find(|c| *c == old)
            .ok_or_else(|| StoreError::not_found("Category", old))?;
        *slot = new.to_string();

        let mut shelf = self.shelves.menu.write().await;
        let mut retagged = 0;
        for item in shelf.values_mut() {
            if item.category == old {
                item.category = new.to_string();
                retagged += 1;
            }
        }
        Ok(retagged)
    }

    /// Removes an empty category.
    ///
    /// ## Returns
    /// * `Err(StoreError::StillReferenced)` - Items still sit in the category
    pub async fn delete_category(&self, name: &str) -> StoreResult<()> {
        debug!(name = %name, "Deleting category");

        let mut categories = self.shelves.categories.write().await;
        if !categories.iter().any(|c| c == name) {
            return Err(StoreError::not_found("Category", name));
        }

        let shelf = self.shelves.menu.read().await;
        let references = shelf.values().filter(|i| i.category == name).count();
        if references > 0 {
            return Err(StoreError::StillReferenced {
                entity: "Category".to_string(),
                name: name.to_string(),
                references,
            });
        }
        drop(shelf);

        categories.retain(|c| c != name);
        Ok(())
    }

    async fn require_category(&self, name: &str) -> StoreResult<()> {
        let categories = self.shelves.categories.read().await;
        if categories.iter().any(|c| c == name) {
            Ok(())
        } else {
            Err(StoreError::not_found("Category", name))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
