//! Catalog Page Store
//!
//! Uses Leptos reactive_stores for field-level reactivity on the items page.

use leptos::prelude::*;
use leptos_table_sync::{TableConfig, TableModel};
use reactive_stores::Store;

use crate::models::CatalogItem;

pub const CATALOG_COLUMNS: usize = 6;
pub const CATALOG_EMPTY_MESSAGE: &str = "No items found";

/// What the item modal is doing
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ItemFormMode {
    #[default]
    Closed,
    /// POST to the items endpoint
    New,
    /// PUT to the item's own endpoint
    Edit { url: String },
}

impl ItemFormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, ItemFormMode::Closed)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ItemFormMode::Edit { .. } => "Update item",
            _ => "New Item",
        }
    }
}

#[derive(Clone, Debug, Store)]
pub struct CatalogState {
    pub items: TableModel<CatalogItem>,
    pub form_mode: ItemFormMode,
}

impl CatalogState {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: TableModel::with_rows(TableConfig::new(CATALOG_COLUMNS, CATALOG_EMPTY_MESSAGE), items),
            form_mode: ItemFormMode::Closed,
        }
    }
}

/// Type alias for the store
pub type CatalogStore = Store<CatalogState>;

// ========================
// Store Helper Functions
// ========================

/// Insert a new item, or update it in place when already listed
pub fn store_upsert_item(store: &CatalogStore, item: CatalogItem) {
    let key = item.id.to_string();
    let field = store.items();
    let mut items = field.write();
    if !items.replace_row(&key, item.clone()) {
        items.add_row(item);
    }
}

/// Remove an item from the store by ID
pub fn store_remove_item(store: &CatalogStore, item_id: u32) {
    let field = store.items();
    field.write().delete_row(&item_id.to_string());
}

pub fn store_set_form_mode(store: &CatalogStore, mode: ItemFormMode) {
    let field = store.form_mode();
    *field.write() = mode;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_mode_titles() {
        assert_eq!(ItemFormMode::New.title(), "New Item");
        assert_eq!(ItemFormMode::Edit { url: "/i/1/".into() }.title(), "Update item");
        assert!(!ItemFormMode::Closed.is_open());
    }

    #[test]
    fn test_new_state_uses_catalog_placeholder() {
        let state = CatalogState::new(Vec::new());
        assert_eq!(state.items.config().columns, CATALOG_COLUMNS);
        assert_eq!(state.items.config().empty_message, CATALOG_EMPTY_MESSAGE);
    }

    fn item(id: u32, name: &str) -> CatalogItem {
        CatalogItem {
            id,
            name: name.into(),
            code: String::new(),
            price: None,
            tags: String::new(),
            url: format!("/items/{}/", id),
        }
    }

    #[test]
    fn test_upsert_adds_then_replaces_in_place() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(CatalogState::new(vec![item(1, "Apples"), item(2, "Bread")]));

        store_upsert_item(&store, item(3, "Cheese"));
        store_upsert_item(&store, item(1, "Green apples"));
        let items = store.items().get_untracked();
        let names: Vec<_> = items.rows().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Green apples", "Bread", "Cheese"]);

        store_remove_item(&store, 2);
        assert_eq!(store.items().get_untracked().len(), 2);

        store_set_form_mode(&store, ItemFormMode::New);
        assert!(store.form_mode().get_untracked().is_open());
    }
}
