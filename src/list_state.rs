//! Shopping List Editor State
//!
//! View-model behind the list editor page: item rows, shared emails and the
//! single inline edit session.

use leptos_table_sync::{TableConfig, TableModel, TableRow};

use crate::forms::{ItemDraft, ListPayload};
use crate::models::{ListItemRow, SharedEmail};
use crate::validation::{self, FieldErrors, MSG_DUPLICATE_EMAIL};

pub const ITEM_COLUMNS: usize = 6;
pub const ITEMS_EMPTY_MESSAGE: &str = "No items";
pub const EMAIL_COLUMNS: usize = 2;
pub const EMAILS_EMPTY_MESSAGE: &str = "No emails";

/// Inline edit state of the items table
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing { key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(String),
    /// Same name, quantity, price and done flag already listed
    Duplicate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingListState {
    pub items: TableModel<ListItemRow>,
    pub emails: TableModel<SharedEmail>,
    editing: EditState,
}

impl Default for ShoppingListState {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl ShoppingListState {
    /// Build from server-rendered rows
    pub fn new(rows: Vec<ListItemRow>, emails: Vec<String>) -> Self {
        let mut state = Self {
            items: TableModel::new(TableConfig::new(ITEM_COLUMNS, ITEMS_EMPTY_MESSAGE)),
            emails: TableModel::new(TableConfig::new(EMAIL_COLUMNS, EMAILS_EMPTY_MESSAGE)),
            editing: EditState::Viewing,
        };
        for mut row in rows {
            row.key = state.unique_key(row.initial_key());
            state.items.add_row(row);
        }
        for email in emails {
            let email = SharedEmail::new(email.trim());
            if !state.emails.contains(&email.row_key()) {
                state.emails.add_row(email);
            }
        }
        state
    }

    fn unique_key(&self, base: String) -> String {
        if !self.items.contains(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|k| !self.items.contains(k))
            .unwrap_or(base)
    }

    /// Append a row unless an identical one is already listed
    pub fn add_item(&mut self, mut row: ListItemRow) -> AddOutcome {
        let hash = row.content_hash();
        if self.items.rows().iter().any(|r| r.content_hash() == hash) {
            return AddOutcome::Duplicate;
        }
        row.key = self.unique_key(row.initial_key());
        let key = row.key.clone();
        self.items.add_row(row);
        AddOutcome::Added(key)
    }

    pub fn delete_item(&mut self, key: &str) -> Option<ListItemRow> {
        if self.editing_key() == Some(key) {
            self.editing = EditState::Viewing;
        }
        self.items.delete_row(key)
    }

    /// Flip the done flag, returning the new value
    pub fn toggle_done(&mut self, key: &str) -> Option<bool> {
        let mut value = None;
        self.items.update_row(key, |row| {
            row.is_done = !row.is_done;
            value = Some(row.is_done);
        });
        value
    }

    pub fn editing_key(&self) -> Option<&str> {
        match &self.editing {
            EditState::Editing { key } => Some(key),
            EditState::Viewing => None,
        }
    }

    /// Open the inline editor on a row. Any other open edit is discarded.
    pub fn begin_edit(&mut self, key: &str) -> Option<ItemDraft> {
        let draft = self.items.get(key).map(ItemDraft::from_row)?;
        self.editing = EditState::Editing { key: key.to_string() };
        Some(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = EditState::Viewing;
    }

    /// Validate the draft and write it into the edited row.
    ///
    /// Name and catalog link stay as they were; only code, quantity, price and
    /// the done flag are editable inline.
    pub fn commit_edit(&mut self, draft: &ItemDraft) -> Result<(), FieldErrors> {
        let Some(key) = self.editing_key().map(str::to_string) else {
            return Ok(());
        };
        let Some(current) = self.items.get(&key).cloned() else {
            self.editing = EditState::Viewing;
            return Ok(());
        };
        let mut merged = draft.clone();
        merged.name = current.name.clone();
        merged.item_id = current.item_id;
        let parsed = merged.to_row()?;
        self.items.update_row(&key, |row| {
            row.code = parsed.code;
            row.quantity = parsed.quantity;
            row.price = parsed.price;
            row.is_done = parsed.is_done;
        });
        self.editing = EditState::Viewing;
        Ok(())
    }

    /// Committed rows in table order; an open edit is discarded first
    pub fn collect_items(&mut self) -> Vec<ListItemRow> {
        self.cancel_edit();
        self.items.rows().to_vec()
    }

    pub fn add_email(&mut self, raw: &str) -> Result<(), FieldErrors> {
        validation::validate_email("email", raw).into_result()?;
        let email = SharedEmail::new(raw.trim());
        if self.emails.contains(&email.row_key()) {
            let mut errors = FieldErrors::new();
            errors.add("email", MSG_DUPLICATE_EMAIL);
            return Err(errors);
        }
        self.emails.add_row(email);
        Ok(())
    }

    pub fn remove_email(&mut self, key: &str) -> bool {
        self.emails.delete_row(key).is_some()
    }

    pub fn collect_emails(&self) -> Vec<String> {
        self.emails.rows().iter().map(|e| e.email.clone()).collect()
    }

    /// Submission body for the whole list
    pub fn payload(&mut self, name: &str) -> Result<ListPayload, FieldErrors> {
        validation::validate_list_name(name).into_result()?;
        Ok(ListPayload {
            name: name.trim().to_string(),
            items: self.collect_items(),
            emails: self.collect_emails(),
        })
    }
}
