//! UI Components
//!
//! Pages and the reusable Leptos components they are built from.

mod catalog_page;
mod delete_confirm_button;
mod field_errors;
mod item_form_modal;
mod item_search;
mod list_editor;
mod list_item_row;
mod lists_page;
mod settings_page;
mod share_emails;
mod toast_host;

pub use catalog_page::CatalogPage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use field_errors::FieldErrorList;
pub use item_form_modal::ItemFormModal;
pub use item_search::ItemSearch;
pub use list_editor::{ListEditor, ListEditorPage};
pub use list_item_row::ListItemCells;
pub use lists_page::ListsPage;
pub use settings_page::SettingsPage;
pub use share_emails::ShareEmails;
pub use toast_host::ToastHost;
