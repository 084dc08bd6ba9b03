//! List Editor Page
//!
//! Builds a shopping list client-side (rows, inline edits, share emails) and
//! submits it as one payload.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_table_sync::SyncedTable;

use crate::commands;
use crate::components::{FieldErrorList, ItemSearch, ListItemCells, ShareEmails};
use crate::context::{navigate_to, use_app_context, ToastLevel};
use crate::forms::ItemDraft;
use crate::list_state::{AddOutcome, ShoppingListState};
use crate::models::ListItemRow;
use crate::validation::FieldErrors;

/// Error regions of the inline editor use this prefix (`edit_quantity_errors`)
pub const EDIT_PREFIX: &str = "edit";
/// Error regions of the add-item form (`item_name_errors`)
pub const ADD_PREFIX: &str = "item";

/// Handles shared by the editor's rows
#[derive(Clone, Copy)]
pub struct ListEditor {
    pub state: RwSignal<ShoppingListState>,
    pub edit_draft: RwSignal<ItemDraft>,
    pub edit_errors: RwSignal<FieldErrors>,
}

impl ListEditor {
    pub fn new(state: ShoppingListState) -> Self {
        Self {
            state: RwSignal::new(state),
            edit_draft: RwSignal::new(ItemDraft::default()),
            edit_errors: RwSignal::new(FieldErrors::new()),
        }
    }

    pub fn begin_edit(&self, key: &str) {
        if let Some(draft) = self.state.try_update(|s| s.begin_edit(key)).flatten() {
            self.edit_draft.set(draft);
            self.edit_errors.set(FieldErrors::new());
        }
    }

    pub fn save_edit(&self) {
        let draft = self.edit_draft.get_untracked();
        match self.state.try_update(|s| s.commit_edit(&draft)) {
            Some(Ok(())) => self.edit_errors.set(FieldErrors::new()),
            Some(Err(errors)) => self.edit_errors.set(errors.prefixed(EDIT_PREFIX)),
            None => {}
        }
    }

    pub fn cancel_edit(&self) {
        self.state.update(|s| s.cancel_edit());
        self.edit_errors.set(FieldErrors::new());
    }

    pub fn toggle_done(&self, key: &str) {
        self.state.update(|s| {
            s.toggle_done(key);
        });
    }

    pub fn delete_item(&self, key: &str) {
        self.state.update(|s| {
            s.delete_item(key);
        });
    }

    pub fn is_editing(&self, key: &str) -> bool {
        self.state.with(|s| s.editing_key() == Some(key))
    }
}

#[component]
pub fn ListEditorPage() -> impl IntoView {
    let ctx = use_app_context();
    let editor = ctx.with_config(|c| {
        ListEditor::new(ShoppingListState::new(c.list_items.clone(), c.shared_emails.clone()))
    });
    let list_name = RwSignal::new(ctx.with_config(|c| c.list_name.clone()));
    let add_draft = RwSignal::new(ItemDraft::default());
    let name_ref = NodeRef::<html::Input>::new();
    let submitting = RwSignal::new(false);

    // Edit toggles don't touch the rows, so the table body is not rebuilt
    let items = Memo::new(move |_| editor.state.with(|s| s.items.clone()));

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let row = match add_draft.get_untracked().to_row() {
            Ok(row) => row,
            Err(errors) => {
                ctx.display_errors(errors.prefixed(ADD_PREFIX));
                return;
            }
        };
        match editor.state.try_update(|s| s.add_item(row)) {
            Some(AddOutcome::Added(key)) => {
                log::debug!("added row {}", key);
                add_draft.set(ItemDraft::default());
                ctx.clear_errors();
                if let Some(input) = name_ref.get_untracked() {
                    let _ = input.focus();
                }
            }
            Some(AddOutcome::Duplicate) => {
                ctx.notify("This item is already on the list.", ToastLevel::Warn);
            }
            None => {}
        }
    };

    let on_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let name = list_name.get_untracked();
        let payload = match editor.state.try_update(|s| s.payload(&name)) {
            Some(Ok(payload)) => payload,
            Some(Err(errors)) => {
                ctx.display_errors(errors);
                return;
            }
            None => return,
        };
        let (url, method) = ctx.with_config(|c| (c.endpoints.list_submit.clone(), c.submit_method));
        submitting.set(true);
        spawn_local(async move {
            match commands::submit_list(&ctx.api(), &url, method, &payload).await {
                Ok(next) => {
                    log::info!("list saved with {} items", payload.items.len());
                    navigate_to(&next);
                }
                Err(e) => {
                    ctx.report(e);
                    submitting.set(false);
                }
            }
        });
    };

    let render_row = move |row: ListItemRow, position: usize| view! { <ListItemCells row=row position=position editor=editor /> };

    view! {
        <div class="list-editor-page">
            <div class="form-group">
                <label for="name">"List name"</label>
                <input
                    id="name"
                    type="text"
                    class="form-control"
                    maxlength="100"
                    placeholder="Shopping list"
                    prop:value=move || list_name.get()
                    on:input=move |ev| list_name.set(event_target_value(&ev))
                />
                <FieldErrorList field="name" />
            </div>

            <form id="add-item-form" class="form-row align-items-start mb-3" on:submit=on_add>
                <div class="col-4">
                    <ItemSearch draft=add_draft input_ref=name_ref />
                    <FieldErrorList field="item_name" />
                </div>
                <div class="col-2">
                    <input
                        id="item_code"
                        type="text"
                        class="form-control"
                        maxlength="20"
                        placeholder="Code"
                        prop:value=move || add_draft.with(|d| d.code.clone())
                        on:input=move |ev| add_draft.update(|d| d.code = event_target_value(&ev))
                    />
                    <FieldErrorList field="item_code" />
                </div>
                <div class="col-2">
                    <input
                        id="item_quantity"
                        type="number"
                        step="0.01"
                        min="0"
                        max="99.99"
                        class="form-control"
                        placeholder="Quantity"
                        prop:value=move || add_draft.with(|d| d.quantity.clone())
                        on:input=move |ev| add_draft.update(|d| d.quantity = event_target_value(&ev))
                    />
                    <FieldErrorList field="item_quantity" />
                </div>
                <div class="col-2">
                    <input
                        id="item_price"
                        type="number"
                        step="0.01"
                        min="0"
                        max="9999999.99"
                        class="form-control"
                        placeholder="Price"
                        prop:value=move || add_draft.with(|d| d.price.clone())
                        on:input=move |ev| add_draft.update(|d| d.price = event_target_value(&ev))
                    />
                    <FieldErrorList field="item_price" />
                </div>
                <div class="col-1 form-check mt-2">
                    <input
                        id="is-done"
                        type="checkbox"
                        class="form-check-input"
                        prop:checked=move || add_draft.with(|d| d.is_done)
                        on:change=move |ev| add_draft.update(|d| d.is_done = event_target_checked(&ev))
                    />
                    <label class="form-check-label" for="is-done">"Done"</label>
                </div>
                <div class="col-1">
                    <button type="submit" class="btn btn-outline-primary">"Add"</button>
                </div>
            </form>

            <table id="list-items-table" class="table">
                <thead>
                    <tr>
                        <th scope="col">"Done"</th>
                        <th scope="col">"Name"</th>
                        <th scope="col">"Code"</th>
                        <th scope="col" class="justify-text-right">"Quantity"</th>
                        <th scope="col" class="justify-text-right">"Price"</th>
                        <th scope="col"></th>
                    </tr>
                </thead>
                <SyncedTable model=items render_row=render_row />
            </table>
            <FieldErrorList field="items" />

            <ShareEmails editor=editor />

            <div class="d-flex justify-content-end mt-3">
                <button
                    type="button"
                    id="submit-list"
                    class="btn btn-primary"
                    disabled=move || submitting.get()
                    on:click=on_submit
                >
                    "Save list"
                </button>
            </div>
        </div>
    }
}
