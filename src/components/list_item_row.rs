//! List Item Row Component
//!
//! Cells of one list row, switching between display and the inline editor.

use leptos::prelude::*;

use crate::components::{FieldErrorList, ListEditor};
use crate::models::{display_number, display_price, ListItemRow};

#[component]
pub fn ListItemCells(row: ListItemRow, position: usize, editor: ListEditor) -> impl IntoView {
    let key = row.key.clone();
    let editing = Memo::new(move |_| editor.is_editing(&key));

    move || {
        if editing.get() {
            edit_cells(editor, row.clone()).into_any()
        } else {
            view_cells(editor, row.clone(), position).into_any()
        }
    }
}

fn view_cells(editor: ListEditor, row: ListItemRow, position: usize) -> impl IntoView {
    let toggle_key = row.key.clone();
    let edit_key = row.key.clone();
    let delete_key = row.key.clone();
    let name_class = if row.is_done { "item-name done" } else { "item-name" };

    view! {
        <td>
            <input
                type="checkbox"
                class="done-toggle"
                title=format!("Row {}", position)
                prop:checked=row.is_done
                on:change=move |_| editor.toggle_done(&toggle_key)
            />
        </td>
        <td class=name_class>{row.name}</td>
        <td>{row.code}</td>
        <td class="justify-text-right">{display_number(row.quantity)}</td>
        <td class="justify-text-right">{display_price(row.price)}</td>
        <td>
            <span class="i-btn edit-row-btn" title="Edit" on:click=move |_| editor.begin_edit(&edit_key)>
                <i class="fas fa-pen"></i>
            </span>
            <span class="ml-3 i-btn delete-row-btn" title="Remove" on:click=move |_| editor.delete_item(&delete_key)>
                <i class="fas fa-trash-alt"></i>
            </span>
        </td>
    }
}

fn edit_cells(editor: ListEditor, row: ListItemRow) -> impl IntoView {
    let draft = editor.edit_draft;
    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            editor.save_edit();
        }
        "Escape" => editor.cancel_edit(),
        _ => {}
    };

    view! {
        <td>
            <input
                type="checkbox"
                prop:checked=move || draft.with(|d| d.is_done)
                on:change=move |ev| draft.update(|d| d.is_done = event_target_checked(&ev))
            />
        </td>
        <td class="item-name">{row.name}</td>
        <td>
            <input
                id="edit_code"
                type="text"
                class="form-control form-control-sm"
                maxlength="20"
                prop:value=move || draft.with(|d| d.code.clone())
                on:input=move |ev| draft.update(|d| d.code = event_target_value(&ev))
                on:keydown=on_keydown
            />
            <FieldErrorList field="edit_code" source=editor.edit_errors />
        </td>
        <td>
            <input
                id="edit_quantity"
                type="number"
                step="0.01"
                min="0"
                max="99.99"
                class="form-control form-control-sm"
                prop:value=move || draft.with(|d| d.quantity.clone())
                on:input=move |ev| draft.update(|d| d.quantity = event_target_value(&ev))
                on:keydown=on_keydown
            />
            <FieldErrorList field="edit_quantity" source=editor.edit_errors />
        </td>
        <td>
            <input
                id="edit_price"
                type="number"
                step="0.01"
                min="0"
                max="9999999.99"
                class="form-control form-control-sm"
                prop:value=move || draft.with(|d| d.price.clone())
                on:input=move |ev| draft.update(|d| d.price = event_target_value(&ev))
                on:keydown=on_keydown
            />
            <FieldErrorList field="edit_price" source=editor.edit_errors />
        </td>
        <td>
            <span class="i-btn save-row-btn" title="Save" on:click=move |_| editor.save_edit()>
                <i class="fas fa-check"></i>
            </span>
            <span class="ml-3 i-btn cancel-row-btn" title="Cancel" on:click=move |_| editor.cancel_edit()>
                <i class="fas fa-times"></i>
            </span>
        </td>
    }
}
