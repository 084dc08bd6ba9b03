//! Share Emails Component
//!
//! Emails the list is shared with. Sent along with the list on submit.

use leptos::prelude::*;
use leptos_table_sync::SyncedTable;

use crate::components::{FieldErrorList, ListEditor};
use crate::context::use_app_context;
use crate::models::SharedEmail;

#[component]
pub fn ShareEmails(editor: ListEditor) -> impl IntoView {
    let ctx = use_app_context();
    let email = RwSignal::new(String::new());
    let emails = Memo::new(move |_| editor.state.with(|s| s.emails.clone()));

    let on_share = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let raw = email.get_untracked();
        match editor.state.try_update(|s| s.add_email(&raw)) {
            Some(Ok(())) => {
                email.set(String::new());
                ctx.clear_errors();
            }
            Some(Err(errors)) => ctx.display_errors(errors),
            None => {}
        }
    };

    let render_row = move |row: SharedEmail, _position: usize| {
        let key = leptos_table_sync::TableRow::row_key(&row);
        view! {
            <td>{row.email}</td>
            <td class="justify-text-right">
                <span
                    class="i-btn delete-email-btn"
                    title="Remove"
                    on:click=move |_| {
                        editor.state.update(|s| {
                            s.remove_email(&key);
                        });
                    }
                >
                    <i class="fas fa-trash-alt"></i>
                </span>
            </td>
        }
    };

    view! {
        <div class="share-emails mt-4">
            <h5>"Share with"</h5>
            <form id="share-form" class="form-row align-items-start mb-2" on:submit=on_share>
                <div class="col-8">
                    <input
                        id="email"
                        type="email"
                        class="form-control"
                        maxlength="254"
                        placeholder="friend@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldErrorList field="email" />
                </div>
                <div class="col-4">
                    <button type="submit" class="btn btn-outline-primary">"Share"</button>
                </div>
            </form>
            <table id="emails-table" class="table table-sm">
                <SyncedTable model=emails render_row=render_row />
            </table>
            <FieldErrorList field="emails" />
        </div>
    }
}
