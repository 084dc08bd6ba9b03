//! Item Form Modal
//!
//! Add/edit form for catalog items. New items keep the modal open and refocus
//! the name input so several can be entered in a row.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::FieldErrorList;
use crate::context::{use_app_context, ToastLevel};
use crate::forms::CatalogDraft;
use crate::store::{store_set_form_mode, store_upsert_item, CatalogStateStoreFields, CatalogStore, ItemFormMode};

#[component]
pub fn ItemFormModal(draft: RwSignal<CatalogDraft>) -> impl IntoView {
    let ctx = use_app_context();
    let store = expect_context::<CatalogStore>();
    let name_ref = NodeRef::<html::Input>::new();

    let close = move || {
        ctx.clear_errors();
        store_set_form_mode(&store, ItemFormMode::Closed);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match draft.get_untracked().to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                ctx.display_errors(errors);
                return;
            }
        };
        let mode = store.form_mode().get_untracked();

        spawn_local(async move {
            let api = ctx.api();
            let result = match &mode {
                ItemFormMode::Edit { url } => commands::update_item(&api, url, &payload).await,
                _ => {
                    let items_url = ctx.with_config(|c| c.endpoints.items.clone());
                    commands::create_item(&api, &items_url, &payload).await
                }
            };
            match result {
                Ok(item) => {
                    log::info!("saved item {} ({})", item.id, item.name);
                    store_upsert_item(&store, item);
                    ctx.clear_errors();
                    if let ItemFormMode::Edit { .. } = mode {
                        store_set_form_mode(&store, ItemFormMode::Closed);
                        ctx.notify("Item updated", ToastLevel::Success);
                    } else {
                        draft.set(CatalogDraft::default());
                        if let Some(input) = name_ref.get() {
                            let _ = input.focus();
                        }
                    }
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    view! {
        <Show when=move || store.form_mode().get().is_open()>
            <div class="modal-backdrop show"></div>
            <div id="itemModal" class="modal d-block" tabindex="-1" role="dialog">
                <div class="modal-dialog" role="document">
                    <div class="modal-content">
                        <form id="item-form" on:submit=on_submit>
                            <div class="modal-header">
                                <h5 class="modal-title">{move || store.form_mode().get().title()}</h5>
                                <button type="button" class="close" aria-label="Close" on:click=move |_| close()>
                                    <span aria-hidden="true">"×"</span>
                                </button>
                            </div>
                            <div class="modal-body">
                                <div class="form-group">
                                    <label for="name">"Name"</label>
                                    <input
                                        id="name"
                                        type="text"
                                        class="form-control"
                                        maxlength="200"
                                        required
                                        node_ref=name_ref
                                        prop:value=move || draft.with(|d| d.name.clone())
                                        on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                                    />
                                    <FieldErrorList field="name" />
                                </div>
                                <div class="form-group">
                                    <label for="code">"Code"</label>
                                    <input
                                        id="code"
                                        type="text"
                                        class="form-control"
                                        maxlength="20"
                                        prop:value=move || draft.with(|d| d.code.clone())
                                        on:input=move |ev| draft.update(|d| d.code = event_target_value(&ev))
                                    />
                                    <FieldErrorList field="code" />
                                </div>
                                <div class="form-group">
                                    <label for="price">"Price"</label>
                                    <input
                                        id="price"
                                        type="number"
                                        step="0.01"
                                        min="0"
                                        max="9999999.99"
                                        class="form-control"
                                        prop:value=move || draft.with(|d| d.price.clone())
                                        on:input=move |ev| draft.update(|d| d.price = event_target_value(&ev))
                                    />
                                    <FieldErrorList field="price" />
                                </div>
                                <div class="form-group">
                                    <label for="tags">"Tags"</label>
                                    <textarea
                                        id="tags"
                                        class="form-control"
                                        rows="2"
                                        placeholder="Add your tags separated with a coma. Example: desert,sweet,fruit"
                                        prop:value=move || draft.with(|d| d.tags.clone())
                                        on:input=move |ev| draft.update(|d| d.tags = event_target_value(&ev))
                                    ></textarea>
                                    <FieldErrorList field="tags" />
                                </div>
                            </div>
                            <div class="modal-footer">
                                <button type="button" class="btn btn-secondary" on:click=move |_| close()>"Close"</button>
                                <button type="submit" class="btn btn-primary">"Save"</button>
                            </div>
                        </form>
                    </div>
                </div>
            </div>
        </Show>
    }
}
