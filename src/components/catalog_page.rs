//! Catalog Page
//!
//! Table of the user's items with a modal form for adding and editing.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_table_sync::SyncedTable;
use reactive_stores::Store;

use crate::commands;
use crate::components::{DeleteConfirmButton, ItemFormModal};
use crate::context::{use_app_context, ToastLevel};
use crate::forms::CatalogDraft;
use crate::models::{display_price, CatalogItem};
use crate::store::{
    store_remove_item, store_set_form_mode, CatalogState, CatalogStateStoreFields, ItemFormMode,
};

#[component]
pub fn CatalogPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = Store::new(CatalogState::new(ctx.with_config(|c| c.catalog_items.clone())));
    provide_context(store);

    let draft = RwSignal::new(CatalogDraft::default());

    let open_new = move |_| {
        draft.set(CatalogDraft::default());
        ctx.clear_errors();
        store_set_form_mode(&store, ItemFormMode::New);
    };

    let open_edit = move |url: String| {
        spawn_local(async move {
            match commands::get_item(&ctx.api(), &url).await {
                Ok(item) => {
                    draft.set(CatalogDraft::from_item(&item));
                    ctx.clear_errors();
                    store_set_form_mode(&store, ItemFormMode::Edit { url: item.url });
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    let archive = move |item: CatalogItem| {
        spawn_local(async move {
            match commands::archive_item(&ctx.api(), &item.url).await {
                Ok(()) => {
                    log::info!("archived item {}", item.id);
                    store_remove_item(&store, item.id);
                    ctx.notify(format!("{} archived", item.name), ToastLevel::Info);
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    let delete = move |item: CatalogItem| {
        spawn_local(async move {
            match commands::delete_item(&ctx.api(), &item.url).await {
                Ok(()) => {
                    log::info!("deleted item {}", item.id);
                    store_remove_item(&store, item.id);
                    ctx.notify(format!("{} deleted", item.name), ToastLevel::Info);
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    let render_row = move |item: CatalogItem, position: usize| {
        let edit_url = item.url.clone();
        let for_archive = item.clone();
        let for_delete = item.clone();
        view! {
            <th class="num" scope="row">{position}</th>
            <td>{item.name}</td>
            <td>{item.code}</td>
            <td class="justify-text-right">{display_price(item.price)}</td>
            <td>{item.tags}</td>
            <td>
                <span class="i-btn edit-item-btn" title="Edit" on:click=move |_| open_edit(edit_url.clone())>
                    <i class="fas fa-pen"></i>
                </span>
                <span class="ml-3 i-btn archive-item-btn" title="Archive" on:click=move |_| archive(for_archive.clone())>
                    <i class="fas fa-archive"></i>
                </span>
                <span class="ml-3">
                    <DeleteConfirmButton
                        button_class="i-btn delete-item-btn"
                        on_confirm=move |_: ()| delete(for_delete.clone())
                    />
                </span>
            </td>
        }
    };

    view! {
        <div class="catalog-page">
            <div class="d-flex justify-content-between mb-3">
                <h2>"Items"</h2>
                <button type="button" class="btn btn-primary" on:click=open_new>"New Item"</button>
            </div>
            <table id="items-table" class="table">
                <thead>
                    <tr>
                        <th scope="col">"#"</th>
                        <th scope="col">"Name"</th>
                        <th scope="col">"Code"</th>
                        <th scope="col" class="justify-text-right">"Price"</th>
                        <th scope="col">"Tags"</th>
                        <th scope="col"></th>
                    </tr>
                </thead>
                <SyncedTable
                    model=Signal::derive(move || store.items().get())
                    render_row=render_row
                />
            </table>
            <ItemFormModal draft=draft />
        </div>
    }
}
