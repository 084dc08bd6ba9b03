//! Lists Page
//!
//! Overview of the user's shopping lists. Archive and delete return the
//! refreshed table from the server.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_table_sync::{SyncedTable, TableConfig, TableModel};

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::{navigate_to, use_app_context, ToastLevel};
use crate::models::{display_price, ListSummary};

pub const LIST_COLUMNS: usize = 5;
pub const LISTS_EMPTY_MESSAGE: &str = "Click here to add a new list and start using the site.";

/// Empty overview placeholder links to the new-list page
pub fn lists_table_config(new_list_url: &str) -> TableConfig {
    TableConfig::new(LIST_COLUMNS, LISTS_EMPTY_MESSAGE).with_empty_link(new_list_url)
}

/// "3/5" done count for the progress column
pub fn progress_label(list: &ListSummary) -> String {
    format!("{}/{}", list.complete_item_count, list.item_count)
}

#[component]
pub fn ListsPage() -> impl IntoView {
    let ctx = use_app_context();
    let new_list_url = ctx.with_config(|c| c.endpoints.new_list.clone());
    let lists = RwSignal::new(TableModel::with_rows(
        lists_table_config(&new_list_url),
        ctx.with_config(|c| c.lists.clone()),
    ));

    let archive = move |list: ListSummary| {
        spawn_local(async move {
            match commands::archive_list(&ctx.api(), &list.url).await {
                Ok(rows) => {
                    log::info!("archived list {}", list.id);
                    lists.update(|t| t.replace_all(rows));
                    ctx.notify("List archived", ToastLevel::Info);
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    let delete = move |list: ListSummary| {
        spawn_local(async move {
            match commands::delete_list(&ctx.api(), &list.url).await {
                Ok(rows) => {
                    log::info!("deleted list {}", list.id);
                    lists.update(|t| t.replace_all(rows));
                    ctx.notify("List deleted", ToastLevel::Info);
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    let render_row = move |list: ListSummary, _position: usize| {
        let open_url = list.url.clone();
        let edit_url = list.url.clone();
        let for_archive = list.clone();
        let for_delete = list.clone();
        view! {
            <td class="list-name clickable" on:click=move |_| navigate_to(&open_url)>{list.name.clone()}</td>
            <td>{progress_label(&list)}</td>
            <td class="justify-text-right">{display_price(list.total_price)}</td>
            <td>
                <a class="i-btn edit-list-btn" title="Edit" href=edit_url>
                    <i class="fas fa-pen"></i>
                </a>
                <span class="ml-3 i-btn archive-list-btn" title="Archive" on:click=move |_| archive(for_archive.clone())>
                    <i class="fas fa-archive"></i>
                </span>
            </td>
            <td>
                <DeleteConfirmButton
                    button_class="i-btn delete-list-btn"
                    on_confirm=move |_: ()| delete(for_delete.clone())
                />
            </td>
        }
    };

    view! {
        <div class="lists-page">
            <div class="d-flex justify-content-between mb-3">
                <h2>"Shopping lists"</h2>
                <a id="new-list" class="btn btn-primary" href=new_list_url>"New list"</a>
            </div>
            <table id="lists-table" class="table">
                <thead>
                    <tr>
                        <th scope="col">"Name"</th>
                        <th scope="col">"Done"</th>
                        <th scope="col" class="justify-text-right">"Total"</th>
                        <th scope="col"></th>
                        <th scope="col"></th>
                    </tr>
                </thead>
                <SyncedTable model=lists render_row=render_row />
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_table_sync::RenderedRow;

    fn summary() -> ListSummary {
        serde_json::from_str(
            r#"{"id": 1, "shopping_list__name": "Weekly", "item_count": 5, "complete_item_count": 3, "total_price": "12.50", "url": "/lists/1/"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_progress_label() {
        let list = summary();
        assert_eq!(progress_label(&list), "3/5");
        assert_eq!(display_price(list.total_price), "12.5");
    }

    #[test]
    fn test_empty_overview_links_to_new_list() {
        let mut table: TableModel<ListSummary> = TableModel::new(lists_table_config("/lists/new/"));
        assert_eq!(
            table.rendered(),
            vec![RenderedRow::Placeholder {
                message: "Click here to add a new list and start using the site.".into(),
                columns: LIST_COLUMNS,
                link: Some("/lists/new/".into()),
            }]
        );

        table.replace_all(vec![summary()]);
        assert!(!table.rendered()[0].is_placeholder());
    }
}
