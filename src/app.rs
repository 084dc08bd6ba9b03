//! Shopping List Frontend App
//!
//! Root component: provides the app context and mounts the page named in the
//! page configuration.

use leptos::prelude::*;

use crate::components::{CatalogPage, ListEditorPage, ListsPage, SettingsPage, ToastHost};
use crate::config::{PageConfig, PageKind};
use crate::context::AppContext;

#[component]
pub fn App(config: PageConfig) -> impl IntoView {
    let page = config.page;
    log::info!("mounting {:?} page", page);

    // Provide context to all children
    provide_context(AppContext::new(config));

    view! {
        <div class="app-layout">
            <ToastHost />
            {match page {
                PageKind::Items => view! { <CatalogPage /> }.into_any(),
                PageKind::Lists => view! { <ListsPage /> }.into_any(),
                PageKind::ListEditor => view! { <ListEditorPage /> }.into_any(),
                PageKind::Settings => view! { <SettingsPage /> }.into_any(),
            }}
        </div>
    }
}
