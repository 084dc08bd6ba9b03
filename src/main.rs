//! Shopping List Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod error;
mod forms;
mod list_state;
mod logging;
mod models;
mod store;
mod validation;

use app::App;
use config::{PageConfig, MOUNT_ELEMENT_ID};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    let config = PageConfig::load();
    logging::init(config.log_level());

    let mount = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ELEMENT_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match mount {
        Some(el) => leptos::mount::mount_to(el, move || view! { <App config=config /> }).forget(),
        None => {
            log::warn!("no #{} element, mounting to body", MOUNT_ELEMENT_ID);
            mount_to_body(move || view! { <App config=config /> });
        }
    }
}
