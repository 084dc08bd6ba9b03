//! Toast Host Component
//!
//! Renders the toast queue. Toasts remove themselves after their duration
//! (see `AppContext::show_toast`) or when closed.

use leptos::prelude::*;

use crate::context::{use_app_context, Toast};

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="message-element">
            <For
                each=move || ctx.toasts.with(|q| q.toasts().to_vec())
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast show {} min-w-300", toast.level.border_class())
                            role="alert"
                            aria-live="assertive"
                            aria-atomic="true"
                        >
                            <div class="toast-header">
                                <strong class="mr-auto">{toast.title}</strong>
                                <button
                                    type="button"
                                    class="ml-2 mb-1 close"
                                    aria-label="Close"
                                    on:click=move |_| ctx.dismiss_toast(id)
                                >
                                    <span aria-hidden="true">"×"</span>
                                </button>
                            </div>
                            <div class="toast-body">{toast.message}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
