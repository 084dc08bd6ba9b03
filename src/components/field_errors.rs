//! Field Error List Component
//!
//! Error region of a single form field (`#<field>_errors`).

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::validation::FieldErrors;

/// Messages for `field`, read from the page-wide errors unless a local
/// `source` is given (inline row editor)
#[component]
pub fn FieldErrorList(
    #[prop(into)] field: String,
    #[prop(optional, into)] source: Option<Signal<FieldErrors>>,
) -> impl IntoView {
    let source = source.unwrap_or_else(|| use_app_context().errors.into());
    let id = format!("{}_errors", field);
    let messages = move || source.with(|e| e.get(&field).to_vec());

    view! {
        <div id=id class="error">
            {move || {
                let messages = messages();
                (!messages.is_empty()).then(|| view! {
                    <small>
                        <ul>
                            {messages.into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                        </ul>
                    </small>
                })
            }}
        </div>
    }
}
