//! Delete Confirm Button Component
//!
//! Trash icon that asks once before running a permanent delete. Clicks stop
//! propagating so a confirm inside a clickable table row does not open it.

use leptos::prelude::*;

/// What the user did with the button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Arm,
    Accept,
    Dismiss,
}

/// Apply an action to the armed flag; true when the delete should run
pub fn apply_action(armed: &mut bool, action: ConfirmAction) -> bool {
    let fire = *armed && action == ConfirmAction::Accept;
    *armed = action == ConfirmAction::Arm;
    fire
}

#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional, into)] prompt: Option<String>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let prompt = prompt.unwrap_or_else(|| "Delete?".to_string());

    let act = move |ev: web_sys::MouseEvent, action: ConfirmAction| {
        ev.stop_propagation();
        if armed.try_update(|a| apply_action(a, action)).unwrap_or(false) {
            on_confirm.run(());
        }
    };

    move || {
        if armed.get() {
            view! {
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{prompt.clone()}</span>
                    <button type="button" class="btn btn-sm btn-danger btn-ok" on:click=move |ev| act(ev, ConfirmAction::Accept)>
                        "✓"
                    </button>
                    <button type="button" class="btn btn-sm btn-secondary" on:click=move |ev| act(ev, ConfirmAction::Dismiss)>
                        "✗"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <span class=button_class.clone() title="Delete" on:click=move |ev| act(ev, ConfirmAction::Arm)>
                    <i class="fas fa-trash-alt"></i>
                </span>
            }
            .into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_runs_only_after_arming() {
        let mut armed = false;
        assert!(!apply_action(&mut armed, ConfirmAction::Accept));
        assert!(!armed);

        assert!(!apply_action(&mut armed, ConfirmAction::Arm));
        assert!(armed);
        assert!(apply_action(&mut armed, ConfirmAction::Accept));
        assert!(!armed);
    }

    #[test]
    fn test_dismiss_disarms_without_deleting() {
        let mut armed = true;
        assert!(!apply_action(&mut armed, ConfirmAction::Dismiss));
        assert!(!armed);
    }
}
