//! Settings Page
//!
//! Profile, password, two-factor, default share level and account deletion.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{DeleteConfirmButton, FieldErrorList};
use crate::context::{use_app_context, AppContext, Toast, ToastLevel};
use crate::forms::{PasswordDraft, ProfilePayload};
use crate::validation;

const ACCOUNT_MESSAGE_MS: u32 = 5000;

/// Two-factor toggle flow: confirm, mail a code, submit the code
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TwoFactorStep {
    #[default]
    Idle,
    Confirm,
    /// Code sent; the token is posted to `url`
    Token { url: String },
}

pub fn two_factor_label(enabled: bool) -> &'static str {
    if enabled {
        "Disable 2FA"
    } else {
        "Enable 2FA"
    }
}

/// Collapsible forms stay mounted and are hidden with `d-none`
pub fn form_class(shown: bool) -> &'static str {
    if shown {
        ""
    } else {
        "d-none"
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <div class="settings-page">
            <ProfileSection />
            <PasswordSection />
            <TwoFactorSection />
            <ShareLevelSection />
            <DeleteAccountSection />
        </div>
    }
}

#[component]
fn ProfileSection() -> impl IntoView {
    let ctx = use_app_context();
    let profile = RwSignal::new(ctx.with_config(|c| c.profile.clone()));
    let editing = RwSignal::new(false);
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let first_ref = NodeRef::<html::Input>::new();

    let show_form = move |_| {
        profile.with_untracked(|p| {
            first_name.set(p.first_name.clone());
            last_name.set(p.last_name.clone());
        });
        editing.set(true);
        // the form is revealed on the next render pass
        request_animation_frame(move || {
            if let Some(input) = first_ref.get_untracked() {
                let _ = input.focus();
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = ProfilePayload {
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
        };
        let url = ctx.with_config(|c| c.endpoints.profile.clone());
        spawn_local(async move {
            match commands::update_profile(&ctx.api(), &url, &payload).await {
                Ok(updated) => {
                    profile.update(|p| {
                        p.first_name = updated.first_name;
                        p.last_name = updated.last_name;
                    });
                    editing.set(false);
                    ctx.clear_errors();
                    ctx.notify("Information updated", ToastLevel::Success);
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    let avatar_input = NodeRef::<html::Input>::new();
    let choose_file = move |_| {
        if let Some(input) = avatar_input.get_untracked() {
            input.click();
        }
    };
    let on_avatar_change = move |_| {
        let Some(input) = avatar_input.get_untracked() else { return };
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return };
        input.set_value("");
        let url = ctx.with_config(|c| c.endpoints.avatar.clone());
        spawn_local(async move {
            match commands::upload_avatar(&ctx.api(), &url, &file).await {
                Ok(avatar) => {
                    profile.update(|p| p.avatar = Some(avatar));
                    ctx.clear_errors();
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    let delete_avatar = move |_: ()| {
        let url = ctx.with_config(|c| c.endpoints.avatar.clone());
        spawn_local(async move {
            match commands::delete_avatar(&ctx.api(), &url).await {
                Ok(avatar) => profile.update(|p| p.avatar = Some(avatar)),
                Err(e) => {
                    log::error!("avatar delete failed: {}", e);
                    ctx.show_toast(Toast::new("Submission Error. Try again later.").level(ToastLevel::Error));
                }
            }
        });
    };

    view! {
        <section class="settings-section">
            <h4>"Profile"</h4>
            <div class="d-flex align-items-center mb-3">
                <img
                    id="avatar"
                    class="avatar rounded-circle mr-3"
                    alt="Avatar"
                    src=move || profile.with(|p| p.avatar.clone().unwrap_or_default())
                />
                <input
                    id="avatarInput"
                    type="file"
                    class="d-none"
                    accept="image/*"
                    node_ref=avatar_input
                    on:change=on_avatar_change
                />
                <button id="avatar-button" type="button" class="btn btn-outline-primary btn-sm mr-2" on:click=choose_file>
                    "Change"
                </button>
                <DeleteConfirmButton button_class="i-btn delete-avatar-btn" on_confirm=delete_avatar />
            </div>
            <FieldErrorList field="avatar" />
            <Show when=move || !editing.get()>
                <div id="information-container">
                    <p>"First name: " <span id="p-first-name">{move || profile.with(|p| p.first_name.clone())}</span></p>
                    <p>"Last name: " <span id="p-last-name">{move || profile.with(|p| p.last_name.clone())}</span></p>
                    <button id="information-button" type="button" class="btn btn-outline-primary" on:click=show_form>
                        "Edit"
                    </button>
                </div>
            </Show>
            <form id="information-form" class=move || form_class(editing.get()) on:submit=on_submit>
                <div class="form-group">
                    <label for="first_name">"First name"</label>
                    <input
                        id="first_name"
                        type="text"
                        class="form-control"
                        maxlength="150"
                        node_ref=first_ref
                        prop:value=move || first_name.get()
                        on:input=move |ev| first_name.set(event_target_value(&ev))
                    />
                    <FieldErrorList field="first_name" />
                </div>
                <div class="form-group">
                    <label for="last_name">"Last name"</label>
                    <input
                        id="last_name"
                        type="text"
                        class="form-control"
                        maxlength="150"
                        prop:value=move || last_name.get()
                        on:input=move |ev| last_name.set(event_target_value(&ev))
                    />
                    <FieldErrorList field="last_name" />
                </div>
                <button type="submit" class="btn btn-primary">"Save"</button>
                <button type="button" class="btn btn-secondary ml-2" on:click=move |_| editing.set(false)>"Cancel"</button>
            </form>
        </section>
    }
}

#[component]
fn PasswordSection() -> impl IntoView {
    let ctx = use_app_context();
    let open = RwSignal::new(false);
    let draft = RwSignal::new(PasswordDraft::default());

    let close = move || {
        draft.set(PasswordDraft::default());
        ctx.clear_errors();
        open.set(false);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match draft.get_untracked().to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                draft.update(|d| {
                    d.new_password.clear();
                    d.confirm_password.clear();
                });
                ctx.display_errors(errors);
                return;
            }
        };
        let url = ctx.with_config(|c| c.endpoints.password.clone());
        spawn_local(async move {
            match commands::change_password(&ctx.api(), &url, &payload).await {
                Ok(message) => {
                    close();
                    ctx.notify(message, ToastLevel::Success);
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    view! {
        <section class="settings-section">
            <h4>"Security"</h4>
            <Show
                when=move || open.get()
                fallback=move || view! {
                    <button id="change-password-btn" type="button" class="btn btn-outline-primary" on:click=move |_| open.set(true)>
                        "Change Password"
                    </button>
                }
            >
                <form id="change-password-form" class="change-password-container show" on:submit=on_submit>
                    <PasswordInput id="old_password" label="Old password" draft=draft />
                    <PasswordInput id="new_password" label="New password" draft=draft />
                    <PasswordInput id="confirm_password" label="Confirm password" draft=draft />
                    <button type="submit" class="btn btn-primary">"Change"</button>
                    <button id="cancel-password-change" type="button" class="btn btn-secondary ml-2" on:click=move |_| close()>
                        "Cancel"
                    </button>
                </form>
            </Show>
        </section>
    }
}

fn password_field<'a>(draft: &'a mut PasswordDraft, id: &str) -> Option<&'a mut String> {
    match id {
        "old_password" => Some(&mut draft.old_password),
        "new_password" => Some(&mut draft.new_password),
        "confirm_password" => Some(&mut draft.confirm_password),
        _ => None,
    }
}

fn password_value<'a>(draft: &'a PasswordDraft, id: &str) -> &'a str {
    match id {
        "old_password" => &draft.old_password,
        "new_password" => &draft.new_password,
        "confirm_password" => &draft.confirm_password,
        _ => "",
    }
}

#[component]
fn PasswordInput(id: &'static str, label: &'static str, draft: RwSignal<PasswordDraft>) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                id=id
                type="password"
                class="form-control"
                required
                prop:value=move || draft.with(|d| password_value(d, id).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| {
                        if let Some(field) = password_field(d, id) {
                            *field = value;
                        }
                    });
                }
            />
            <FieldErrorList field=id />
        </div>
    }
}

#[component]
fn TwoFactorSection() -> impl IntoView {
    let ctx = use_app_context();
    let enabled = RwSignal::new(ctx.with_config(|c| c.two_factor_enabled));
    let step = RwSignal::new(TwoFactorStep::Idle);
    let token = RwSignal::new(String::new());

    let request_code = move |_| {
        let url = ctx.with_config(|c| c.endpoints.two_factor.clone());
        spawn_local(async move {
            match commands::request_two_factor_code(&ctx.api(), &url).await {
                Ok(token_url) => step.set(TwoFactorStep::Token { url: token_url }),
                Err(e) => {
                    log::error!("2FA code request failed: {}", e);
                    ctx.submission_error();
                }
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let TwoFactorStep::Token { url } = step.get_untracked() else {
            return;
        };
        let value = token.get_untracked();
        if let Err(errors) = validation::validate_token(&value).into_result() {
            ctx.display_errors(errors);
            return;
        }
        spawn_local(async move {
            match commands::submit_two_factor_token(&ctx.api(), &url, &value).await {
                Ok(message) => {
                    token.set(String::new());
                    enabled.update(|e| *e = !*e);
                    step.set(TwoFactorStep::Idle);
                    ctx.clear_errors();
                    ctx.notify(message, ToastLevel::Success);
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    view! {
        <section class="settings-section">
            <h4>"Two-factor authentication"</h4>
            {move || match step.get() {
                TwoFactorStep::Idle => view! {
                    <button id="two-factor-btn" type="button" class="btn btn-outline-primary" on:click=move |_| step.set(TwoFactorStep::Confirm)>
                        {two_factor_label(enabled.get())}
                    </button>
                }.into_any(),
                TwoFactorStep::Confirm => view! {
                    <div class="two-factor-confirmation show">
                        <p>"A confirmation code will be sent to your email."</p>
                        <button id="two-factor-get-code" type="button" class="btn btn-primary" on:click=request_code>
                            {two_factor_label(enabled.get())}
                        </button>
                        <button id="two-factor-cancel-btn" type="button" class="btn btn-secondary ml-2" on:click=move |_| step.set(TwoFactorStep::Idle)>
                            "Cancel"
                        </button>
                    </div>
                }.into_any(),
                TwoFactorStep::Token { .. } => view! {
                    <form id="two-factor-form" class="two-factor-container show" on:submit=on_submit>
                        <div class="form-group">
                            <label for="token">"Code"</label>
                            <input
                                id="token"
                                type="text"
                                class="form-control"
                                autocomplete="one-time-code"
                                prop:value=move || token.get()
                                on:input=move |ev| token.set(event_target_value(&ev))
                            />
                            <FieldErrorList field="token" />
                        </div>
                        <button type="submit" class="btn btn-primary">"Confirm"</button>
                        <button id="two-factor-cancel-form-btn" type="button" class="btn btn-secondary ml-2" on:click=move |_| step.set(TwoFactorStep::Idle)>
                            "Cancel"
                        </button>
                    </form>
                }.into_any(),
            }}
        </section>
    }
}

#[component]
fn ShareLevelSection() -> impl IntoView {
    let ctx = use_app_context();
    let level = RwSignal::new(ctx.with_config(|c| c.share_level.clone()));
    let options = ctx.with_config(|c| c.share_levels.clone());
    let initial = level.get_untracked();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let url = ctx.with_config(|c| c.endpoints.share_level.clone());
        let value = level.get_untracked();
        spawn_local(async move {
            match commands::update_share_level(&ctx.api(), &url, &value).await {
                Ok(()) => {
                    ctx.clear_errors();
                    ctx.notify("Share Level updated.", ToastLevel::Success);
                }
                Err(e) => ctx.report(e),
            }
        });
    };

    view! {
        <section class="settings-section">
            <h4>"Default share level"</h4>
            <form id="share-level-form" on:submit=on_submit>
                <div class="form-group">
                    <select
                        id="share_level"
                        class="form-control"
                        on:change=move |ev| level.set(event_target_value(&ev))
                    >
                        {options
                            .into_iter()
                            .map(|(value, label)| {
                                let selected = value == initial;
                                view! { <option value=value selected=selected>{label}</option> }
                            })
                            .collect_view()}
                    </select>
                    <FieldErrorList field="share_level" />
                </div>
                <button type="submit" class="btn btn-primary">"Save"</button>
            </form>
        </section>
    }
}

fn request_account_deletion(ctx: AppContext) {
    let url = ctx.with_config(|c| c.endpoints.delete_account.clone());
    spawn_local(async move {
        match commands::request_account_deletion(&ctx.api(), &url).await {
            Ok(message) => ctx.show_toast(Toast::new(message).level(ToastLevel::Success).duration(ACCOUNT_MESSAGE_MS)),
            Err(e) => {
                log::error!("account deletion request failed: {}", e);
                ctx.submission_error();
            }
        }
    });
}

#[component]
fn DeleteAccountSection() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <section class="settings-section">
            <h4>"Delete account"</h4>
            <p>"A confirmation email will be sent before the account is removed."</p>
            <span id="delete-account">
                <DeleteConfirmButton
                    button_class="btn btn-outline-danger"
                    prompt="Delete account?"
                    on_confirm=move |_: ()| request_account_deletion(ctx)
                />
            </span>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_factor_label_flips() {
        assert_eq!(two_factor_label(false), "Enable 2FA");
        assert_eq!(two_factor_label(true), "Disable 2FA");
    }

    #[test]
    fn test_password_field_lookup() {
        let mut draft = PasswordDraft::default();
        if let Some(field) = password_field(&mut draft, "confirm_password") {
            *field = "secret".into();
        }
        assert_eq!(draft.confirm_password, "secret");
        assert!(password_field(&mut draft, "token").is_none());
        assert_eq!(password_value(&draft, "confirm_password"), "secret");
        assert_eq!(password_value(&draft, "token"), "");
    }

    #[test]
    fn test_default_step_is_idle() {
        assert_eq!(TwoFactorStep::default(), TwoFactorStep::Idle);
        let step = TwoFactorStep::Token { url: "/2fa/confirm/".into() };
        assert_ne!(step, TwoFactorStep::Confirm);
    }

    #[test]
    fn test_form_class_reveals_when_shown() {
        assert_eq!(form_class(true), "");
        assert_eq!(form_class(false), "d-none");
    }
}
