//! Application Context
//!
//! Shared state provided via Leptos Context API: toast queue, field errors
//! of the active form, the API client and the page configuration.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::ApiClient;
use crate::config::PageConfig;
use crate::error::ApiError;
use crate::validation::FieldErrors;

pub const DEFAULT_TOAST_MS: u32 = 2000;
const SUBMISSION_ERROR_MS: u32 = 3000;
const SERVER_MESSAGE_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warn,
    Error,
}

impl ToastLevel {
    pub fn border_class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "border-info",
            ToastLevel::Success => "border-success",
            ToastLevel::Warn => "border-warn",
            ToastLevel::Error => "border-error",
        }
    }
}

/// Dismissible notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub level: ToastLevel,
    pub duration_ms: u32,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: "Notification".to_string(),
            message: message.into(),
            level: ToastLevel::Info,
            duration_ms: DEFAULT_TOAST_MS,
        }
    }

    pub fn level(mut self, level: ToastLevel) -> Self {
        self.level = level;
        self
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Generic failure notice when no field detail is available
    pub fn submission_error() -> Self {
        Toast::new(
            "An error occurred. Please try again later. If this keeps persisting, please contact support.",
        )
        .title("Submission Error")
        .level(ToastLevel::Error)
        .duration(SUBMISSION_ERROR_MS)
    }
}

/// Visible toasts in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, mut toast: Toast) -> u64 {
        self.next_id += 1;
        toast.id = self.next_id;
        self.toasts.push(toast);
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub toasts: RwSignal<ToastQueue>,
    /// Errors of the last failed submission, by field
    pub errors: RwSignal<FieldErrors>,
    api: StoredValue<ApiClient>,
    config: StoredValue<PageConfig>,
}

impl AppContext {
    pub fn new(config: PageConfig) -> Self {
        Self {
            toasts: RwSignal::new(ToastQueue::default()),
            errors: RwSignal::new(FieldErrors::new()),
            api: StoredValue::new(ApiClient::new(config.csrf.clone())),
            config: StoredValue::new(config),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn with_config<U>(&self, f: impl FnOnce(&PageConfig) -> U) -> U {
        self.config.with_value(f)
    }

    /// Show a toast and remove it once its duration has passed
    pub fn show_toast(&self, toast: Toast) {
        let duration = toast.duration_ms;
        let Some(id) = self.toasts.try_update(|q| q.push(toast)) else {
            return;
        };
        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(duration).await;
            toasts.update(|q| {
                q.dismiss(id);
            });
        });
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|q| {
            q.dismiss(id);
        });
    }

    /// Toast with the configured default duration
    pub fn notify(&self, message: impl Into<String>, level: ToastLevel) {
        let duration = self.with_config(|c| c.toast_duration_ms);
        self.show_toast(Toast::new(message).level(level).duration(duration));
    }

    pub fn submission_error(&self) {
        self.show_toast(Toast::submission_error());
    }

    /// Replace all displayed field errors
    pub fn display_errors(&self, errors: FieldErrors) {
        self.errors.set(errors);
    }

    pub fn clear_errors(&self) {
        self.errors.set(FieldErrors::new());
    }

    /// Route a failed request: field errors inline, anything else as a toast
    pub fn report(&self, error: ApiError) {
        if !matches!(error, ApiError::Invalid { .. }) {
            log::error!("request failed: {}", error);
        }
        let (toast, errors) = feedback_for(error);
        if let Some(errors) = errors {
            self.display_errors(errors);
        }
        if let Some(toast) = toast {
            self.show_toast(toast);
        }
    }
}

/// Toast and field errors a failed request produces.
///
/// Field errors are `None` when the displayed ones should stay as they are.
/// A rejection with neither a message nor field detail still gets the
/// generic submission toast.
pub fn feedback_for(error: ApiError) -> (Option<Toast>, Option<FieldErrors>) {
    match error {
        ApiError::Invalid { errors, message } => {
            let toast = match message {
                Some(message) => Some(
                    Toast::new(message)
                        .title("Submission Error")
                        .level(ToastLevel::Error)
                        .duration(SERVER_MESSAGE_MS),
                ),
                None if errors.is_empty() => Some(Toast::submission_error()),
                None => None,
            };
            (toast, Some(errors))
        }
        _ => (Some(Toast::submission_error()), None),
    }
}

/// Full page navigation (server-rendered targets)
pub fn navigate_to(url: &str) {
    let Some(window) = web_sys::window() else {
        log::error!("no window, cannot navigate to {}", url);
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        log::error!("navigation to {} failed: {:?}", url, e);
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_defaults() {
        let toast = Toast::new("Saved");
        assert_eq!(toast.title, "Notification");
        assert_eq!(toast.level, ToastLevel::Info);
        assert_eq!(toast.duration_ms, 2000);
    }

    #[test]
    fn test_submission_error_preset() {
        let toast = Toast::submission_error();
        assert_eq!(toast.title, "Submission Error");
        assert_eq!(toast.level.border_class(), "border-error");
        assert_eq!(toast.duration_ms, 3000);
    }

    #[test]
    fn test_queue_assigns_ids_and_dismisses() {
        let mut queue = ToastQueue::default();
        let a = queue.push(Toast::new("a"));
        let b = queue.push(Toast::new("b"));
        assert_ne!(a, b);
        assert!(queue.dismiss(a));
        assert!(!queue.dismiss(a));
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].message, "b");
    }

    #[test]
    fn test_rejection_with_detail_shows_toast() {
        let error = crate::commands::decode_response::<()>(403, r#"{"detail":"CSRF Failed: CSRF cookie not set."}"#)
            .unwrap_err();
        let (toast, errors) = feedback_for(error);
        let toast = toast.expect("toast for a rejected request");
        assert_eq!(toast.message, "CSRF Failed: CSRF cookie not set.");
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(errors, Some(FieldErrors::new()));
    }

    #[test]
    fn test_field_errors_stay_inline() {
        let mut fields = FieldErrors::new();
        fields.add("name", "This field is required.");
        let (toast, errors) = feedback_for(ApiError::Invalid { errors: fields.clone(), message: None });
        assert!(toast.is_none());
        assert_eq!(errors, Some(fields));
    }

    #[test]
    fn test_empty_rejection_and_failures_use_submission_toast() {
        let (toast, _) = feedback_for(ApiError::Invalid { errors: FieldErrors::new(), message: None });
        assert_eq!(toast, Some(Toast::submission_error()));

        let (toast, errors) = feedback_for(ApiError::Server { status: 500, message: "boom".into() });
        assert_eq!(toast, Some(Toast::submission_error()));
        assert!(errors.is_none());
        let (toast, _) = feedback_for(ApiError::Network("offline".into()));
        assert_eq!(toast.map(|t| t.title), Some("Submission Error".to_string()));
    }
}
