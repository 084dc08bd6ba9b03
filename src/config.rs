//! Page Configuration
//!
//! The server-rendered template embeds a JSON block
//! (`<script id="page-config" type="application/json">`) describing which
//! page to mount, the endpoints it talks to and the initial table contents.

use serde::{Deserialize, Serialize};

use crate::commands::Method;
use crate::models::{CatalogItem, ListItemRow, ListSummary, Profile};

pub const CONFIG_ELEMENT_ID: &str = "page-config";
pub const MOUNT_ELEMENT_ID: &str = "app";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    #[default]
    Items,
    Lists,
    ListEditor,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: "csrftoken".to_string(),
            header_name: "X-CSRFToken".to_string(),
        }
    }
}

/// Server endpoints; unused ones stay empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub items: String,
    pub item_search: String,
    pub list_submit: String,
    pub new_list: String,
    pub profile: String,
    pub password: String,
    pub avatar: String,
    pub share_level: String,
    pub two_factor: String,
    pub delete_account: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub page: PageKind,
    pub csrf: CsrfConfig,
    pub endpoints: Endpoints,
    /// POST for a new list, PUT when editing an existing one
    pub submit_method: Method,
    pub list_name: String,
    pub catalog_items: Vec<CatalogItem>,
    pub list_items: Vec<ListItemRow>,
    pub shared_emails: Vec<String>,
    pub lists: Vec<ListSummary>,
    pub profile: Profile,
    pub two_factor_enabled: bool,
    pub share_level: String,
    /// (value, label) pairs for the share level select
    pub share_levels: Vec<(String, String)>,
    pub toast_duration_ms: u32,
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page: PageKind::default(),
            csrf: CsrfConfig::default(),
            endpoints: Endpoints::default(),
            submit_method: Method::Post,
            list_name: String::new(),
            catalog_items: Vec::new(),
            list_items: Vec::new(),
            shared_emails: Vec::new(),
            lists: Vec::new(),
            profile: Profile::default(),
            two_factor_enabled: false,
            share_level: String::new(),
            share_levels: Vec::new(),
            toast_duration_ms: crate::context::DEFAULT_TOAST_MS,
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Read the config block from the document, falling back to defaults
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match text {
            Some(text) => Self::from_json(&text).unwrap_or_else(|e| {
                log::warn!("invalid #{} block, using defaults: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
            None => {
                log::warn!("no #{} block, using defaults", CONFIG_ELEMENT_ID);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.csrf.cookie_name, "csrftoken");
        assert_eq!(config.csrf.header_name, "X-CSRFToken");
        assert_eq!(config.toast_duration_ms, 2000);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_list_editor_config() {
        let config = PageConfig::from_json(
            r#"{
                "page": "list_editor",
                "submit_method": "PUT",
                "endpoints": {"list_submit": "/api/lists/3/", "item_search": "/api/items/search/"},
                "list_name": "Weekly",
                "list_items": [{"link_id": 1, "name": "Milk", "quantity": "2.00", "price": "3.50", "is_done": false}],
                "shared_emails": ["friend@example.com"],
                "log_level": "debug"
            }"#,
        )
        .unwrap();
        assert_eq!(config.page, PageKind::ListEditor);
        assert_eq!(config.submit_method, Method::Put);
        assert_eq!(config.endpoints.list_submit, "/api/lists/3/");
        assert_eq!(config.list_items[0].quantity, 2.0);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_page_is_error() {
        assert!(PageConfig::from_json(r#"{"page": "dashboard"}"#).is_err());
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = PageConfig::from_json(r#"{"log_level": "loud"}"#).unwrap();
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }
}
