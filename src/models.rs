//! Frontend Models
//!
//! Data structures matching the server's JSON payloads.

use leptos_table_sync::TableRow;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Catalog item (items page)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: String,
    /// Item endpoint, used for fetch/update/archive/delete
    pub url: String,
}

impl TableRow for CatalogItem {
    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

/// Row of the shopping list overview table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: u32,
    #[serde(rename = "shopping_list__name", alias = "name", default)]
    pub name: String,
    #[serde(default)]
    pub item_count: u32,
    #[serde(default)]
    pub complete_item_count: u32,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub url: String,
}

impl TableRow for ListSummary {
    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

/// Autocomplete suggestion for the item name input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub price: Option<f64>,
}

/// Item row of the shopping list editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemRow {
    /// Client identity, assigned once when the row enters the table
    #[serde(skip)]
    pub key: String,
    #[serde(default)]
    pub link_id: Option<u32>,
    #[serde(default)]
    pub item_id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default = "default_quantity", deserialize_with = "de_number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_done: bool,
}

fn default_quantity() -> f64 {
    1.0
}

impl ListItemRow {
    /// Hash over the mutable fields, used to spot duplicates before save
    pub fn content_hash(&self) -> String {
        let price = self
            .price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.name.trim().as_bytes());
        hasher.update(&[0]);
        hasher.update(format!("{:.2}", self.quantity).as_bytes());
        hasher.update(&[0]);
        hasher.update(price.as_bytes());
        hasher.update(&[0]);
        hasher.update(if self.is_done { b"1" } else { b"0" });
        hasher.finalize().to_hex().as_str()[..16].to_string()
    }

    /// Key used for a fresh row: server link id when known, content hash otherwise
    pub fn initial_key(&self) -> String {
        match self.link_id {
            Some(id) => format!("link-{}", id),
            None => format!("h-{}", self.content_hash()),
        }
    }
}

impl TableRow for ListItemRow {
    fn row_key(&self) -> String {
        self.key.clone()
    }
}

/// Row of the share-with table
#[derive(Debug, Clone, PartialEq)]
pub struct SharedEmail {
    pub email: String,
}

impl SharedEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}

impl TableRow for SharedEmail {
    fn row_key(&self) -> String {
        self.email.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

// ========================
// Response Bodies
// ========================

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedirectResponse {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListsResponse {
    #[serde(default)]
    pub content: Vec<ListSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

// ========================
// Number Helpers
// ========================

/// Decimal fields arrive as numbers, numeric strings ("3.50") or "" for empty
fn number_from_value(value: Value) -> Result<Option<f64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("invalid number: {:?}", s)),
        other => Err(format!("expected number, got {}", other)),
    }
}

fn de_opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(d)?;
    number_from_value(value).map_err(serde::de::Error::custom)
}

fn de_number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    number_from_value(value)
        .map(|n| n.unwrap_or_else(default_quantity))
        .map_err(serde::de::Error::custom)
}

/// Render a decimal without trailing zeros ("2", "3.5", "9999999.99")
pub fn display_number(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn display_price(price: Option<f64>) -> String {
    price.map(display_number).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> ListItemRow {
        ListItemRow {
            key: String::new(),
            link_id: None,
            item_id: None,
            name: "Milk".into(),
            code: String::new(),
            quantity: 2.0,
            price: Some(3.5),
            is_done: false,
        }
    }

    #[test]
    fn test_content_hash_ignores_code_and_ids() {
        let a = milk();
        let mut b = milk();
        b.code = "M-1".into();
        b.item_id = Some(4);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_content_hash_tracks_mutable_fields() {
        let a = milk();
        let mut b = milk();
        b.is_done = true;
        assert_ne!(a.content_hash(), b.content_hash());
        let mut c = milk();
        c.price = None;
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn test_initial_key_prefers_link_id() {
        let mut row = milk();
        assert!(row.initial_key().starts_with("h-"));
        row.link_id = Some(12);
        assert_eq!(row.initial_key(), "link-12");
    }

    #[test]
    fn test_catalog_item_accepts_blank_and_string_price() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"id":1,"name":"Bread","code":"","price":"","tags":"","url":"/api/items/1/"}"#,
        )
        .unwrap();
        assert_eq!(item.price, None);

        let item: CatalogItem =
            serde_json::from_str(r#"{"id":2,"name":"Jam","price":"4.20","url":"/i/2/"}"#).unwrap();
        assert_eq!(item.price, Some(4.2));
    }

    #[test]
    fn test_list_row_decodes_decimal_strings() {
        let row: ListItemRow = serde_json::from_str(
            r#"{"link_id":3,"item_id":9,"name":"Eggs","code":"E","quantity":"1.50","price":null,"is_done":true}"#,
        )
        .unwrap();
        assert_eq!(row.quantity, 1.5);
        assert_eq!(row.price, None);
        assert!(row.key.is_empty());
    }

    #[test]
    fn test_list_row_serializes_without_key() {
        let mut row = milk();
        row.key = "h-abc".into();
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("key").is_none());
        assert_eq!(json["price"], 3.5);
        assert_eq!(json["link_id"], Value::Null);
    }

    #[test]
    fn test_summary_reads_server_field_name() {
        let s: ListSummary = serde_json::from_str(
            r#"{"id":1,"shopping_list__name":"Weekly","item_count":4,"complete_item_count":1,"total_price":12.5}"#,
        )
        .unwrap();
        assert_eq!(s.name, "Weekly");
        assert_eq!(s.total_price, Some(12.5));
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(2.0), "2");
        assert_eq!(display_number(3.5), "3.5");
        assert_eq!(display_number(9999999.99), "9999999.99");
        assert_eq!(display_price(None), "");
    }
}
