//! Item Commands
//!
//! Catalog item endpoints and the item-name search used by the list editor.

use serde_json::Value;

use super::{with_query, ApiClient, Method};
use crate::error::ApiError;
use crate::forms::CatalogPayload;
use crate::models::{CatalogItem, SearchHit};

/// Searches start at this many characters
pub const SEARCH_MIN_CHARS: usize = 3;

// ========================
// Commands
// ========================

pub async fn get_item(api: &ApiClient, url: &str) -> Result<CatalogItem, ApiError> {
    api.get(url).await
}

pub async fn create_item(api: &ApiClient, items_url: &str, payload: &CatalogPayload) -> Result<CatalogItem, ApiError> {
    api.request(Method::Post, items_url, Some(payload)).await
}

pub async fn update_item(api: &ApiClient, url: &str, payload: &CatalogPayload) -> Result<CatalogItem, ApiError> {
    api.request(Method::Put, url, Some(payload)).await
}

/// Soft delete (PATCH)
pub async fn archive_item(api: &ApiClient, url: &str) -> Result<(), ApiError> {
    api.request::<Value, Value>(Method::Patch, url, None).await.map(|_| ())
}

/// Permanent delete (DELETE)
pub async fn delete_item(api: &ApiClient, url: &str) -> Result<(), ApiError> {
    api.request::<Value, Value>(Method::Delete, url, None).await.map(|_| ())
}

/// Items whose name matches `name`; empty for queries shorter than
/// [`SEARCH_MIN_CHARS`]
pub async fn search_items(api: &ApiClient, search_url: &str, name: &str) -> Result<Vec<SearchHit>, ApiError> {
    if name.chars().count() < SEARCH_MIN_CHARS {
        return Ok(Vec::new());
    }
    api.get(&with_query(search_url, "name", name)).await
}
