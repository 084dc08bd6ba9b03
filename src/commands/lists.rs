//! List Commands
//!
//! Shopping list submission, archive and delete.

use serde_json::Value;

use super::{ApiClient, Method};
use crate::error::ApiError;
use crate::forms::ListPayload;
use crate::models::{ListSummary, ListsResponse, RedirectResponse};

/// Create (POST) or replace (PUT) a list; returns where to go next
pub async fn submit_list(api: &ApiClient, url: &str, method: Method, payload: &ListPayload) -> Result<String, ApiError> {
    let response: RedirectResponse = api.request(method, url, Some(payload)).await?;
    Ok(response.url)
}

/// Soft delete (PATCH); returns the refreshed overview rows
pub async fn archive_list(api: &ApiClient, url: &str) -> Result<Vec<ListSummary>, ApiError> {
    let response: ListsResponse = api.request::<Value, _>(Method::Patch, url, None).await?;
    Ok(response.content)
}

/// Permanent delete (DELETE); returns the refreshed overview rows
pub async fn delete_list(api: &ApiClient, url: &str) -> Result<Vec<ListSummary>, ApiError> {
    let response: ListsResponse = api.request::<Value, _>(Method::Delete, url, None).await?;
    Ok(response.content)
}
