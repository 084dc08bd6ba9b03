//! Server Commands
//!
//! JSON-over-HTTP bindings to the server API, organized by domain.
//! Every call goes through [`ApiClient::request`], which attaches the CSRF
//! header and turns the response into `Result<T, ApiError>`.

mod items;
mod lists;
mod settings;

use std::fmt;
use std::str::FromStr;

use gloo_net::http::{Request, RequestBuilder};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::JsCast;

use crate::config::CsrfConfig;
use crate::error::ApiError;
use crate::validation::FieldErrors;

pub use items::*;
pub use lists::*;
pub use settings::*;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    fn builder(&self, url: &str) -> RequestBuilder {
        match self {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unsupported method: {}", other)),
        }
    }
}

/// Request/response bridge to the server
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    csrf: CsrfConfig,
}

impl ApiClient {
    pub fn new(csrf: CsrfConfig) -> Self {
        Self { csrf }
    }

    /// Perform a JSON request and decode the reply
    pub async fn request<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("{} {}", method, url);
        let builder = self
            .headers(method, url)
            .header("Content-Type", JSON_CONTENT_TYPE);
        let request = match body {
            Some(body) => builder.body(serde_json::to_string(body)?),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Request(e.to_string()))?;
        self.send(method, url, request).await
    }

    /// POST a multipart form. The browser sets the boundary content type.
    pub async fn send_form<T: DeserializeOwned>(&self, url: &str, form: web_sys::FormData) -> Result<T, ApiError> {
        log::debug!("POST {} (multipart)", url);
        let request = self
            .headers(Method::Post, url)
            .body(form)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        self.send(Method::Post, url, request).await
    }

    fn headers(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = method.builder(url).header("Accept", "application/json");
        match csrf_token(&self.csrf.cookie_name) {
            Some(token) => builder.header(&self.csrf.header_name, &token),
            None => {
                if method != Method::Get {
                    log::warn!("no {} cookie, sending {} {} without CSRF token", self.csrf.cookie_name, method, url);
                }
                builder
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, url: &str, request: Request) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            log::error!("{} {} failed: {}", method, url, e);
            ApiError::from(e)
        })?;
        let status = response.status();
        let text = response.text().await?;
        let result = decode_response(status, &text);
        if let Err(e) = &result {
            log::warn!("{} {} -> {}: {}", method, url, status, e);
        }
        result
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.request::<Value, T>(Method::Get, url, None).await
    }
}

/// Map status and body onto the response contract.
///
/// 2xx carries the payload itself, 4xx with a JSON object carries field
/// errors (either under `errors` or as the whole object), everything else is
/// a server failure. `message`, `detail` and `non_field_errors` are never
/// fields; they become the error's message.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let trimmed = body.trim();
    if (200..300).contains(&status) {
        let text = if trimmed.is_empty() { "null" } else { trimmed };
        return serde_json::from_str(text).map_err(ApiError::from);
    }

    let parsed: Option<Value> = serde_json::from_str(trimmed).ok();
    if (400..500).contains(&status) {
        if let Some(Value::Object(mut object)) = parsed.clone() {
            let notes: Vec<Value> = ["message", "detail", "non_field_errors"]
                .iter()
                .filter_map(|key| object.remove(*key))
                .collect();
            let message = notes.iter().find_map(message_text);
            let errors = match object.remove("errors") {
                Some(nested) => FieldErrors::from_json(&nested),
                None => FieldErrors::from_json(&Value::Object(object)),
            }
            .unwrap_or_default();
            if !errors.is_empty() || message.is_some() {
                return Err(ApiError::Invalid { errors, message });
            }
        }
    }

    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("detail")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status_text(status).to_string());
    Err(ApiError::Server { status, message })
}

/// Non-field error text: a string, or a list of strings joined with spaces
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(m) => Some(m.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Request failed",
    }
}

/// Value of a cookie from a `document.cookie` string
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

fn csrf_token(cookie_name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let html = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    let cookies = html.cookie().ok()?;
    cookie_value(&cookies, cookie_name)
}

/// `url?key=value` with the value percent-encoded
pub fn with_query(url: &str, key: &str, value: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, sep, key, utf8_percent_encode(value, NON_ALPHANUMERIC))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RedirectResponse;

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=t%2Bk%3D1; csrftokenx=nope";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("t+k=1"));
        assert_eq!(cookie_value(cookies, "csrf"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
        assert_eq!(cookie_value("csrftokenx=1", "csrftoken"), None);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("put".parse::<Method>(), Ok(Method::Put));
        assert!("TRACE".parse::<Method>().is_err());
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_success_decodes_payload() {
        let r: RedirectResponse = decode_response(201, r#"{"url":"/lists/4/"}"#).unwrap();
        assert_eq!(r.url, "/lists/4/");
        assert!(decode_response::<()>(204, "").is_ok());
        assert!(decode_response::<Value>(200, "{}").is_ok());
    }

    #[test]
    fn test_success_with_bad_body_is_decode_error() {
        let r: Result<RedirectResponse, _> = decode_response(200, "<html>");
        assert!(matches!(r, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_flat_field_errors() {
        let r: Result<(), _> = decode_response(400, r#"{"name":["This field is required."]}"#);
        let Err(ApiError::Invalid { errors, message }) = r else { panic!("expected invalid") };
        assert_eq!(errors.get("name"), ["This field is required."]);
        assert_eq!(message, None);
    }

    #[test]
    fn test_wrapped_errors_with_message() {
        let r: Result<(), _> = decode_response(
            422,
            r#"{"message":"Could not save list","errors":{"emails":["Enter a valid email address."]}}"#,
        );
        let Err(ApiError::Invalid { errors, message }) = r else { panic!("expected invalid") };
        assert_eq!(message.as_deref(), Some("Could not save list"));
        assert_eq!(errors.get("emails").len(), 1);
    }

    #[test]
    fn test_server_failure() {
        let r: Result<(), _> = decode_response(500, "oops");
        assert_eq!(
            r,
            Err(ApiError::Server { status: 500, message: "Internal Server Error".into() })
        );
        let r: Result<(), _> = decode_response(404, "");
        assert!(matches!(r, Err(ApiError::Server { status: 404, .. })));
    }

    #[test]
    fn test_detail_is_message_not_field() {
        let r: Result<(), _> = decode_response(403, r#"{"detail":"CSRF Failed: CSRF token missing."}"#);
        let Err(ApiError::Invalid { errors, message }) = r else { panic!("expected invalid") };
        assert!(errors.is_empty());
        assert_eq!(message.as_deref(), Some("CSRF Failed: CSRF token missing."));

        let r: Result<(), _> = decode_response(
            400,
            r#"{"non_field_errors":["Wrong code.","Try again."],"token":["Invalid."]}"#,
        );
        let Err(ApiError::Invalid { errors, message }) = r else { panic!("expected invalid") };
        assert_eq!(message.as_deref(), Some("Wrong code. Try again."));
        assert_eq!(errors.get("token"), ["Invalid."]);
        assert!(!errors.contains("non_field_errors"));
    }

    #[test]
    fn test_with_query_encodes_value() {
        assert_eq!(with_query("/api/items/", "name", "mi lk&"), "/api/items/?name=mi%20lk%26");
        assert_eq!(with_query("/s?x=1", "name", "ab"), "/s?x=1&name=ab");
    }
}
