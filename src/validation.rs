//! Field Validation
//!
//! Client-side checks mirroring the server's field limits. Failures are
//! collected per field so the same rendering path serves client and server
//! errors.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::models::ListItemRow;

pub const NAME_MAX_LEN: usize = 200;
pub const CODE_MAX_LEN: usize = 20;
pub const TAGS_MAX_LEN: usize = 250;
pub const LIST_NAME_MAX_LEN: usize = 100;
/// Exclusive upper bound
pub const QUANTITY_LIMIT: f64 = 100.0;
/// Exclusive upper bound
pub const PRICE_LIMIT: f64 = 10_000_000.0;
/// Exclusive upper bound on the whole address
pub const EMAIL_LIMIT: usize = 254;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NOT_A_NUMBER: &str = "Enter a number.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_DUPLICATE_EMAIL: &str = "This email is already on the list.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_DECIMAL_PLACES: &str = "Ensure that there are no more than 2 decimal places.";
/// Quantities and prices are stored with cents precision
pub const MAX_DECIMAL_PLACES: usize = 2;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid email regex"));

/// Field name -> messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Same messages under `<prefix>_<field>` (inline editor regions)
    pub fn prefixed(self, prefix: &str) -> Self {
        Self(self.0.into_iter().map(|(field, m)| (format!("{}_{}", prefix, field), m)).collect())
    }

    /// Ok when no field failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Read a server error object.
    ///
    /// Values may be a message, a list of messages, or nested objects/lists
    /// (per-row errors of the list payload), which are flattened into
    /// readable messages under the top-level field.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut errors = FieldErrors::new();
        for (field, v) in object {
            let mut messages = Vec::new();
            flatten_messages(v, "", &mut messages);
            for m in messages {
                errors.add(field, m);
            }
        }
        Some(errors)
    }
}

fn flatten_messages(value: &Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(format!("{}{}", prefix, s)),
        Value::Array(values) => {
            for (i, v) in values.iter().enumerate() {
                match v {
                    Value::Object(_) => flatten_messages(v, &format!("{}Row {}: ", prefix, i + 1), out),
                    _ => flatten_messages(v, prefix, out),
                }
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                flatten_messages(v, &format!("{}{}: ", prefix, k), out);
            }
        }
        Value::Null => {}
        other => out.push(format!("{}{}", prefix, other)),
    }
}

// ========================
// Rules
// ========================

fn max_len_message(limit: usize) -> String {
    format!("Ensure this field has no more than {} characters.", limit)
}

pub fn check_required_max(errors: &mut FieldErrors, field: &str, value: &str, limit: usize) {
    if value.trim().is_empty() {
        errors.add(field, MSG_REQUIRED);
    } else {
        check_max(errors, field, value, limit);
    }
}

pub fn check_max(errors: &mut FieldErrors, field: &str, value: &str, limit: usize) {
    if value.chars().count() > limit {
        errors.add(field, max_len_message(limit));
    }
}

/// Value must lie in `[0, limit)`
pub fn check_range(errors: &mut FieldErrors, field: &str, value: f64, limit: f64) {
    if !value.is_finite() {
        errors.add(field, MSG_NOT_A_NUMBER);
    } else if value < 0.0 {
        errors.add(field, "Ensure this value is greater than or equal to 0.");
    } else if value >= limit {
        errors.add(field, format!("Ensure this value is less than {}.", limit));
    }
}

/// Significant digits after the decimal point of a typed number
pub fn decimal_places(raw: &str) -> usize {
    let mantissa = raw.trim().split(['e', 'E']).next().unwrap_or_default();
    let places = mantissa
        .split_once('.')
        .map(|(_, fraction)| fraction.trim_end_matches('0').len())
        .unwrap_or(0);
    let exponent: i64 = raw.trim().split_once(['e', 'E']).and_then(|(_, e)| e.parse().ok()).unwrap_or(0);
    (places as i64 - exponent).max(0) as usize
}

/// Rules for a shopping list row
pub fn validate_item(item: &ListItemRow) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required_max(&mut errors, "name", &item.name, NAME_MAX_LEN);
    check_max(&mut errors, "code", &item.code, CODE_MAX_LEN);
    check_range(&mut errors, "quantity", item.quantity, QUANTITY_LIMIT);
    if let Some(price) = item.price {
        check_range(&mut errors, "price", price, PRICE_LIMIT);
    }
    errors
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() < EMAIL_LIMIT && EMAIL_RE.is_match(email)
}

pub fn validate_email(field: &str, email: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let email = email.trim();
    if email.is_empty() {
        errors.add(field, MSG_REQUIRED);
    } else if !is_valid_email(email) {
        errors.add(field, MSG_INVALID_EMAIL);
    }
    errors
}

pub fn validate_list_name(name: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_max(&mut errors, "name", name.trim(), LIST_NAME_MAX_LEN);
    errors
}

pub fn validate_password_change(old: &str, new: &str, confirm: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if old.trim().is_empty() {
        errors.add("old_password", MSG_REQUIRED);
    }
    if new.trim().is_empty() {
        errors.add("new_password", MSG_REQUIRED);
    } else if new.trim() != confirm.trim() {
        errors.add("new_password", MSG_PASSWORD_MISMATCH);
        errors.add("confirm_password", MSG_PASSWORD_MISMATCH);
    }
    errors
}

/// Two-factor confirmation token
pub fn validate_token(token: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if token.trim().is_empty() {
        errors.add("token", MSG_REQUIRED);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places("2"), 0);
        assert_eq!(decimal_places(" 3.50 "), 1);
        assert_eq!(decimal_places("99.995"), 3);
        assert_eq!(decimal_places("1e-3"), 3);
        assert_eq!(decimal_places("1.5e2"), 0);
    }

    fn item(quantity: f64, price: Option<f64>) -> ListItemRow {
        ListItemRow {
            key: String::new(),
            link_id: None,
            item_id: None,
            name: "Milk".into(),
            code: String::new(),
            quantity,
            price,
            is_done: false,
        }
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_item(&item(99.99, None)).is_empty());
        assert!(validate_item(&item(0.0, None)).is_empty());
        assert!(validate_item(&item(100.0, None)).contains("quantity"));
        assert!(validate_item(&item(-1.0, None)).contains("quantity"));
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_item(&item(1.0, Some(9_999_999.99))).is_empty());
        let errors = validate_item(&item(1.0, Some(10_000_000.0)));
        assert_eq!(errors.get("price"), ["Ensure this value is less than 10000000."]);
        assert!(validate_item(&item(1.0, Some(f64::NAN))).contains("price"));
    }

    #[test]
    fn test_name_and_code_lengths() {
        let mut row = item(1.0, None);
        row.name = "   ".into();
        row.code = "x".repeat(21);
        let errors = validate_item(&row);
        assert_eq!(errors.get("name"), [MSG_REQUIRED]);
        assert_eq!(errors.get("code"), ["Ensure this field has no more than 20 characters."]);

        row.name = "n".repeat(201);
        row.code = "x".repeat(20);
        let errors = validate_item(&row);
        assert!(errors.contains("name"));
        assert!(!errors.contains("code"));
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user@@example"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("us er@example.com"));
        let long = format!("{}@example.com", "a".repeat(254));
        assert!(!is_valid_email(&long));
        assert_eq!(validate_email("email", "").get("email"), [MSG_REQUIRED]);
    }

    #[test]
    fn test_password_mismatch_marks_both_fields() {
        let errors = validate_password_change("old", "secret1", "secret2");
        assert_eq!(errors.get("new_password"), [MSG_PASSWORD_MISMATCH]);
        assert_eq!(errors.get("confirm_password"), [MSG_PASSWORD_MISMATCH]);
        assert!(validate_password_change("old", " s ", "s").is_empty());
    }

    #[test]
    fn test_list_name_limit() {
        assert!(validate_list_name("").is_empty());
        assert!(validate_list_name(&"l".repeat(101)).contains("name"));
    }

    #[test]
    fn test_from_json_flattens_nested_errors() {
        let value = json!({
            "name": ["Too long."],
            "detail": "Bad request",
            "items": [{}, {"price": ["Must be positive."]}]
        });
        let errors = FieldErrors::from_json(&value).unwrap();
        assert_eq!(errors.get("name"), ["Too long."]);
        assert_eq!(errors.get("detail"), ["Bad request"]);
        assert_eq!(errors.get("items"), ["Row 2: price: Must be positive."]);
        assert!(FieldErrors::from_json(&json!(["x"])).is_none());
    }

    #[test]
    fn test_merge_and_into_result() {
        let mut a = FieldErrors::new();
        assert!(a.clone().into_result().is_ok());
        let mut b = FieldErrors::new();
        b.add("name", "one");
        a.add("name", "zero");
        a.merge(b);
        assert_eq!(a.get("name"), ["zero", "one"]);
        assert!(a.into_result().is_err());
    }

    #[test]
    fn test_token_required() {
        assert_eq!(validate_token("  ").get("token"), [MSG_REQUIRED]);
        assert!(validate_token("123456").is_empty());
    }

    #[test]
    fn test_prefixed_keys() {
        let mut errors = FieldErrors::new();
        errors.add("quantity", MSG_NOT_A_NUMBER);
        let errors = errors.prefixed("edit");
        assert_eq!(errors.get("edit_quantity"), [MSG_NOT_A_NUMBER]);
        assert!(!errors.contains("quantity"));
    }
}
