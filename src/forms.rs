//! Form Drafts
//!
//! Raw input values as typed by the user, and their conversion into
//! request payloads.

use serde::Serialize;

use crate::models::{display_number, display_price, CatalogItem, ListItemRow};
use crate::validation::{self, FieldErrors, MAX_DECIMAL_PLACES, MSG_DECIMAL_PLACES, MSG_NOT_A_NUMBER};

fn parse_optional_number(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(_) if validation::decimal_places(raw) > MAX_DECIMAL_PLACES => {
            errors.add(field, MSG_DECIMAL_PLACES);
            None
        }
        Ok(v) => Some(v),
        Err(_) => {
            errors.add(field, MSG_NOT_A_NUMBER);
            None
        }
    }
}

/// Add-to-list form and inline edit row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub item_id: Option<u32>,
    pub name: String,
    pub code: String,
    pub quantity: String,
    pub price: String,
    pub is_done: bool,
}

impl ItemDraft {
    /// Prefill from an existing row (inline edit)
    pub fn from_row(row: &ListItemRow) -> Self {
        Self {
            item_id: row.item_id,
            name: row.name.clone(),
            code: row.code.clone(),
            quantity: display_number(row.quantity),
            price: display_price(row.price),
            is_done: row.is_done,
        }
    }

    /// Parse and validate. Empty quantity means 1, empty price means none.
    pub fn to_row(&self) -> Result<ListItemRow, FieldErrors> {
        let mut errors = FieldErrors::new();
        let quantity = parse_optional_number(&mut errors, "quantity", &self.quantity).unwrap_or(1.0);
        let price = parse_optional_number(&mut errors, "price", &self.price);
        let row = ListItemRow {
            key: String::new(),
            link_id: None,
            item_id: self.item_id,
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            quantity,
            price,
            is_done: self.is_done,
        };
        errors.merge(validation::validate_item(&row));
        errors.into_result().map(|_| row)
    }
}

/// Catalog item modal form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogDraft {
    pub name: String,
    pub code: String,
    pub price: String,
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPayload {
    pub name: String,
    pub code: String,
    pub price: Option<f64>,
    pub tags_string: String,
}

impl CatalogDraft {
    pub fn from_item(item: &CatalogItem) -> Self {
        Self {
            name: item.name.clone(),
            code: item.code.clone(),
            price: display_price(item.price),
            tags: item.tags.clone(),
        }
    }

    pub fn to_payload(&self) -> Result<CatalogPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        validation::check_required_max(&mut errors, "name", &self.name, validation::NAME_MAX_LEN);
        validation::check_max(&mut errors, "code", &self.code, validation::CODE_MAX_LEN);
        validation::check_max(&mut errors, "tags", &self.tags, validation::TAGS_MAX_LEN);
        let price = parse_optional_number(&mut errors, "price", &self.price);
        if let Some(p) = price {
            validation::check_range(&mut errors, "price", p, validation::PRICE_LIMIT);
        }
        errors.into_result().map(|_| CatalogPayload {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            price,
            tags_string: self.tags.trim().to_string(),
        })
    }
}

/// Full shopping list submission body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPayload {
    pub name: String,
    pub items: Vec<ListItemRow>,
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilePayload {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordDraft {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordPayload {
    pub old_password: String,
    pub new_password: String,
}

impl PasswordDraft {
    pub fn to_payload(&self) -> Result<PasswordPayload, FieldErrors> {
        validation::validate_password_change(
            &self.old_password,
            &self.new_password,
            &self.confirm_password,
        )
        .into_result()
        .map(|_| PasswordPayload {
            old_password: self.old_password.trim().to_string(),
            new_password: self.new_password.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenPayload {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareLevelPayload {
    pub share_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(quantity: &str, price: &str) -> ItemDraft {
        ItemDraft {
            name: " Milk ".into(),
            quantity: quantity.into(),
            price: price.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_quantity_defaults_to_one() {
        let row = draft("", "").to_row().unwrap();
        assert_eq!(row.quantity, 1.0);
        assert_eq!(row.price, None);
        assert_eq!(row.name, "Milk");
    }

    #[test]
    fn test_unparsable_number_is_field_error() {
        let errors = draft("two", "1,5").to_row().unwrap_err();
        assert_eq!(errors.get("quantity"), [MSG_NOT_A_NUMBER]);
        assert_eq!(errors.get("price"), [MSG_NOT_A_NUMBER]);
    }

    #[test]
    fn test_range_checked_after_parse() {
        assert!(draft("99.99", "9999999.99").to_row().is_ok());
        assert!(draft("100", "").to_row().unwrap_err().contains("quantity"));
        assert!(draft("1", "10000000").to_row().unwrap_err().contains("price"));
    }

    #[test]
    fn test_more_than_two_decimals_rejected() {
        let errors = draft("99.995", "0.125").to_row().unwrap_err();
        assert_eq!(errors.get("quantity"), [MSG_DECIMAL_PLACES]);
        assert_eq!(errors.get("price"), [MSG_DECIMAL_PLACES]);

        let row = draft("99.99", "1.50").to_row().unwrap();
        assert_eq!(ItemDraft::from_row(&row).quantity, "99.99");

        let catalog = CatalogDraft { name: "Tea".into(), price: "2.999".into(), ..Default::default() };
        assert_eq!(catalog.to_payload().unwrap_err().get("price"), [MSG_DECIMAL_PLACES]);
    }

    #[test]
    fn test_from_row_round_trips_display_values() {
        let row = draft("2", "3.5").to_row().unwrap();
        let back = ItemDraft::from_row(&row);
        assert_eq!(back.quantity, "2");
        assert_eq!(back.price, "3.5");
    }

    #[test]
    fn test_catalog_payload() {
        let payload = CatalogDraft {
            name: "Apples".into(),
            code: "A1".into(),
            price: "".into(),
            tags: "fruit, sweet".into(),
        }
        .to_payload()
        .unwrap();
        assert_eq!(payload.price, None);
        assert_eq!(payload.tags_string, "fruit, sweet");

        let errors = CatalogDraft { tags: "t".repeat(251), ..Default::default() }
            .to_payload()
            .unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("tags"));
    }

    #[test]
    fn test_password_payload_trims() {
        let payload = PasswordDraft {
            old_password: " old ".into(),
            new_password: "new ".into(),
            confirm_password: " new".into(),
        }
        .to_payload()
        .unwrap();
        assert_eq!(payload.new_password, "new");
        assert_eq!(payload.old_password, "old");
    }
}
