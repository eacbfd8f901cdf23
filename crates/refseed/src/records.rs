//! Reference record types and their DynamoDB item conversions.
//!
//! Conversions are pure functions over the record content so they can
//! be tested without DynamoDB access. Every record derives its primary
//! key deterministically from its own fields; re-running a seed
//! replaces rows instead of appending new ones.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A record that can be seeded into a reference-data table.
pub trait ReferenceRecord {
    /// Stable logical key, derived from record content.
    fn key(&self) -> String;

    /// Human-readable name used in per-record reporting.
    fn display_name(&self) -> &str;

    /// DynamoDB item representation, including the key attribute.
    fn to_item(&self) -> HashMap<String, AttributeValue>;
}

fn default_active() -> bool {
    true
}

/// A country reference entry, keyed by its ISO short code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "code")]
    pub short_code: String,
    #[serde(rename = "name")]
    pub country_name: String,
    #[serde(rename = "dialCode")]
    pub dial_code: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
}

impl CountryRecord {
    pub fn new(code: &str, name: &str, dial_code: &str) -> Self {
        Self {
            short_code: code.to_string(),
            country_name: name.to_string(),
            dial_code: dial_code.to_string(),
            currency: None,
            is_active: true,
        }
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }
}

impl ReferenceRecord for CountryRecord {
    fn key(&self) -> String {
        self.short_code.clone()
    }

    fn display_name(&self) -> &str {
        &self.country_name
    }

    fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();

        item.insert(
            "short_code".to_string(),
            AttributeValue::S(self.short_code.clone()),
        );
        item.insert(
            "country_name".to_string(),
            AttributeValue::S(self.country_name.clone()),
        );
        item.insert(
            "dial_code".to_string(),
            AttributeValue::S(self.dial_code.clone()),
        );
        if let Some(currency) = &self.currency {
            item.insert("currency".to_string(), AttributeValue::S(currency.clone()));
        }
        item.insert(
            "is_active".to_string(),
            AttributeValue::Bool(self.is_active),
        );

        item
    }
}

/// A business-type reference entry, keyed by the slug of its name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BusinessTypeRecord {
    pub name: String,
    pub description: String,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
    #[serde(rename = "order", default)]
    pub display_order: Option<u32>,
    #[serde(skip)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BusinessTypeRecord {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            is_active: true,
            display_order: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.display_order = Some(order);
        self
    }

    /// Stamps creation/update timestamps, applied once per run.
    pub fn with_timestamps(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self.updated_at = Some(at);
        self
    }
}

impl ReferenceRecord for BusinessTypeRecord {
    fn key(&self) -> String {
        slugify(&self.name)
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();

        item.insert("id".to_string(), AttributeValue::S(self.key()));
        item.insert("name".to_string(), AttributeValue::S(self.name.clone()));
        item.insert(
            "description".to_string(),
            AttributeValue::S(self.description.clone()),
        );
        item.insert(
            "is_active".to_string(),
            AttributeValue::Bool(self.is_active),
        );
        if let Some(order) = self.display_order {
            item.insert(
                "displayOrder".to_string(),
                AttributeValue::N(order.to_string()),
            );
        }
        if let Some(created_at) = &self.created_at {
            item.insert(
                "createdAt".to_string(),
                AttributeValue::S(created_at.to_rfc3339()),
            );
        }
        if let Some(updated_at) = &self.updated_at {
            item.insert(
                "updatedAt".to_string(),
                AttributeValue::S(updated_at.to_rfc3339()),
            );
        }

        item
    }
}

/// Lowercases and replaces non-alphanumeric runs with single dashes.
/// "Food & Beverage" becomes "food-beverage".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Retail"), "retail");
        assert_eq!(slugify("Food & Beverage"), "food-beverage");
        assert_eq!(slugify("E-Commerce"), "e-commerce");
        assert_eq!(slugify("Beauty & Cosmetics"), "beauty-cosmetics");
        assert_eq!(slugify("  Services  "), "services");
    }

    #[test]
    fn country_item_keyed_by_short_code() {
        let country = CountryRecord::new("SA", "Saudi Arabia", "+966");
        let item = country.to_item();

        assert_eq!(country.key(), "SA");
        assert_eq!(
            item.get("short_code"),
            Some(&AttributeValue::S("SA".to_string()))
        );
        assert_eq!(
            item.get("dial_code"),
            Some(&AttributeValue::S("+966".to_string()))
        );
        assert_eq!(item.get("is_active"), Some(&AttributeValue::Bool(true)));
        assert!(item.get("currency").is_none());
    }

    #[test]
    fn country_item_includes_currency_when_set() {
        let country = CountryRecord::new("GB", "United Kingdom", "+44").with_currency("GBP");
        let item = country.to_item();

        assert_eq!(
            item.get("currency"),
            Some(&AttributeValue::S("GBP".to_string()))
        );
    }

    #[test]
    fn business_type_item_has_slug_key_and_defaults() {
        let btype = BusinessTypeRecord::new("Retail", "Retail sales and commerce").with_order(2);
        let item = btype.to_item();

        assert_eq!(btype.key(), "retail");
        assert_eq!(
            item.get("id"),
            Some(&AttributeValue::S("retail".to_string()))
        );
        assert_eq!(
            item.get("displayOrder"),
            Some(&AttributeValue::N("2".to_string()))
        );
        assert_eq!(item.get("is_active"), Some(&AttributeValue::Bool(true)));
        assert!(item.get("createdAt").is_none());
    }

    #[test]
    fn business_type_timestamps_stamped_once() {
        let btype = BusinessTypeRecord::new("Services", "Professional and consulting services")
            .with_timestamps(fixed_time());
        let item = btype.to_item();

        assert_eq!(
            item.get("createdAt"),
            Some(&AttributeValue::S("2024-01-15T10:30:00+00:00".to_string()))
        );
        assert_eq!(item.get("createdAt"), item.get("updatedAt"));
    }

    #[test]
    fn keys_are_stable_across_conversions() {
        let btype = BusinessTypeRecord::new("E-Commerce", "Online sales and digital commerce");

        let first = btype.key();
        let second = btype.clone().with_timestamps(fixed_time()).key();

        assert_eq!(first, second);
        assert_eq!(first, "e-commerce");
    }

    #[test]
    fn country_parses_from_json_with_camel_case_fields() {
        let json = r#"{"code":"SA","name":"Saudi Arabia","dialCode":"+966"}"#;
        let country: CountryRecord = serde_json::from_str(json).unwrap();

        assert_eq!(country.short_code, "SA");
        assert_eq!(country.dial_code, "+966");
        assert!(country.is_active);
        assert!(country.currency.is_none());
    }

    #[test]
    fn business_type_parses_from_json() {
        let json = r#"{"name":"Retail","description":"Retail sales and commerce","order":2}"#;
        let btype: BusinessTypeRecord = serde_json::from_str(json).unwrap();

        assert_eq!(btype.display_order, Some(2));
        assert!(btype.is_active);
        assert!(btype.created_at.is_none());
    }
}
