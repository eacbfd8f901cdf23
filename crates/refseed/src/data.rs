//! Built-in reference data sets and JSON data-file loading.
//!
//! The built-ins are the canonical data; a JSON file with the same
//! field shape can be supplied on the command line to seed a different
//! set without touching the mechanism.

use std::path::Path;

use crate::error::Result;
use crate::records::{BusinessTypeRecord, CountryRecord};

/// Built-in country list, including the Gulf region entries.
pub fn builtin_countries() -> Vec<CountryRecord> {
    let country = |code, name, dial, currency| {
        CountryRecord::new(code, name, dial).with_currency(currency)
    };

    vec![
        country("IN", "India", "+91", "INR"),
        country("PK", "Pakistan", "+92", "PKR"),
        country("CN", "China", "+86", "CNY"),
        country("LK", "Sri Lanka", "+94", "LKR"),
        country("GB", "United Kingdom", "+44", "GBP"),
        country("EU", "European Union", "+33", "EUR"),
        country("SA", "Saudi Arabia", "+966", "SAR"),
        country("AE", "United Arab Emirates", "+971", "AED"),
        country("QA", "Qatar", "+974", "QAR"),
        country("KW", "Kuwait", "+965", "KWD"),
        country("OM", "Oman", "+968", "OMR"),
        country("BH", "Bahrain", "+973", "BHD"),
    ]
}

/// Built-in business types, ordered for display.
pub fn builtin_business_types() -> Vec<BusinessTypeRecord> {
    let btype = |name, description, order| {
        BusinessTypeRecord::new(name, description).with_order(order)
    };

    vec![
        btype("Manufacturing", "Manufacturing and production of goods", 1),
        btype("Retail", "Retail sales and commerce", 2),
        btype("Wholesale", "Wholesale distribution", 3),
        btype("E-Commerce", "Online sales and digital commerce", 4),
        btype("Services", "Professional and consulting services", 5),
        btype("Technology", "Technology and software services", 6),
        btype("Food & Beverage", "Food and beverage business", 7),
        btype("Fashion & Apparel", "Fashion, clothing and apparel", 8),
        btype("Health & Wellness", "Health, wellness and medical products", 9),
        btype("Home & Garden", "Home, garden and furniture", 10),
        btype("Electronics", "Electronics and gadgets", 11),
        btype("Beauty & Cosmetics", "Beauty and cosmetics products", 12),
        btype("Sports & Outdoors", "Sports and outdoor products", 13),
        btype("Books & Media", "Books, media and educational content", 14),
        btype("Automotive", "Automotive products and parts", 15),
    ]
}

/// Loads countries from a JSON array file.
pub fn countries_from_file(path: &Path) -> Result<Vec<CountryRecord>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Loads business types from a JSON array file.
pub fn business_types_from_file(path: &Path) -> Result<Vec<BusinessTypeRecord>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ReferenceRecord;
    use std::collections::HashSet;

    #[test]
    fn builtin_country_keys_are_unique() {
        let countries = builtin_countries();
        let keys: HashSet<String> = countries.iter().map(|c| c.key()).collect();

        assert_eq!(keys.len(), countries.len());
    }

    #[test]
    fn builtin_business_type_keys_are_unique() {
        let types = builtin_business_types();
        let keys: HashSet<String> = types.iter().map(|t| t.key()).collect();

        assert_eq!(keys.len(), types.len());
    }

    #[test]
    fn builtin_business_types_carry_display_order() {
        let types = builtin_business_types();

        assert_eq!(types.len(), 15);
        for (index, btype) in types.iter().enumerate() {
            assert_eq!(btype.display_order, Some(index as u32 + 1));
        }
    }

    #[test]
    fn builtin_countries_all_have_currency() {
        assert!(builtin_countries().iter().all(|c| c.currency.is_some()));
    }
}
