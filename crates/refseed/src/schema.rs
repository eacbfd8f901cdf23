//! Table schema configuration (pure data).

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub gsis: Vec<GsiConfig>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types used in key schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Global Secondary Index configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub projection: ProjectionType,
}

/// GSI projection type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionType {
    All,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

fn string_key(name: &str) -> KeyAttribute {
    KeyAttribute {
        name: name.to_string(),
        attribute_type: AttributeType::String,
    }
}

/// Canonical schema for the country lookup table.
/// Keyed by the ISO short code; no secondary indexes.
pub fn country_table_config() -> TableConfig {
    TableConfig {
        table_name: "CountryList".to_string(),
        partition_key: string_key("short_code"),
        gsis: vec![],
        billing_mode: BillingMode::PayPerRequest,
    }
}

/// Canonical schema for the business-type lookup table.
/// Keyed by the slugified type name, with an alternate lookup by
/// display name.
pub fn business_type_table_config() -> TableConfig {
    TableConfig {
        table_name: "BusinessType".to_string(),
        partition_key: string_key("id"),
        gsis: vec![GsiConfig {
            name: "nameIndex".to_string(),
            partition_key: string_key("name"),
            projection: ProjectionType::All,
        }],
        billing_mode: BillingMode::PayPerRequest,
    }
}
