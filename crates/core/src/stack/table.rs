//! Table schema declaration (Functional Core - pure data).

/// Name of the table's only key attribute.
pub const PARTITION_KEY: &str = "PK";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

impl AttributeType {
    /// DynamoDB scalar type shorthand.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
        }
    }
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    /// On-demand capacity.
    PayPerRequest,
    Provisioned {
        read_capacity: u64,
        write_capacity: u64,
    },
}

impl BillingMode {
    pub fn is_on_demand(&self) -> bool {
        matches!(self, BillingMode::PayPerRequest)
    }

    /// Name used by the DynamoDB API.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingMode::PayPerRequest => "PAY_PER_REQUEST",
            BillingMode::Provisioned { .. } => "PROVISIONED",
        }
    }
}

impl TableSpec {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Returns the canonical products table.
pub fn products_table() -> TableSpec {
    TableSpec {
        table_name: "Products".to_string(),
        partition_key: KeyAttribute {
            name: PARTITION_KEY.to_string(),
            attribute_type: AttributeType::String,
        },
        billing_mode: BillingMode::PayPerRequest,
    }
}
