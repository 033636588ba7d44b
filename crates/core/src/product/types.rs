use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// The `id` doubles as the table's partition key. Unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f32,
}

impl Product {
    /// Creates a new product.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Response body for the list endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}

impl From<Vec<Product>> for ProductList {
    fn from(products: Vec<Product>) -> Self {
        Self { products }
    }
}
