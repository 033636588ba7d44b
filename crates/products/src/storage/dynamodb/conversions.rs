//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! products. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use products_core::product::Product;
use products_core::stack::PARTITION_KEY;
use products_core::storage::RepositoryError;

pub const ATTR_NAME: &str = "name";
pub const ATTR_PRICE: &str = "price";

/// Convert a Product to a DynamoDB item.
pub fn product_to_item(product: &Product) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            PARTITION_KEY.to_string(),
            AttributeValue::S(product.id.clone()),
        ),
        (ATTR_NAME.to_string(), AttributeValue::S(product.name.clone())),
        (
            ATTR_PRICE.to_string(),
            AttributeValue::N(product.price.to_string()),
        ),
    ])
}

/// Convert a DynamoDB item to a Product.
pub fn item_to_product(item: &HashMap<String, AttributeValue>) -> Result<Product, RepositoryError> {
    Ok(Product {
        id: get_string(item, PARTITION_KEY)?,
        name: get_string(item, ATTR_NAME)?,
        price: get_f32(item, ATTR_PRICE)?,
    })
}

/// Get a required string attribute.
fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required number attribute as f32.
fn get_f32(item: &HashMap<String, AttributeValue>, key: &str) -> Result<f32, RepositoryError> {
    let raw = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;

    raw.parse::<f32>()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, e)))
}
