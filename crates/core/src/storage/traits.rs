//! Repository traits, split along the table permission grants.
//!
//! Read-only handlers are handed a [`ProductReader`] and write handlers a
//! [`ProductWriter`]; neither trait exposes the other's operations.

use async_trait::async_trait;

use crate::product::Product;

use super::Result;

/// Read access to the products table.
#[async_trait]
pub trait ProductReader: Send + Sync {
    /// Gets a product by its id.
    async fn get_product(&self, id: &str) -> Result<Option<Product>>;

    /// Lists at most `limit` products.
    async fn list_products(&self, limit: usize) -> Result<Vec<Product>>;
}

/// Write access to the products table.
#[async_trait]
pub trait ProductWriter: Send + Sync {
    /// Creates or replaces a product.
    async fn put_product(&self, product: &Product) -> Result<()>;

    /// Deletes a product by its id. Deleting a missing product succeeds.
    async fn delete_product(&self, id: &str) -> Result<()>;
}
