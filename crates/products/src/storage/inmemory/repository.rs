//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use products_core::product::{sort_products, Product};
use products_core::storage::{ProductReader, ProductWriter, Result};

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductReader for InMemoryRepository {
    async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }

    async fn list_products(&self, limit: usize) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut listed: Vec<Product> = products.values().cloned().collect();
        sort_products(&mut listed);
        listed.truncate(limit);
        Ok(listed)
    }
}

#[async_trait]
impl ProductWriter for InMemoryRepository {
    async fn put_product(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let mut products = self.products.write().await;
        products.remove(id);
        Ok(())
    }
}
