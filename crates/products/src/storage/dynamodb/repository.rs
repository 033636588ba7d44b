//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `products_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use products_core::product::Product;
use products_core::stack::PARTITION_KEY;
use products_core::storage::{ProductReader, ProductWriter, Result};

use super::conversions::{item_to_product, product_to_item};
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error};
use crate::config::Config;

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from the application configuration.
    ///
    /// Uses the AWS SDK default credential chain. `AWS_ENDPOINT_URL` points
    /// the client at DynamoDB Local.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            table = %config.table_name,
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "Using DynamoDB storage"
        );

        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    fn key(id: &str) -> (String, AttributeValue) {
        (PARTITION_KEY.to_string(), AttributeValue::S(id.to_string()))
    }

    /// A single-page scan returning at most `limit` items.
    fn scan_request(&self, limit: usize) -> ScanFluentBuilder {
        self.client
            .scan()
            .table_name(&self.table_name)
            .limit(i32::try_from(limit).unwrap_or(i32::MAX))
    }
}

#[async_trait]
impl ProductReader for DynamoDbRepository {
    async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let (key, value) = Self::key(id);
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(key, value)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_product(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_products(&self, limit: usize) -> Result<Vec<Product>> {
        let result = self
            .scan_request(limit)
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_product).collect()
    }
}

#[async_trait]
impl ProductWriter for DynamoDbRepository {
    async fn put_product(&self, product: &Product) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(product_to_item(product)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let (key, value) = Self::key(id);
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(key, value)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};

    fn repository() -> DynamoDbRepository {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        DynamoDbRepository::new(Client::from_conf(config), "Products")
    }

    #[test]
    fn test_scan_uses_table_and_limit() {
        let repo = repository();
        let request = repo.scan_request(20);

        assert_eq!(request.as_input().get_table_name().as_deref(), Some("Products"));
        assert_eq!(*request.as_input().get_limit(), Some(20));
    }

    #[test]
    fn test_scan_limit_saturates() {
        let repo = repository();
        let request = repo.scan_request(usize::MAX);

        assert_eq!(*request.as_input().get_limit(), Some(i32::MAX));
    }

    #[test]
    fn test_key_uses_partition_attribute() {
        let (name, value) = DynamoDbRepository::key("p-1");

        assert_eq!(name, "PK");
        assert_eq!(value, AttributeValue::S("p-1".to_string()));
    }
}
