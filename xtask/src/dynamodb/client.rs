//! AWS SDK client setup (Imperative Shell).

use super::error::{DynamodbError, Result};
use super::planning::{KeyState, TableState, TableStatus};
use aws_sdk_dynamodb::types::{
    BillingMode as SdkBillingMode, KeyType, TableDescription, TableStatus as SdkTableStatus,
};
use aws_sdk_dynamodb::Client;
use products_core::stack::BillingMode;

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Result<Client> {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Ok(Client::new(&sdk_config))
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => {
            let table = response.table().ok_or_else(|| {
                DynamodbError::AwsSdk(format!("DescribeTable returned no table for '{table_name}'"))
            })?;
            table_state(table_name, table).map(Some)
        }
        Err(err) => {
            let service_error = err.into_service_error();
            if service_error.is_resource_not_found_exception() {
                Ok(None)
            } else {
                Err(DynamodbError::AwsSdk(service_error.to_string()))
            }
        }
    }
}

/// Converts a DescribeTable description into the planner's view of the table.
fn table_state(table_name: &str, table: &TableDescription) -> Result<TableState> {
    let status = match table.table_status() {
        Some(SdkTableStatus::Active) => TableStatus::Active,
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        other => {
            return Err(DynamodbError::UnsupportedTableStatus {
                table_name: table_name.to_string(),
                status: other.map_or("UNKNOWN", |s| s.as_str()).to_string(),
            })
        }
    };

    let partition_key = key_state(table, KeyType::Hash).ok_or_else(|| {
        DynamodbError::AwsSdk(format!("Table '{table_name}' has no partition key"))
    })?;

    Ok(TableState {
        status,
        billing_mode: billing_mode_of(table),
        partition_key,
        sort_key: key_state(table, KeyType::Range),
    })
}

/// Looks up the key attribute of the given role along with its declared type.
fn key_state(table: &TableDescription, key_type: KeyType) -> Option<KeyState> {
    let name = table
        .key_schema()
        .iter()
        .find(|k| *k.key_type() == key_type)?
        .attribute_name();

    let attribute_type = table
        .attribute_definitions()
        .iter()
        .find(|d| d.attribute_name() == name)
        .map_or("?", |d| d.attribute_type().as_str());

    Some(KeyState::new(name, attribute_type))
}

/// Tables created without an explicit mode report no billing summary and are provisioned.
fn billing_mode_of(table: &TableDescription) -> BillingMode {
    let mode = table
        .billing_mode_summary()
        .and_then(|summary| summary.billing_mode());

    match mode {
        Some(SdkBillingMode::PayPerRequest) => BillingMode::PayPerRequest,
        _ => {
            let throughput = table.provisioned_throughput();
            BillingMode::Provisioned {
                read_capacity: throughput
                    .and_then(|t| t.read_capacity_units())
                    .map_or(0, |units| units.max(0) as u64),
                write_capacity: throughput
                    .and_then(|t| t.write_capacity_units())
                    .map_or(0, |units| units.max(0) as u64),
            }
        }
    }
}
