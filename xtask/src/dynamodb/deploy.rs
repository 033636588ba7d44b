//! Table deployment operations (Imperative Shell).

use super::client;
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan, TableStatus};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode as SdkBillingMode, KeySchemaElement, KeyType,
    ProvisionedThroughput, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use products_core::stack::{AttributeType, BillingMode, TableSpec};
use std::time::Duration;

/// Execute a deploy plan.
pub async fn execute_deploy_plan(client: &Client, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { spec } => {
            create_table(client, spec).await?;
            wait_for_table_active(client, &spec.table_name).await?;
        }
        DeployPlan::UpdateBillingMode {
            table_name,
            billing_mode,
        } => {
            update_billing_mode(client, table_name, billing_mode).await?;
            wait_for_table_active(client, table_name).await?;
        }
        DeployPlan::NoChanges { .. } => {
            // Nothing to do
        }
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            delete_table(client, table_name).await?;
        }
        DestroyPlan::AlreadyGone { .. } => {
            // Nothing to do
        }
    }
    Ok(())
}

async fn create_table(client: &Client, spec: &TableSpec) -> Result<()> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(&spec.partition_key.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    let attribute_definition = AttributeDefinition::builder()
        .attribute_name(&spec.partition_key.name)
        .attribute_type(to_scalar_type(&spec.partition_key.attribute_type))
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    client
        .create_table()
        .table_name(&spec.table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute_definition)
        .billing_mode(to_sdk_billing_mode(&spec.billing_mode))
        .set_provisioned_throughput(provisioned_throughput(&spec.billing_mode)?)
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.into_service_error().to_string()))?;
    Ok(())
}

async fn update_billing_mode(
    client: &Client,
    table_name: &str,
    billing_mode: &BillingMode,
) -> Result<()> {
    client
        .update_table()
        .table_name(table_name)
        .billing_mode(to_sdk_billing_mode(billing_mode))
        .set_provisioned_throughput(provisioned_throughput(billing_mode)?)
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.into_service_error().to_string()))?;
    Ok(())
}

async fn delete_table(client: &Client, table_name: &str) -> Result<()> {
    client
        .delete_table()
        .table_name(table_name)
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.into_service_error().to_string()))?;
    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.status == TableStatus::Active {
                return Ok(());
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(DynamodbError::TableActivationTimeout)
}

fn to_scalar_type(attr_type: &AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
    }
}

fn to_sdk_billing_mode(billing_mode: &BillingMode) -> SdkBillingMode {
    match billing_mode {
        BillingMode::PayPerRequest => SdkBillingMode::PayPerRequest,
        BillingMode::Provisioned { .. } => SdkBillingMode::Provisioned,
    }
}

/// On-demand tables must not send throughput settings.
fn provisioned_throughput(billing_mode: &BillingMode) -> Result<Option<ProvisionedThroughput>> {
    match billing_mode {
        BillingMode::PayPerRequest => Ok(None),
        BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } => {
            let throughput = ProvisionedThroughput::builder()
                .read_capacity_units(capacity_units(*read_capacity))
                .write_capacity_units(capacity_units(*write_capacity))
                .build()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
            Ok(Some(throughput))
        }
    }
}

fn capacity_units(units: u64) -> i64 {
    i64::try_from(units).unwrap_or(i64::MAX)
}
