//! Pure functions for calculating deployment plans (Functional Core).

use std::fmt;

use products_core::stack::{BillingMode, KeyAttribute, TableSpec};

use super::error::{DynamodbError, Result};

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub billing_mode: BillingMode,
    pub partition_key: KeyState,
    pub sort_key: Option<KeyState>,
}

/// A key attribute as reported by DescribeTable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyState {
    pub name: String,
    /// DynamoDB scalar type shorthand (`S`, `N` or `B`).
    pub attribute_type: String,
}

impl KeyState {
    pub fn new(name: impl Into<String>, attribute_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: attribute_type.into(),
        }
    }

    fn matches(&self, desired: &KeyAttribute) -> bool {
        self.name == desired.name && self.attribute_type == desired.attribute_type.as_str()
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.attribute_type)
    }
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            TableStatus::Active => "ACTIVE",
            TableStatus::Creating => "CREATING",
            TableStatus::Updating => "UPDATING",
            TableStatus::Deleting => "DELETING",
        };
        f.write_str(status)
    }
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { spec: TableSpec },
    /// Table exists with a different capacity mode.
    UpdateBillingMode {
        table_name: String,
        billing_mode: BillingMode,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
///
/// Only an active table can be planned against. A table keyed differently
/// from the declaration cannot be fixed in place and is reported as an error.
pub fn calculate_deploy_plan(
    current: Option<&TableState>,
    desired: &TableSpec,
) -> Result<DeployPlan> {
    let Some(state) = current else {
        return Ok(DeployPlan::CreateTable {
            spec: desired.clone(),
        });
    };

    if state.status != TableStatus::Active {
        return Err(DynamodbError::TableNotReady {
            table_name: desired.table_name.clone(),
            status: state.status.to_string(),
        });
    }

    if !state.partition_key.matches(&desired.partition_key) || state.sort_key.is_some() {
        return Err(DynamodbError::KeySchemaMismatch {
            table_name: desired.table_name.clone(),
            expected: format!(
                "{} ({})",
                desired.partition_key.name,
                desired.partition_key.attribute_type.as_str()
            ),
            found: format_key_schema(state),
        });
    }

    if state.billing_mode != desired.billing_mode {
        return Ok(DeployPlan::UpdateBillingMode {
            table_name: desired.table_name.clone(),
            billing_mode: desired.billing_mode,
        });
    }

    Ok(DeployPlan::NoChanges {
        table_name: desired.table_name.clone(),
    })
}

fn format_key_schema(state: &TableState) -> String {
    match &state.sort_key {
        Some(sort_key) => format!("{}, sort key {}", state.partition_key, sort_key),
        None => state.partition_key.to_string(),
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

fn format_billing(billing_mode: &BillingMode) -> String {
    match billing_mode {
        BillingMode::PayPerRequest => billing_mode.as_str().to_string(),
        BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } => format!(
            "{} (read: {}, write: {})",
            billing_mode.as_str(),
            read_capacity,
            write_capacity
        ),
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { spec } => vec![
            format!("+ Create table: {}", spec.table_name),
            format!(
                "  Partition key: {} ({})",
                spec.partition_key.name,
                spec.partition_key.attribute_type.as_str()
            ),
            format!("  Billing: {}", format_billing(&spec.billing_mode)),
        ],
        DeployPlan::UpdateBillingMode {
            table_name,
            billing_mode,
        } => vec![
            format!("~ Update table: {}", table_name),
            format!("  ~ Billing: {}", format_billing(billing_mode)),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use products_core::stack::products_table;

    fn active(billing_mode: BillingMode) -> TableState {
        TableState {
            status: TableStatus::Active,
            billing_mode,
            partition_key: KeyState::new("PK", "S"),
            sort_key: None,
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let desired = products_table();
        let plan = calculate_deploy_plan(None, &desired).unwrap();
        assert_eq!(plan, DeployPlan::CreateTable { spec: desired });
    }

    #[test]
    fn test_matching_table_has_no_changes() {
        let desired = products_table();
        let state = active(BillingMode::PayPerRequest);
        let plan = calculate_deploy_plan(Some(&state), &desired).unwrap();
        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "Products".to_string()
            }
        );
    }

    #[test]
    fn test_provisioned_table_switches_to_on_demand() {
        let desired = products_table().with_table_name("Staging");
        let state = active(BillingMode::Provisioned {
            read_capacity: 5,
            write_capacity: 5,
        });
        let plan = calculate_deploy_plan(Some(&state), &desired).unwrap();
        assert_eq!(
            plan,
            DeployPlan::UpdateBillingMode {
                table_name: "Staging".to_string(),
                billing_mode: BillingMode::PayPerRequest,
            }
        );
    }

    #[test]
    fn test_table_being_deleted_is_not_ready() {
        let desired = products_table();
        let mut state = active(BillingMode::PayPerRequest);
        state.status = TableStatus::Deleting;

        let err = calculate_deploy_plan(Some(&state), &desired).unwrap_err();
        assert!(matches!(
            err,
            DynamodbError::TableNotReady { ref table_name, ref status }
                if table_name == "Products" && status == "DELETING"
        ));
    }

    #[test]
    fn test_table_still_creating_is_not_ready() {
        let desired = products_table();
        let mut state = active(BillingMode::PayPerRequest);
        state.status = TableStatus::Creating;

        assert!(matches!(
            calculate_deploy_plan(Some(&state), &desired),
            Err(DynamodbError::TableNotReady { .. })
        ));
    }

    #[test]
    fn test_table_keyed_on_another_attribute() {
        let desired = products_table();
        let mut state = active(BillingMode::PayPerRequest);
        state.partition_key = KeyState::new("id", "S");

        let err = calculate_deploy_plan(Some(&state), &desired).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Table 'Products' is keyed on id (S), expected PK (S)"
        );
    }

    #[test]
    fn test_table_with_numeric_key_or_sort_key() {
        let desired = products_table();

        let mut numeric = active(BillingMode::PayPerRequest);
        numeric.partition_key = KeyState::new("PK", "N");
        assert!(matches!(
            calculate_deploy_plan(Some(&numeric), &desired),
            Err(DynamodbError::KeySchemaMismatch { .. })
        ));

        let mut composite = active(BillingMode::PayPerRequest);
        composite.sort_key = Some(KeyState::new("SK", "S"));
        let err = calculate_deploy_plan(Some(&composite), &desired).unwrap_err();
        assert!(matches!(
            err,
            DynamodbError::KeySchemaMismatch { ref found, .. } if found == "PK (S), sort key SK (S)"
        ));
    }

    #[test]
    fn test_destroy_plan() {
        let state = active(BillingMode::PayPerRequest);
        assert_eq!(
            calculate_destroy_plan(Some(&state), "Products"),
            DestroyPlan::DeleteTable {
                table_name: "Products".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "Products"),
            DestroyPlan::AlreadyGone {
                table_name: "Products".to_string()
            }
        );
    }

    #[test]
    fn test_format_create_plan() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            spec: products_table(),
        });
        assert_eq!(
            lines,
            vec![
                "+ Create table: Products",
                "  Partition key: PK (S)",
                "  Billing: PAY_PER_REQUEST",
            ]
        );
    }

    #[test]
    fn test_format_update_plan_shows_capacity() {
        let lines = format_deploy_plan(&DeployPlan::UpdateBillingMode {
            table_name: "Products".to_string(),
            billing_mode: BillingMode::Provisioned {
                read_capacity: 10,
                write_capacity: 2,
            },
        });
        assert_eq!(lines[0], "~ Update table: Products");
        assert_eq!(lines[1], "  ~ Billing: PROVISIONED (read: 10, write: 2)");
    }

    #[test]
    fn test_format_destroy_plan() {
        let lines = format_destroy_plan(&DestroyPlan::DeleteTable {
            table_name: "Products".to_string(),
        });
        assert_eq!(lines, vec!["- Delete table: Products (ALL DATA WILL BE LOST)"]);
    }
}
