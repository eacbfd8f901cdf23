//! Pure functions for calculating provisioning plans.

use crate::schema::{GsiConfig, TableConfig};

/// Current state of a table, as reported by describe-table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub gsis: Vec<GsiState>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// GSI state.
#[derive(Debug, Clone)]
pub struct GsiState {
    pub name: String,
    pub status: GsiStatus,
}

/// GSI status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsiStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for provisioning a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists but is missing declared secondary indexes.
    AddGsis {
        table_name: String,
        gsis_to_add: Vec<GsiConfig>,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Calculate what changes are needed to reach the desired schema.
pub fn calculate_provision_plan(
    current: Option<&TableState>,
    desired: &TableConfig,
) -> ProvisionPlan {
    match current {
        None => ProvisionPlan::CreateTable {
            config: desired.clone(),
        },
        Some(state) => {
            let existing_gsi_names: Vec<&str> =
                state.gsis.iter().map(|g| g.name.as_str()).collect();

            let gsis_to_add: Vec<GsiConfig> = desired
                .gsis
                .iter()
                .filter(|gsi| !existing_gsi_names.contains(&gsi.name.as_str()))
                .cloned()
                .collect();

            if gsis_to_add.is_empty() {
                ProvisionPlan::NoChanges {
                    table_name: desired.table_name.clone(),
                }
            } else {
                ProvisionPlan::AddGsis {
                    table_name: desired.table_name.clone(),
                    gsis_to_add,
                }
            }
        }
    }
}

/// Format a provision plan for display.
pub fn format_provision_plan(plan: &ProvisionPlan) -> Vec<String> {
    match plan {
        ProvisionPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key.name),
            ];
            for gsi in &config.gsis {
                lines.push(format!("  + GSI: {}", gsi.name));
                lines.push(format!("    Partition key: {} (S)", gsi.partition_key.name));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        ProvisionPlan::AddGsis {
            table_name,
            gsis_to_add,
        } => {
            let mut lines = vec![format!("~ Update table: {}", table_name)];
            for gsi in gsis_to_add {
                lines.push(format!("  + Add GSI: {}", gsi.name));
            }
            lines
        }
        ProvisionPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{business_type_table_config, country_table_config};

    fn active_state(gsi_names: &[&str]) -> TableState {
        TableState {
            status: TableStatus::Active,
            gsis: gsi_names
                .iter()
                .map(|name| GsiState {
                    name: name.to_string(),
                    status: GsiStatus::Active,
                })
                .collect(),
        }
    }

    #[test]
    fn missing_table_plans_create() {
        let desired = country_table_config();
        let plan = calculate_provision_plan(None, &desired);
        assert_eq!(plan, ProvisionPlan::CreateTable { config: desired });
    }

    #[test]
    fn existing_table_with_all_gsis_plans_no_changes() {
        let desired = business_type_table_config();
        let state = active_state(&["nameIndex"]);

        let plan = calculate_provision_plan(Some(&state), &desired);

        assert_eq!(
            plan,
            ProvisionPlan::NoChanges {
                table_name: "BusinessType".to_string()
            }
        );
    }

    #[test]
    fn existing_table_missing_gsi_plans_add() {
        let desired = business_type_table_config();
        let state = active_state(&[]);

        let plan = calculate_provision_plan(Some(&state), &desired);

        match plan {
            ProvisionPlan::AddGsis { gsis_to_add, .. } => {
                assert_eq!(gsis_to_add.len(), 1);
                assert_eq!(gsis_to_add[0].name, "nameIndex");
            }
            other => panic!("expected AddGsis, got {:?}", other),
        }
    }

    #[test]
    fn plan_after_create_is_no_changes() {
        // ensure_table called twice: the second describe sees the full
        // schema and the plan degenerates to a no-op.
        let desired = business_type_table_config();
        let state = active_state(&["nameIndex"]);

        let first = calculate_provision_plan(None, &desired);
        let second = calculate_provision_plan(Some(&state), &desired);

        assert!(matches!(first, ProvisionPlan::CreateTable { .. }));
        assert!(matches!(second, ProvisionPlan::NoChanges { .. }));
    }

    #[test]
    fn format_create_plan_lists_keys_and_gsis() {
        let plan = ProvisionPlan::CreateTable {
            config: business_type_table_config(),
        };
        let lines = format_provision_plan(&plan);

        assert_eq!(lines[0], "+ Create table: BusinessType");
        assert!(lines.iter().any(|l| l.contains("Partition key: id (S)")));
        assert!(lines.iter().any(|l| l.contains("GSI: nameIndex")));
    }
}
