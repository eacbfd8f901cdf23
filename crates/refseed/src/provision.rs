//! Table provisioning operations (imperative shell).

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, CreateGlobalSecondaryIndexAction, GlobalSecondaryIndex,
    GlobalSecondaryIndexUpdate, KeySchemaElement, KeyType, Projection, ProjectionType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use crate::client;
use crate::error::{Result, SeederError};
use crate::planning::{self, GsiStatus, ProvisionPlan, TableStatus};
use crate::schema::{self, GsiConfig, KeyAttribute, TableConfig};

/// Ensures the table described by `config` exists with its full schema,
/// blocking until it reports ACTIVE. A no-op when the table already
/// matches.
pub async fn ensure_table(client: &Client, config: &TableConfig) -> Result<()> {
    let current = client::get_table_state(client, &config.table_name).await?;
    let plan = planning::calculate_provision_plan(current.as_ref(), config);
    execute_provision_plan(client, &plan).await
}

/// Execute a provision plan.
pub async fn execute_provision_plan(client: &Client, plan: &ProvisionPlan) -> Result<()> {
    match plan {
        ProvisionPlan::CreateTable { config } => {
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
        }
        ProvisionPlan::AddGsis {
            table_name,
            gsis_to_add,
        } => {
            for gsi in gsis_to_add {
                add_gsi(client, table_name, gsi).await?;
                wait_for_table_active(client, table_name).await?;
            }
        }
        ProvisionPlan::NoChanges { .. } => {
            // Nothing to do
        }
    }
    Ok(())
}

fn build_err(e: impl std::fmt::Display) -> SeederError {
    SeederError::AwsSdk(e.to_string())
}

fn key_schema_element(attr: &KeyAttribute) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&attr.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(build_err)
}

fn attribute_definition(attr: &KeyAttribute) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(&attr.name)
        .attribute_type(to_scalar_type(&attr.attribute_type))
        .build()
        .map_err(build_err)
}

/// Attribute definitions for the table key plus every GSI key, deduplicated.
fn attribute_definitions(config: &TableConfig) -> Result<Vec<AttributeDefinition>> {
    let mut definitions = vec![attribute_definition(&config.partition_key)?];

    for gsi in &config.gsis {
        let name = gsi.partition_key.name.as_str();
        if !definitions.iter().any(|d| d.attribute_name() == name) {
            definitions.push(attribute_definition(&gsi.partition_key)?);
        }
    }

    Ok(definitions)
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let mut request = client
        .create_table()
        .table_name(&config.table_name)
        .key_schema(key_schema_element(&config.partition_key)?)
        .set_attribute_definitions(Some(attribute_definitions(config)?))
        .billing_mode(BillingMode::PayPerRequest);

    for gsi in &config.gsis {
        request = request.global_secondary_indexes(
            GlobalSecondaryIndex::builder()
                .index_name(&gsi.name)
                .key_schema(key_schema_element(&gsi.partition_key)?)
                .projection(
                    Projection::builder()
                        .projection_type(ProjectionType::All)
                        .build(),
                )
                .build()
                .map_err(build_err)?,
        );
    }

    request.send().await.map_err(build_err)?;
    Ok(())
}

async fn add_gsi(client: &Client, table_name: &str, gsi: &GsiConfig) -> Result<()> {
    client
        .update_table()
        .table_name(table_name)
        .attribute_definitions(attribute_definition(&gsi.partition_key)?)
        .global_secondary_index_updates(
            GlobalSecondaryIndexUpdate::builder()
                .create(
                    CreateGlobalSecondaryIndexAction::builder()
                        .index_name(&gsi.name)
                        .key_schema(key_schema_element(&gsi.partition_key)?)
                        .projection(
                            Projection::builder()
                                .projection_type(ProjectionType::All)
                                .build(),
                        )
                        .build()
                        .map_err(build_err)?,
                )
                .build(),
        )
        .send()
        .await
        .map_err(build_err)?;

    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.status == TableStatus::Active {
                let all_gsis_active = state.gsis.iter().all(|g| g.status == GsiStatus::Active);
                if all_gsis_active {
                    return Ok(());
                }
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(SeederError::TableActivationTimeout)
}

fn to_scalar_type(attr_type: &schema::AttributeType) -> ScalarAttributeType {
    match attr_type {
        schema::AttributeType::String => ScalarAttributeType::S,
    }
}
