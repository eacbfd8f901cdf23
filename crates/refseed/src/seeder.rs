//! Generic reference-data seeding engine.
//!
//! Seeding walks an ordered record list and upserts each item by its
//! deterministic key. A failed record is captured in the report and
//! processing continues; a connection failure aborts the run before
//! touching the remaining records.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::error::{Result, SeederError};
use crate::records::ReferenceRecord;

/// A failed upsert, split by blast radius.
#[derive(Debug)]
pub enum PutError {
    /// This record failed (validation, throttling, item-level denial);
    /// the rest of the run can proceed.
    Record(String),
    /// The store is unreachable; the run must stop.
    Connection(String),
}

/// Upsert seam over the backing store.
#[async_trait]
pub trait ItemStore {
    async fn put_item(
        &self,
        table_name: &str,
        item: HashMap<String, AttributeValue>,
    ) -> std::result::Result<(), PutError>;
}

/// DynamoDB-backed item store.
pub struct DynamoItemStore {
    client: Client,
}

impl DynamoItemStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    async fn put_item(
        &self,
        table_name: &str,
        item: HashMap<String, AttributeValue>,
    ) -> std::result::Result<(), PutError> {
        match self
            .client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                let detail = format!("{}", DisplayErrorContext(&err));
                match err {
                    SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
                        Err(PutError::Connection(detail))
                    }
                    _ => Err(PutError::Record(detail)),
                }
            }
        }
    }
}

/// The outcome of one record's upsert.
#[derive(Debug)]
pub struct RecordOutcome {
    pub key: String,
    pub display_name: String,
    pub result: std::result::Result<(), String>,
}

/// Per-record results of a seeding run over one table.
#[derive(Debug)]
pub struct SeedReport {
    pub table_name: String,
    pub outcomes: Vec<RecordOutcome>,
}

impl SeedReport {
    pub fn seeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.seeded()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} seeded, {} failed",
            self.table_name,
            self.seeded(),
            self.failed()
        )
    }
}

/// Upserts every record into `table_name`, keyed by record content.
///
/// Returns a report covering every attempted record. Record-level
/// failures are captured and do not stop the run; a connection-level
/// failure aborts immediately, leaving later records untried.
pub async fn seed_records<R, S>(store: &S, table_name: &str, records: &[R]) -> Result<SeedReport>
where
    R: ReferenceRecord,
    S: ItemStore,
{
    let mut outcomes = Vec::with_capacity(records.len());

    for record in records {
        let result = match store.put_item(table_name, record.to_item()).await {
            Ok(()) => Ok(()),
            Err(PutError::Record(detail)) => Err(detail),
            Err(PutError::Connection(detail)) => {
                return Err(SeederError::Connectivity(detail));
            }
        };

        outcomes.push(RecordOutcome {
            key: record.key(),
            display_name: record.display_name().to_string(),
            result,
        });
    }

    Ok(SeedReport {
        table_name: table_name.to_string(),
        outcomes,
    })
}
