//! Error types for the seeding tool.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SeederError>;

/// Errors that abort a provisioning or seeding run.
///
/// Per-record write failures are deliberately NOT represented here;
/// they are captured inside [`crate::seeder::SeedReport`] so the run
/// can continue past them.
#[derive(Error, Debug)]
pub enum SeederError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error("Cannot reach DynamoDB: {0}")]
    Connectivity(String),

    #[error("Timeout waiting for table to become active")]
    TableActivationTimeout,

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse data file: {0}")]
    DataFile(#[from] serde_json::Error),
}
