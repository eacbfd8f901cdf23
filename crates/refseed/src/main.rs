//! Reference-data provisioning and seeding for the country and
//! business-type lookup tables.

use std::path::PathBuf;

use clap::Parser;
use dialoguer::Confirm;

mod client;
mod data;
mod error;
mod planning;
mod prelude;
mod provision;
mod records;
mod schema;
mod seeder;

use error::{Result, SeederError};
use prelude::*;
use schema::TableConfig;
use seeder::{DynamoItemStore, SeedReport};

/// Provision and seed DynamoDB reference-data tables
#[derive(Debug, Parser)]
#[command(name = "refseed")]
#[command(about = "Provision and seed reference-data tables", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Create the reference tables if they are missing
    Deploy(DeployCommand),

    /// Seed the reference tables with record data
    Seed(SeedCommand),
}

/// Provision the reference-data tables.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Create the country and business-type DynamoDB tables.

The command shows a plan of changes before applying and asks for
confirmation. Tables that already exist with the full schema are left
untouched.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    force: bool,

    /// Country table name.
    #[arg(long, default_value = "CountryList")]
    countries_table: String,

    /// Business-type table name.
    #[arg(long, default_value = "BusinessType")]
    business_types_table: String,
}

/// Seed reference data into the tables.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Upsert the reference record sets into DynamoDB.

Records are keyed deterministically (ISO short code for countries,
slugified name for business types), so re-running the command replaces
rows instead of duplicating them. A record that fails to write is
reported and the run continues with the next record.")]
struct SeedCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    force: bool,

    /// Create missing tables before seeding.
    #[arg(long)]
    provision: bool,

    /// Seed only one of the collections.
    #[arg(long, value_enum)]
    only: Option<Collection>,

    /// Country table name.
    #[arg(long, default_value = "CountryList")]
    countries_table: String,

    /// Business-type table name.
    #[arg(long, default_value = "BusinessType")]
    business_types_table: String,

    /// JSON file with country records (defaults to the built-in set).
    #[arg(long, value_name = "PATH")]
    countries_file: Option<PathBuf>,

    /// JSON file with business-type records (defaults to the built-in set).
    #[arg(long, value_name = "PATH")]
    business_types_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Collection {
    Countries,
    BusinessTypes,
}

impl SeedCommand {
    fn includes(&self, collection: Collection) -> bool {
        self.only.is_none() || self.only == Some(collection)
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy(deploy_cmd) => {
            run_deploy(deploy_cmd, &cli.global).await?;
        }
        Commands::Seed(seed_cmd) => {
            run_seed(seed_cmd, &cli.global).await?;
        }
    }

    Ok(())
}

async fn run_deploy(cmd: DeployCommand, global: &Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    let configs = [
        schema::country_table_config().with_table_name(&cmd.countries_table),
        schema::business_type_table_config().with_table_name(&cmd.business_types_table),
    ];

    let mut plans = Vec::with_capacity(configs.len());
    for config in &configs {
        let current = client::get_table_state(&dynamo_client, &config.table_name).await?;
        plans.push(planning::calculate_provision_plan(current.as_ref(), config));
    }

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for plan in &plans {
            for line in planning::format_provision_plan(plan) {
                if line.starts_with('+') {
                    aprintln!("  {}", p_g(&line));
                } else if line.starts_with('~') {
                    aprintln!("  {}", p_y(&line));
                } else {
                    aprintln!("  {}", line);
                }
            }
        }
        aprintln!();
    }

    if plans
        .iter()
        .all(|p| matches!(p, planning::ProvisionPlan::NoChanges { .. }))
    {
        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !cmd.force {
        confirm("Apply these changes?")?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Applying changes..."));
    }

    for plan in &plans {
        provision::execute_provision_plan(&dynamo_client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    let run_at = chrono::Utc::now();
    let countries = match &cmd.countries_file {
        Some(path) => data::countries_from_file(path)?,
        None => data::builtin_countries(),
    };
    let business_types: Vec<_> = match &cmd.business_types_file {
        Some(path) => data::business_types_from_file(path)?,
        None => data::builtin_business_types(),
    }
    .into_iter()
    .map(|btype| btype.with_timestamps(run_at))
    .collect();

    let mut batches: Vec<(TableConfig, usize)> = Vec::new();
    if cmd.includes(Collection::Countries) {
        batches.push((
            schema::country_table_config().with_table_name(&cmd.countries_table),
            countries.len(),
        ));
    }
    if cmd.includes(Collection::BusinessTypes) {
        batches.push((
            schema::business_type_table_config().with_table_name(&cmd.business_types_table),
            business_types.len(),
        ));
    }

    if !global.is_silent() {
        for (config, count) in &batches {
            aprintln!("{} {} ({} records)", p_b("Table:"), config.table_name, count);
        }
        aprintln!();
    }

    if !cmd.force {
        let total: usize = batches.iter().map(|(_, count)| *count).sum();
        confirm(&format!("Upsert {} records?", total))?;
    }

    for (config, _) in &batches {
        if cmd.provision {
            provision::ensure_table(&dynamo_client, config).await?;
        } else if client::get_table_state(&dynamo_client, &config.table_name)
            .await?
            .is_none()
        {
            return Err(SeederError::TableNotFound {
                table_name: config.table_name.clone(),
            });
        }
    }

    let store = DynamoItemStore::new(dynamo_client);

    if cmd.includes(Collection::Countries) {
        let report = seeder::seed_records(&store, &cmd.countries_table, &countries).await?;
        print_report(&report, global);
    }
    if cmd.includes(Collection::BusinessTypes) {
        let report =
            seeder::seed_records(&store, &cmd.business_types_table, &business_types).await?;
        print_report(&report, global);
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| SeederError::AwsSdk(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(SeederError::UserCancelled)
    }
}

fn print_report(report: &SeedReport, global: &Global) {
    if global.is_silent() {
        return;
    }

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => aprintln!(
                "  {} {} ({})",
                p_g("Seeded:"),
                outcome.display_name,
                outcome.key
            ),
            Err(detail) => aprintln!(
                "  {} {}: {}",
                p_r("Failed:"),
                outcome.display_name,
                detail
            ),
        }
    }
    aprintln!("{} {}", p_b("Summary:"), report.summary());
}
