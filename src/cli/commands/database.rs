//! Live database commands: `test-connection`, `store`, `insert`

use std::future::Future;
use std::path::PathBuf;

use super::{InputSource, infer};
use crate::cli::error::CliError;
use crate::cli::output::format_report;
use crate::database::{self, ConnectionConfig, ExecutionPlan, ExecutionReport, InsertOperation};
use crate::dialect::Dialect;
use crate::inference::InferenceConfig;
use crate::source;

/// Environment variable that overrides the connection password
pub const PASSWORD_ENV: &str = "JSON2SQL_DB_PASSWORD";

/// Connection flags; a TOML file is read first and flags override it
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub file: Option<PathBuf>,
    pub dialect: Option<Dialect>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<String>,
}

impl ConnectionArgs {
    pub fn resolve(&self) -> Result<ConnectionConfig, CliError> {
        self.resolve_with_password(std::env::var(PASSWORD_ENV).ok())
    }

    fn resolve_with_password(&self, password: Option<String>) -> Result<ConnectionConfig, CliError> {
        let mut config = match (&self.file, self.dialect) {
            (Some(path), _) => ConnectionConfig::from_file(path)?,
            (None, Some(dialect)) => ConnectionConfig::new(dialect),
            (None, None) => {
                return Err(CliError::InvalidArgument(
                    "Either --connection <file> or --dialect is required".to_string(),
                ));
            }
        };

        if let Some(dialect) = self.dialect {
            config.dialect = dialect;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = Some(port);
        }
        if let Some(database) = &self.database {
            config.database = Some(database.clone());
        }
        if let Some(user) = &self.user {
            config.user = Some(user.clone());
        }
        if password.is_some() {
            config.password = password;
        }
        Ok(config)
    }
}

/// Arguments for the `store` command
pub struct StoreArgs {
    pub input: InputSource,
    pub config: InferenceConfig,
    pub connection: ConnectionArgs,
    /// Print the statements instead of running them
    pub dry_run: bool,
}

/// Arguments for the `insert` command
pub struct InsertArgs {
    /// JSON file with `[{"table": ..., "columns": [...]?, "rows": [...]}, ...]`
    pub operations: PathBuf,
    pub connection: ConnectionArgs,
}

fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(format!("Failed to start async runtime: {}", e)))?;
    Ok(runtime.block_on(future))
}

fn finish(report: ExecutionReport) -> Result<(), CliError> {
    eprint!("{}", format_report(&report));
    let failed: Vec<String> = report.failed_tables().map(|t| t.table.clone()).collect();
    if failed.is_empty() {
        eprintln!(
            "Created {} table(s), inserted {} row(s)",
            report.tables.len(),
            report.rows_inserted()
        );
        Ok(())
    } else {
        Err(CliError::PartialFailure(format!(
            "{} of {} table(s) failed: {}",
            failed.len(),
            report.tables.len(),
            failed.join(", ")
        )))
    }
}

/// Handle the `test-connection` command
pub fn handle_test_connection(args: &ConnectionArgs) -> Result<(), CliError> {
    let config = args.resolve()?;
    eprintln!("Connecting to {} at {}...", config.dialect, config.host);
    block_on(database::test_connection(&config))??;
    println!("Connection successful");
    Ok(())
}

/// Handle the `store` command
pub fn handle_store(args: &StoreArgs) -> Result<(), CliError> {
    let connection = args.connection.resolve()?;
    let schema = infer(&args.input, &args.config)?;

    if args.dry_run {
        let plan = ExecutionPlan::build(&schema, connection.dialect);
        for statement in plan.statements() {
            println!("{}", statement);
        }
        eprintln!("{} statement(s) planned", plan.statement_count());
        return Ok(());
    }

    let report = block_on(database::store_schema(&connection, &schema))??;
    finish(report)
}

/// Handle the `insert` command
pub fn handle_insert(args: &InsertArgs) -> Result<(), CliError> {
    let connection = args.connection.resolve()?;
    let value = source::load_json(&args.operations)?;
    let operations: Vec<InsertOperation> = serde_json::from_value(value)?;

    let report = block_on(database::insert_rows(&connection, operations))??;
    finish(report)
}
