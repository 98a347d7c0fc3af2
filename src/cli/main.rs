//! json2sql command line interface

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use json2sql::cli::CliError;
use json2sql::cli::commands::analyze::{AnalyzeArgs, handle_analyze};
use json2sql::cli::commands::csv::{CsvArgs, handle_csv};
use json2sql::cli::commands::database::{
    ConnectionArgs, InsertArgs, StoreArgs, handle_insert, handle_store, handle_test_connection,
};
use json2sql::cli::commands::generate::{GenerateArgs, handle_generate};
use json2sql::cli::commands::InputSource;
use json2sql::dialect::Dialect;
use json2sql::inference::InferenceConfig;

#[derive(Parser)]
#[command(name = "json2sql", version, about = "Infer relational tables from JSON and render SQL")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer a schema and print a summary
    Analyze {
        #[command(flatten)]
        input: InputOpts,
        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Show table contents (first 500 rows)
        #[arg(long)]
        preview: bool,
        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render CREATE TABLE and INSERT statements
    Generate {
        #[command(flatten)]
        input: InputOpts,
        /// Target dialect (postgresql, mysql, mssql, sqlite)
        #[arg(short, long)]
        dialect: Dialect,
        /// Rows per table in the INSERT statements
        #[arg(long)]
        row_limit: Option<usize>,
        /// Only emit CREATE statements
        #[arg(long)]
        schema_only: bool,
        /// Parse the generated SQL before writing it
        #[arg(long)]
        validate: bool,
        /// Output file, or directory to write schema.sql into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write one CSV file per table
    Csv {
        #[command(flatten)]
        input: InputOpts,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Check that a database is reachable
    TestConnection {
        #[command(flatten)]
        connection: ConnectionOpts,
    },
    /// Create the inferred tables in a database and insert the first 100 rows of each
    Store {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        connection: ConnectionOpts,
        /// Print the statements instead of running them
        #[arg(long)]
        dry_run: bool,
    },
    /// Insert rows from an operations file
    Insert {
        /// JSON file: [{"table": "...", "columns": [...], "rows": [...]}]
        operations: PathBuf,
        #[command(flatten)]
        connection: ConnectionOpts,
    },
}

#[derive(Args)]
struct InputOpts {
    /// JSON file, `-` for stdin, or an http(s) URL
    input: String,
    /// Bearer token sent when the input is a URL
    #[arg(long)]
    token: Option<String>,
    /// Fail when the input nests deeper than this
    #[arg(long)]
    max_depth: Option<usize>,
    /// Table name for a root array
    #[arg(long, default_value = "items")]
    array_table: String,
    /// Table name for a root object without arrays
    #[arg(long, default_value = "record")]
    root_table: String,
}

impl InputOpts {
    fn source(&self) -> InputSource {
        InputSource::parse(&self.input, self.token.clone())
    }

    fn config(&self) -> InferenceConfig {
        let builder = InferenceConfig::builder()
            .array_table(self.array_table.as_str())
            .root_table(self.root_table.as_str());
        match self.max_depth {
            Some(depth) => builder.max_depth(depth).build(),
            None => builder.build(),
        }
    }
}

#[derive(Args)]
struct ConnectionOpts {
    /// TOML connection file
    #[arg(short, long)]
    connection: Option<PathBuf>,
    /// Database dialect (overrides the file)
    #[arg(long)]
    dialect: Option<Dialect>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Database name, or file path for SQLite
    #[arg(long)]
    database: Option<String>,
    #[arg(long)]
    user: Option<String>,
}

impl From<ConnectionOpts> for ConnectionArgs {
    fn from(opts: ConnectionOpts) -> Self {
        ConnectionArgs {
            file: opts.connection,
            dialect: opts.dialect,
            host: opts.host,
            port: opts.port,
            database: opts.database,
            user: opts.user,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "json2sql=debug" } else { "json2sql=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Analyze {
            input,
            format,
            preview,
            output,
        } => handle_analyze(&AnalyzeArgs {
            input: input.source(),
            config: input.config(),
            format,
            preview,
            output,
        }),
        Commands::Generate {
            input,
            dialect,
            row_limit,
            schema_only,
            validate,
            output,
        } => handle_generate(&GenerateArgs {
            input: input.source(),
            config: input.config(),
            dialect,
            row_limit,
            schema_only,
            validate,
            output,
        }),
        Commands::Csv { input, out_dir } => handle_csv(&CsvArgs {
            input: input.source(),
            config: input.config(),
            out_dir,
        }),
        Commands::TestConnection { connection } => handle_test_connection(&connection.into()),
        Commands::Store {
            input,
            connection,
            dry_run,
        } => handle_store(&StoreArgs {
            input: input.source(),
            config: input.config(),
            connection: connection.into(),
            dry_run,
        }),
        Commands::Insert {
            operations,
            connection,
        } => handle_insert(&InsertArgs {
            operations,
            connection: connection.into(),
        }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
