//! `generate` command: render CREATE/INSERT statements for a dialect

use std::path::PathBuf;

use super::{InputSource, infer, write_output};
use crate::cli::error::CliError;
use crate::dialect::Dialect;
use crate::export::{ExportMode, SQLExporter};
use crate::inference::InferenceConfig;

/// File name used when the output path is a directory
pub const SCRIPT_FILE_NAME: &str = "schema.sql";

/// Arguments for the `generate` command
pub struct GenerateArgs {
    pub input: InputSource,
    pub config: InferenceConfig,
    pub dialect: Dialect,
    /// Rows per table (defaults to the export cap)
    pub row_limit: Option<usize>,
    /// Only emit CREATE statements
    pub schema_only: bool,
    /// Parse the output before writing it
    pub validate: bool,
    /// Output file or directory (stdout if not provided)
    pub output: Option<PathBuf>,
}

/// Handle the `generate` command
pub fn handle_generate(args: &GenerateArgs) -> Result<(), CliError> {
    let schema = infer(&args.input, &args.config)?;

    let mode = args.row_limit.map_or(ExportMode::Export, ExportMode::Limit);
    let exporter = SQLExporter::new(args.dialect).with_mode(mode);
    let rendered = exporter.render(&schema);
    let script = if args.schema_only {
        rendered.create_statements
    } else {
        rendered.script()
    };

    if args.validate {
        let count = exporter.validate(&script)?;
        eprintln!("Validated {} statements for {}", count, args.dialect);
    }

    let output = args.output.as_ref().map(|path| {
        if path.is_dir() {
            path.join(SCRIPT_FILE_NAME)
        } else {
            path.clone()
        }
    });
    write_output(output.as_ref(), &script)
}
