//! `analyze` command: infer a schema and print a summary

use std::path::PathBuf;

use super::{InputSource, infer, write_output};
use crate::cli::error::CliError;
use crate::cli::output::format_schema;
use crate::inference::InferenceConfig;

/// Arguments for the `analyze` command
pub struct AnalyzeArgs {
    pub input: InputSource,
    pub config: InferenceConfig,
    /// Output format (text, json, yaml)
    pub format: String,
    /// Show table contents in text mode
    pub preview: bool,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
}

/// Handle the `analyze` command
pub fn handle_analyze(args: &AnalyzeArgs) -> Result<(), CliError> {
    let schema = infer(&args.input, &args.config)?;

    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(&schema)?,
        "yaml" => serde_yaml::to_string(&schema)?,
        "text" => format_schema(&schema, args.preview),
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Expected: text, json, yaml",
                other
            )));
        }
    };

    write_output(args.output.as_ref(), &output)
}
