//! `csv` command: write one CSV file per inferred table

use std::path::PathBuf;

use super::{InputSource, infer};
use crate::cli::error::CliError;
use crate::export::CsvExporter;
use crate::inference::InferenceConfig;

/// Arguments for the `csv` command
pub struct CsvArgs {
    pub input: InputSource,
    pub config: InferenceConfig,
    /// Directory to write `<table>.csv` files into
    pub out_dir: PathBuf,
}

/// Handle the `csv` command
pub fn handle_csv(args: &CsvArgs) -> Result<(), CliError> {
    let schema = infer(&args.input, &args.config)?;
    let written = CsvExporter::export_schema_to_dir(&schema, &args.out_dir)?;

    for path in &written {
        eprintln!("  {}", path.display());
    }
    eprintln!("Wrote {} CSV file(s)", written.len());
    Ok(())
}
