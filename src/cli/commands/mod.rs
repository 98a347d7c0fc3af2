//! CLI command implementations

pub mod analyze;
pub mod csv;
pub mod database;
pub mod generate;

use std::path::PathBuf;

use serde_json::Value;

use crate::cli::error::CliError;
use crate::inference::{InferenceConfig, SchemaBuilder};
use crate::models::Schema;
use crate::source;

/// Where the JSON document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// File path, `-` for stdin
    File(PathBuf),
    /// HTTP(S) endpoint with an optional bearer token
    Url { url: String, token: Option<String> },
}

impl InputSource {
    /// URLs start with `http://` or `https://`; anything else is a path
    pub fn parse(input: &str, token: Option<String>) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            InputSource::Url {
                url: input.to_string(),
                token,
            }
        } else {
            InputSource::File(PathBuf::from(input))
        }
    }

    pub fn load(&self) -> Result<Value, CliError> {
        match self {
            InputSource::File(path) => Ok(source::load_json(path)?),
            InputSource::Url { url, token } => Ok(source::fetch_json(url, token.as_deref())?),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::File(path) if path.as_os_str() == "-" => "stdin".to_string(),
            InputSource::File(path) => path.display().to_string(),
            InputSource::Url { url, .. } => url.clone(),
        }
    }
}

/// Load the input and infer its schema
pub fn infer(input: &InputSource, config: &InferenceConfig) -> Result<Schema, CliError> {
    eprintln!("Reading JSON from {}...", input.describe());
    let value = input.load()?;
    Ok(SchemaBuilder::with_config(config.clone()).build(&value)?)
}

/// Write to a file, or stdout when no path is given
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
            eprintln!("Written to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_parse() {
        assert_eq!(
            InputSource::parse("data.json", None),
            InputSource::File(PathBuf::from("data.json"))
        );
        assert_eq!(
            InputSource::parse("https://api.example.com/users", Some("t".to_string())),
            InputSource::Url {
                url: "https://api.example.com/users".to_string(),
                token: Some("t".to_string())
            }
        );
        assert_eq!(InputSource::parse("-", None).describe(), "stdin");
    }
}
