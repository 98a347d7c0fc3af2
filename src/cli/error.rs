//! CLI error type

use std::path::PathBuf;
use thiserror::Error;

use crate::database::ExecutionError;
use crate::dialect::DialectError;
use crate::export::ExportError;
use crate::inference::InferenceError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("Failed to write {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Some tables were written, others failed
    #[error("{0}")]
    PartialFailure(String),
}

impl CliError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            CliError::Inference(e) => e.user_message(),
            CliError::Execution(e) => e.user_message(),
            CliError::Dialect(e) => format!(
                "{e}\n\nHint: Supported dialects are postgresql, mysql, mssql and sqlite."
            ),
            _ => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
