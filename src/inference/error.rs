//! Error types for schema inference

use thiserror::Error;

/// Errors that can occur before or during schema inference
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Input was not valid JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Input nests deeper than the configured limit
    #[error("Maximum nesting depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// Input could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// Remote API request failed
    #[error("HTTP error: {0}")]
    Http(String),
}

impl InferenceError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            InferenceError::JsonParse(msg) => {
                format!("Invalid JSON: {msg}\n\nHint: Check the JSON syntax of the input.")
            }
            InferenceError::MaxDepthExceeded { depth, max } => {
                format!(
                    "Input nests {depth} levels deep, more than the allowed {max}.\n\n\
                    Hint: Raise the limit with --max-depth or flatten the input first."
                )
            }
            _ => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for InferenceError {
    fn from(e: serde_json::Error) -> Self {
        InferenceError::JsonParse(e.to_string())
    }
}

impl From<std::io::Error> for InferenceError {
    fn from(e: std::io::Error) -> Self {
        InferenceError::Io(e.to_string())
    }
}
