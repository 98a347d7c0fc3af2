//! JSON input sources
//!
//! Parses raw text, files and standard input into a [`Value`] before the
//! schema builder runs. With the `api-backend` feature a document can also
//! be fetched over HTTP.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::inference::InferenceError;

/// Parse JSON text. Malformed input fails here and never reaches inference.
pub fn parse_json(text: &str) -> Result<Value, InferenceError> {
    Ok(serde_json::from_str(text)?)
}

/// Read JSON text from a file, or from stdin when `path` is `-`
pub fn read_input(path: &Path) -> Result<String, InferenceError> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| InferenceError::Io(format!("Failed to read stdin: {}", e)))?;
        return Ok(content);
    }

    debug!("Reading JSON from {}", path.display());
    std::fs::read_to_string(path)
        .map_err(|e| InferenceError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Read and parse a JSON file (or stdin for `-`)
pub fn load_json(path: &Path) -> Result<Value, InferenceError> {
    parse_json(&read_input(path)?)
}

/// Fetch a JSON document with a blocking GET.
///
/// `bearer_token` is sent as `Authorization: Bearer <token>` when present.
/// A non-2xx status is an [`InferenceError::Http`] naming the status.
#[cfg(feature = "api-backend")]
pub fn fetch_json(url: &str, bearer_token: Option<&str>) -> Result<Value, InferenceError> {
    use std::time::Duration;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| InferenceError::Http(format!("Failed to create HTTP client: {}", e)))?;

    let mut request = client.get(url).header("Accept", "application/json");
    if let Some(token) = bearer_token {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    debug!("Fetching JSON from {}", url);
    let response = request
        .send()
        .map_err(|e| InferenceError::Http(format!("Failed to fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(InferenceError::Http(format!(
            "Request to {} failed with status {}",
            url,
            response.status()
        )));
    }

    let text = response
        .text()
        .map_err(|e| InferenceError::Http(format!("Failed to read response from {}: {}", url, e)))?;
    parse_json(&text)
}

#[cfg(not(feature = "api-backend"))]
pub fn fetch_json(_url: &str, _bearer_token: Option<&str>) -> Result<Value, InferenceError> {
    Err(InferenceError::Http(
        "Fetching JSON over HTTP requires the 'api-backend' feature".to_string(),
    ))
}
