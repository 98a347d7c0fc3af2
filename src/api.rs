//! Transport boundary types
//!
//! Request/response bodies and handlers for an HTTP layer. Every failure is
//! returned as an [`ErrorPayload`] so callers never see a raw error string:
//!
//! | Operation        | Request                 | Response                |
//! |------------------|-------------------------|-------------------------|
//! | analyze          | [`AnalyzeRequest`]      | [`AnalyzeResponse`]     |
//! | generate-sql     | [`GenerateSqlRequest`]  | [`GenerateSqlResponse`] |
//! | test-connection  | [`ConnectionConfig`]    | [`TestConnectionResponse`] |
//! | store-schema     | [`StoreSchemaRequest`]  | [`ExecutionResponse`]   |
//! | insert-rows      | [`InsertRowsRequest`]   | [`ExecutionResponse`]   |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::{
    self, ConnectionConfig, ExecutionError, ExecutionReport, InsertOperation, SchemaWriter,
    SqlExecutor,
};
use crate::dialect::DialectError;
use crate::export::{ExportError, ExportMode, SQLExporter};
use crate::inference::{InferenceConfig, InferenceError, SchemaBuilder};
use crate::models::{Schema, SchemaSummary};
use crate::source;

pub const PARSE_ERROR: &str = "parse_error";
pub const UNSUPPORTED_DIALECT: &str = "unsupported_dialect";
pub const EXECUTION_ERROR: &str = "execution_error";
pub const EXPORT_ERROR: &str = "export_error";
pub const INVALID_REQUEST: &str = "invalid_request";

/// Structured error returned across the transport boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    /// Table the failure belongs to, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl ErrorPayload {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            table: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, message)
    }

    /// HTTP status for this payload
    pub fn status(&self) -> u16 {
        match self.code.as_str() {
            EXECUTION_ERROR | EXPORT_ERROR => 500,
            _ => 400,
        }
    }
}

impl From<InferenceError> for ErrorPayload {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::JsonParse(_) => Self::new(PARSE_ERROR, err.to_string()),
            _ => Self::invalid_request(err.to_string()),
        }
    }
}

impl From<DialectError> for ErrorPayload {
    fn from(err: DialectError) -> Self {
        Self::new(UNSUPPORTED_DIALECT, err.to_string())
    }
}

impl From<ExportError> for ErrorPayload {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Dialect(e) => e.into(),
            _ => Self::new(EXPORT_ERROR, err.to_string()),
        }
    }
}

impl From<ExecutionError> for ErrorPayload {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::Dialect(e) => e.into(),
            ExecutionError::Config(_) => Self::invalid_request(err.to_string()),
            ExecutionError::Statement { ref table, .. } => Self {
                table: Some(table.clone()),
                ..Self::new(EXECUTION_ERROR, err.to_string())
            },
            _ => Self::new(EXECUTION_ERROR, err.to_string()),
        }
    }
}

/// Deserialize a request body, mapping malformed bodies to `invalid_request`
pub fn parse_request<T: DeserializeOwned>(body: &str) -> Result<T, ErrorPayload> {
    serde_json::from_str(body).map_err(|e| ErrorPayload::invalid_request(e.to_string()))
}

/// JSON text to analyze
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub json: String,
    #[serde(default)]
    pub config: InferenceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub summary: SchemaSummary,
    pub schema: Schema,
}

/// Render a schema for a dialect given by name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSqlRequest {
    pub schema: Schema,
    pub dialect: String,
    /// Rows per table; defaults to the export cap
    #[serde(default)]
    pub row_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSqlResponse {
    pub dialect: String,
    pub create_statements: String,
    pub insert_statements: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConnectionResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSchemaRequest {
    pub connection: ConnectionConfig,
    pub schema: Schema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRowsRequest {
    pub connection: ConnectionConfig,
    pub operations: Vec<InsertOperation>,
}

/// Outcome of a live write. `ok` is false when any table failed; the report
/// still lists every table that succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResponse {
    pub ok: bool,
    pub message: String,
    pub report: ExecutionReport,
}

impl From<ExecutionReport> for ExecutionResponse {
    fn from(report: ExecutionReport) -> Self {
        let failed: Vec<&str> = report.failed_tables().map(|t| t.table.as_str()).collect();
        let message = if failed.is_empty() {
            format!(
                "Created {} tables and inserted {} rows",
                report.tables.len(),
                report.rows_inserted()
            )
        } else {
            format!(
                "{} of {} tables failed: {}",
                failed.len(),
                report.tables.len(),
                failed.join(", ")
            )
        };
        Self {
            ok: failed.is_empty(),
            message,
            report,
        }
    }
}

/// Parse and infer
pub fn analyze(request: &AnalyzeRequest) -> Result<AnalyzeResponse, ErrorPayload> {
    let value = source::parse_json(&request.json)?;
    analyze_value(&value, &request.config)
}

/// Infer from an already parsed value
pub fn analyze_value(value: &Value, config: &InferenceConfig) -> Result<AnalyzeResponse, ErrorPayload> {
    let schema = SchemaBuilder::with_config(config.clone()).build(value)?;
    Ok(AnalyzeResponse {
        summary: schema.summary(),
        schema,
    })
}

/// Render SQL text; an unknown dialect fails with no partial output
pub fn generate_sql(request: &GenerateSqlRequest) -> Result<GenerateSqlResponse, ErrorPayload> {
    let mode = request.row_limit.map_or(ExportMode::Export, ExportMode::Limit);
    let exporter = SQLExporter::for_dialect(&request.dialect)?.with_mode(mode);
    let rendered = exporter.render(&request.schema);
    Ok(GenerateSqlResponse {
        dialect: exporter.dialect().to_string(),
        create_statements: rendered.create_statements,
        insert_statements: rendered.insert_statements,
    })
}

pub async fn test_connection(
    config: &ConnectionConfig,
) -> Result<TestConnectionResponse, ErrorPayload> {
    database::test_connection(config).await?;
    Ok(TestConnectionResponse {
        ok: true,
        message: "Connection successful".to_string(),
    })
}

pub async fn store_schema(request: &StoreSchemaRequest) -> Result<ExecutionResponse, ErrorPayload> {
    Ok(database::store_schema(&request.connection, &request.schema)
        .await?
        .into())
}

pub async fn insert_rows(request: InsertRowsRequest) -> Result<ExecutionResponse, ErrorPayload> {
    Ok(database::insert_rows(&request.connection, request.operations)
        .await?
        .into())
}

/// Store a schema through an already open executor
pub async fn store_schema_with(
    executor: &dyn SqlExecutor,
    schema: &Schema,
) -> Result<ExecutionResponse, ErrorPayload> {
    Ok(SchemaWriter::new(executor).write(schema).await?.into())
}
