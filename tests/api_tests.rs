//! Transport boundary tests

use async_trait::async_trait;
use json2sql::api::{
    self, AnalyzeRequest, ErrorPayload, GenerateSqlRequest, PARSE_ERROR, UNSUPPORTED_DIALECT,
};
use json2sql::database::{ExecutionError, SqlExecutor};
use json2sql::{Dialect, InferenceConfig, infer_schema};
use serde_json::json;

mod analyze_tests {
    use super::*;

    #[test]
    fn test_analyze_returns_schema_and_summary() {
        let response = api::analyze(&AnalyzeRequest {
            json: r#"{"users": [{"id": 1, "tags": ["a", "b"]}]}"#.to_string(),
            config: InferenceConfig::default(),
        })
        .unwrap();
        assert_eq!(response.summary.tables, 2);
        assert_eq!(response.summary.rows, 3);
        assert_eq!(response.schema.table_names(), vec!["users", "users_tags"]);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = api::analyze(&AnalyzeRequest {
            json: "{\"users\": [".to_string(),
            config: InferenceConfig::default(),
        })
        .unwrap_err();
        assert_eq!(err.code, PARSE_ERROR);
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_analyze_response_wire_shape() {
        let response = api::analyze_value(&json!([{"id": 1}]), &InferenceConfig::default()).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["summary"]["tables"], json!(1));
        assert_eq!(value["schema"]["tables"][0]["columns"][0], json!({"name": "id", "type": "INTEGER"}));
        assert_eq!(value["schema"]["tables"][0]["rows"][0], json!({"id": 1}));
    }
}

mod generate_tests {
    use super::*;

    #[test]
    fn test_generate_sql() {
        let request = GenerateSqlRequest {
            schema: infer_schema(&json!([{"id": 1, "name": "Ann"}])),
            dialect: "sqlite3".to_string(),
            row_limit: None,
        };
        let response = api::generate_sql(&request).unwrap();
        assert_eq!(response.dialect, "sqlite");
        assert_eq!(
            response.create_statements,
            r#"CREATE TABLE IF NOT EXISTS "items" ("id" INTEGER, "name" TEXT);"#
        );
        assert_eq!(
            response.insert_statements,
            r#"INSERT INTO "items" ("id", "name") VALUES (1, 'Ann');"#
        );
    }

    #[test]
    fn test_unsupported_dialect_payload() {
        let request = GenerateSqlRequest {
            schema: infer_schema(&json!([1])),
            dialect: "oracle".to_string(),
            row_limit: None,
        };
        let err = api::generate_sql(&request).unwrap_err();
        assert_eq!(
            err,
            ErrorPayload {
                code: UNSUPPORTED_DIALECT.to_string(),
                message: "Unsupported dialect: oracle".to_string(),
                table: None,
            }
        );
    }

    #[test]
    fn test_request_from_wire() {
        let request: GenerateSqlRequest = api::parse_request(
            r#"{
                "schema": {"tables": [{"name": "t", "columns": [{"name": "n", "type": "DECIMAL"}], "rows": [{"n": 1.5}]}]},
                "dialect": "mysql",
                "rowLimit": 10
            }"#,
        )
        .unwrap();
        let response = api::generate_sql(&request).unwrap();
        assert_eq!(
            response.create_statements,
            "CREATE TABLE IF NOT EXISTS `t` (`n` DECIMAL(10,2));"
        );
        assert_eq!(response.insert_statements, "INSERT INTO `t` (`n`) VALUES (1.5);");
    }
}

mod store_tests {
    use super::*;

    struct RejectingExecutor;

    #[async_trait]
    impl SqlExecutor for RejectingExecutor {
        fn dialect(&self) -> Dialect {
            Dialect::PostgreSql
        }

        async fn test_connection(&self) -> Result<(), ExecutionError> {
            Ok(())
        }

        async fn execute(&self, sql: &str) -> Result<(), ExecutionError> {
            if sql.contains("\"users_tags\"") {
                return Err(ExecutionError::Query("permission denied".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_store_reports_partial_success() {
        let schema = infer_schema(&json!({"users": [{"id": 1, "tags": ["a"]}]}));
        let response = api::store_schema_with(&RejectingExecutor, &schema).await.unwrap();

        assert!(!response.ok);
        assert_eq!(response.message, "1 of 2 tables failed: users_tags");
        assert!(response.report.tables[0].is_success());

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["report"]["tables"][0]["rowsInserted"], json!(1));
        assert!(value["report"]["tables"][0].get("error").is_none());
        assert!(
            value["report"]["tables"][1]["error"]
                .as_str()
                .unwrap()
                .contains("permission denied")
        );
    }

    #[tokio::test]
    async fn test_connection_without_backend() {
        let connection = json2sql::ConnectionConfig::new(Dialect::MsSql).with_database("app");
        let err = api::test_connection(&connection).await.unwrap_err();
        assert_eq!(err.code, "execution_error");
        assert_eq!(err.status(), 500);
    }
}
