//! Type inference for scalar JSON values

use serde_json::Value;

use super::formats::is_timestamp;
use crate::models::{AbstractType, LONG_VARCHAR, SHORT_VARCHAR};

/// Infer the column type of a single JSON value.
///
/// Rules, first match wins:
/// 1. `null` → `TEXT`
/// 2. boolean → `BOOLEAN`
/// 3. number → `INTEGER` when the value is integral (so `5.0` is an integer), else `DECIMAL`
/// 4. string → `TIMESTAMP` when it looks like a date, `VARCHAR(255)` when it
///    contains `@`, otherwise `VARCHAR(50)` / `VARCHAR(255)` / `TEXT` by length
/// 5. object or array → `TEXT`
pub fn infer_type(value: &Value) -> AbstractType {
    match value {
        Value::Null => AbstractType::Text,
        Value::Bool(_) => AbstractType::Boolean,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return AbstractType::Integer;
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => AbstractType::Integer,
                _ => AbstractType::Decimal,
            }
        }
        Value::String(s) => infer_string_type(s),
        Value::Array(_) | Value::Object(_) => AbstractType::Text,
    }
}

fn infer_string_type(s: &str) -> AbstractType {
    if is_timestamp(s) {
        return AbstractType::Timestamp;
    }
    if s.contains('@') {
        return AbstractType::Varchar(LONG_VARCHAR);
    }

    let len = s.chars().count();
    if len <= SHORT_VARCHAR as usize {
        AbstractType::Varchar(SHORT_VARCHAR)
    } else if len <= LONG_VARCHAR as usize {
        AbstractType::Varchar(LONG_VARCHAR)
    } else {
        AbstractType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_bool() {
        assert_eq!(infer_type(&Value::Null), AbstractType::Text);
        assert_eq!(infer_type(&json!(true)), AbstractType::Boolean);
        assert_eq!(infer_type(&json!(false)), AbstractType::Boolean);
    }

    #[test]
    fn test_numbers_use_integral_value_not_spelling() {
        assert_eq!(infer_type(&json!(42)), AbstractType::Integer);
        assert_eq!(infer_type(&json!(-7)), AbstractType::Integer);
        assert_eq!(infer_type(&json!(u64::MAX)), AbstractType::Integer);
        assert_eq!(infer_type(&json!(5.0)), AbstractType::Integer);
        assert_eq!(infer_type(&json!(5.25)), AbstractType::Decimal);

        let parsed: Value = serde_json::from_str("1e3").unwrap();
        assert_eq!(infer_type(&parsed), AbstractType::Integer);
    }

    #[test]
    fn test_string_lengths() {
        assert_eq!(infer_type(&json!("Ann")), AbstractType::Varchar(50));
        assert_eq!(infer_type(&json!("a".repeat(50))), AbstractType::Varchar(50));
        assert_eq!(infer_type(&json!("a".repeat(51))), AbstractType::Varchar(255));
        assert_eq!(infer_type(&json!("a".repeat(255))), AbstractType::Varchar(255));
        assert_eq!(infer_type(&json!("a".repeat(256))), AbstractType::Text);
    }

    #[test]
    fn test_email_like_strings_are_wide() {
        assert_eq!(infer_type(&json!("ann@example.com")), AbstractType::Varchar(255));
        assert_eq!(infer_type(&json!("@")), AbstractType::Varchar(255));
    }

    #[test]
    fn test_timestamp_wins_over_other_string_rules() {
        assert_eq!(infer_type(&json!("2024-01-15T10:30:00Z")), AbstractType::Timestamp);
        assert_eq!(infer_type(&json!("2024-01-15")), AbstractType::Timestamp);
        assert_eq!(infer_type(&json!("10001")), AbstractType::Varchar(50));
    }

    #[test]
    fn test_containers_fall_back_to_text() {
        assert_eq!(infer_type(&json!({"a": 1})), AbstractType::Text);
        assert_eq!(infer_type(&json!([1, 2])), AbstractType::Text);
    }

    #[test]
    fn test_deterministic() {
        for v in [json!(null), json!(1.5), json!("x"), json!("2024-01-01")] {
            assert_eq!(infer_type(&v), infer_type(&v.clone()));
        }
    }
}
