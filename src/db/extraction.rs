//! DataValue extraction helpers.

use std::error::Error;

use cozo::{DataValue, Num};

use super::DbError;

/// Extract a String from a DataValue, returning None if not a string
pub fn extract_string(value: &DataValue) -> Option<String> {
    match value {
        DataValue::Str(s) => Some(s.to_string()),
        _ => None,
    }
}

/// Extract a nullable string column: `Ok(None)` for null, error for any other non-string.
pub fn extract_optional_string(value: &DataValue) -> Result<Option<String>, Box<dyn Error>> {
    match value {
        DataValue::Null => Ok(None),
        DataValue::Str(s) => Ok(Some(s.to_string())),
        other => Err(format!("Expected string or null, got {:?}", other).into()),
    }
}

/// Extract an i64 from a DataValue, returning None if not a number
pub fn extract_i64(value: &DataValue) -> Option<i64> {
    match value {
        DataValue::Num(Num::Int(i)) => Some(*i),
        DataValue::Num(Num::Float(f)) => Some(*f as i64),
        _ => None,
    }
}

/// Position of a named column in a result header.
pub fn column_index(headers: &[String], name: &str) -> Result<usize, Box<dyn Error>> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        Box::new(DbError::MissingColumn {
            name: name.to_string(),
        }) as Box<dyn Error>
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_extract_string_from_str() {
        let value = DataValue::Str("hello".into());
        assert_eq!(extract_string(&value), Some("hello".to_string()));
    }

    #[rstest]
    fn test_extract_string_from_non_str() {
        let value = DataValue::Num(Num::Int(42));
        assert_eq!(extract_string(&value), None);
    }

    #[rstest]
    fn test_extract_optional_string_null() {
        assert_eq!(extract_optional_string(&DataValue::Null).unwrap(), None);
    }

    #[rstest]
    fn test_extract_optional_string_rejects_number() {
        assert!(extract_optional_string(&DataValue::Num(Num::Int(1))).is_err());
    }

    #[rstest]
    fn test_extract_i64_from_int() {
        assert_eq!(extract_i64(&DataValue::Num(Num::Int(90))), Some(90));
    }

    #[rstest]
    fn test_extract_i64_from_non_num() {
        assert_eq!(extract_i64(&DataValue::Str("90".into())), None);
    }

    #[rstest]
    fn test_column_index() {
        let headers = vec!["sid".to_string(), "cid".to_string()];
        assert_eq!(column_index(&headers, "cid").unwrap(), 1);
        let err = column_index(&headers, "score").unwrap_err();
        assert!(err.to_string().contains("score"));
    }
}
