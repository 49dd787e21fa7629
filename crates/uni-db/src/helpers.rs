//! Column decoding shared by the repos.
//!
//! Timestamps written by SQL defaults and by chrono differ in shape; both are
//! accepted.

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;

/// Decode a timestamp stored either as RFC 3339 or as `YYYY-MM-DD HH:MM:SS`.
///
/// # Errors
///
/// `DatabaseError::Query` when neither shape matches.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("bad timestamp {s:?}: {e}")))
}

/// Decode a stored enum through its snake_case serde name.
///
/// # Errors
///
/// `DatabaseError::Query` for an unknown variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("bad enum value {s:?}: {e}")))
}

/// Nullable text column; an empty string reads as `None` too.
///
/// # Errors
///
/// Propagates the column read failure.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Audit detail column.
///
/// # Errors
///
/// `DatabaseError::Query` for malformed JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("bad audit detail: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}
