//! Support record normalizer
//!
//! Canonicalizes a raw per-browser support value into an ordered sequence of
//! typed records. A single record becomes a one-element sequence; a list
//! keeps its order. Pure, no logging.

use serde::Deserialize;
use serde_json::Value;

use super::errors::{SupportError, SupportResult};
use super::record::{RawRecord, SupportRecord};
use super::token::VersionToken;

/// Normalizes one browser's raw support value.
pub fn normalize(raw: &Value) -> SupportResult<Vec<SupportRecord>> {
    match raw {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(SupportError::malformed(0, "empty record list"));
            }
            items
                .iter()
                .enumerate()
                .map(|(index, item)| normalize_element(index, item))
                .collect()
        }
        single => Ok(vec![normalize_element(0, single)?]),
    }
}

fn normalize_element(index: usize, raw: &Value) -> SupportResult<SupportRecord> {
    match raw {
        // Sentinel-only placeholders stand in for a whole record.
        Value::Null => Ok(SupportRecord::added(VersionToken::Unknown)),
        Value::Bool(true) => Ok(SupportRecord::added(VersionToken::AlwaysSupported)),
        Value::Bool(false) => Ok(SupportRecord::added(VersionToken::Never)),
        Value::Object(_) => {
            let record = RawRecord::deserialize(raw)
                .map_err(|e| SupportError::malformed(index, e.to_string()))?;
            record.into_record().ok_or_else(|| {
                SupportError::malformed(index, "neither version_added nor version_removed present")
            })
        }
        other => Err(SupportError::malformed(
            index,
            format!("expected record object, got {}", json_kind(other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_record_wrapped() {
        let records = normalize(&json!({ "version_added": "42" })).unwrap();
        assert_eq!(records, vec![SupportRecord::since("42")]);
    }

    #[test]
    fn test_list_order_preserved() {
        let records = normalize(&json!([
            { "version_added": "50" },
            { "version_added": "30", "prefix": "webkit" },
            { "version_added": "20", "flags": [{ "type": "preference", "name": "x" }] }
        ]))
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], SupportRecord::since("50"));
        assert_eq!(records[1], SupportRecord::since("30").with_prefix("webkit"));
        assert_eq!(records[2], SupportRecord::since("20").with_flag());
    }

    #[test]
    fn test_null_token_is_not_missing() {
        let records = normalize(&json!({ "version_added": null })).unwrap();
        assert_eq!(records[0].added, VersionToken::Unknown);
    }

    #[test]
    fn test_removed_only_record() {
        let records = normalize(&json!({ "version_removed": "12" })).unwrap();
        assert_eq!(records[0].added, VersionToken::Unknown);
        assert!(records[0].is_removed());
    }

    #[test]
    fn test_sentinel_placeholders() {
        assert_eq!(
            normalize(&json!(true)).unwrap()[0].added,
            VersionToken::AlwaysSupported
        );
        assert_eq!(normalize(&json!([false])).unwrap()[0].added, VersionToken::Never);
        assert_eq!(normalize(&json!(null)).unwrap()[0].added, VersionToken::Unknown);
    }

    #[test]
    fn test_missing_tokens_is_malformed() {
        let err = normalize(&json!([{ "version_added": "1" }, { "notes": "x" }])).unwrap_err();
        assert_eq!(err, SupportError::malformed(1, "neither version_added nor version_removed present"));
    }

    #[test]
    fn test_empty_list_is_malformed() {
        assert!(matches!(
            normalize(&json!([])),
            Err(SupportError::MalformedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_wrong_types_are_malformed() {
        assert!(normalize(&json!("42")).is_err());
        assert!(normalize(&json!({ "version_added": 42 })).is_err());
        assert!(normalize(&json!({ "version_added": "1", "prefix": 3 })).is_err());
    }

    #[test]
    fn test_empty_prefix_is_unset() {
        let records = normalize(&json!({ "version_added": "1", "prefix": "" })).unwrap();
        assert!(!records[0].is_non_standard());
    }

    #[test]
    fn test_null_flags_is_unset() {
        let records = normalize(&json!({ "version_added": "1", "flags": null })).unwrap();
        assert!(!records[0].behind_flag);
    }
}
