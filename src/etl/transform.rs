/// Transform Module
///
/// Converts the raw match-history payload into rows for the match table,
/// stamping every row with a single capture timestamp normalized to Korea
/// Standard Time.
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

use crate::error::MalformedPayloadError;
use crate::models::MatchRow;

/// Korea Standard Time is UTC+9 with no daylight saving.
const KST_OFFSET_SECS: i32 = 9 * 3600;

/// The fixed timezone applied to every capture timestamp
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("KST offset is a valid fixed offset")
}

/// Transform the raw payload using the current wall-clock time
pub fn transform(payload: &Value) -> Result<Vec<MatchRow>, MalformedPayloadError> {
    transform_at(payload, Utc::now())
}

/// Transform the raw payload with an explicit capture instant
///
/// Every row produced by one call shares the same `last_updated` value; the
/// timestamp acts as the batch marker for the run. Input order is preserved.
pub fn transform_at(
    payload: &Value,
    captured_at: DateTime<Utc>,
) -> Result<Vec<MatchRow>, MalformedPayloadError> {
    tracing::info!("Transform started");

    let ids = payload.as_array().ok_or(MalformedPayloadError::NotAnArray { got: json_type(payload) })?;

    let last_updated = captured_at.with_timezone(&kst());

    let rows = ids
        .iter()
        .enumerate()
        .map(|(index, id)| match id.as_str() {
            Some(record) => Ok(MatchRow { record: record.to_string(), last_updated }),
            None => Err(MalformedPayloadError::NonStringId { index }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!("Transform done ({} rows)", rows.len());
    Ok(rows)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn frozen_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 2, 0, 0).unwrap()
    }

    #[test]
    fn test_preserves_count_and_order() {
        let payload = json!(["m3", "m1", "m2"]);

        let rows = transform_at(&payload, frozen_clock()).unwrap();

        assert_eq!(rows.len(), 3);
        let ids: Vec<&str> = rows.iter().map(|r| r.record.as_str()).collect();
        assert_eq!(ids, vec!["m3", "m1", "m2"]);
    }

    #[test]
    fn test_all_rows_share_one_capture_timestamp() {
        let payload = json!(["m1", "m2", "m3"]);

        let rows = transform_at(&payload, frozen_clock()).unwrap();

        assert!(rows.iter().all(|r| r.last_updated == rows[0].last_updated));
    }

    #[test]
    fn test_normalizes_capture_timestamp_to_kst() {
        let payload = json!(["m1", "m2"]);

        let rows = transform_at(&payload, frozen_clock()).unwrap();

        assert_eq!(rows[0].last_updated.to_rfc3339(), "2024-08-15T11:00:00+09:00");
        assert_eq!(rows[1].last_updated.to_rfc3339(), "2024-08-15T11:00:00+09:00");
    }

    #[test]
    fn test_empty_payload_yields_no_rows() {
        let payload = json!([]);

        let rows = transform_at(&payload, frozen_clock()).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_rejects_non_array_payload() {
        let payload = json!({"error": "forbidden"});

        let err = transform_at(&payload, frozen_clock()).unwrap_err();

        assert!(matches!(err, MalformedPayloadError::NotAnArray { got: "object" }));
    }

    #[test]
    fn test_rejects_non_string_match_id() {
        let payload = json!(["m1", 42, "m3"]);

        let err = transform_at(&payload, frozen_clock()).unwrap_err();

        assert!(matches!(err, MalformedPayloadError::NonStringId { index: 1 }));
    }
}
