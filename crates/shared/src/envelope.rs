//! Envelope codec - raw text frame to [`IncomingMessage`]
//!
//! Every server frame is a JSON object:
//!
//! ```text
//! { "type": string, "payload": object|string|null, "timestamp"?: i64, "sequence"?: i64 }
//! ```
//!
//! Parsing never panics. Callers that get an [`EnvelopeError`] are expected to
//! show the raw frame text instead.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Why a frame could not be turned into an [`IncomingMessage`].
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("Frame is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Frame is not a JSON object")]
    NotAnObject,

    #[error("Frame has no string 'type' field")]
    MissingType,
}

/// One parsed server frame. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    kind: String,
    payload: Value,
    timestamp: Option<i64>,
    sequence: Option<i64>,
}

impl IncomingMessage {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
            timestamp: None,
            sequence: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Server send time in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn sequence(&self) -> Option<i64> {
        self.sequence
    }

    /// The timestamp as a UTC instant, if present and in range.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::from_timestamp_millis)
    }

    /// `null`, `{}`, `[]` and blank strings carry nothing a handler can use.
    pub fn has_empty_payload(&self) -> bool {
        match &self.payload {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(text) => text.trim().is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }
}

/// Parse one raw text frame.
pub fn parse_envelope(text: &str) -> Result<IncomingMessage, EnvelopeError> {
    let value: Value = serde_json::from_str(text.trim())?;
    let Value::Object(mut fields) = value else {
        return Err(EnvelopeError::NotAnObject);
    };

    let kind = match fields.remove("type") {
        Some(Value::String(kind)) if !kind.trim().is_empty() => kind.trim().to_string(),
        _ => return Err(EnvelopeError::MissingType),
    };

    Ok(IncomingMessage {
        kind,
        payload: fields.remove("payload").unwrap_or(Value::Null),
        timestamp: fields.get("timestamp").and_then(Value::as_i64),
        sequence: fields.get("sequence").and_then(Value::as_i64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_envelope() {
        let msg = parse_envelope(
            r#"{"type":"chat","payload":{"message":"hi"},"timestamp":1700000000000,"sequence":42}"#,
        )
        .unwrap();

        assert_eq!(msg.kind(), "chat");
        assert_eq!(msg.payload(), &json!({"message": "hi"}));
        assert_eq!(msg.sequence(), Some(42));
        assert_eq!(
            msg.sent_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn test_missing_payload_defaults_to_null() {
        let msg = parse_envelope(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(msg.payload(), &Value::Null);
        assert!(msg.has_empty_payload());
        assert_eq!(msg.timestamp(), None);
    }

    #[test]
    fn test_non_integer_metadata_ignored() {
        let msg = parse_envelope(r#"{"type":"x","timestamp":"soon","sequence":1.5}"#).unwrap();
        assert_eq!(msg.timestamp(), None);
        assert_eq!(msg.sequence(), None);
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_envelope("{not json").unwrap_err();
        assert!(matches!(err, EnvelopeError::Malformed(_)));
        assert!(matches!(parse_envelope(""), Err(EnvelopeError::Malformed(_))));
    }

    #[test]
    fn test_missing_or_bad_type() {
        assert!(matches!(
            parse_envelope(r#"{"payload":{}}"#),
            Err(EnvelopeError::MissingType)
        ));
        assert!(matches!(
            parse_envelope(r#"{"type":7}"#),
            Err(EnvelopeError::MissingType)
        ));
        assert!(matches!(
            parse_envelope(r#"{"type":"  "}"#),
            Err(EnvelopeError::MissingType)
        ));
    }

    #[test]
    fn test_non_object_frame() {
        assert!(matches!(
            parse_envelope("[1,2,3]"),
            Err(EnvelopeError::NotAnObject)
        ));
        assert!(matches!(
            parse_envelope("\"hello\""),
            Err(EnvelopeError::NotAnObject)
        ));
    }

    #[test]
    fn test_empty_payload_shapes() {
        for payload in [json!(null), json!({}), json!([]), json!(""), json!("   ")] {
            assert!(IncomingMessage::new("x", payload).has_empty_payload());
        }
        for payload in [json!(0), json!(false), json!("text"), json!({"a": 1})] {
            assert!(!IncomingMessage::new("x", payload).has_empty_payload());
        }
    }

    #[test]
    fn test_unknown_kind_is_legal() {
        let msg = parse_envelope(r#"{"type":"weather_report","payload":{"rain":true}}"#).unwrap();
        assert_eq!(msg.kind(), "weather_report");
    }
}
