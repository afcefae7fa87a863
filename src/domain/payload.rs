//! Decoded inbound message.
//!
//! Payloads have no fixed schema. [`Payload`] wraps the decoded
//! [`serde_json::Value`] and only exposes a shape label and a textual
//! rendering, so nothing downstream depends on field access.

use std::fmt;

use serde::Serialize;

use crate::error::DecodeError;

/// Top-level shape of a decoded payload, used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool,
    /// JSON number.
    Number,
    /// JSON string.
    String,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

/// An arbitrary structured value decoded from one text frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(serde_json::Value);

impl Payload {
    /// Decodes a raw text frame.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if `raw` is not a single valid JSON value.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        Ok(Self(serde_json::from_str(raw)?))
    }

    /// Returns the top-level shape of the value.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match &self.0 {
            serde_json::Value::Null => PayloadKind::Null,
            serde_json::Value::Bool(_) => PayloadKind::Bool,
            serde_json::Value::Number(_) => PayloadKind::Number,
            serde_json::Value::String(_) => PayloadKind::String,
            serde_json::Value::Array(_) => PayloadKind::Array,
            serde_json::Value::Object(_) => PayloadKind::Object,
        }
    }

    /// Re-encodes the value as compact JSON. Object keys keep their
    /// original order.
    #[must_use]
    pub fn render(&self) -> String {
        // Serializing a `Value` cannot fail: keys are always strings.
        self.0.to_string()
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> Payload {
        let Ok(payload) = Payload::decode(raw) else {
            panic!("failed to decode {raw}");
        };
        payload
    }

    #[test]
    fn render_is_compact_json() {
        assert_eq!(decode(r#"{ "status" : "ok" }"#).render(), r#"{"status":"ok"}"#);
    }

    #[test]
    fn render_preserves_key_order() {
        let raw = r#"{"zeta":1,"alpha":{"y":true,"b":null},"mid":[3,2,1]}"#;
        assert_eq!(decode(raw).render(), raw);
    }

    #[test]
    fn scalars_decode() {
        assert_eq!(decode("5").kind(), PayloadKind::Number);
        assert_eq!(decode("\"hi\"").render(), "\"hi\"");
        assert_eq!(decode("null").kind(), PayloadKind::Null);
        assert_eq!(decode("[true,false]").kind(), PayloadKind::Array);
    }

    #[test]
    fn render_escapes_strings() {
        let payload = decode(r#"{"msg":"line\nbreak \"quoted\""}"#);
        assert_eq!(payload.render(), r#"{"msg":"line\nbreak \"quoted\""}"#);
    }

    #[test]
    fn non_json_fails_to_decode() {
        assert!(Payload::decode("hello there").is_err());
        assert!(Payload::decode("").is_err());
        assert!(Payload::decode(r#"{"a":1} trailing"#).is_err());
    }

    #[test]
    fn display_matches_render() {
        let payload = decode(r#"{"count":5}"#);
        assert_eq!(payload.to_string(), payload.render());
    }

    #[test]
    fn serializes_transparently() {
        let payload = Payload::from(serde_json::json!({"a": [1, 2]}));
        let Ok(json) = serde_json::to_string(&payload) else {
            panic!("serialization failed");
        };
        assert_eq!(json, r#"{"a":[1,2]}"#);
    }
}
