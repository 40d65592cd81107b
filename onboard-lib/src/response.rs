//! Normalization of loosely shaped API responses.
//!
//! The server is not consistent about where it puts messages or lists, so
//! every reply goes through here before the rest of the crate sees it.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Error body returned with non-success statuses.
///
/// All parts are optional; [`message_or`](Self::message_or) picks the best
/// available message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    /// Primary message.
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    /// Fallback message.
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
    /// Field key → message.
    #[serde(default, deserialize_with = "field_messages")]
    pub errors: BTreeMap<String, String>,
}

impl ErrorBody {
    /// Parses an error body.
    ///
    /// Returns `None` when `text` is not JSON at all (including an empty
    /// body). JSON that is not an object yields an empty body.
    pub fn from_text(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        Some(serde_json::from_value(value).unwrap_or_default())
    }

    /// `message`, else `error`, else `default`. Empty strings are skipped;
    /// whitespace is kept as a message.
    pub fn message_or(&self, default: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.error.as_deref().filter(|m| !m.is_empty()))
            .unwrap_or(default)
            .to_string()
    }

    /// Message reported for a field key, if any.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }
}

/// Accepts a string or any other scalar; objects and arrays read as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(scalar_to_string(&Value::deserialize(deserializer)?))
}

/// Accepts `{field: "msg"}` or `{field: ["msg", ...]}`; other shapes are
/// dropped.
fn field_messages<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| {
            let message = match &value {
                Value::Array(items) => items.iter().find_map(scalar_to_string),
                other => scalar_to_string(other),
            }?;
            Some((key, message))
        })
        .collect())
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Extracts the list from a user-list payload.
///
/// Accepts a bare array, `{"users": [...]}` or `{"data": [...]}`; anything
/// else is treated as an empty list.
pub fn list_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => ["users", "data"]
            .into_iter()
            .find_map(|key| match map.remove(key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(text: &str) -> ErrorBody {
        ErrorBody::from_text(text).unwrap()
    }

    #[test]
    fn test_message_precedence() {
        let b = body(r#"{"message": "Taken", "error": "Conflict"}"#);
        assert_eq!(b.message_or("default"), "Taken");

        let b = body(r#"{"error": "Conflict"}"#);
        assert_eq!(b.message_or("default"), "Conflict");

        let b = body(r#"{"message": "", "error": "Conflict"}"#);
        assert_eq!(b.message_or("default"), "Conflict");

        let b = body(r#"{"message": "", "error": ""}"#);
        assert_eq!(b.message_or("default"), "default");
    }

    #[test]
    fn test_whitespace_message_is_kept() {
        let b = body(r#"{"message": "  ", "error": "Conflict"}"#);
        assert_eq!(b.message_or("default"), "  ");
    }

    #[test]
    fn test_non_json_body() {
        assert_eq!(ErrorBody::from_text("<html>Bad Gateway</html>"), None);
        assert_eq!(ErrorBody::from_text(""), None);
        assert_eq!(ErrorBody::from_text("[1, 2]"), Some(ErrorBody::default()));
        assert_eq!(body(r#""oops""#).message_or("default"), "default");
    }

    #[test]
    fn test_field_errors_shapes() {
        let b = body(
            r#"{"errors": {"email": "Email taken", "password": ["Too weak", "Too short"], "age": {"min": 18}}}"#,
        );
        assert_eq!(b.field("email"), Some("Email taken"));
        assert_eq!(b.field("password"), Some("Too weak"));
        assert_eq!(b.field("age"), None);

        let b = body(r#"{"errors": ["not", "a", "map"]}"#);
        assert!(b.errors.is_empty());
    }

    #[test]
    fn test_non_string_message() {
        let b = body(r#"{"message": 42, "error": {"code": 1}}"#);
        assert_eq!(b.message.as_deref(), Some("42"));
        assert_eq!(b.error, None);
    }

    #[test]
    fn test_list_items_shapes() {
        assert_eq!(list_items(json!([{"id": 1}])).len(), 1);
        assert_eq!(list_items(json!({"users": [{"id": 1}, {"id": 2}]})).len(), 2);
        assert_eq!(list_items(json!({"data": [{"id": 1}]})).len(), 1);
        assert!(list_items(json!({"users": "nope"})).is_empty());
        assert!(list_items(json!({"total": 0})).is_empty());
        assert!(list_items(json!("users")).is_empty());
    }

    #[test]
    fn test_users_key_wins_over_data() {
        let items = list_items(json!({"users": [{"id": 1}], "data": [{"id": 2}, {"id": 3}]}));
        assert_eq!(items, vec![json!({"id": 1})]);
    }
}
