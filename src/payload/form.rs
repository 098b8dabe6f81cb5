//! URL-encoded form bodies.

use crate::framework::ResourceError;
use serde_json::{Map, Value};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Text form of an attribute value. Strings go out verbatim, null as empty,
/// everything else as compact JSON.
pub(crate) fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Encode a flat attribute map as `key=value&...`.
pub fn encode(attrs: &Map<String, Value>) -> Result<String, ResourceError> {
    let pairs: Vec<(&str, String)> = attrs
        .iter()
        .map(|(key, value)| (key.as_str(), field_text(value)))
        .collect();
    serde_urlencoded::to_string(pairs).map_err(|e| ResourceError::Encode(e.to_string()))
}
