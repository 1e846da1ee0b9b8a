use serde::Deserialize;
use serde_json::{Map, Value};

/// Placeholder used for every metadata field the catalog could not supply.
pub const UNKNOWN: &str = "Unknown";

/// One resource (book, author or work) as returned by the external catalog.
///
/// Records carry far more fields than the lookup reads, so no schema is
/// imposed: callers ask for individual keys and treat absence as normal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CatalogRecord(Map<String, Value>);

impl CatalogRecord {
    /// Reads `key` as display text.
    ///
    /// Strings are trimmed, numbers keep their JSON form, and the catalog's
    /// `{"type": "/type/text", "value": ...}` wrapper yields its inner value.
    /// A missing key, `null`, an empty string or any other shape gives `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => non_empty(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(inner) => inner.get("value").and_then(Value::as_str).and_then(non_empty),
            _ => None,
        }
    }

    pub fn text_or_unknown(&self, key: &str) -> String {
        self.text(key).unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Returns the `key` of the first entry in the list stored under `list_key`.
    ///
    /// Later entries are never consulted.
    pub fn first_link(&self, list_key: &str) -> Option<String> {
        self.0
            .get(list_key)?
            .as_array()?
            .first()?
            .get("key")?
            .as_str()
            .and_then(non_empty)
    }
}

impl CatalogRecord {
    /// Interprets a catalog response body.
    ///
    /// `null` and `{}` carry no data and count as an absent record; any other
    /// non-object body is handed back as the error.
    pub fn from_body(body: Value) -> Result<Option<Self>, Value> {
        match body {
            Value::Null => Ok(None),
            Value::Object(fields) if fields.is_empty() => Ok(None),
            other => Self::try_from(other).map(Some),
        }
    }
}

impl TryFrom<Value> for CatalogRecord {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
