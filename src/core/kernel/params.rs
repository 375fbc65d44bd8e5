use crate::core::errors::ExchangeError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Display};

/// Body sent for POST calls that carry no parameters.
pub const EMPTY_BODY: &str = "{}";

/// Render a timestamp the way the API expects it: UTC, second precision.
///
/// `2023-01-01T00:00:00.123Z` becomes `2023-01-01T00:00:00Z`.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Ordered query fragments for GET requests.
///
/// Each `push_*` call appends one `key=value` fragment or nothing when the
/// value is absent. Values are written as-is (no percent-encoding) because
/// the exact text ends up in the signed message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    fragments: Vec<String>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter
    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        self.fragments.push(format!("{}={}", key, value));
        self
    }

    /// Append a parameter only when it is present
    pub fn push_opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Append a list as a single comma-joined value; an empty list is absent
    pub fn push_list<V: Display>(self, key: &str, values: &[V]) -> Self {
        if values.is_empty() {
            return self;
        }

        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.push(key, joined)
    }

    pub fn push_opt_list<V: Display>(self, key: &str, values: Option<&[V]>) -> Self {
        match values {
            Some(values) => self.push_list(key, values),
            None => self,
        }
    }

    /// Append a timestamp truncated to whole seconds
    pub fn push_time(self, key: &str, time: Option<&DateTime<Utc>>) -> Self {
        self.push_opt(key, time.map(format_timestamp))
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// `?a=1&b=2`, or an empty string when no fragment is present
    pub fn encode(&self) -> String {
        if self.fragments.is_empty() {
            String::new()
        } else {
            format!("?{}", self.fragments.join("&"))
        }
    }
}

impl Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Compact JSON body for POST requests with null entries removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody(String);

impl JsonBody {
    /// Serialize a flat payload, dropping every field whose value is null
    pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<Self, ExchangeError> {
        let value = serde_json::to_value(payload).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
        })?;

        let value = match value {
            Value::Object(mut map) => {
                map.retain(|_, v| !v.is_null());
                Value::Object(map)
            }
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };

        serde_json::to_string(&value).map(Self).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
        })
    }

    pub fn empty() -> Self {
        Self(EMPTY_BODY.to_string())
    }

    /// True when the body is the bare `{}` object
    pub fn is_empty(&self) -> bool {
        self.0 == EMPTY_BODY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl Default for JsonBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for JsonBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
