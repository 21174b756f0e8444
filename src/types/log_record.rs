//! Log record types for the append-only request log
//!
//! Every inbound webhook request becomes one `LogRecord`. Records are
//! immutable once appended; the log is an ordered sequence, oldest first.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Request details captured by the ingress adapter, before the store
/// assigns a timestamp
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomingRequest {
    pub method: Option<String>,
    pub path: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, String>,
    pub form_data: BTreeMap<String, String>,
    /// Parsed structured body, `None` when the body was not JSON
    pub json_data: Option<serde_json::Value>,
    /// Raw body as text
    pub data: String,
}

impl IncomingRequest {
    /// Build a request that only carries a JSON payload (handy for tooling and tests)
    pub fn from_json(json_data: serde_json::Value) -> Self {
        let data = json_data.to_string();
        Self {
            method: Some("POST".to_string()),
            json_data: Some(json_data),
            data,
            ..Default::default()
        }
    }
}

/// One persisted entry of the request log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// ISO-8601 local time assigned by the store at append time
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_params: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_data: BTreeMap<String, String>,
    #[serde(default)]
    pub json_data: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
}

impl LogRecord {
    /// Stamp an incoming request, producing the record that gets stored
    pub fn stamped(timestamp: String, request: IncomingRequest) -> Self {
        Self {
            timestamp,
            method: request.method,
            path: request.path,
            ip_address: request.ip_address,
            user_agent: request.user_agent,
            headers: request.headers,
            query_params: request.query_params,
            form_data: request.form_data,
            json_data: request.json_data,
            data: request.data,
        }
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
