//! Bot event payloads carried in `LogRecord::json_data`
//!
//! Payloads arrive loosely typed from remote senders. Parsing never fails:
//! anything that does not match a known shape becomes `BotEvent::Unknown`,
//! and malformed list entries are dropped one by one.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Name used when an event does not identify its bot
pub const UNKNOWN_BOT: &str = "unknown";

/// Known event kinds, selected by the `event` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BotEvent {
    /// A single bot reported its connection
    BotConnected(BotConnectedData),
    /// The supervisor started and lists the bots it launched
    SystemStartup(SystemStartupData),
    /// Periodic supervisor health report
    HealthCheck(HealthCheckData),
    #[serde(other)]
    Unknown,
}

impl BotEvent {
    /// Interpret a structured payload, falling back to `Unknown` on any shape error
    pub fn parse(json_data: &Value) -> Self {
        BotEvent::deserialize(json_data).unwrap_or(BotEvent::Unknown)
    }

    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            BotEvent::BotConnected(_) => "bot_connected",
            BotEvent::SystemStartup(_) => "system_startup",
            BotEvent::HealthCheck(_) => "health_check",
            BotEvent::Unknown => "unknown",
        }
    }
}

/// Payload of `bot_connected`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BotConnectedData {
    #[serde(default)]
    pub bot_name: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub device_name: Option<Value>,
    #[serde(default)]
    pub device_type: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub room_id: Option<Value>,
}

/// Payload of `system_startup`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemStartupData {
    #[serde(default, deserialize_with = "lenient_list")]
    pub started_bots: Vec<StartedBot>,
}

/// One bot launched at system startup
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StartedBot {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub room_id: Option<Value>,
}

/// Payload of `health_check`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthCheckData {
    #[serde(default, deserialize_with = "lenient_struct")]
    pub health_check_data: HealthReport,
}

/// The four bot lists of a health report
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthReport {
    #[serde(default, deserialize_with = "lenient_list")]
    pub healthy_bots: Vec<HealthEntry>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub restarted_bots: Vec<HealthEntry>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub failed_bots: Vec<HealthEntry>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub stopped_bots: Vec<HealthEntry>,
}

/// One bot listed in a health report
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthEntry {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub heartbeat_age: Option<Value>,
}

/// Turn a bot name value into a registry key
///
/// Strings are used as-is, missing or null names become `"unknown"`,
/// other scalars use their JSON text.
pub fn bot_key(name: Option<&Value>) -> String {
    match name {
        None | Some(Value::Null) => UNKNOWN_BOT.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Keep the entries of an array that parse as `T`; anything else is an empty list
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Parse `T`, or fall back to its default when the shape does not match
fn lenient_struct<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bot_connected() {
        let event = BotEvent::parse(&json!({
            "event": "bot_connected",
            "bot_name": "alpha",
            "user_id": 42
        }));

        match event {
            BotEvent::BotConnected(data) => {
                assert_eq!(data.bot_name, Some(json!("alpha")));
                assert_eq!(data.user_id, Some(json!(42)));
                assert!(data.status.is_none());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_and_malformed() {
        assert_eq!(BotEvent::parse(&json!({"event": "noop_event"})), BotEvent::Unknown);
        assert_eq!(BotEvent::parse(&json!({"bot_name": "x"})), BotEvent::Unknown);
        assert_eq!(BotEvent::parse(&json!({"event": 7})), BotEvent::Unknown);
        assert_eq!(BotEvent::parse(&json!([1, 2, 3])), BotEvent::Unknown);
        assert_eq!(BotEvent::parse(&json!("health_check")), BotEvent::Unknown);
    }

    #[test]
    fn test_lenient_lists_skip_bad_entries() {
        let event = BotEvent::parse(&json!({
            "event": "system_startup",
            "started_bots": [{"name": "a"}, "garbage", 5, {"name": "b", "owner": "o"}]
        }));

        match event {
            BotEvent::SystemStartup(data) => {
                let names: Vec<_> = data.started_bots.iter().map(|b| bot_key(b.name.as_ref())).collect();
                assert_eq!(names, vec!["a", "b"]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_health_report_null_or_wrong_type_is_empty() {
        for payload in [
            json!({"event": "health_check"}),
            json!({"event": "health_check", "health_check_data": null}),
            json!({"event": "health_check", "health_check_data": "oops"}),
            json!({"event": "health_check", "health_check_data": {"healthy_bots": null}}),
        ] {
            match BotEvent::parse(&payload) {
                BotEvent::HealthCheck(data) => {
                    assert_eq!(data.health_check_data, HealthReport::default())
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[test]
    fn test_bot_key() {
        assert_eq!(bot_key(None), "unknown");
        assert_eq!(bot_key(Some(&Value::Null)), "unknown");
        assert_eq!(bot_key(Some(&json!("B"))), "B");
        assert_eq!(bot_key(Some(&json!(12))), "12");
    }
}
