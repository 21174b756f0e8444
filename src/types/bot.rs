//! Bot record types for the derived status table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current status of a bot
///
/// Serialized as a plain string. Values this build does not know about
/// are kept verbatim in `Other` so newer senders are not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BotStatus {
    Online,
    Offline,
    Restarted,
    Failed,
    Other(String),
}

impl BotStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BotStatus::Online => "online",
            BotStatus::Offline => "offline",
            BotStatus::Restarted => "restarted",
            BotStatus::Failed => "failed",
            BotStatus::Other(s) => s,
        }
    }
}

impl From<String> for BotStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "online" => BotStatus::Online,
            "offline" => BotStatus::Offline,
            "restarted" => BotStatus::Restarted,
            "failed" => BotStatus::Failed,
            _ => BotStatus::Other(s),
        }
    }
}

impl From<BotStatus> for String {
    fn from(status: BotStatus) -> Self {
        match status {
            BotStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for BotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived state of a single bot
///
/// Which optional fields are present depends on the event that last
/// touched the bot. Absent fields are omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotRecord {
    pub status: BotStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_age: Option<Value>,

    /// Timestamp of the log record that produced this entry
    pub last_seen: String,
}

impl BotRecord {
    /// Create a record with only status and last_seen set
    pub fn new(status: BotStatus, last_seen: impl Into<String>) -> Self {
        Self {
            status,
            device_name: None,
            device_type: None,
            user_id: None,
            room_id: None,
            owner: None,
            heartbeat_age: None,
            last_seen: last_seen.into(),
        }
    }
}

/// Bot name to current record, ordered by name
pub type BotRegistry = BTreeMap<String, BotRecord>;
