//! Log replay - folds the request log into the bot table
//!
//! Records are applied oldest to newest. Every event replaces the whole
//! record of each bot it mentions, so the latest event for a bot decides
//! all of its fields. Nothing is merged across events.

use serde_json::Value;

use crate::types::{
    bot_key, BotConnectedData, BotEvent, BotRecord, BotRegistry, BotStatus, HealthEntry,
    HealthReport, LogRecord, SystemStartupData,
};

/// Device type recorded for bots reported by the supervisor
const SUPERVISED_DEVICE_TYPE: &str = "bot";

/// Derive the current bot table from the full log
///
/// Pure: the same records always give the same table.
pub fn derive(records: &[LogRecord]) -> BotRegistry {
    let mut bots = BotRegistry::new();
    for record in records {
        apply_record(&mut bots, record);
    }
    bots
}

/// Apply one log record to the table
///
/// Records without structured data, or with an unknown event, change nothing.
pub fn apply_record(bots: &mut BotRegistry, record: &LogRecord) {
    let Some(json_data) = record.json_data.as_ref() else {
        return;
    };

    let seen = record.timestamp.as_str();
    match BotEvent::parse(json_data) {
        BotEvent::BotConnected(data) => apply_connected(bots, data, seen),
        BotEvent::SystemStartup(data) => apply_startup(bots, data, seen),
        BotEvent::HealthCheck(data) => apply_health(bots, data.health_check_data, seen),
        BotEvent::Unknown => {}
    }
}

fn apply_connected(bots: &mut BotRegistry, data: BotConnectedData, seen: &str) {
    let status = match data.status {
        None => BotStatus::Online,
        Some(Value::String(s)) => BotStatus::from(s),
        Some(other) => BotStatus::Other(other.to_string()),
    };

    let mut record = BotRecord::new(status, seen);
    record.device_name = data.device_name;
    record.device_type = data.device_type;
    record.user_id = data.user_id;
    record.room_id = data.room_id;

    bots.insert(bot_key(data.bot_name.as_ref()), record);
}

fn apply_startup(bots: &mut BotRegistry, data: SystemStartupData, seen: &str) {
    for bot in data.started_bots {
        let mut record = supervised(BotStatus::Online, seen);
        record.owner = bot.owner;
        record.room_id = bot.room_id;

        bots.insert(bot_key(bot.name.as_ref()), record);
    }
}

fn apply_health(bots: &mut BotRegistry, report: HealthReport, seen: &str) {
    let groups = [
        (report.healthy_bots, BotStatus::Online),
        (report.restarted_bots, BotStatus::Restarted),
        (report.failed_bots, BotStatus::Failed),
        (report.stopped_bots, BotStatus::Offline),
    ];

    for (entries, status) in groups {
        for HealthEntry { name, owner, heartbeat_age } in entries {
            let mut record = supervised(status.clone(), seen);
            record.owner = owner;
            // Only healthy bots report a heartbeat age
            if status == BotStatus::Online {
                record.heartbeat_age = heartbeat_age;
            }

            bots.insert(bot_key(name.as_ref()), record);
        }
    }
}

fn supervised(status: BotStatus, seen: &str) -> BotRecord {
    let mut record = BotRecord::new(status, seen);
    record.device_type = Some(Value::String(SUPERVISED_DEVICE_TYPE.to_string()));
    record
}
