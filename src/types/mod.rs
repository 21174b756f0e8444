//! Data types for the bot status service
//!
//! This module contains the log, event, and bot record structures used
//! throughout the application.

mod bot;
mod event;
mod log_record;

pub use bot::{BotRecord, BotRegistry, BotStatus};
pub use event::{
    bot_key, BotConnectedData, BotEvent, HealthCheckData, HealthEntry, HealthReport, StartedBot,
    SystemStartupData, UNKNOWN_BOT,
};
pub use log_record::{IncomingRequest, LogRecord};
