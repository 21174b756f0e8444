//! Event Store Module
//!
//! Persistence for the webhook service:
//! - `LogStore`: append-only log of request records (the source of truth)
//! - `BotSnapshot`: cached copy of the last derived bot table
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌─────────┐    ┌──────────────────┐    ┌────────────────┐    ┌─────────────────┐
//! │ Webhook │───►│ append to        │───►│ replay full    │───►│ write           │
//! │ Request │    │ access_logs.json │    │ log (derive)   │    │ bots_status.json│
//! └─────────┘    └──────────────────┘    └────────────────┘    └─────────────────┘
//! ```

mod snapshot;
mod store;

pub use snapshot::BotSnapshot;
pub use store::{LogStore, StoreError, StoreResult};
