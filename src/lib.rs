//! Bot Status Webhook Service
//!
//! Receives bot webhooks, keeps every request in an append-only log, and
//! derives a live status table of bots by replaying that log.
//!
//! # Modules
//!
//! - `types`: Log records, bot records, and bot event payloads
//! - `event_store`: Append-only request log and bot snapshot file
//! - `derivation`: Log replay into the bot table
//! - `api`: Axum router, ingress adapter, and REST handlers
//! - `config`: Environment-driven server configuration
//! - `logging`: Tracing subscriber setup
//! - `utils`: Atomic file writes and timestamps
//!
//! # Example
//!
//! ```no_run
//! use bot_status::{derive, IncomingRequest, LogStore};
//! use serde_json::json;
//!
//! let store = LogStore::open("access_logs.json");
//! store.append(IncomingRequest::from_json(json!({
//!     "event": "bot_connected",
//!     "bot_name": "alpha"
//! })))?;
//!
//! let bots = derive(&store.read_all());
//! println!("{} bots", bots.len());
//! # Ok::<(), bot_status::StoreError>(())
//! ```

pub mod api;
pub mod config;
pub mod derivation;
pub mod event_store;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use config::{ConfigError, ServerConfig};
pub use derivation::{derive, BotStateEngine, Refresh};
pub use event_store::{BotSnapshot, LogStore, StoreError, StoreResult};
pub use types::{BotEvent, BotRecord, BotRegistry, BotStatus, IncomingRequest, LogRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
