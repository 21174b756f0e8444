//! Shared application state

use crate::config::ServerConfig;
use crate::derivation::{BotStateEngine, Refresh};
use crate::event_store::{BotSnapshot, LogStore, StoreResult};
use crate::types::{IncomingRequest, LogRecord};

/// Services shared by all request handlers
#[derive(Debug)]
pub struct AppState {
    /// The request log
    pub store: LogStore,

    /// Derives and snapshots the bot table
    pub engine: BotStateEngine,
}

impl AppState {
    pub fn new(store: LogStore, engine: BotStateEngine) -> Self {
        Self { store, engine }
    }

    /// Open the store and snapshot at the configured paths
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            LogStore::open(&config.log_file),
            BotStateEngine::new(BotSnapshot::new(&config.bots_file)),
        )
    }

    /// Append a request to the log, then re-derive the bot table from the full log
    ///
    /// The log is read back only after the append has completed.
    pub fn ingest(&self, request: IncomingRequest) -> StoreResult<(LogRecord, Refresh)> {
        let record = self.store.append(request)?;
        let refresh = self.refresh();
        Ok((record, refresh))
    }

    /// Re-derive the bot table from the full log
    pub fn refresh(&self) -> Refresh {
        let records = self.store.read_all();
        self.engine.refresh(&records)
    }
}
