//! State Derivation Engine
//!
//! Replays the whole request log into the bot status table and keeps
//! the on-disk snapshot of that table up to date.

mod replay;

use tracing::{debug, warn};

use crate::event_store::{BotSnapshot, StoreError};
use crate::types::{BotRegistry, LogRecord};

pub use replay::{apply_record, derive};

/// Result of a refresh: the derived table, plus any snapshot write failure
///
/// A failed snapshot write does not invalidate `bots`.
#[derive(Debug)]
pub struct Refresh {
    pub bots: BotRegistry,
    pub snapshot_error: Option<StoreError>,
}

/// Derives the bot table and persists it as a snapshot
#[derive(Debug, Clone)]
pub struct BotStateEngine {
    snapshot: BotSnapshot,
}

impl BotStateEngine {
    pub fn new(snapshot: BotSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &BotSnapshot {
        &self.snapshot
    }

    /// Derive the table from `records` and overwrite the snapshot
    pub fn refresh(&self, records: &[LogRecord]) -> Refresh {
        let bots = derive(records);
        debug!(records = records.len(), bots = bots.len(), "derived bot table");

        let snapshot_error = match self.snapshot.write(&bots) {
            Ok(()) => None,
            Err(e) => {
                warn!(path = %self.snapshot.path().display(), error = %e, "failed to write bot snapshot");
                Some(e)
            }
        };

        Refresh {
            bots,
            snapshot_error,
        }
    }
}
