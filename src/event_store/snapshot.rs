//! Bot snapshot - cached output of the last derivation
//!
//! The snapshot is never read back as a source of truth; it exists so
//! other tools can look at the bot table without replaying the log.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::BotRegistry;
use crate::utils::atomic_write;

use super::store::{StoreError, StoreResult};

/// Writes the derived bot table to a JSON document
#[derive(Debug, Clone)]
pub struct BotSnapshot {
    path: PathBuf,
}

impl BotSnapshot {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snapshot with `bots`
    pub fn write(&self, bots: &BotRegistry) -> StoreResult<()> {
        let content = serde_json::to_vec_pretty(bots)?;
        atomic_write(&self.path, &content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), bots = bots.len(), "wrote bot snapshot");
        Ok(())
    }

    /// Last written snapshot, if one exists and parses
    pub fn load(&self) -> Option<BotRegistry> {
        let bytes = fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}
