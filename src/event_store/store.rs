//! Log Store - append-only request log
//!
//! The log is one JSON document holding every request record in append
//! order. Each append or clear rewrites the whole document, so all file
//! access goes through a single mutex to keep read-modify-write cycles
//! from losing each other's updates.
//!
//! Rewriting the full log per request is O(log size). That is a known
//! scaling limit of this store, not something batching should hide:
//! a reader must never observe a truncated sequence.
//!
//! Entries that do not decode as a `LogRecord` are skipped on read but
//! kept verbatim in the file when it is rewritten.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{IncomingRequest, LogRecord};
use crate::utils::{atomic_write, cleanup_temp_file, format_timestamp, MonotonicClock};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting the log or the snapshot
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Outcome of reading the log file
enum Loaded {
    /// Raw entries of a well-formed JSON array
    Entries(Vec<Value>),
    Missing,
    /// Not JSON, or not an array
    Corrupt(String),
}

/// State guarded by the store lock
#[derive(Debug, Default)]
struct StoreState {
    clock: MonotonicClock,
}

/// Append-only log of webhook requests backed by a single JSON file
#[derive(Debug)]
pub struct LogStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl LogStore {
    /// Open the store at `path`; the file is created on first append
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        match cleanup_temp_file(&path) {
            Ok(true) => warn!(path = %path.display(), "removed leftover temp file from interrupted write"),
            Ok(false) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "could not remove leftover temp file"),
        }

        Self {
            path,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Path of the log document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp `request` with the current time and append it to the log
    ///
    /// Returns the stored record. Fails if the log cannot be written.
    pub fn append(&self, request: IncomingRequest) -> StoreResult<LogRecord> {
        let mut state = self.state.lock();

        let mut entries = self.load_for_write()?;
        let timestamp = format_timestamp(&state.clock.now());
        let record = LogRecord::stamped(timestamp, request);
        entries.push(serde_json::to_value(&record)?);

        self.persist(&entries)?;
        debug!(timestamp = %record.timestamp, total = entries.len(), "appended log record");

        Ok(record)
    }

    /// All records in append order
    ///
    /// A missing or unparsable log reads as empty; malformed entries are skipped.
    pub fn read_all(&self) -> Vec<LogRecord> {
        let _state = self.state.lock();

        match self.load() {
            Ok(Loaded::Entries(entries)) => self.decode(entries),
            Ok(Loaded::Missing) => Vec::new(),
            Ok(Loaded::Corrupt(e)) => {
                warn!(path = %self.path.display(), error = %e, "log is unparsable, reading as empty");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "log is unreadable, reading as empty");
                Vec::new()
            }
        }
    }

    /// Number of records in the log
    pub fn len(&self) -> usize {
        self.read_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the log with an empty sequence
    pub fn clear(&self) -> StoreResult<()> {
        let _state = self.state.lock();

        self.persist(&[])?;
        debug!(path = %self.path.display(), "cleared log");

        Ok(())
    }

    fn load(&self) -> io::Result<Loaded> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Loaded::Missing),
            Err(e) => return Err(e),
        };

        Ok(match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => Loaded::Entries(entries),
            Ok(other) => Loaded::Corrupt(format!("expected an array, found {}", json_kind(&other))),
            Err(e) => Loaded::Corrupt(e.to_string()),
        })
    }

    fn decode(&self, entries: Vec<Value>) -> Vec<LogRecord> {
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(path = %self.path.display(), index, error = %e, "skipping malformed log entry");
                    None
                }
            })
            .collect()
    }

    /// Current records for a rewrite; a corrupt log is moved aside first
    fn load_for_write(&self) -> StoreResult<Vec<Value>> {
        match self.load() {
            Ok(Loaded::Entries(entries)) => Ok(entries),
            Ok(Loaded::Missing) => Ok(Vec::new()),
            Ok(Loaded::Corrupt(e)) => {
                let aside = self.corrupt_path();
                warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %e,
                    "log is unparsable, starting a new one"
                );
                fs::rename(&self.path, &aside).map_err(|source| StoreError::Write {
                    path: aside,
                    source,
                })?;
                Ok(Vec::new())
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// First free `<file>.corrupt`, `<file>.corrupt.1`, ... so earlier copies survive
    fn corrupt_path(&self) -> PathBuf {
        let base = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        (0u32..)
            .map(|n| {
                let mut name = base.clone();
                name.push(".corrupt");
                if n > 0 {
                    name.push(format!(".{n}"));
                }
                self.path.with_file_name(name)
            })
            .find(|candidate| !candidate.exists())
            .unwrap_or_else(|| self.path.with_extension("corrupt"))
    }

    fn persist(&self, entries: &[Value]) -> StoreResult<()> {
        let content = serde_json::to_vec_pretty(entries)?;
        atomic_write(&self.path, &content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
