//! Timestamp utilities

use chrono::{Duration, Local, NaiveDateTime, Timelike};

/// Timestamp layout used in the log: local time, microsecond precision, no offset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Format a local time the way log records store it
pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Issues strictly increasing local timestamps within one process
///
/// If the wall clock stalls or steps backwards, the next timestamp is the
/// previous one plus one microsecond.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Option<NaiveDateTime>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp, read from the local wall clock
    pub fn now(&mut self) -> NaiveDateTime {
        self.next_after(Local::now().naive_local())
    }

    /// Next timestamp given a wall clock reading
    pub fn next_after(&mut self, reading: NaiveDateTime) -> NaiveDateTime {
        // Truncate to the stored precision so equal strings compare equal here too
        let reading = reading
            .with_nanosecond(reading.nanosecond() / 1_000 * 1_000)
            .unwrap_or(reading);

        let next = match self.last {
            Some(last) if reading <= last => last + Duration::microseconds(1),
            _ => reading,
        };
        self.last = Some(next);
        next
    }
}
