//! Utility functions and helpers
//!
//! Atomic file replacement and timestamp helpers.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, cleanup_temp_file};
pub use time::{format_timestamp, MonotonicClock, TIMESTAMP_FORMAT};
