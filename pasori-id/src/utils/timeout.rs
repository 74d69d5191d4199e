//! Timeout helpers used across the crate.
//!
//! Keep these helpers minimal: they centralize the conversion from the
//! millisecond values the protocol constants are written in to the
//! `Duration`s the async runtime wants.

use std::time::Duration;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
