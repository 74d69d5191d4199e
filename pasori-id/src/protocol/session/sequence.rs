// pasori-id/src/protocol/session/sequence.rs

use std::sync::atomic::{AtomicU8, Ordering};

/// Sequence-number source for session-protocol requests.
///
/// One counter is shared by every session-protocol exchange in the
/// process; it is owned by the [`crate::reader::Reader`] and injected
/// into the codec. `next` yields 1, 2, …, 255, 0, 1, … — it never
/// repeats a value on two consecutive calls except at wraparound.
#[derive(Debug, Default)]
pub struct SequenceCounter(AtomicU8);

impl SequenceCounter {
    /// New counter starting at 0; the first `next` returns 1.
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    /// Atomically advance and return the next sequence number.
    pub fn next(&self) -> u8 {
        self.0.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }
}
