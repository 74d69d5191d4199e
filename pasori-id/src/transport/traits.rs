// pasori-id/src/transport/traits.rs

use crate::Result;
use async_trait::async_trait;

/// Transport trait abstracts bulk USB I/O away from protocol logic.
///
/// Implementations take `&self` and handle their own interior locking:
/// the session controller must be able to force-close a transport that a
/// still-running read task holds a reference to. After `close` every
/// transfer fails with [`crate::Error::TransportClosed`].
///
/// A transport is one strictly sequential request/response channel;
/// callers never pipeline transfers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the device. Returns the number of bytes written.
    async fn send(&self, data: &[u8], timeout_ms: u64) -> Result<usize>;

    /// Receive up to `max_len` raw bytes from the device.
    async fn receive(&self, max_len: usize, timeout_ms: u64) -> Result<Vec<u8>>;

    /// Max packet size of the IN endpoint; the default receive size.
    fn max_packet_size(&self) -> usize;

    /// Close the transport and release the underlying handle. Idempotent
    /// and callable from any thread.
    fn close(&self);

    /// Whether `close` has been called.
    fn is_closed(&self) -> bool;
}
