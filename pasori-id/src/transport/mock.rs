// pasori-id/src/transport/mock.rs

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// One scripted reply for [`MockTransport::receive`].
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return these bytes (truncated to the caller's `max_len`).
    Data(Vec<u8>),
    /// Fail the receive with [`Error::Timeout`], as a lossy bulk link does.
    Timeout,
}

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    replies: VecDeque<MockReply>,
}

/// Mock transport for unit tests. It records sent payloads and returns
/// queued replies; an exhausted queue behaves like a receive timeout.
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
    closed: AtomicBool,
    close_calls: AtomicUsize,
    max_packet: usize,
}

impl MockTransport {
    /// Default max packet size used by the mock IN endpoint.
    pub const MAX_PACKET: usize = 64;

    /// Create an empty mock transport.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            closed: AtomicBool::new(false),
            close_calls: AtomicUsize::new(0),
            max_packet: Self::MAX_PACKET,
        }
    }

    /// Queue a data reply for the next receive.
    pub fn push_reply(&self, reply: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(MockReply::Data(reply));
    }

    /// Queue a simulated receive timeout.
    pub fn push_timeout(&self) {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(MockReply::Timeout);
    }

    /// Snapshot of every payload sent so far, oldest first.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Number of queued replies not yet consumed.
    pub fn pending_replies(&self) -> usize {
        self.state.lock().unwrap().replies.len()
    }

    /// How many times `close` has been called.
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, data: &[u8], _timeout_ms: u64) -> Result<usize> {
        if self.is_closed() {
            return Err(Error::TransportClosed);
        }
        self.state.lock().unwrap().sent.push(data.to_vec());
        Ok(data.len())
    }

    async fn receive(&self, max_len: usize, _timeout_ms: u64) -> Result<Vec<u8>> {
        if self.is_closed() {
            return Err(Error::TransportClosed);
        }
        let reply = self.state.lock().unwrap().replies.pop_front();
        match reply {
            Some(MockReply::Data(mut data)) => {
                data.truncate(max_len);
                Ok(data)
            }
            Some(MockReply::Timeout) | None => Err(Error::Timeout),
        }
    }

    fn max_packet_size(&self) -> usize {
        self.max_packet
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
