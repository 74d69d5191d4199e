// pasori-id/src/adapter/direct.rs

//! RC-S380 family adapter.
//!
//! These readers need no handshake: every poll round pauses for the
//! poll interval, sends the ACK frame to abort whatever the reader was
//! doing, then runs the card-protocol batch for the requested type.

use log::trace;
use tokio::time::sleep;

use crate::constants::POLL_INTERVAL_MS;
use crate::engine::{type_a, type_f};
use crate::protocol::direct::exchange::send_ack;
use crate::transport::Transport;
use crate::types::{Idm, Uid};
use crate::utils::ms;

/// Stateless adapter for the direct protocol family.
#[derive(Debug, Default)]
pub struct DirectAdapter;

impl DirectAdapter {
    /// Create the adapter.
    pub fn new() -> Self {
        Self
    }

    /// Direct readers accept commands as soon as the pipe is open.
    pub async fn open(&self, _pipe: &dyn Transport) -> Option<()> {
        trace!("direct family: no open handshake");
        Some(())
    }

    /// One Type-A anti-collision round.
    pub async fn read_type_a(&self, pipe: &dyn Transport) -> Option<Uid> {
        sleep(ms(POLL_INTERVAL_MS)).await;
        send_ack(pipe).await;
        type_a::read_uid(pipe).await
    }

    /// One Type-F polling round.
    pub async fn read_type_f(&self, pipe: &dyn Transport) -> Option<Idm> {
        sleep(ms(POLL_INTERVAL_MS)).await;
        send_ack(pipe).await;
        type_f::poll_direct(pipe).await
    }
}
