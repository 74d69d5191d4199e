// pasori-id/src/adapter/session.rs

//! RC-S300 family adapter.
//!
//! Session readers want a transparent session opened before they accept
//! card commands, and they run Type-A anti-collision in firmware: the
//! driver only switches the protocol and asks for the captured UID.

use std::sync::Arc;

use log::debug;

use crate::constants::FELICA_POLLING;
use crate::engine::{type_a, type_f};
use crate::protocol::session::command::{Command, communicate_thru_ex};
use crate::protocol::session::exchange::{send_command, send_payload};
use crate::protocol::session::sequence::SequenceCounter;
use crate::transport::Transport;
use crate::types::{Idm, Uid};

/// Card-side timeout carried inside CommunicateThruEX, in microseconds.
const CARD_TIMEOUT_US: u32 = 50_000;

/// Adapter for the session protocol family.
#[derive(Debug)]
pub struct SessionAdapter {
    sequence: Arc<SequenceCounter>,
}

impl SessionAdapter {
    /// Create an adapter drawing sequence numbers from `sequence`.
    pub fn new(sequence: Arc<SequenceCounter>) -> Self {
        Self { sequence }
    }

    /// Open handshake: close any stale session, open a fresh one, then
    /// cycle the RF field. Every step must be acknowledged.
    pub async fn open(&self, pipe: &dyn Transport) -> Option<()> {
        debug!("session family: opening transparent session");
        send_command(pipe, &self.sequence, Command::EndTransparentSession).await?;
        send_command(pipe, &self.sequence, Command::StartTransparentSession).await?;
        send_command(pipe, &self.sequence, Command::TurnOffRf).await?;
        send_command(pipe, &self.sequence, Command::TurnOnRf).await?;
        Some(())
    }

    /// One Type-A round: select Type-A framing, then fetch the UID the
    /// reader captured during its own anti-collision.
    pub async fn read_type_a(&self, pipe: &dyn Transport) -> Option<Uid> {
        send_command(pipe, &self.sequence, Command::SwitchProtocolTypeA).await?;
        let reply = send_command(pipe, &self.sequence, Command::GetData).await?;
        type_a::parse_get_data(&reply)
    }

    /// One Type-F round: select FeliCa framing, then tunnel a polling
    /// command to the card through CommunicateThruEX.
    pub async fn read_type_f(&self, pipe: &dyn Transport) -> Option<Idm> {
        send_command(pipe, &self.sequence, Command::SwitchProtocolTypeF).await?;
        let apdu = communicate_thru_ex(&FELICA_POLLING, CARD_TIMEOUT_US);
        let reply = send_payload(pipe, &self.sequence, &apdu).await?;
        type_f::parse_session(&reply)
    }
}
