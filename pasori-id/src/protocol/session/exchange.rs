// pasori-id/src/protocol/session/exchange.rs

use log::{debug, trace};
use tokio::time::{Instant, sleep};

use crate::constants::TRANSFER_TIMEOUT_MS;
use crate::protocol::session::command::Command;
use crate::protocol::session::frame::{accepts_reply, build_request};
use crate::protocol::session::sequence::SequenceCounter;
use crate::transport::Transport;
use crate::utils::{bytes_to_hex, ms};

/// Retrying request/response exchange.
///
/// The bulk link is lossy: the reader may answer late, partially, or
/// with a stale frame. The request is re-sent and the reply re-read
/// until a frame matching the request's slot/sequence arrives, within a
/// budget of three per-call timeouts, sleeping `timeout + 10` ms between
/// attempts. Past the budget the card is considered absent (`None`).
pub async fn transfer(pipe: &dyn Transport, request: &[u8]) -> Option<Vec<u8>> {
    let budget = ms(TRANSFER_TIMEOUT_MS * 3);
    let started = Instant::now();

    while started.elapsed() < budget {
        trace!(">>> {}", bytes_to_hex(request));
        let _ = pipe.send(request, TRANSFER_TIMEOUT_MS).await;
        let reply = pipe
            .receive(pipe.max_packet_size(), TRANSFER_TIMEOUT_MS)
            .await
            .ok();
        sleep(ms(TRANSFER_TIMEOUT_MS + 10)).await;

        if let Some(reply) = reply {
            trace!("<<< {}", bytes_to_hex(&reply));
            if accepts_reply(request, &reply) {
                return Some(reply);
            }
        }
    }

    debug!("transfer gave up after {}ms", TRANSFER_TIMEOUT_MS * 3);
    None
}

/// Frame `payload` with the next sequence number and run the transfer.
pub async fn send_payload(
    pipe: &dyn Transport,
    sequence: &SequenceCounter,
    payload: &[u8],
) -> Option<Vec<u8>> {
    let request = build_request(payload, sequence.next());
    transfer(pipe, &request).await
}

/// Send a fixed command and wait out its settle time.
pub async fn send_command(
    pipe: &dyn Transport,
    sequence: &SequenceCounter,
    command: Command,
) -> Option<Vec<u8>> {
    debug!("cmd: {:?}", command);
    let reply = send_payload(pipe, sequence, command.payload()).await?;
    if command.settle_ms() > 0 {
        sleep(ms(command.settle_ms())).await;
    }
    Some(reply)
}
