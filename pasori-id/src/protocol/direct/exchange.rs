// pasori-id/src/protocol/direct/exchange.rs

use log::trace;

use crate::constants::TRANSFER_TIMEOUT_MS;
use crate::protocol::direct::command::Command;
use crate::protocol::direct::frame::{ACK_FRAME, build_packet};
use crate::transport::Transport;
use crate::utils::bytes_to_hex;

/// Send the fixed ACK frame. The reader aborts any command in flight and
/// resynchronizes; no reply is read.
pub async fn send_ack(pipe: &dyn Transport) {
    trace!(">>> {}", bytes_to_hex(&ACK_FRAME));
    let _ = pipe.send(&ACK_FRAME, TRANSFER_TIMEOUT_MS).await;
}

/// Execute one command: send its frame, read and discard the 6-byte ACK
/// echo, then read the response.
///
/// `None` means the exchange produced no data within the transfer
/// timeout. Callers treat that as "no card present", never as an error.
pub async fn exec_command(
    pipe: &dyn Transport,
    command: Command,
    params: &[u8],
) -> Option<Vec<u8>> {
    let packet = build_packet(command, params);
    trace!(">>> {}", bytes_to_hex(&packet));
    pipe.send(&packet, TRANSFER_TIMEOUT_MS).await.ok()?;

    // The ACK echo carries no information; a missing one is tolerated.
    let _ = pipe.receive(ACK_FRAME.len(), TRANSFER_TIMEOUT_MS).await;

    match pipe
        .receive(pipe.max_packet_size(), TRANSFER_TIMEOUT_MS)
        .await
    {
        Ok(data) => {
            trace!("<<< {}", bytes_to_hex(&data));
            Some(data)
        }
        Err(_) => {
            trace!("<<< (no data)");
            None
        }
    }
}

/// Execute a batch of commands in order and return only the last
/// response. Aborts with `None` as soon as any command in the batch
/// fails to produce a response.
pub async fn exec_commands(
    pipe: &dyn Transport,
    commands: &[(Command, &[u8])],
) -> Option<Vec<u8>> {
    let mut result = None;
    for (command, params) in commands {
        result = Some(exec_command(pipe, *command, params).await?);
    }
    result
}
