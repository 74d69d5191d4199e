// pasori-id/src/engine/type_a.rs

//! ISO14443-3 Type-A anti-collision.
//!
//! The direct family drives the cascade itself over InCommRF exchanges;
//! the session family's reader runs anti-collision in firmware, and the
//! driver only parses the UID out of a GetData reply.

use log::debug;

use crate::protocol::direct::command::{Command, INITIAL_PROTOCOL_SETTINGS};
use crate::protocol::direct::exchange::exec_commands;
use crate::transport::Transport;
use crate::types::Uid;

/// Cascade-level selector codes (SEL_CL1 / SEL_CL2).
const SEL_CL1: u8 = 0x93;
const SEL_CL2: u8 = 0x95;

/// RF setup plus SDD request for cascade level 1. Payload bytes are
/// vendor protocol constants, reproduced verbatim.
const SDD1_BATCH: &[(Command, &[u8])] = &[
    (Command::SetCommandType, &[0x01]),
    (Command::SwitchRf, &[0x00]),
    (Command::InSetRf, &[0x02, 0x03, 0x0f, 0x03]),
    (Command::InSetProtocol, INITIAL_PROTOCOL_SETTINGS),
    (
        Command::InSetProtocol,
        &[0x01, 0x00, 0x02, 0x00, 0x05, 0x01, 0x00, 0x06, 0x07, 0x07],
    ),
    (Command::InCommRf, &[0x36, 0x01, 0x26]),
    (Command::InSetProtocol, &[0x04, 0x01, 0x07, 0x08]),
    (Command::InSetProtocol, &[0x01, 0x00, 0x02, 0x00]),
    (Command::InCommRf, &[0x36, 0x01, SEL_CL1, 0x20]),
];

/// SDD request for cascade level 2.
const SDD2_BATCH: &[(Command, &[u8])] = &[
    (Command::InSetProtocol, &[0x01, 0x00, 0x02, 0x00]),
    (Command::InCommRf, &[0x36, 0x01, SEL_CL2, 0x20]),
];

/// Offset of the 5-byte anti-collision reply (4 UID bytes + BCC) inside
/// an InCommRF response envelope.
const SDD_REPLY_OFFSET: usize = 15;

/// Offset of the SAK byte carrying the cascade bit inside a SELECT
/// response envelope.
const SAK_OFFSET: usize = 15;

/// Cascade bit of the SAK: set when another cascade level follows.
const CASCADE_BIT: u8 = 0b0000_0100;

/// Run the cascade-level SDD/SELECT exchange and assemble a UID.
///
/// Returns `None` when no card answers, when any reply is truncated, or
/// when the card would need a third cascade level (unsupported).
pub async fn read_uid(pipe: &dyn Transport) -> Option<Uid> {
    let sdd1 = exec_commands(pipe, SDD1_BATCH).await?;
    let id1: [u8; 5] = sdd1
        .get(SDD_REPLY_OFFSET..SDD_REPLY_OFFSET + 5)?
        .try_into()
        .ok()?;

    let sak1 = select(pipe, SEL_CL1, &id1).await?;
    if sak1 & CASCADE_BIT == 0 {
        // Single-size UID: the whole anti-collision reply minus the BCC
        return Some(Uid::Single([id1[0], id1[1], id1[2], id1[3]]));
    }

    // id1[0] was the cascade tag (0x88); the real UID continues at
    // cascade level 2.
    let sdd2 = exec_commands(pipe, SDD2_BATCH).await?;
    let id2: [u8; 5] = sdd2
        .get(SDD_REPLY_OFFSET..SDD_REPLY_OFFSET + 5)?
        .try_into()
        .ok()?;

    let sak2 = select(pipe, SEL_CL2, &id2).await?;
    if sak2 & CASCADE_BIT != 0 {
        // Triple-size UIDs are not supported; report no card.
        debug!("card requires a third cascade level, unsupported");
        return None;
    }

    Some(Uid::Double([
        id1[1], id1[2], id1[3], id2[0], id2[1], id2[2], id2[3],
    ]))
}

/// SELECT one cascade level, echoing the 5 anti-collision bytes back,
/// and return the SAK byte of the reply.
async fn select(pipe: &dyn Transport, level: u8, id: &[u8; 5]) -> Option<u8> {
    let mut frame = vec![0x36, 0x01, level, 0x70];
    frame.extend_from_slice(id);
    let batch: [(Command, &[u8]); 2] = [
        (Command::InSetProtocol, &[0x01, 0x01, 0x02, 0x01]),
        (Command::InCommRf, &frame),
    ];
    let reply = exec_commands(pipe, &batch).await?;
    reply.get(SAK_OFFSET).copied()
}

/// Parse the UID out of a session-family GetData reply.
///
/// Layout: reply header, `u32 LE` payload length at bytes 1..5, payload
/// at byte 10 ending in the `90 00` status word; the UID is the payload
/// minus the status word and must be 4 or 7 bytes.
pub fn parse_get_data(reply: &[u8]) -> Option<Uid> {
    if reply.len() < 10 {
        return None;
    }
    let size = u32::from_le_bytes(reply[1..5].try_into().ok()?) as usize;
    let end = 10usize.checked_add(size)?;
    if *reply.get(end.checked_sub(2)?)? != 0x90 || *reply.get(end - 1)? != 0x00 {
        return None;
    }
    let uid = reply.get(10..end - 2)?;
    Uid::try_from(uid).ok()
}
