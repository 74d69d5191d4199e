// pasori-id/src/engine/type_f.rs

//! FeliCa (Type-F) polling.
//!
//! Both reader families end up carrying the same 6-byte polling command
//! to the card; what differs is the envelope around the card's answer,
//! so each family gets its own parser.

use crate::constants::{FELICA_POLLING, FELICA_POLLING_RESPONSE};
use crate::protocol::direct::command::{Command, INITIAL_PROTOCOL_SETTINGS};
use crate::protocol::direct::exchange::exec_commands;
use crate::transport::Transport;
use crate::types::Idm;

/// Offset of the response code inside a direct-family InCommRF envelope.
const DIRECT_CODE_OFFSET: usize = 16;

/// A direct-family polling reply shorter than this carries no card data.
const DIRECT_MIN_LEN: usize = 20;

/// Offset of the embedded length byte inside a session-family
/// CommunicateThruEX reply.
const SESSION_LEN_OFFSET: usize = 23;

/// Run RF setup plus one polling round on a direct-family reader.
pub async fn poll_direct(pipe: &dyn Transport) -> Option<Idm> {
    let mut poll = vec![0x6e, 0x00];
    poll.extend_from_slice(&FELICA_POLLING);
    let batch: [(Command, &[u8]); 6] = [
        (Command::SetCommandType, &[0x01]),
        (Command::SwitchRf, &[0x00]),
        (Command::InSetRf, &[0x01, 0x01, 0x0f, 0x01]),
        (Command::InSetProtocol, INITIAL_PROTOCOL_SETTINGS),
        (Command::InSetProtocol, &[0x00, 0x18]),
        (Command::InCommRf, &poll),
    ];
    let reply = exec_commands(pipe, &batch).await?;
    parse_direct(&reply)
}

/// Parse the IDm out of a direct-family InCommRF polling reply.
pub fn parse_direct(reply: &[u8]) -> Option<Idm> {
    if reply.len() <= DIRECT_MIN_LEN {
        return None;
    }
    if *reply.get(DIRECT_CODE_OFFSET)? != FELICA_POLLING_RESPONSE {
        return None;
    }
    Idm::try_from(reply.get(DIRECT_CODE_OFFSET + 1..DIRECT_CODE_OFFSET + 9)?).ok()
}

/// Parse the IDm out of a session-family CommunicateThruEX reply.
///
/// The card's polling answer sits behind an embedded length byte and is
/// followed by the `90 00` status word.
pub fn parse_session(reply: &[u8]) -> Option<Idm> {
    if reply.len() < SESSION_LEN_OFFSET + 1 {
        return None;
    }
    let size = reply[SESSION_LEN_OFFSET] as usize;
    let end = (SESSION_LEN_OFFSET + 1).checked_add(size)?;
    if *reply.get(end)? != 0x90 || *reply.get(end + 1)? != 0x00 {
        return None;
    }
    let answer = reply.get(SESSION_LEN_OFFSET + 1..end)?;
    if *answer.get(1)? != FELICA_POLLING_RESPONSE {
        return None;
    }
    Idm::try_from(answer.get(2..10)?).ok()
}
