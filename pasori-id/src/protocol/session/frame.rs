// pasori-id/src/protocol/session/frame.rs

use crate::{Error, Result};

/// Slot byte used in every request; the readers expose a single slot.
pub const SLOT_NUMBER: u8 = 0x00;

/// Request message type.
pub const REQUEST_TYPE: u8 = 0x6b;

/// Reply message type.
pub const REPLY_TYPE: u8 = 0x83;

/// Header length shared by requests and replies.
pub const HEADER_LEN: usize = 10;

/// Build a request frame: 10-byte header
/// `6B <len u32 LE> <slot> <seq> 00 00 00` followed by the raw command
/// payload.
pub fn build_request(payload: &[u8], seq: u8) -> Vec<u8> {
    let len = payload.len() as u32;
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.push(REQUEST_TYPE);
    out.extend_from_slice(&len.to_le_bytes());
    out.push(SLOT_NUMBER);
    out.push(seq);
    out.extend_from_slice(&[0x00, 0x00, 0x00]);
    out.extend_from_slice(payload);
    out
}

/// Parse a request frame back into `(slot, seq, payload)`, validating
/// the header layout.
pub fn parse_request(frame: &[u8]) -> Result<(u8, u8, Vec<u8>)> {
    if frame.len() < HEADER_LEN {
        return Err(Error::InvalidLength {
            expected: HEADER_LEN,
            actual: frame.len(),
        });
    }
    if frame[0] != REQUEST_TYPE {
        return Err(Error::FrameFormat("invalid message type".into()));
    }
    let len = u32::from_le_bytes([frame[1], frame[2], frame[3], frame[4]]) as usize;
    if frame.len() != HEADER_LEN + len {
        return Err(Error::InvalidLength {
            expected: HEADER_LEN + len,
            actual: frame.len(),
        });
    }
    if frame[7..10] != [0x00, 0x00, 0x00] {
        return Err(Error::FrameFormat("invalid header padding".into()));
    }
    Ok((frame[5], frame[6], frame[10..].to_vec()))
}

/// Whether `reply` answers `request`.
///
/// A reply is accepted only if it is longer than the header, starts with
/// 0x83, echoes the request's slot and sequence bytes, and its status
/// field derived from byte 7 is zero. Anything else means "not yet" and
/// the transfer loop retries.
pub fn accepts_reply(request: &[u8], reply: &[u8]) -> bool {
    if reply.len() <= HEADER_LEN || request.len() < HEADER_LEN {
        return false;
    }
    if reply[0] != REPLY_TYPE || reply[5] != request[5] || reply[6] != request[6] {
        return false;
    }
    // Error summary extracted from bStatus as the vendor driver computes it.
    let status = (reply[7] >> 6) & 0x10;
    status == 0
}
