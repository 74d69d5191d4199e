// pasori-id/src/protocol/direct/frame.rs

use crate::protocol::direct::checksum::{length_checksum, parity};
use crate::protocol::direct::command::Command;
use crate::{Error, Result};

/// Fixed ACK frame, sent before a command batch and echoed by the reader
/// before every response.
pub const ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xff, 0x00, 0xff, 0x00];

/// Frame preamble: `00 00 FF FF FF`.
pub const PREAMBLE: [u8; 5] = [0x00, 0x00, 0xff, 0xff, 0xff];

// preamble(5) + len(1) + 00 + lcs(1) + d6 + cmd + parity + postamble(1)
const MIN_FRAME_LEN: usize = 12;

/// Build a command frame:
/// `00 00 FF FF FF <len> 00 <lcs> D6 <cmd> <params…> <parity> 00`
/// where `len = 2 + |params|` covers `D6`, the command byte and params.
pub fn build_packet(command: Command, params: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(2 + params.len());
    data.push(0xd6);
    data.push(command.code());
    data.extend_from_slice(params);

    // The length field is one byte; no command in the set comes close.
    debug_assert!(data.len() <= 0xff, "command payload exceeds one frame");
    let len = data.len() as u8;
    let mut out = Vec::with_capacity(PREAMBLE.len() + 3 + data.len() + 2);
    out.extend_from_slice(&PREAMBLE);
    out.push(len);
    out.push(0x00);
    out.push(length_checksum(len));
    let check = parity(&data);
    out.extend_from_slice(&data);
    out.push(check);
    out.push(0x00);
    out
}

/// Parse a command frame back into `(command_code, params)`, validating
/// the preamble, both checksums and the postamble.
pub fn parse_packet(frame: &[u8]) -> Result<(u8, Vec<u8>)> {
    if frame.len() < MIN_FRAME_LEN {
        return Err(Error::InvalidLength {
            expected: MIN_FRAME_LEN,
            actual: frame.len(),
        });
    }
    if frame[..5] != PREAMBLE {
        return Err(Error::FrameFormat("invalid preamble".into()));
    }

    let len = frame[5];
    if frame[6] != 0x00 {
        return Err(Error::FrameFormat("invalid length high byte".into()));
    }
    let lcs_expected = length_checksum(len);
    if frame[7] != lcs_expected {
        return Err(Error::ChecksumMismatch {
            expected: lcs_expected,
            actual: frame[7],
        });
    }

    let required = 8 + len as usize + 2;
    if frame.len() != required {
        return Err(Error::InvalidLength {
            expected: required,
            actual: frame.len(),
        });
    }
    if len < 2 {
        return Err(Error::FrameFormat("payload too short".into()));
    }

    let data = &frame[8..8 + len as usize];
    if data[0] != 0xd6 {
        return Err(Error::FrameFormat("missing d6 direction byte".into()));
    }

    let parity_expected = parity(data);
    let parity_actual = frame[8 + len as usize];
    if parity_actual != parity_expected {
        return Err(Error::ChecksumMismatch {
            expected: parity_expected,
            actual: parity_actual,
        });
    }
    if frame[required - 1] != 0x00 {
        return Err(Error::FrameFormat("invalid postamble".into()));
    }

    Ok((data[1], data[2..].to_vec()))
}
