// fixtures.rs — commonly used ids and frames for integration tests

#![allow(dead_code)]

use pasori_id::types::{Idm, Uid};

pub fn sample_idm_bytes() -> [u8; 8] {
    [0x01, 0x2e, 0x4a, 0x81, 0xc3, 0x7f, 0x00, 0x9d]
}

pub fn sample_idm() -> Idm {
    Idm::from_bytes(sample_idm_bytes())
}

/// Level-1 anti-collision reply for a single-size UID (BCC included).
pub fn single_sdd_id() -> [u8; 5] {
    [0xde, 0xad, 0xbe, 0xef, 0xde ^ 0xad ^ 0xbe ^ 0xef]
}

pub fn single_uid() -> Uid {
    Uid::Single([0xde, 0xad, 0xbe, 0xef])
}

/// Level-1 reply for a double-size UID: cascade tag 0x88 plus the first
/// three UID bytes.
pub fn double_sdd_id1() -> [u8; 5] {
    [0x88, 0x04, 0x12, 0x34, 0x88 ^ 0x04 ^ 0x12 ^ 0x34]
}

/// Level-2 reply carrying the remaining four UID bytes.
pub fn double_sdd_id2() -> [u8; 5] {
    [0x56, 0x78, 0x9a, 0xbc, 0x56 ^ 0x78 ^ 0x9a ^ 0xbc]
}

pub fn double_uid() -> Uid {
    Uid::Double([0x04, 0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc])
}
