// pasori-id/src/protocol/direct/checksum.rs

/// Compute the parity byte covering `D6 <cmd> <params…>`.
///
/// Defined as `((256 - sum(payload)) mod 256) + 256` truncated to one
/// byte, which is the two's-complement of the byte sum.
pub fn parity(payload: &[u8]) -> u8 {
    let sum = payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

/// Length checksum carried in the frame header: two's-complement of the
/// length byte.
pub fn length_checksum(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}
