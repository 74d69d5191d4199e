// pasori-id/src/utils/mod.rs
//! Small shared helpers (hex rendering, timeout conversions).

pub mod hex;
pub mod timeout;

pub use hex::{bytes_to_hex, bytes_to_hex_spaced};
pub use timeout::ms;
