// pasori-id/src/prelude.rs

//! Convenience re-exports for typical consumers of the crate.

pub use crate::adapter::Adapter;
pub use crate::reader::Reader;
pub use crate::reader::host::UsbHost;
pub use crate::transport::Transport;
pub use crate::{CardId, DeviceIdentity, Error, Idm, Result, Uid};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
