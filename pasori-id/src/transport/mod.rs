// pasori-id/src/transport/mod.rs
//! Byte-level transports the protocol drivers run over.

pub mod mock;
pub mod traits;
#[cfg(feature = "usb")]
pub mod usb;

pub use mock::MockTransport;
pub use traits::Transport;
#[cfg(feature = "usb")]
pub use usb::{UsbHostEnv, UsbTransport};
