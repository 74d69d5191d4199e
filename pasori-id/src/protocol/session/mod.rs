// pasori-id/src/protocol/session/mod.rs
//! CCID-style transparent-session protocol spoken by the RC-S300 family.

pub mod command;
pub mod exchange;
pub mod frame;
pub mod sequence;

pub use command::Command;
pub use exchange::{send_command, transfer};
pub use frame::{accepts_reply, build_request, parse_request};
pub use sequence::SequenceCounter;
