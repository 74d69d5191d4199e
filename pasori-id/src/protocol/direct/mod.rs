// pasori-id/src/protocol/direct/mod.rs
//! Framed-command protocol spoken by the RC-S380 family.

pub mod checksum;
pub mod command;
pub mod exchange;
pub mod frame;

pub use checksum::parity;
pub use command::Command;
pub use exchange::{exec_command, exec_commands, send_ack};
pub use frame::{ACK_FRAME, build_packet, parse_packet};
