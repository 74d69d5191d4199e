// pasori-id/src/protocol/mod.rs
//! The two mutually incompatible reader wire protocols.
//!
//! `direct` is the RC-S380 framed-command protocol (length + checksum
//! framing, explicit ACK). `session` is the RC-S300 CCID-style protocol
//! (slot/sequence header, transparent-session bracketing, retry loop).

pub mod direct;
pub mod session;
