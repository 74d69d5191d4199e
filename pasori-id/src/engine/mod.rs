// pasori-id/src/engine/mod.rs
//! Card-protocol engines: Type-A anti-collision and Type-F polling.
//!
//! Engines only produce `Option`s: a short, garbled or missing reply at
//! any step means "no card present", and the controller's poll loop
//! simply tries again.

pub mod type_a;
pub mod type_f;
