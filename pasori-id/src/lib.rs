// pasori-id/src/lib.rs

//! pasori-id
//!
//! Pure Rust driver that reads a card identifier (ISO14443 Type-A UID or
//! FeliCa IDm) from Sony PaSoRi RC-S380 / RC-S300 USB readers.
#![warn(missing_docs)]

pub mod adapter;
pub mod constants;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod reader;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
