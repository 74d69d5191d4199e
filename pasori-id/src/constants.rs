// pasori-id/src/constants.rs
//! Common protocol constants used across the crate

/// Sony's USB vendor id, shared by every supported reader.
pub const SONY_VENDOR_ID: u16 = 0x054c;

/// RC-S380/S product id (direct protocol family)
pub const PRODUCT_ID_S380S: u16 = 0x06c1;
/// RC-S380/P product id (direct protocol family)
pub const PRODUCT_ID_S380P: u16 = 0x06c3;
/// RC-S300/S product id (session protocol family)
pub const PRODUCT_ID_S300S: u16 = 0x0dc8;
/// RC-S300/P product id (session protocol family)
pub const PRODUCT_ID_S300P: u16 = 0x0dc9;

/// Per-transfer bulk timeout in milliseconds, shared by both families.
pub const TRANSFER_TIMEOUT_MS: u64 = 50;

/// Pause before each Type-A / Type-F poll attempt.
pub const POLL_INTERVAL_MS: u64 = 50;

/// FeliCa polling payload: length byte 0x06, command 0x00, system code
/// 0xFFFF (wildcard), request code 0x01, time slot 0x00.
pub const FELICA_POLLING: [u8; 6] = [0x06, 0x00, 0xff, 0xff, 0x01, 0x00];

/// FeliCa polling response code.
pub const FELICA_POLLING_RESPONSE: u8 = 0x01;
