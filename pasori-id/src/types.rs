// pasori-id/src/types.rs

use crate::Error;
use derive_more::From;
use std::convert::TryFrom;

/// USB identity of an attached device, used only to select an adapter.
///
/// Two identities refer to the same reader model when their
/// (vendor_id, product_id) pairs match exactly; `product_name` is
/// informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// USB vendor id
    pub vendor_id: u16,
    /// USB product id
    pub product_id: u16,
    /// Product string reported by the descriptor (may be empty)
    pub product_name: String,
}

impl DeviceIdentity {
    /// Create an identity from raw descriptor fields.
    pub fn new(vendor_id: u16, product_id: u16, product_name: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            product_name: product_name.into(),
        }
    }

    /// Exact (vendor, product) match.
    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }
}

/// ISO14443 Type-A UID.
///
/// Four bytes when anti-collision finished at cascade level 1, seven
/// bytes when a second level was needed (the level-1 cascade tag 0x88 is
/// not part of the UID). Triple-size UIDs are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uid {
    /// Single-size UID (cascade level 1 only)
    Single([u8; 4]),
    /// Double-size UID (cascade levels 1 and 2)
    Double([u8; 7]),
}

impl Uid {
    /// UID bytes without any cascade tag.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Single(b) => b,
            Self::Double(b) => b,
        }
    }

    /// Lowercase hex rendering (8 or 14 characters).
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.len() {
            4 => {
                let mut arr = [0u8; 4];
                arr.copy_from_slice(bytes);
                Ok(Self::Single(arr))
            }
            7 => {
                let mut arr = [0u8; 7];
                arr.copy_from_slice(bytes);
                Ok(Self::Double(arr))
            }
            n => Err(Error::InvalidLength {
                expected: 7,
                actual: n,
            }),
        }
    }
}

/// IDm - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idm([u8; 8]);

impl Idm {
    /// Wrap raw IDm bytes.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Lowercase hex rendering (16 characters).
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Idm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes[..8]);
        Ok(Self(arr))
    }
}

/// Identifier extracted from a card, tagged with its protocol type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum CardId {
    /// ISO14443 Type-A UID
    TypeA(Uid),
    /// FeliCa (Type-F) IDm
    TypeF(Idm),
}

impl CardId {
    /// Lowercase hex rendering of the identifier.
    pub fn to_hex(&self) -> String {
        match self {
            Self::TypeA(uid) => uid.to_hex(),
            Self::TypeF(idm) => idm.to_hex(),
        }
    }
}
