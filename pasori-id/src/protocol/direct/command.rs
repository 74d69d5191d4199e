// pasori-id/src/protocol/direct/command.rs

/// Command codes understood by the RC-S380 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select RF technology and bit rate
    InSetRf,
    /// Configure protocol parameters
    InSetProtocol,
    /// Exchange card-protocol bytes over RF
    InCommRf,
    /// RF field on/off
    SwitchRf,
    /// Select the command set version
    SetCommandType,
}

impl Command {
    /// Wire command byte following the `D6` direction byte.
    pub fn code(self) -> u8 {
        match self {
            Self::InSetRf => 0x00,
            Self::InSetProtocol => 0x02,
            Self::InCommRf => 0x04,
            Self::SwitchRf => 0x06,
            Self::SetCommandType => 0x2a,
        }
    }
}

/// Protocol-parameter block sent before the first RF exchange of a read
/// attempt. Vendor constants, reproduced verbatim.
pub const INITIAL_PROTOCOL_SETTINGS: &[u8] = &[
    0x00, 0x18, 0x01, 0x01, 0x02, 0x01, 0x03, 0x00, 0x04, 0x00, 0x05, 0x00, 0x06, 0x00, 0x07,
    0x08, 0x08, 0x00, 0x09, 0x00, 0x0a, 0x00, 0x0b, 0x00, 0x0c, 0x00, 0x0e, 0x04, 0x0f, 0x00,
    0x10, 0x00, 0x11, 0x00, 0x12, 0x00, 0x13, 0x06,
];
