// pasori-id/src/protocol/session/command.rs

/// Pseudo-APDU commands understood by the RC-S300 family.
///
/// Each carries a fixed payload and, for the RF switches, a settle time
/// the field needs before the next command is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the transparent-session bracket
    StartTransparentSession,
    /// Close the transparent-session bracket
    EndTransparentSession,
    /// Switch the RF field on (settle 25ms)
    TurnOnRf,
    /// Switch the RF field off (settle 30ms)
    TurnOffRf,
    /// Select ISO14443 Type-A framing
    SwitchProtocolTypeA,
    /// Select FeliCa (Type-F) framing
    SwitchProtocolTypeF,
    /// Fetch the UID the reader captured during its own anti-collision
    GetData,
}

impl Command {
    /// The fixed request payload for this command.
    pub fn payload(self) -> &'static [u8] {
        match self {
            Self::StartTransparentSession => &[0xff, 0x50, 0x00, 0x00, 0x02, 0x81, 0x00, 0x00],
            Self::EndTransparentSession => &[0xff, 0x50, 0x00, 0x00, 0x02, 0x82, 0x00, 0x00],
            Self::TurnOnRf => &[0xff, 0x50, 0x00, 0x00, 0x02, 0x84, 0x00, 0x00],
            Self::TurnOffRf => &[0xff, 0x50, 0x00, 0x00, 0x02, 0x83, 0x00, 0x00],
            Self::SwitchProtocolTypeA => {
                &[0xff, 0x50, 0x00, 0x02, 0x04, 0x8f, 0x02, 0x00, 0x03, 0x00]
            }
            Self::SwitchProtocolTypeF => {
                &[0xff, 0x50, 0x00, 0x02, 0x04, 0x8f, 0x02, 0x03, 0x00, 0x00]
            }
            Self::GetData => &[0xff, 0xca, 0x00, 0x00],
        }
    }

    /// Milliseconds the RF field needs to settle after this command.
    pub fn settle_ms(self) -> u64 {
        match self {
            Self::TurnOnRf => 25,
            Self::TurnOffRf => 30,
            _ => 0,
        }
    }
}

/// CommunicateThruEX header.
const COMMUNICATE_THRU_EX: [u8; 4] = [0xff, 0x50, 0x00, 0x01];

/// Wrap a card-protocol payload in a CommunicateThruEX pseudo-APDU.
///
/// The body carries a 4-byte little-endian timeout in microseconds
/// (tag 5F 46), then the length-tagged payload (tag 95 / 82).
pub fn communicate_thru_ex(payload: &[u8], timeout_us: u32) -> Vec<u8> {
    let mut body = Vec::with_capacity(8 + 4 + payload.len());
    body.extend_from_slice(&[0x5f, 0x46, 0x04]);
    body.extend_from_slice(&timeout_us.to_le_bytes());
    body.push(0x95);
    body.push(0x82);
    body.push((payload.len() >> 8) as u8);
    body.push((payload.len() & 0xff) as u8);
    body.extend_from_slice(payload);

    let mut out = Vec::with_capacity(COMMUNICATE_THRU_EX.len() + 3 + body.len() + 3);
    out.extend_from_slice(&COMMUNICATE_THRU_EX);
    out.push(0x00);
    out.push((body.len() >> 8) as u8);
    out.push((body.len() & 0xff) as u8);
    out.extend_from_slice(&body);
    out.extend_from_slice(&[0x00, 0x00, 0x00]);
    out
}
