// pasori-id/src/error.rs

use thiserror::Error;

/// 共通エラー型
///
/// The first four variants are session-level: they terminate one whole
/// read attempt and carry a user-facing message/detail pair. Everything
/// else is transport/codec internal; a short or garbled reply never
/// surfaces here — it is reported as "no card" by the engines instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The host has no USB service to enumerate devices with.
    #[error("usb service unavailable")]
    ServiceUnavailable,

    /// The user or OS refused access to the reader.
    #[error("usb permission denied")]
    PermissionDenied,

    /// No attached device matched a known reader identity.
    #[error("card reader not found")]
    DeviceNotFound,

    /// Claiming the interface, resolving endpoints, or the adapter open
    /// sequence failed.
    #[error("failed to open card reader")]
    OpenFailed,

    /// A bulk transfer did not complete within its timeout.
    #[error("operation timed out")]
    Timeout,

    /// The transport was closed, either by the caller or by a newer
    /// session force-closing it.
    #[error("transport closed")]
    TransportClosed,

    /// A frame failed structural validation during parsing.
    #[error("frame format error: {0}")]
    FrameFormat(String),

    /// A parsed field did not have the expected size.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },

    /// A frame checksum did not match.
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch {
        /// Checksum the frame should carry.
        expected: u8,
        /// Checksum the frame carried.
        actual: u8,
    },

    // USB 実装はオプション依存
    /// Error reported by the rusb backend.
    #[cfg(feature = "usb")]
    #[error("usb error: {0}")]
    Usb(#[from] rusb::Error),
}

impl Error {
    /// Short user-facing headline for session-level errors.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable => "USB unavailable",
            Self::PermissionDenied => "USB access error",
            Self::DeviceNotFound => "Card reader not connected",
            Self::OpenFailed => "Card reader communication failed",
            _ => "Card reader error",
        }
    }

    /// Longer user-facing detail for session-level errors.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable => {
                "This device cannot use the card reader because it has no USB host service"
            }
            Self::PermissionDenied => {
                "Access to the USB device was not granted. Allow the connection and try again"
            }
            Self::DeviceNotFound | Self::OpenFailed => {
                "Check that the card reader is connected. If it is, unplug it and plug it back in"
            }
            _ => "Retry the read operation",
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
