// pasori-id/src/adapter/mod.rs
//! Per-family reader adapters.
//!
//! The two supported reader generations speak unrelated USB protocols:
//! the RC-S380 family takes framed vendor commands directly, while the
//! RC-S300 family wraps pseudo-APDUs in a sequenced session envelope.
//! An [`Adapter`] hides the difference behind a tiny polling surface.

pub mod direct;
pub mod session;

use std::sync::Arc;

pub use direct::DirectAdapter;
pub use session::SessionAdapter;

use crate::constants::{
    PRODUCT_ID_S300P, PRODUCT_ID_S300S, PRODUCT_ID_S380P, PRODUCT_ID_S380S, SONY_VENDOR_ID,
};
use crate::protocol::session::SequenceCounter;
use crate::transport::Transport;
use crate::types::{DeviceIdentity, Idm, Uid};

/// Protocol adapter for one reader family.
#[derive(Debug)]
pub enum Adapter {
    /// RC-S380 family (direct vendor protocol)
    Direct(DirectAdapter),
    /// RC-S300 family (sequenced session protocol)
    Session(SessionAdapter),
}

impl Adapter {
    /// Select the adapter for a device, or `None` when the device is not
    /// a supported reader.
    ///
    /// Session adapters share `sequence` so that sequence numbers keep
    /// increasing across reconnects to the same reader.
    pub fn for_device(identity: &DeviceIdentity, sequence: &Arc<SequenceCounter>) -> Option<Self> {
        if identity.matches(SONY_VENDOR_ID, PRODUCT_ID_S380S)
            || identity.matches(SONY_VENDOR_ID, PRODUCT_ID_S380P)
        {
            return Some(Self::Direct(DirectAdapter::new()));
        }
        if identity.matches(SONY_VENDOR_ID, PRODUCT_ID_S300S)
            || identity.matches(SONY_VENDOR_ID, PRODUCT_ID_S300P)
        {
            return Some(Self::Session(SessionAdapter::new(Arc::clone(sequence))));
        }
        None
    }

    /// Prepare the reader for polling. `None` means the reader did not
    /// come up and the whole read attempt should fail.
    pub async fn open(&self, pipe: &dyn Transport) -> Option<()> {
        match self {
            Self::Direct(adapter) => adapter.open(pipe).await,
            Self::Session(adapter) => adapter.open(pipe).await,
        }
    }

    /// One Type-A poll round; `None` means no card.
    pub async fn read_type_a(&self, pipe: &dyn Transport) -> Option<Uid> {
        match self {
            Self::Direct(adapter) => adapter.read_type_a(pipe).await,
            Self::Session(adapter) => adapter.read_type_a(pipe).await,
        }
    }

    /// One Type-F poll round; `None` means no card.
    pub async fn read_type_f(&self, pipe: &dyn Transport) -> Option<Idm> {
        match self {
            Self::Direct(adapter) => adapter.read_type_f(pipe).await,
            Self::Session(adapter) => adapter.read_type_f(pipe).await,
        }
    }
}
