// pasori-id/src/reader/mod.rs

//! Read-session controller.
//!
//! A [`Reader`] owns at most one active transport at a time. Starting a
//! new read force-closes the previous session's transport, so a stale
//! task blocked on a bulk transfer fails fast with
//! [`Error::TransportClosed`] instead of competing for the device. The
//! poll loop itself never times out; it ends when a card shows up or the
//! caller drops the future.

pub mod host;

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error, info};

use crate::adapter::Adapter;
use crate::error::{Error, Result};
use crate::protocol::session::SequenceCounter;
use self::host::UsbHost;
use crate::transport::Transport;
use crate::types::{CardId, DeviceIdentity};

/// Card-reader session controller.
pub struct Reader {
    host: Arc<dyn UsbHost>,
    sequence: Arc<SequenceCounter>,
    active: Mutex<Option<Arc<dyn Transport>>>,
}

impl Reader {
    /// Create a controller over `host`.
    pub fn new(host: Arc<dyn UsbHost>) -> Self {
        Self {
            host,
            sequence: Arc::new(SequenceCounter::new()),
            active: Mutex::new(None),
        }
    }

    /// Read one card identifier.
    ///
    /// Finds the first supported reader, obtains permission, opens it and
    /// polls Type-A then Type-F until a card answers. The returned future
    /// is cancel-safe: dropping it closes the transport. A concurrent
    /// second call force-closes this one's transport first.
    pub async fn read_id(&self) -> Result<CardId> {
        self.cancel();

        let (identity, adapter) = self.find_reader()?;
        info!(
            "using reader {:04x}:{:04x} ({})",
            identity.vendor_id, identity.product_id, identity.product_name
        );

        if !self.host.has_permission(&identity) {
            debug!("requesting usb permission");
            if !self.host.request_permission(&identity).await {
                error!("usb permission refused");
                return Err(Error::PermissionDenied);
            }
        }

        let pipe = self.host.open(&identity).map_err(|err| {
            error!("open failed: {}", err);
            Error::OpenFailed
        })?;
        *self.slot() = Some(Arc::clone(&pipe));
        let _guard = ActiveGuard {
            reader: self,
            pipe: Arc::clone(&pipe),
        };

        adapter.open(pipe.as_ref()).await.ok_or(Error::OpenFailed)?;

        // Pacing lives in the adapters: the direct family sleeps out the
        // poll interval, the session codec's retry budget paces itself.
        loop {
            if pipe.is_closed() {
                return Err(Error::TransportClosed);
            }
            if let Some(uid) = adapter.read_type_a(pipe.as_ref()).await {
                info!("type-a card: {}", uid.to_hex());
                return Ok(CardId::TypeA(uid));
            }
            if let Some(idm) = adapter.read_type_f(pipe.as_ref()).await {
                info!("type-f card: {}", idm.to_hex());
                return Ok(CardId::TypeF(idm));
            }
        }
    }

    /// Force-close the active session's transport, if any. A read task
    /// still holding it will fail on its next transfer.
    pub fn cancel(&self) {
        if let Some(pipe) = self.slot().take() {
            debug!("force-closing previous session transport");
            pipe.close();
        }
    }

    /// First attached device a supported adapter exists for, paired
    /// with that adapter.
    fn find_reader(&self) -> Result<(DeviceIdentity, Adapter)> {
        let devices = self.host.attached_devices()?;
        devices
            .into_iter()
            .find_map(|d| Adapter::for_device(&d, &self.sequence).map(|a| (d, a)))
            .ok_or(Error::DeviceNotFound)
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<dyn Transport>>> {
        // A poisoned lock only ever holds an Option; keep going.
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("active", &self.slot().is_some())
            .finish()
    }
}

/// Closes the session transport when the read future ends for any
/// reason, including cancellation, and vacates the active slot unless a
/// newer session already replaced it.
struct ActiveGuard<'a> {
    reader: &'a Reader,
    pipe: Arc<dyn Transport>,
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.pipe.close();
        let mut slot = self.reader.slot();
        if let Some(active) = slot.as_ref() {
            if Arc::ptr_eq(active, &self.pipe) {
                *slot = None;
            }
        }
    }
}
