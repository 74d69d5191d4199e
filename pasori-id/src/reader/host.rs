// pasori-id/src/reader/host.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::transport::Transport;
use crate::types::DeviceIdentity;

/// Host-side USB services the reader controller depends on.
///
/// Production code implements this over a real USB stack (see the `usb`
/// feature); tests substitute a scripted host. Permission is modelled
/// explicitly because some platforms gate device access behind a user
/// prompt.
#[async_trait]
pub trait UsbHost: Send + Sync {
    /// Enumerate currently attached devices.
    ///
    /// Fails with [`crate::Error::ServiceUnavailable`] when the platform
    /// has no USB host service at all.
    fn attached_devices(&self) -> Result<Vec<DeviceIdentity>>;

    /// Whether this process may already open `device`.
    fn has_permission(&self, device: &DeviceIdentity) -> bool;

    /// Ask the platform for access to `device`; resolves once the user
    /// or OS granted (`true`) or refused (`false`) it.
    async fn request_permission(&self, device: &DeviceIdentity) -> bool;

    /// Open a bulk pipe to `device`, claiming its interface.
    fn open(&self, device: &DeviceIdentity) -> Result<Arc<dyn Transport>>;
}
