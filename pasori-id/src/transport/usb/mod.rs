// pasori-id/src/transport/usb/mod.rs

#![cfg(feature = "usb")]

//! rusb-backed transport and host. Feature-gated behind `--features usb`.
//!
//! Bulk transfers in libusb are blocking, so every transfer hops onto the
//! blocking thread pool. The handle lives behind an `Arc<Mutex<Option<…>>>`
//! so `close` can drop it from any thread while a transfer task still
//! holds the outer `Arc`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use rusb::{Context, Device, DeviceHandle, UsbContext};

use crate::constants::SONY_VENDOR_ID;
use crate::reader::host::UsbHost;
use crate::transport::traits::Transport;
use crate::types::DeviceIdentity;
use crate::{Error, Result};

mod descriptor;
use descriptor::{Endpoints, find_endpoints};

type SharedHandle = Arc<Mutex<Option<DeviceHandle<Context>>>>;

/// Bulk-pipe transport over a claimed rusb device handle.
pub struct UsbTransport {
    handle: SharedHandle,
    endpoints: Endpoints,
    closed: AtomicBool,
}

impl UsbTransport {
    fn new(handle: DeviceHandle<Context>, endpoints: Endpoints) -> Self {
        Self {
            handle: Arc::new(Mutex::new(Some(handle))),
            endpoints,
            closed: AtomicBool::new(false),
        }
    }

    fn map_rusb(err: rusb::Error) -> Error {
        match err {
            rusb::Error::Timeout => Error::Timeout,
            rusb::Error::NoDevice => Error::TransportClosed,
            other => Error::Usb(other),
        }
    }
}

fn lock_handle(handle: &SharedHandle) -> std::sync::MutexGuard<'_, Option<DeviceHandle<Context>>> {
    match handle.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl Transport for UsbTransport {
    async fn send(&self, data: &[u8], timeout_ms: u64) -> Result<usize> {
        if self.is_closed() {
            return Err(Error::TransportClosed);
        }
        let handle = Arc::clone(&self.handle);
        let ep = self.endpoints.out_ep;
        let data = data.to_vec();
        let timeout = Duration::from_millis(timeout_ms);

        let task = tokio::task::spawn_blocking(move || {
            let guard = lock_handle(&handle);
            let h = guard.as_ref().ok_or(Error::TransportClosed)?;
            h.write_bulk(ep, &data, timeout).map_err(UsbTransport::map_rusb)
        });
        match task.await {
            Ok(result) => result,
            Err(_) => Err(Error::TransportClosed),
        }
    }

    async fn receive(&self, max_len: usize, timeout_ms: u64) -> Result<Vec<u8>> {
        if self.is_closed() {
            return Err(Error::TransportClosed);
        }
        let handle = Arc::clone(&self.handle);
        let ep = self.endpoints.in_ep;
        let timeout = Duration::from_millis(timeout_ms);

        let task = tokio::task::spawn_blocking(move || {
            let guard = lock_handle(&handle);
            let h = guard.as_ref().ok_or(Error::TransportClosed)?;
            let mut buf = vec![0u8; max_len];
            let n = h.read_bulk(ep, &mut buf, timeout).map_err(UsbTransport::map_rusb)?;
            buf.truncate(n);
            Ok(buf)
        });
        match task.await {
            Ok(result) => result,
            Err(_) => Err(Error::TransportClosed),
        }
    }

    fn max_packet_size(&self) -> usize {
        self.endpoints.max_packet
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        // Dropping the handle releases the claimed interface.
        lock_handle(&self.handle).take();
        debug!("usb transport closed");
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        self.close();
    }
}

/// [`UsbHost`] over the process-wide libusb context.
///
/// Desktop platforms do not gate device access behind a prompt, so
/// permission is always reported as granted; OS-level access problems
/// surface from `open` instead.
pub struct UsbHostEnv;

impl UsbHostEnv {
    /// Create the host.
    pub fn new() -> Self {
        Self
    }

    fn context() -> Result<Context> {
        Context::new().map_err(|err| {
            warn!("libusb context unavailable: {}", err);
            Error::ServiceUnavailable
        })
    }

    fn find_device(ctx: &Context, identity: &DeviceIdentity) -> Result<Device<Context>> {
        for device in ctx.devices()?.iter() {
            let dd = device.device_descriptor()?;
            if identity.matches(dd.vendor_id(), dd.product_id()) {
                return Ok(device);
            }
        }
        Err(Error::DeviceNotFound)
    }
}

impl Default for UsbHostEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsbHost for UsbHostEnv {
    fn attached_devices(&self) -> Result<Vec<DeviceIdentity>> {
        let ctx = Self::context()?;
        let mut found = Vec::new();
        for device in ctx.devices()?.iter() {
            let dd = device.device_descriptor()?;
            if dd.vendor_id() != SONY_VENDOR_ID {
                continue;
            }
            // The product string needs an open handle; it is cosmetic, so
            // failures leave it empty.
            let name = device
                .open()
                .and_then(|h| h.read_product_string_ascii(&dd))
                .unwrap_or_default();
            found.push(DeviceIdentity::new(dd.vendor_id(), dd.product_id(), name));
        }
        Ok(found)
    }

    fn has_permission(&self, _device: &DeviceIdentity) -> bool {
        true
    }

    async fn request_permission(&self, _device: &DeviceIdentity) -> bool {
        true
    }

    fn open(&self, identity: &DeviceIdentity) -> Result<Arc<dyn Transport>> {
        let ctx = Self::context()?;
        let device = Self::find_device(&ctx, identity)?;
        let endpoints = find_endpoints(&device).ok_or(Error::OpenFailed)?;

        let mut handle = device.open()?;
        // On Linux the kernel driver may own the interface; detach is
        // best-effort and claim reports the hard failure.
        if let Ok(true) = handle.kernel_driver_active(endpoints.interface) {
            let _ = handle.detach_kernel_driver(endpoints.interface);
        }
        handle.claim_interface(endpoints.interface)?;
        debug!(
            "claimed interface {} (in {:#04x}, out {:#04x})",
            endpoints.interface, endpoints.in_ep, endpoints.out_ep
        );

        Ok(Arc::new(UsbTransport::new(handle, endpoints)))
    }
}
