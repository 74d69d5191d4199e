// pasori-id/src/test_support.rs
//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the scripted USB host and the canned reply
//! frames both reader families expect, so tests across the crate and the
//! tests/ directory can reuse the same fixtures.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::constants::{
    PRODUCT_ID_S300S, PRODUCT_ID_S380S, SONY_VENDOR_ID,
};
use crate::protocol::direct::frame::ACK_FRAME;
use crate::protocol::session::frame::{REPLY_TYPE, SLOT_NUMBER};
use crate::reader::host::UsbHost;
use crate::transport::mock::MockTransport;
use crate::transport::Transport;
use crate::types::DeviceIdentity;
use crate::{Error, Result};

/// Identity of a direct-family reader as tests attach it.
#[doc(hidden)]
pub fn s380_identity() -> DeviceIdentity {
    DeviceIdentity::new(SONY_VENDOR_ID, PRODUCT_ID_S380S, "RC-S380/S")
}

/// Identity of a session-family reader as tests attach it.
#[doc(hidden)]
pub fn s300_identity() -> DeviceIdentity {
    DeviceIdentity::new(SONY_VENDOR_ID, PRODUCT_ID_S300S, "RC-S300/S")
}

/// Scripted [`UsbHost`] backed by a single shared [`MockTransport`].
///
/// Every `open` hands out the same transport, so a test can queue replies
/// up front and inspect the sent frames afterwards.
#[doc(hidden)]
pub struct MockUsbHost {
    devices: Mutex<Vec<DeviceIdentity>>,
    pipe: Arc<MockTransport>,
    permitted: AtomicBool,
    grant_on_request: bool,
    permission_requests: AtomicUsize,
    service_available: bool,
    fail_open: bool,
}

impl MockUsbHost {
    /// Host with one attached device and permission already granted.
    pub fn with_device(device: DeviceIdentity) -> Self {
        Self {
            devices: Mutex::new(vec![device]),
            pipe: Arc::new(MockTransport::new()),
            permitted: AtomicBool::new(true),
            grant_on_request: true,
            permission_requests: AtomicUsize::new(0),
            service_available: true,
            fail_open: false,
        }
    }

    /// Host with no attached devices.
    pub fn empty() -> Self {
        Self {
            devices: Mutex::new(Vec::new()),
            ..Self::with_device(s380_identity())
        }
    }

    /// Host whose enumeration fails entirely.
    pub fn unavailable() -> Self {
        Self {
            service_available: false,
            ..Self::with_device(s380_identity())
        }
    }

    /// Flip permission handling: `has_permission` reports false until a
    /// request is made, and `granted` decides how that request resolves.
    pub fn require_permission(self, granted: bool) -> Self {
        self.permitted.store(false, Ordering::Relaxed);
        Self {
            grant_on_request: granted,
            ..self
        }
    }

    /// Make `open` fail with a transport error.
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// The transport every `open` call hands out.
    pub fn pipe(&self) -> Arc<MockTransport> {
        Arc::clone(&self.pipe)
    }

    /// How many times permission was requested.
    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl UsbHost for MockUsbHost {
    fn attached_devices(&self) -> Result<Vec<DeviceIdentity>> {
        if !self.service_available {
            return Err(Error::ServiceUnavailable);
        }
        Ok(self
            .devices
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone())
    }

    fn has_permission(&self, _device: &DeviceIdentity) -> bool {
        self.permitted.load(Ordering::Relaxed)
    }

    async fn request_permission(&self, _device: &DeviceIdentity) -> bool {
        self.permission_requests.fetch_add(1, Ordering::Relaxed);
        self.permitted.store(self.grant_on_request, Ordering::Relaxed);
        self.grant_on_request
    }

    fn open(&self, _device: &DeviceIdentity) -> Result<Arc<dyn Transport>> {
        if self.fail_open {
            return Err(Error::TransportClosed);
        }
        Ok(self.pipe() as Arc<dyn Transport>)
    }
}

/// Queue the ACK echo plus a data reply for one direct-protocol command.
#[doc(hidden)]
pub fn queue_direct_reply(pipe: &MockTransport, reply: Vec<u8>) {
    pipe.push_reply(ACK_FRAME.to_vec());
    pipe.push_reply(reply);
}

/// InCommRF envelope carrying a 5-byte anti-collision reply at the
/// offset the parser expects.
#[doc(hidden)]
pub fn sdd_reply(id: [u8; 5]) -> Vec<u8> {
    let mut reply = vec![0u8; 15];
    reply.extend_from_slice(&id);
    reply
}

/// SELECT envelope whose SAK byte carries `sak`.
#[doc(hidden)]
pub fn select_reply(sak: u8) -> Vec<u8> {
    let mut reply = vec![0u8; 15];
    reply.push(sak);
    reply
}

/// Direct-family polling envelope carrying `idm`.
#[doc(hidden)]
pub fn direct_polling_reply(idm: [u8; 8]) -> Vec<u8> {
    let mut reply = vec![0u8; 15];
    reply.push(18);
    reply.push(0x01);
    reply.extend_from_slice(&idm);
    reply.extend_from_slice(&[0u8; 8]); // PMm
    reply
}

/// Queue the 9-command level-1 SDD batch plus the level-1 SELECT for a
/// single-size card whose anti-collision reply is `id`.
#[doc(hidden)]
pub fn queue_type_a_single(pipe: &MockTransport, id: [u8; 5], sak: u8) {
    // Eight setup commands answered with empty-ish envelopes
    for _ in 0..8 {
        queue_direct_reply(pipe, vec![0u8; 15]);
    }
    queue_direct_reply(pipe, sdd_reply(id));
    // SELECT batch: InSetProtocol then InCommRF
    queue_direct_reply(pipe, vec![0u8; 15]);
    queue_direct_reply(pipe, select_reply(sak));
}

/// Queue one full direct-family Type-F polling batch answering `idm`.
#[doc(hidden)]
pub fn queue_type_f_direct(pipe: &MockTransport, idm: [u8; 8]) {
    for _ in 0..5 {
        queue_direct_reply(pipe, vec![0u8; 15]);
    }
    queue_direct_reply(pipe, direct_polling_reply(idm));
}

/// Session reply frame echoing slot 0 and `seq`, with a proper length
/// field, carrying `payload`.
#[doc(hidden)]
pub fn session_reply(seq: u8, payload: &[u8]) -> Vec<u8> {
    let mut reply = vec![REPLY_TYPE];
    reply.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    reply.extend_from_slice(&[SLOT_NUMBER, seq, 0, 0, 0]);
    reply.extend_from_slice(payload);
    reply
}

/// Queue acknowledgements for the four-step session open handshake,
/// starting at sequence number `first_seq`.
#[doc(hidden)]
pub fn queue_session_open(pipe: &MockTransport, first_seq: u8) {
    for i in 0..4 {
        pipe.push_reply(session_reply(first_seq.wrapping_add(i), &[0x90, 0x00]));
    }
}

/// CommunicateThruEX reply payload carrying a FeliCa polling answer.
#[doc(hidden)]
pub fn session_polling_payload(idm: [u8; 8]) -> Vec<u8> {
    let mut payload = vec![0u8; 13];
    payload.push(18); // embedded answer length
    payload.push(18); // FeliCa frame length byte
    payload.push(0x01); // polling response code
    payload.extend_from_slice(&idm);
    payload.extend_from_slice(&[0u8; 8]); // PMm
    payload.extend_from_slice(&[0x90, 0x00]);
    payload
}
