// pasori-id/src/transport/usb/descriptor.rs

#![cfg(feature = "usb")]

use rusb::{Device, Direction, TransferType, UsbContext};

/// Bulk endpoint pair resolved from a device's active configuration.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints {
    /// IN endpoint address
    pub in_ep: u8,
    /// OUT endpoint address
    pub out_ep: u8,
    /// Interface number the endpoints live on
    pub interface: u8,
    /// Max packet size of the IN endpoint
    pub max_packet: usize,
}

/// Inspect the device descriptors and return the first interface carrying
/// both a bulk IN and a bulk OUT endpoint.
pub fn find_endpoints<D: UsbContext>(device: &Device<D>) -> Option<Endpoints> {
    let config = device.config_descriptor(0).ok()?;

    for interface in config.interfaces() {
        for interface_desc in interface.descriptors() {
            let mut in_ep = None;
            let mut out_ep = None;
            let mut max_packet = 0usize;

            for endpoint_desc in interface_desc.endpoint_descriptors() {
                if endpoint_desc.transfer_type() != TransferType::Bulk {
                    continue;
                }
                match endpoint_desc.direction() {
                    Direction::In if in_ep.is_none() => {
                        in_ep = Some(endpoint_desc.address());
                        max_packet = endpoint_desc.max_packet_size() as usize;
                    }
                    Direction::Out if out_ep.is_none() => {
                        out_ep = Some(endpoint_desc.address());
                    }
                    _ => {}
                }
            }

            if let (Some(in_ep), Some(out_ep)) = (in_ep, out_ep) {
                return Some(Endpoints {
                    in_ep,
                    out_ep,
                    interface: interface_desc.interface_number(),
                    max_packet,
                });
            }
        }
    }

    None
}
