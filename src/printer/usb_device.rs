extern crate log;

use log::{debug, warn};
use rusb::{UsbContext, Context, DeviceHandle, TransferType, Direction};
use super::Device;
use crate::Error;

/// Printer reached through a usb bulk endpoint
pub struct UsbDevice {
    /// Bulk write endpoint
    endpoint: u8,
    /// Device handle
    dh: DeviceHandle<Context>,
    /// Time to wait before giving up writing to the bulk endpoint
    timeout: std::time::Duration
}

impl UsbDevice {
    /// Opens the first device matching the vendor and product id
    ///
    /// If no endpoint is given, the last bulk out endpoint of the active configuration is used. Returns `None` if no such device is connected.
    pub fn open(vendor_id: u16, product_id: u16, endpoint: Option<u8>, timeout: std::time::Duration) -> Result<Option<UsbDevice>, Error> {
        let context = Context::new()?;

        let devices = context.devices()?;
        for device in devices.iter() {
            let s = device.device_descriptor()?;
            if s.vendor_id() != vendor_id || s.product_id() != product_id {
                continue;
            }
            // Before opening the device, we must find the bulk endpoint
            let actual_endpoint = if let Some(endpoint) = endpoint {
                endpoint
            } else {
                let config_descriptor = device.active_config_descriptor()?;
                let mut detected_endpoint: Option<u8> = None;
                // Horrible to have 3 nested for, but so be it
                for interface in config_descriptor.interfaces() {
                    for descriptor in interface.descriptors() {
                        for endpoint in descriptor.endpoint_descriptors() {
                            if let (TransferType::Bulk, Direction::Out) = (endpoint.transfer_type(), endpoint.direction()) {
                                detected_endpoint = Some(endpoint.address());
                            }
                        }
                    }
                }
                detected_endpoint.ok_or(Error::NoBulkEndpoint)?
            };

            let dh = device.open()?;
            if let Ok(active) = dh.kernel_driver_active(0) {
                if active {
                    // The kernel is active, we have to detach it
                    dh.detach_kernel_driver(0)?;
                }
            } else {
                warn!("Could not find out if kernel driver is active, might encounter a problem soon.");
            };
            // Now we claim the interface
            dh.claim_interface(0)?;
            debug!("Opened usb printer {:04x}:{:04x} on endpoint {:#04x}", vendor_id, product_id, actual_endpoint);
            return Ok(Some(UsbDevice {
                endpoint: actual_endpoint,
                dh,
                timeout
            }));
        }
        // No printer was found with such vid and pid
        Ok(None)
    }
}

impl Device for UsbDevice {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut written = 0;
        while written < bytes.len() {
            let sent = self.dh.write_bulk(self.endpoint, &bytes[written..], self.timeout)?;
            if sent == 0 {
                return Err(Error::ShortWrite{written, expected: bytes.len()});
            }
            written += sent;
        }
        Ok(())
    }
}
