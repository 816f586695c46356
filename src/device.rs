//! Device session over the HID transport.

use hidapi::{HidApi, HidDevice};
use tracing::{debug, info};

use crate::error::Error;
use crate::frame::Frame;

/// Delcom Products vendor ID.
pub const VENDOR_ID: u16 = 0x0fc5;
/// USB HID visual signal indicator product ID.
pub const PRODUCT_ID: u16 = 0xb080;

/// Sink for encoded frames, the seam between sequencer and transport.
pub trait FrameSink {
    fn send_frame(&mut self, frame: &Frame) -> Result<(), Error>;
}

/// Exclusive handle to the lamp for the lifetime of one run.
///
/// The underlying handle is closed when the session drops, on failure paths
/// included.
pub struct DeviceSession {
    device: HidDevice,
}

impl DeviceSession {
    /// Open the lamp by its fixed vendor and product ID.
    pub fn open() -> Result<Self, Error> {
        let api = HidApi::new()?;
        let device = api.open(VENDOR_ID, PRODUCT_ID).map_err(|_| Error::DeviceNotFound)?;

        info!("opened lamp {:04x}:{:04x}", VENDOR_ID, PRODUCT_ID);

        Ok(DeviceSession { device })
    }
}

impl FrameSink for DeviceSession {
    fn send_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        self.device.send_feature_report(frame.as_bytes())?;

        debug!("sent {} byte frame, minor command {}", frame.as_bytes().len(), frame.minor_cmd());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_device_ids() {
        assert_eq!(VENDOR_ID, 0x0fc5);
        assert_eq!(PRODUCT_ID, 0xb080);
    }
}
