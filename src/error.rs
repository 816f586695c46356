//! Crate error types.

use thiserror::Error;

use crate::frame::{MAX_FREQUENCY_INDEX, PORT_COUNT};

/// Everything that can abort a run; there is no recoverable class.
#[derive(Debug, Error)]
pub enum Error {
    /// Port index outside the lamp head's ports.
    #[error("invalid port index {0}, the lamp has {PORT_COUNT} ports")]
    InvalidPort(u8),

    /// Frequency index past the end of the device's tone table.
    #[error("invalid buzzer frequency index {0}, the table ends at {MAX_FREQUENCY_INDEX}")]
    InvalidFrequency(u8),

    /// Color string that is not six hex digits.
    #[error("invalid color {0:?}, expected six hex digits like dead00")]
    InvalidColor(String),

    /// The lamp is not attached or not accessible.
    #[error("lamp not found (vendor 0x0fc5, product 0xb080)")]
    DeviceNotFound,

    /// A feature report failed after the device was open.
    #[error("hid transport error: {0}")]
    Transport(#[from] hidapi::HidError),
}
