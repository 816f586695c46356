//! Control library for the Delcom USB indicator lamp.
//!
//! The lamp (a tri-color LED head with a buzzer) is driven through
//! vendor-specific HID feature reports. This crate encodes the two fixed
//! frame layouts the device accepts and sequences them into timed effects:
//! a single play cycle, a fanfare, and an indefinite blink.

pub mod color;
pub mod device;
pub mod effect;
pub mod error;
pub mod frame;

pub use crate::color::Rgb;
pub use crate::device::{DeviceSession, FrameSink};
pub use crate::error::Error;
