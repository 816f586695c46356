//! Color intensity to port mapping.

use crate::error::Error;
use crate::frame::{self, EnableMask, Frame};

/// RGB color.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Color channel driven by a hardware port.
#[derive(Debug, Copy, Clone)]
enum Channel {
    Red,
    Green,
    Blue,
}

/// Physical wiring of the lamp head: hardware port index to color channel.
const PORT_WIRING: [Channel; 3] = [Channel::Green, Channel::Red, Channel::Blue];

impl Rgb {
    fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }
}

/// Expand a color into the frames that realize it on the device.
///
/// Every nonzero channel gets a PWM duty write on its wired port and its bit
/// cleared in the enable mask; zero channels stay disabled. The device only
/// latches a port's new drive mode on the subsequent port write, so all duty
/// frames come first and the single port write comes last.
pub fn color_frames(color: Rgb) -> Result<Vec<Frame>, Error> {
    let mut frames = Vec::with_capacity(PORT_WIRING.len() + 1);
    let mut mask = EnableMask::ALL_DISABLED;

    for (port, channel) in PORT_WIRING.iter().enumerate() {
        let intensity = color.channel(*channel);
        if intensity != 0 {
            let duty = frame::duty_from_intensity(intensity);
            frames.push(frame::encode_pwm(port as u8, duty)?);
            mask.enable_port(port as u8);
        }
    }

    frames.push(frame::encode_port_write(mask));

    Ok(frames)
}

/// Enable mask for a color, without the PWM duty writes.
pub fn color_mask(color: Rgb) -> EnableMask {
    let mut mask = EnableMask::ALL_DISABLED;

    for (port, channel) in PORT_WIRING.iter().enumerate() {
        if color.channel(*channel) != 0 {
            mask.enable_port(port as u8);
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_is_wired_to_port_one() {
        let frames = color_frames(Rgb { r: 255, g: 0, b: 0 }).unwrap();
        assert_eq!(frames.len(), 2);

        assert_eq!(frames[0].minor_cmd(), 34);
        assert_eq!((frames[0].data_lsb(), frames[0].data_msb()), (1, 100));

        assert_eq!(frames[1].minor_cmd(), 2);
        assert_eq!(frames[1].data_lsb(), 0x05);
    }

    #[test]
    fn pwm_count_matches_nonzero_channels() {
        let samples = [
            (Rgb { r: 0, g: 0, b: 0 }, 0),
            (Rgb { r: 10, g: 0, b: 0 }, 1),
            (Rgb { r: 0, g: 128, b: 200 }, 2),
            (Rgb { r: 255, g: 255, b: 255 }, 3),
        ];

        for (color, nonzero) in samples.iter() {
            let frames = color_frames(*color).unwrap();
            let pwm = frames.iter().filter(|f| f.minor_cmd() == 34).count();
            assert_eq!(pwm, *nonzero, "{:?}", color);
        }
    }

    #[test]
    fn port_write_is_always_last() {
        let frames = color_frames(Rgb { r: 20, g: 40, b: 60 }).unwrap();
        assert_eq!(frames.last().map(Frame::minor_cmd), Some(2));
        assert_eq!(frames.iter().filter(|f| f.minor_cmd() == 2).count(), 1);
    }

    #[test]
    fn all_zero_color_only_disables_ports() {
        let frames = color_frames(Rgb::default()).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].minor_cmd(), 2);
        assert_eq!(frames[0].data_lsb(), 0x07);
    }

    #[test]
    fn mask_follows_wiring() {
        assert_eq!(color_mask(Rgb { r: 0, g: 255, b: 0 }).bits(), 0x06);
        assert_eq!(color_mask(Rgb { r: 255, g: 0, b: 0 }).bits(), 0x05);
        assert_eq!(color_mask(Rgb { r: 0, g: 0, b: 255 }).bits(), 0x03);
        assert_eq!(color_mask(Rgb::default()).bits(), 0x07);
    }
}
