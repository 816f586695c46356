//! Timed effect programs.
//!
//! Each user-level effect expands into an ordered list of steps, a frame to
//! send plus an optional wait before the next one. Execution is strictly
//! sequential; the device accepts one feature report at a time and has no
//! pipelining.

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::color::{self, Rgb};
use crate::device::FrameSink;
use crate::error::Error;
use crate::frame::{self, EnableMask, Frame};

/// Base note length of the fanfare in milliseconds.
const TADA_BASE_MS: u64 = 120;

/// Fanfare schedule: frequency index, duration multiplier, wait multiplier.
/// This is the tune; changing any entry changes the audible result.
const TADA_SCHEDULE: [(u8, u64, u64); 6] = [
    (15, 1, 1),
    (12, 1, 1),
    (10, 1, 1),
    (7, 1, 2),
    (15, 1, 1),
    (7, 3, 3),
];

/// Blink phase lengths.
const BLINK_ON: Duration = Duration::from_millis(10);
const BLINK_OFF: Duration = Duration::from_millis(20);

/// One program step.
#[derive(Debug, Clone)]
pub struct Step {
    pub frame: Frame,
    pub wait: Option<Duration>,
}

impl Step {
    fn send(frame: Frame) -> Self {
        Step { frame, wait: None }
    }

    fn send_then_wait(frame: Frame, wait_ms: u64) -> Self {
        Step { frame, wait: Some(Duration::from_millis(wait_ms)) }
    }
}

/// Single buzzer note.
///
/// The device plays the note on its own once the frame lands; `wait` blocks
/// for the note's duration after the send to model a synchronous beep.
pub fn buzz(frequency_index: u8, duration_ms: u64, wait: bool) -> Result<Vec<Step>, Error> {
    let frame = frame::encode_buzzer(true, frequency_index, frame::buzzer_ext(duration_ms))?;

    let step = if wait {
        Step::send_then_wait(frame, duration_ms)
    } else {
        Step::send(frame)
    };

    Ok(vec![step])
}

/// One play cycle: buzz, light the color, hold, dark, hold.
pub fn play(color: Rgb, on_ms: u64, off_ms: u64, frequency_index: u8) -> Result<Vec<Step>, Error> {
    let mut steps = buzz(frequency_index, on_ms, false)?;

    // The trailing port write is what actually lights the lamp, so the on
    // duration is attached there.
    let frames = color::color_frames(color)?;
    let last = frames.len() - 1;
    for (i, frame) in frames.into_iter().enumerate() {
        if i == last {
            steps.push(Step::send_then_wait(frame, on_ms));
        } else {
            steps.push(Step::send(frame));
        }
    }

    steps.push(Step::send_then_wait(
        frame::encode_port_write(EnableMask::ALL_DISABLED),
        off_ms,
    ));

    Ok(steps)
}

/// The fanfare.
pub fn tada() -> Result<Vec<Step>, Error> {
    let mut steps = Vec::with_capacity(TADA_SCHEDULE.len());

    for (frequency_index, duration_mult, wait_mult) in TADA_SCHEDULE {
        let duration_ms = duration_mult * TADA_BASE_MS;
        let frame = frame::encode_buzzer(true, frequency_index, frame::buzzer_ext(duration_ms))?;
        steps.push(Step::send_then_wait(frame, wait_mult * TADA_BASE_MS));
    }

    Ok(steps)
}

/// The two-step blink cycle for a color.
pub fn blink_cycle(color: Rgb) -> Vec<Step> {
    vec![
        Step { frame: frame::encode_port_write(color::color_mask(color)), wait: Some(BLINK_ON) },
        Step { frame: frame::encode_port_write(EnableMask::ALL_DISABLED), wait: Some(BLINK_OFF) },
    ]
}

/// Blink until the process is killed; returns only on a transport failure.
pub fn blink<S: FrameSink>(sink: &mut S, color: Rgb) -> Result<(), Error> {
    let cycle = blink_cycle(color);

    loop {
        run(sink, &cycle)?;
    }
}

/// Execute a program in order, sleeping out each step's wait.
///
/// A failed send aborts the remaining steps; partially executed effects are
/// not rolled back, the device has no undo.
pub fn run<S: FrameSink>(sink: &mut S, steps: &[Step]) -> Result<(), Error> {
    for step in steps {
        sink.send_frame(&step.frame)?;

        if let Some(wait) = step.wait {
            debug!("waiting {:?}", wait);
            thread::sleep(wait);
        }
    }

    Ok(())
}
