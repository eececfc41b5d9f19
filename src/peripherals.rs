//! Interfaces to the collaborators outside the motion pipeline.
//!
//! The mode controller forwards data to these and never inspects their
//! internals.

use crate::animation::LedFrame;
use crate::conditioner::Vector3;
use crate::engine::Readout;
use crate::ring_buffer::RingBuffer;
use crate::submode::Submode;
use crate::HISTORY_LEN;

/// LED hardware. Gamma correction and brightness scaling happen here.
pub trait LedDriver {
    /// Show `frame`, dividing every channel by `brightness_divisor`.
    fn write(&mut self, frame: &LedFrame, brightness_divisor: u8);
}

/// Rolling-ball simulation used by the ball presets.
pub trait BallPhysics {
    fn update(&mut self, accel: Vector3) -> LedFrame;

    /// Called whenever a preset is selected.
    fn reset(&mut self) {}
}

/// Spectral analyser that owns its own frame buffer and LED output.
pub trait SpectralEngine {
    fn push_sample(&mut self, sample: i32);

    /// Called whenever a preset is selected.
    fn reset(&mut self) {}
}

/// Text and trace rendering.
pub trait Display {
    fn show_title(&mut self, submode: Submode);

    /// Readouts plus the high-pass trace, oldest sample first.
    fn show_readout(&mut self, readout: &Readout, trace: &RingBuffer<f32, HISTORY_LEN>);
}
