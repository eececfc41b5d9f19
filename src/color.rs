//! Colour mapping.
//!
//! Turns tempo and activity (or per-axis energy) into one RGB colour. No
//! gamma correction is applied here; that belongs to the LED driver.

use smart_leds::RGB8;
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::conditioner::{Axis, MotionConditioner};
use crate::config::Config;
use crate::ring_buffer::RingBuffer;
use crate::HISTORY_LEN;

const BPM_MIN: f32 = 30.0;
const BPM_MAX: f32 = 250.0;
const INTENSITY_MIN: f32 = 15.0;
const INTENSITY_MAX: f32 = 1500.0;

/// Mean axis energy that saturates a channel at scale 1. Violent shaking
/// peaks a little above this on a single axis.
const ENERGY_FULL_SCALE: f32 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorStrategy {
    /// Red, green and blue follow the recent energy of x, y and z.
    AxisEnergy,
    /// Hue follows the crossing tempo, value follows the activity level.
    TempoActivity,
}

/// Map the current pipeline state to a colour using `config.color`.
pub fn map(config: &Config, conditioner: &MotionConditioner, bpm_from_crossing: f32) -> RGB8 {
    match config.color {
        ColorStrategy::AxisEnergy => {
            let channel = |axis| {
                let energy = axis_energy(conditioner.axis(axis).history(), config.lookback);
                energy_channel(energy, config.scale)
            };
            RGB8 {
                r: channel(Axis::X),
                g: channel(Axis::Y),
                b: channel(Axis::Z),
            }
        }
        ColorStrategy::TempoActivity => hue_color(
            tempo_hue(bpm_from_crossing),
            activity_value(conditioner.activity(), config.scale),
        ),
    }
}

/// Mean absolute value over the `lookback` most recent samples.
pub fn axis_energy(history: &RingBuffer<f32, HISTORY_LEN>, lookback: usize) -> f32 {
    debug_assert!(lookback >= 1, "lookback must be >= 1");
    history.abs_sum(lookback) / lookback as f32
}

pub fn energy_channel(energy: f32, scale: f32) -> u8 {
    (energy * 255.0 * scale / ENERGY_FULL_SCALE).clamp(0.0, 255.0) as u8
}

/// 30 BPM maps to hue 0 and 250 BPM to hue 255.
pub fn tempo_hue(bpm: f32) -> u8 {
    let bpm = bpm.clamp(BPM_MIN, BPM_MAX);
    ((bpm - BPM_MIN) * 255.0 / (BPM_MAX - BPM_MIN)).clamp(0.0, 255.0) as u8
}

pub fn activity_value(activity: f32, scale: f32) -> u8 {
    let intensity = (scale * activity).clamp(INTENSITY_MIN, INTENSITY_MAX);
    ((intensity - INTENSITY_MIN) * 255.0 / (INTENSITY_MAX - INTENSITY_MIN)).clamp(0.0, 255.0) as u8
}

/// Fully saturated colour for `hue` at brightness `val`.
pub fn hue_color(hue: u8, val: u8) -> RGB8 {
    hsv2rgb(Hsv { hue, sat: 255, val })
}
