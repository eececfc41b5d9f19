#![no_std]

//! Motion-reactive LED colour mode for a small wearable.
//!
//! A noisy 3-axis accelerometer stream is conditioned into a high-pass
//! oscillation signal and a slow activity level. Two independent tempo
//! estimators (lag scan and zero crossings) run on that signal, and the
//! colour mapper and animation scheduler turn the estimates into a frame
//! for a six-LED ring.
//!
//! Everything is fixed-size and heap-free. One external periodic tick drives
//! the whole pipeline through [`ModeController::tick`].

mod config;
mod submode;
pub mod animation;
pub mod color;
pub mod conditioner;
pub mod engine;
pub mod estimators;
pub mod filters;
pub mod input;
pub mod peripherals;
pub mod ring_buffer;
pub mod state;

/// Period of the update tick in milliseconds.
pub const TICK_MS: u32 = 16;

/// Capacity of every signal history buffer.
pub const HISTORY_LEN: usize = 120;

pub use animation::{AnimationScheduler, DisplayMethod, LED_COUNT, LED_ORDER, LEDS_OFF, LedFrame};
pub use color::ColorStrategy;
pub use conditioner::{Axis, AxisState, MotionConditioner, RawSample, Vector3};
pub use config::{Config, ConfigError, Overrides, Route};
pub use engine::{MotionEngine, Readout, Step};
pub use estimators::{CrossingEstimator, DeviationEstimator};
pub use input::{BUTTON_LEFT, BUTTON_RIGHT, Buttons};
pub use peripherals::{BallPhysics, Display, LedDriver, SpectralEngine};
pub use ring_buffer::RingBuffer;
pub use smart_leds::RGB8;
pub use state::{BRIGHTNESS_DIVISORS, ModeController, ModeState};
pub use submode::Submode;
