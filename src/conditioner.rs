//! Motion conditioning.
//!
//! Raw accelerometer samples are de-biased and smoothed per axis when they
//! arrive. Once per tick the working vector is reduced to a norm, a moving
//! average of the norm is subtracted, and the scaled difference becomes the
//! high-pass oscillation signal that both tempo estimators consume.
//!
//! The norm of an oscillating vector swings twice per cycle, so the
//! high-pass signal can show double the physical frequency. Downstream
//! consumers tolerate this.

use crate::config::Config;
use crate::filters::{EmaFilter, MovingAvgFilter};
use crate::ring_buffer::RingBuffer;
use crate::HISTORY_LEN;

/// Fast smoothing applied to the norm when `filter_all` is set.
pub const ALPHA_FAST: f32 = 0.3;

/// Smoothing of the activity level.
pub const ALPHA_ACTIVE: f32 = 0.03;

/// Gain applied to the norm minus its moving average.
pub const HIGH_PASS_GAIN: f32 = 10.0;

/// One accelerometer reading as delivered by the sensor driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Per-axis filter state and history.
#[derive(Debug, Clone)]
pub struct AxisState {
    slow_average: EmaFilter,
    smoothed: EmaFilter,
    low_pass: EmaFilter,
    history: RingBuffer<f32, HISTORY_LEN>,
}

impl AxisState {
    pub fn new() -> Self {
        Self {
            slow_average: EmaFilter::new(),
            smoothed: EmaFilter::new(),
            low_pass: EmaFilter::new(),
            history: RingBuffer::new(),
        }
    }

    /// Slow average of the raw axis (orientation and gravity bias).
    pub fn slow_average(&self) -> f32 {
        self.slow_average.value()
    }

    pub fn smoothed(&self) -> f32 {
        self.smoothed.value()
    }

    /// Slow low-pass of the working value, updated once per tick.
    pub fn low_pass(&self) -> f32 {
        self.low_pass.value()
    }

    /// Working values pushed once per tick.
    pub fn history(&self) -> &RingBuffer<f32, HISTORY_LEN> {
        &self.history
    }

    fn condition(&mut self, raw: f32, config: &Config) -> f32 {
        let mut value = raw;

        if config.high_pass {
            value -= self.slow_average.apply(raw, config.alpha_slow);
        }

        if config.smooth {
            value = self.smoothed.apply(value, config.alpha_smooth);
        }

        value
    }

    fn record(&mut self, value: f32, alpha_slow: f32) {
        self.history.push(value);
        self.low_pass.apply(value, alpha_slow);
    }
}

impl Default for AxisState {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of one conditioning tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Conditioned {
    pub working: Vector3,
    pub high_pass: f32,
    pub activity: f32,
}

#[derive(Debug, Clone)]
pub struct MotionConditioner {
    axes: [AxisState; 3],
    working: Vector3,
    smoothed_norm: EmaFilter,
    norm_average: MovingAvgFilter<HISTORY_LEN>,
    high_pass: RingBuffer<f32, HISTORY_LEN>,
    activity: EmaFilter,
}

impl MotionConditioner {
    pub fn new() -> Self {
        Self {
            axes: core::array::from_fn(|_| AxisState::new()),
            working: Vector3::default(),
            smoothed_norm: EmaFilter::new(),
            norm_average: MovingAvgFilter::new(),
            high_pass: RingBuffer::new(),
            activity: EmaFilter::new(),
        }
    }

    /// Fold a raw sample into the per-axis averages and store the working vector.
    ///
    /// May run at the sensor rate, independently of the tick. It is the only
    /// path that touches the per-axis bias and smoothing filters.
    pub fn ingest(&mut self, raw: RawSample, config: &Config) {
        let [x, y, z] = &mut self.axes;
        self.working = Vector3 {
            x: x.condition(raw.x as f32, config),
            y: y.condition(raw.y as f32, config),
            z: z.condition(raw.z as f32, config),
        };
    }

    /// Run the per-tick stage on the latest working vector.
    pub fn tick(&mut self, config: &Config) -> Conditioned {
        let working = self.working;

        for (axis, value) in self.axes.iter_mut().zip([working.x, working.y, working.z]) {
            axis.record(value, config.alpha_slow);
        }

        let alpha = if config.filter_all { ALPHA_FAST } else { 1.0 };
        let smoothed = self.smoothed_norm.apply(working.norm(), alpha);

        // The moving average over the full window is the low-pass of the norm
        let low_pass = self.norm_average.apply(smoothed);

        let sample = HIGH_PASS_GAIN * (smoothed - low_pass);
        self.high_pass.push(sample);

        let activity = self.activity.apply(libm::fabsf(sample), ALPHA_ACTIVE);

        Conditioned {
            working,
            high_pass: sample,
            activity,
        }
    }

    pub fn working(&self) -> Vector3 {
        self.working
    }

    pub fn axis(&self, axis: Axis) -> &AxisState {
        &self.axes[axis as usize]
    }

    /// Smoothed norm history feeding the moving average.
    pub fn norm_history(&self) -> &RingBuffer<f32, HISTORY_LEN> {
        self.norm_average.history()
    }

    /// Moving average of the smoothed norm.
    pub fn norm_low_pass(&self) -> f32 {
        self.norm_average.average()
    }

    pub fn high_pass(&self) -> &RingBuffer<f32, HISTORY_LEN> {
        &self.high_pass
    }

    pub fn activity(&self) -> f32 {
        self.activity.value()
    }
}

impl Default for MotionConditioner {
    fn default() -> Self {
        Self::new()
    }
}
