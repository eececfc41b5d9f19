use log::trace;

use crate::ring_buffer::RingBuffer;
use crate::TICK_MS;

/// Activity level above which crossings are counted and LEDs step.
pub const ACTIVITY_THRESHOLD: f32 = 15.0;

/// Wall-clock span covered by the crossing window.
pub const CROSSING_WINDOW_MS: u32 = 12_000;

/// One flag per gated tick, so the capacity follows the tick period.
pub const CROSSING_WINDOW_LEN: usize = (CROSSING_WINDOW_MS / TICK_MS) as usize;

/// Beat period assumed until the first crossing is seen.
pub const INITIAL_PERIOD_MS: f32 = 5.0;

/// Ticks after an upward crossing during which it counts as recent.
pub const RECENT_CROSSING_TICKS: u16 = 10;

/// Threshold-gated zero-crossing tempo estimator.
///
/// Counts upward crossings of the high-pass signal over a fixed window.
/// Noisy or multi-modal motion produces extra crossings, so the estimate
/// leans high.
#[derive(Debug, Clone)]
pub struct CrossingEstimator {
    window: RingBuffer<u16, CROSSING_WINDOW_LEN>,
    last_sign: i8,
    interval_ticks: u16,
    crossed: bool,
    bpm: f32,
    period_ms: f32,
}

impl CrossingEstimator {
    pub fn new() -> Self {
        Self {
            window: RingBuffer::new(),
            last_sign: 0,
            interval_ticks: 0,
            crossed: false,
            bpm: 0.0,
            period_ms: INITIAL_PERIOD_MS,
        }
    }

    /// Process one tick's high-pass sample.
    ///
    /// Below the activity threshold nothing is pushed and the window keeps
    /// its contents.
    pub fn update(&mut self, sample: f32, activity: f32) {
        self.interval_ticks = self.interval_ticks.saturating_add(1);

        if activity > ACTIVITY_THRESHOLD {
            let mut flag = 0;

            if self.last_sign >= 0 && sample < 0.0 {
                self.last_sign = -1;
            } else if self.last_sign <= 0 && sample > 0.0 {
                self.last_sign = 1;
                self.interval_ticks = 0;
                self.crossed = true;
                flag = 1;
                trace!("upward crossing, sample {}", sample);
            }

            self.window.push(flag);
        }

        let count = self.crossing_count();
        self.bpm = 60_000.0 * count as f32 / CROSSING_WINDOW_MS as f32;

        if count > 0 {
            self.period_ms = 60_000.0 / self.bpm;
        }
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// Beat period from the latest non-zero estimate.
    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    /// Upward crossings currently in the window.
    pub fn crossing_count(&self) -> u16 {
        self.window.sum(CROSSING_WINDOW_LEN)
    }

    /// Ticks since the last upward crossing (or since reset).
    pub fn interval_ticks(&self) -> u16 {
        self.interval_ticks
    }

    /// True for a few ticks after an upward crossing.
    pub fn recent_crossing(&self) -> bool {
        self.crossed && self.interval_ticks < RECENT_CROSSING_TICKS
    }

    pub fn last_sign(&self) -> i8 {
        self.last_sign
    }
}

impl Default for CrossingEstimator {
    fn default() -> Self {
        Self::new()
    }
}
