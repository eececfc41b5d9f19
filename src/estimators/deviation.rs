use crate::filters::exp_filter;
use crate::ring_buffer::RingBuffer;
use crate::{HISTORY_LEN, TICK_MS};

/// Smallest lag scanned. Bounds the highest detectable tempo.
pub const MIN_LAG: usize = 12;

/// Smoothing of each lag's running deviation.
pub const ALPHA_DEVIATION: f32 = 0.02;

/// Lag-scan tempo estimator.
///
/// For every candidate lag `tau` in `MIN_LAG..HISTORY_LEN` it keeps a slow
/// running average of `|hp[-1] - hp[-1 - tau]|`. The lag with the smallest
/// running deviation is taken as the period. Runs every tick without an
/// activity gate, so under near-silence the chosen lag is close to arbitrary.
#[derive(Debug, Clone)]
pub struct DeviationEstimator {
    deviations: [f32; HISTORY_LEN],
    best_lag: Option<usize>,
}

impl DeviationEstimator {
    pub const fn new() -> Self {
        Self {
            deviations: [0.0; HISTORY_LEN],
            best_lag: None,
        }
    }

    /// Fold the newest sample of `history` into the table and rescan.
    pub fn update(&mut self, history: &RingBuffer<f32, HISTORY_LEN>) -> usize {
        let newest = history.at(-1);
        let mut best = MIN_LAG;

        for lag in MIN_LAG..HISTORY_LEN {
            let delayed = history.at(-1 - lag as isize);
            let deviation = exp_filter(
                ALPHA_DEVIATION,
                libm::fabsf(newest - delayed),
                self.deviations[lag],
            );
            self.deviations[lag] = deviation;

            // Strict comparison keeps the smallest lag on ties
            if deviation < self.deviations[best] {
                best = lag;
            }
        }

        self.best_lag = Some(best);
        best
    }

    /// Lag with the smallest running deviation, `None` before the first update.
    pub fn best_lag(&self) -> Option<usize> {
        self.best_lag
    }

    /// Tempo implied by the best lag, 0.0 before the first update.
    pub fn bpm(&self) -> f32 {
        match self.best_lag {
            Some(lag) => 60.0 * (1000.0 / TICK_MS as f32) / lag as f32,
            None => 0.0,
        }
    }

    /// Running deviation for `lag`, `None` outside the scanned range.
    pub fn deviation(&self, lag: usize) -> Option<f32> {
        (MIN_LAG..HISTORY_LEN)
            .contains(&lag)
            .then(|| self.deviations[lag])
    }
}

impl Default for DeviationEstimator {
    fn default() -> Self {
        Self::new()
    }
}
