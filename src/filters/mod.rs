/// Filter primitives
///
/// Single-pole exponential filter and a full-window moving average. Both work
/// on `f32` samples; window aggregates (sum, abs-sum, max) live on
/// [`RingBuffer`](crate::RingBuffer).
mod ema;
mod moving_avg;

pub use ema::{EmaFilter, exp_filter};
pub use moving_avg::MovingAvgFilter;

/// Validate an exponential filter coefficient
pub const fn validate_alpha(alpha: f32) -> Result<(), &'static str> {
    if alpha <= 0.0 || alpha > 1.0 {
        return Err("EMA alpha must be in range (0.0, 1.0]");
    }
    Ok(())
}
