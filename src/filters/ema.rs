/// Single-pole exponential filter: `output = (1 - alpha) * output + alpha * input`
///
/// Pure function of the previous output and the new input. `alpha = 1.0`
/// passes the input through unchanged.
#[inline]
pub fn exp_filter(alpha: f32, input: f32, output: f32) -> f32 {
    debug_assert!(
        alpha > 0.0 && alpha <= 1.0,
        "EMA alpha must be in range (0.0, 1.0], got {}",
        alpha
    );

    (1.0 - alpha) * output + alpha * input
}

/// Exponential Moving Average filter state
///
/// Holds only the previous output, which starts at 0.0. There is no
/// seed-on-first-sample step: the first call blends from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmaFilter {
    previous: f32,
}

impl EmaFilter {
    pub const fn new() -> Self {
        Self { previous: 0.0 }
    }

    /// Apply the filter and return the new output.
    pub fn apply(&mut self, input: f32, alpha: f32) -> f32 {
        self.previous = exp_filter(alpha, input, self.previous);
        self.previous
    }

    /// Last output.
    pub fn value(&self) -> f32 {
        self.previous
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.previous = 0.0;
    }
}
