use crate::ring_buffer::RingBuffer;

/// Simple moving average over a full window
///
/// Averages all `N` slots of the underlying buffer. Slots not yet written
/// still hold zero, so the output ramps up while the window fills.
/// RAM cost: N * 4 bytes.
#[derive(Debug, Clone)]
pub struct MovingAvgFilter<const N: usize> {
    history: RingBuffer<f32, N>,
}

impl<const N: usize> MovingAvgFilter<N> {
    pub fn new() -> Self {
        Self {
            history: RingBuffer::new(),
        }
    }

    /// Push a sample and return the mean of the window.
    pub fn apply(&mut self, input: f32) -> f32 {
        self.history.push(input);
        self.average()
    }

    /// Mean of the window without pushing.
    pub fn average(&self) -> f32 {
        self.history.sum(N) / N as f32
    }

    /// Samples fed so far, oldest to newest.
    pub fn history(&self) -> &RingBuffer<f32, N> {
        &self.history
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.history.reset();
    }
}

impl<const N: usize> Default for MovingAvgFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}
