//! Fixed-capacity circular sample store with relative addressing.
//!
//! Index `-1` is the most recent value, `-2` the one before it, and `0` the
//! oldest. Any integer is a valid index: it is taken modulo the capacity, so
//! indices beyond `-N` alias older entries.

use heapless::Vec;
use num_traits::{Signed, Zero};

/// Circular buffer holding the `N` most recent values.
///
/// RAM cost: `N * size_of::<T>()` plus the cursor. The buffer starts filled
/// with `T::default()` and never reports itself as empty.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    buffer: Vec<T, N>,
    cursor: usize,
}

impl<T, const N: usize> RingBuffer<T, N>
where
    T: Copy + Default,
{
    /// Create a buffer filled with `T::default()`.
    pub fn new() -> Self {
        debug_assert!(N > 0, "RingBuffer capacity must be > 0");

        let mut buffer = Vec::new();
        // Filled once; the length stays N and push overwrites in place
        for _ in 0..N {
            let _ = buffer.push(T::default());
        }

        Self { buffer, cursor: 0 }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Overwrite the oldest value. Never fails.
    pub fn push(&mut self, value: T) {
        self.buffer[self.cursor] = value;
        self.cursor = (self.cursor + 1) % N;
    }

    /// Value at a relative index (`-1` = newest, `0` = oldest).
    pub fn at(&self, index: isize) -> T {
        let physical = (self.cursor as isize + index).rem_euclid(N as isize);
        self.buffer[physical as usize]
    }

    /// Most recently pushed value.
    pub fn latest(&self) -> T {
        self.at(-1)
    }

    /// Values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..N).map(move |i| self.at(i as isize))
    }

    /// Largest of the `count` most recent values, `None` when `count == 0`.
    pub fn max(&self, count: usize) -> Option<T>
    where
        T: PartialOrd,
    {
        self.recent(count).fold(None, |best, value| match best {
            Some(b) if b >= value => Some(b),
            _ => Some(value),
        })
    }

    /// Refill with `T::default()` and rewind the cursor.
    pub fn reset(&mut self) {
        for value in self.buffer.iter_mut() {
            *value = T::default();
        }
        self.cursor = 0;
    }

    /// The `count` most recent values, newest first. Wraps past `N`.
    fn recent(&self, count: usize) -> impl Iterator<Item = T> + '_ {
        (0..count).map(move |j| self.at(-1 - j as isize))
    }
}

impl<T, const N: usize> RingBuffer<T, N>
where
    T: Copy + Default + Zero,
{
    /// Sum of the `count` most recent values.
    ///
    /// If `count > N` entries are visited more than once.
    pub fn sum(&self, count: usize) -> T {
        self.recent(count).fold(T::zero(), |acc, value| acc + value)
    }
}

impl<T, const N: usize> RingBuffer<T, N>
where
    T: Copy + Default + Signed,
{
    /// Sum of `abs(value)` over the `count` most recent values.
    pub fn abs_sum(&self, count: usize) -> T {
        self.recent(count).fold(T::zero(), |acc, value| acc + value.abs())
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N>
where
    T: Copy + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_defaults() {
        let buf: RingBuffer<i32, 4> = RingBuffer::new();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.iter().count(), 4);
        assert_eq!(buf.at(-1), 0);
        assert_eq!(buf.sum(4), 0);
    }

    #[test]
    fn oldest_is_index_zero() {
        let mut buf: RingBuffer<i32, 3> = RingBuffer::new();
        buf.push(1);
        buf.push(2);
        buf.push(3);
        buf.push(4);

        // Holds [4, 2, 3] physically, oldest = 2
        assert_eq!(buf.at(0), 2);
        assert_eq!(buf.at(-1), 4);
    }

    #[test]
    fn large_negative_index_wraps() {
        let mut buf: RingBuffer<i32, 5> = RingBuffer::new();
        for v in 1..=5 {
            buf.push(v);
        }
        assert_eq!(buf.at(-1 - 5 * 7), buf.at(-1));
    }

    #[test]
    fn max_of_empty_window_is_none() {
        let buf: RingBuffer<i32, 4> = RingBuffer::new();
        assert_eq!(buf.max(0), None);
    }

    #[test]
    fn reset_clears_values() {
        let mut buf: RingBuffer<f32, 3> = RingBuffer::new();
        buf.push(5.0);
        buf.push(6.0);
        buf.reset();

        assert_eq!(buf.sum(3), 0.0);
        buf.push(1.0);
        assert_eq!(buf.at(0), 0.0);
        assert_eq!(buf.at(-1), 1.0);
    }
}
