//! Circular delay buffer with 4-point Hermite fractional reads.
//!
//! [`HermiteDelay`] is the storage half of a delay line: a ring of samples, a
//! write cursor and an interpolating read. Feedback policy lives with the
//! caller, so the same buffer serves any recirculating structure.
//!
//! # Read Convention
//!
//! The write cursor points at the slot the *next* sample goes into. A read at
//! `delay_samples = D` (before this sample's write) returns the sample written
//! `D` calls ago, so reading then writing gives true delay-line ordering with
//! no zero-sample feed-through.
//!
//! # Interpolation
//!
//! Fractional positions use the 4-point, 3rd-order Hermite (Catmull-Rom)
//! polynomial over the samples at `{i-1, i, i+1, i+2}`:
//!
//! ```text
//! c0 = y1
//! c1 = 0.5 (y2 - y0)
//! c2 = y0 - 2.5 y1 + 2 y2 - 0.5 y3
//! c3 = 0.5 (y3 - y0) + 1.5 (y1 - y2)
//! out = ((c3 t + c2) t + c1) t + c0
//! ```
//!
//! At `t = 0` the output is exactly `y1`, so integer delays are bit-exact.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Extra slots reserved past the longest delay for the interpolation taps.
pub const INTERPOLATION_GUARD: usize = 4;

/// Heap-allocated circular delay buffer with Hermite interpolation.
///
/// Starts empty (zero capacity). [`resize`](Self::resize) allocates and clears;
/// no other method allocates.
///
/// # Example
///
/// ```rust
/// use brigade_core::HermiteDelay;
///
/// let mut delay = HermiteDelay::with_capacity(64);
/// delay.write(1.0);
/// for _ in 0..9 {
///     delay.write(0.0);
/// }
/// // The impulse was written 10 writes ago.
/// assert_eq!(delay.read(10.0), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HermiteDelay {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl HermiteDelay {
    /// Creates an empty, zero-capacity buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cleared buffer holding `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Capacity needed for `max_seconds` of delay at `sample_rate`, including
    /// the interpolation guard: `ceil(sample_rate * max_seconds) + 4`.
    pub fn capacity_for(sample_rate: f64, max_seconds: f64) -> usize {
        let samples = (sample_rate * max_seconds).ceil().max(0.0) as usize;
        samples + INTERPOLATION_GUARD
    }

    /// Reallocates to `capacity` samples and clears all history.
    ///
    /// Call only from a prepare transition, never from the audio path.
    pub fn resize(&mut self, capacity: usize) {
        self.buffer = vec![0.0; capacity];
        self.write_pos = 0;
    }

    /// Reads a sample `delay_samples` behind the write cursor.
    ///
    /// Delays outside `[0, capacity]` are clamped. Returns 0.0 on an empty
    /// buffer.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        if len == 0 {
            return 0.0;
        }
        let len_f = len as f32;

        // NaN-safe clamp: f32::max/min return the non-NaN operand.
        let delay = delay_samples.max(0.0).min(len_f);
        let mut pos = self.write_pos as f32 - delay;
        while pos < 0.0 {
            pos += len_f;
        }
        while pos >= len_f {
            pos -= len_f;
        }

        let floor = libm::floorf(pos);
        let t = pos - floor;
        let i = (floor as usize) % len;

        let y0 = self.buffer[(i + len - 1) % len];
        let y1 = self.buffer[i];
        let y2 = self.buffer[(i + 1) % len];
        let y3 = self.buffer[(i + 2) % len];

        let c0 = y1;
        let c1 = 0.5 * (y2 - y0);
        let c2 = y0 - 2.5 * y1 + 2.0 * y2 - 0.5 * y3;
        let c3 = 0.5 * (y3 - y0) + 1.5 * (y1 - y2);

        ((c3 * t + c2) * t + c1) * t + c0
    }

    /// Writes a sample at the cursor and advances it circularly.
    ///
    /// No-op on an empty buffer.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        let len = self.buffer.len();
        if len == 0 {
            return;
        }
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % len;
    }

    /// Zeroes every sample and rewinds the cursor without reallocating.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Longest delay, in samples, that keeps all interpolation taps valid.
    pub fn max_delay(&self) -> usize {
        self.buffer.len().saturating_sub(INTERPOLATION_GUARD)
    }

    /// Returns `true` before the first [`resize`](Self::resize).
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Current write cursor, always in `[0, capacity)` when not empty.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_delay_exact() {
        let mut delay = HermiteDelay::with_capacity(16);
        for i in 1..=6 {
            delay.write(i as f32);
        }
        // Last written is 6 (1 write ago), so 3 writes ago is 4.
        assert_eq!(delay.read(3.0), 4.0);
        assert_eq!(delay.read(1.0), 6.0);
    }

    #[test]
    fn test_fractional_delay_on_ramp() {
        let mut delay = HermiteDelay::with_capacity(32);
        for i in 0..16 {
            delay.write(i as f32);
        }
        // Hermite reproduces a linear ramp exactly.
        let output = delay.read(2.5);
        assert!((output - 13.5).abs() < 1e-4, "Expected 13.5, got {output}");
    }

    #[test]
    fn test_wrap_around() {
        let mut delay = HermiteDelay::with_capacity(8);
        for i in 0..13 {
            delay.write(i as f32);
        }
        assert_eq!(delay.read(4.0), 9.0);
        assert!(delay.read(6.5).is_finite());
        assert!(delay.write_pos() < delay.capacity());
    }

    #[test]
    fn test_smooth_signal_accuracy() {
        let mut delay = HermiteDelay::with_capacity(64);
        for i in 0..32 {
            delay.write(libm::sinf(i as f32 * core::f32::consts::TAU / 32.0));
        }
        // 5.5 writes ago = sample index 26.5
        let expected = libm::sinf(26.5 * core::f32::consts::TAU / 32.0);
        let output = delay.read(5.5);
        assert!((output - expected).abs() < 1e-3, "got {output}, expected {expected}");
    }

    #[test]
    fn test_empty_buffer() {
        let mut delay = HermiteDelay::new();
        assert!(delay.is_empty());
        assert_eq!(delay.read(10.0), 0.0);
        delay.write(1.0);
        assert_eq!(delay.capacity(), 0);
        assert_eq!(delay.max_delay(), 0);
    }

    #[test]
    fn test_out_of_range_delay_clamped() {
        let mut delay = HermiteDelay::with_capacity(8);
        for i in 0..8 {
            delay.write(i as f32);
        }
        assert!(delay.read(1000.0).is_finite());
        assert!(delay.read(-3.0).is_finite());
        assert!(delay.read(f32::NAN).is_finite());
    }

    #[test]
    fn test_capacity_for() {
        assert_eq!(HermiteDelay::capacity_for(44100.0, 0.3), 13230 + 4);
        assert_eq!(HermiteDelay::capacity_for(48000.0, 0.3), 14400 + 4);
    }

    #[test]
    fn test_resize_and_clear() {
        let mut delay = HermiteDelay::with_capacity(8);
        delay.write(1.0);
        delay.resize(16);
        assert_eq!(delay.capacity(), 16);
        assert_eq!(delay.write_pos(), 0);
        assert_eq!(delay.read(1.0), 0.0);

        delay.write(0.5);
        delay.clear();
        assert_eq!(delay.read(1.0), 0.0);
        assert_eq!(delay.capacity(), 16);
    }
}
