//! Recirculating bucket-brigade delay line.
//!
//! Wraps a [`HermiteDelay`] sized for the longest supported echo (300 ms) and
//! adds the feedback path. Both the feedback tap and the written sample pass
//! through `tanh`, so the loop saturates instead of running away even at the
//! 95% feedback ceiling.
//!
//! ```text
//! delayed = read(delay)
//! write(tanh(input + tanh(delayed * feedback)))
//! output  = delayed
//! ```

use brigade_core::{HermiteDelay, Module, ms_to_samples, soft_clip};

use crate::params::{DELAY_TIME_MAX_MS, clamp_finite};

/// Largest normalized feedback amount.
pub const MAX_FEEDBACK: f32 = 0.95;

/// Feedback delay line with fractional delay times.
///
/// Until [`prepare`](Module::prepare) the buffer is empty and the line passes
/// its input straight through.
///
/// # Example
///
/// ```rust
/// use brigade_core::Module;
/// use brigade_echo::BbdDelayLine;
///
/// let mut line = BbdDelayLine::new();
/// line.prepare(1000.0);
/// assert_eq!(line.process_sample(0.5, 20.0, 0.0), 0.0);
/// for _ in 0..19 {
///     line.process_sample(0.0, 20.0, 0.0);
/// }
/// // 20 ms at 1 kHz: the sample written 20 calls ago comes back.
/// assert!((line.process_sample(0.0, 20.0, 0.0) - 0.5f32.tanh()).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BbdDelayLine {
    buffer: HermiteDelay,
    sample_rate: f64,
}

impl BbdDelayLine {
    /// Creates an unprepared (pass-through) delay line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one sample; returns the delayed signal.
    ///
    /// `delay_time_ms` is converted to samples and clamped to
    /// `[1, capacity - 4]`; `feedback_percent` is normalized and clamped to
    /// `[0, 0.95]`.
    #[inline]
    pub fn process_sample(&mut self, input: f32, delay_time_ms: f32, feedback_percent: f32) -> f32 {
        if self.buffer.is_empty() {
            return input;
        }

        let feedback = clamp_finite(feedback_percent / 100.0, 0.0, MAX_FEEDBACK);
        let delay_samples = clamp_finite(
            ms_to_samples(delay_time_ms, self.sample_rate as f32),
            1.0,
            self.buffer.max_delay() as f32,
        );

        let delayed = self.buffer.read(delay_samples);
        let feedback_signal = soft_clip(delayed * feedback);
        self.buffer.write(soft_clip(input + feedback_signal));

        delayed
    }

    /// Buffer capacity in samples (0 before prepare).
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Sample rate from the last prepare.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

impl Module for BbdDelayLine {
    fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        let capacity =
            HermiteDelay::capacity_for(sample_rate, f64::from(DELAY_TIME_MAX_MS) / 1000.0);
        self.buffer.resize(capacity);
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}
