//! Bandwidth limiting after the BBD.
//!
//! Two 2nd-order Butterworth lowpasses in series: a fixed 5 kHz section that
//! models the chip's reconstruction filter, then a tone control sweeping from
//! 3 kHz (tone 0) to 8 kHz (tone 100).

use brigade_core::{BUTTERWORTH_Q, Biquad, Module};

use crate::params::clamp_finite;

/// Cutoff of the fixed reconstruction lowpass.
pub const FIXED_CUTOFF_HZ: f32 = 5000.0;
/// Tone cutoff at tone 0.
pub const TONE_MIN_HZ: f32 = 3000.0;
/// Tone cutoff span from tone 0 to tone 100.
pub const TONE_SPAN_HZ: f32 = 5000.0;
/// Smallest tone change, in percentage points, that recomputes coefficients.
pub const TONE_EPSILON: f32 = 0.1;

/// Cutoffs are held below this fraction of the sample rate.
const NYQUIST_GUARD: f32 = 0.49;

/// Fixed plus tone lowpass pair for one channel-stage.
#[derive(Debug, Clone)]
pub struct FilterStage {
    fixed: Biquad,
    tone: Biquad,
    sample_rate: f32,
    /// Tone that produced the current tone coefficients; negative when stale.
    last_tone: f32,
}

impl FilterStage {
    /// Creates an unprepared filter stage (pass-through).
    pub fn new() -> Self {
        Self {
            fixed: Biquad::new(),
            tone: Biquad::new(),
            sample_rate: 0.0,
            last_tone: -1.0,
        }
    }

    /// Filters one sample. `tone_percent` is clamped to [0, 100].
    #[inline]
    pub fn process_sample(&mut self, input: f32, tone_percent: f32) -> f32 {
        if self.sample_rate <= 0.0 {
            return input;
        }

        let tone = clamp_finite(tone_percent, 0.0, 100.0);
        if (tone - self.last_tone).abs() >= TONE_EPSILON {
            self.tone
                .set_lowpass(self.limit(Self::tone_cutoff(tone)), BUTTERWORTH_Q, self.sample_rate);
            self.last_tone = tone;
        }

        let filtered = self.fixed.process(input);
        self.tone.process(filtered)
    }

    /// Tone cutoff in Hz for a clamped tone percentage.
    pub fn tone_cutoff(tone_percent: f32) -> f32 {
        TONE_MIN_HZ + tone_percent / 100.0 * TONE_SPAN_HZ
    }

    /// Tone value behind the current tone coefficients, if any.
    pub fn applied_tone(&self) -> Option<f32> {
        (self.last_tone >= 0.0).then_some(self.last_tone)
    }

    fn limit(&self, cutoff: f32) -> f32 {
        cutoff.min(self.sample_rate * NYQUIST_GUARD)
    }
}

impl Default for FilterStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for FilterStage {
    fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate as f32;
        self.fixed
            .set_lowpass(self.limit(FIXED_CUTOFF_HZ), BUTTERWORTH_Q, self.sample_rate);
        self.reset();
    }

    fn reset(&mut self) {
        self.fixed.clear();
        self.tone.clear();
        self.last_tone = -1.0;
    }
}
