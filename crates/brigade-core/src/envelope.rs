//! Envelope follower for tracking signal amplitude.
//!
//! Drives the gain computers of the compander: a peak detector with separate
//! attack and release time constants.

use crate::math::{flush_denormal, one_pole_coeff};

/// Peak envelope follower.
///
/// Each sample the rectified input is tracked with a one-pole lowpass:
///
/// ```text
/// env += coeff * (|x| - env)
/// ```
///
/// where `coeff` is the attack coefficient while the input is above the
/// envelope and the release coefficient otherwise. Coefficients come from
/// [`one_pole_coeff`], so a follower built with a sample rate of zero has both
/// coefficients at zero and holds its envelope at 0.0 until a real sample rate
/// arrives.
///
/// # Example
///
/// ```rust
/// use brigade_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 50.0);
/// let level = env.process(-0.5);
/// assert!(level > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    attack_ms: f32,
    release_ms: f32,
}

impl EnvelopeFollower {
    /// Create with specified attack and release times.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        let mut follower = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_ms,
            release_ms,
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Update sample rate and recalculate coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Process a sample and return the updated envelope level (always ≥ 0).
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input_abs = input.abs();

        let coeff = if input_abs > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        self.envelope = flush_denormal(self.envelope + coeff * (input_abs - self.envelope));
        self.envelope
    }

    /// Current envelope level without processing new input.
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = one_pole_coeff(self.attack_ms, self.sample_rate);
        self.release_coeff = one_pole_coeff(self.release_ms, self.sample_rate);
    }
}
