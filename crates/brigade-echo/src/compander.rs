//! Noise-reduction compander around the lossy delay path.
//!
//! A 2:1 compressor before the delay and a 1:2 expander after it, each with its
//! own peak envelope (1 ms attack, 50 ms release). Below the -20 dB threshold
//! both gains are exactly 1, so quiet material passes untouched.
//!
//! # Gain Law
//!
//! ```text
//! over      = 20·log10(env + 1e-6) + 20
//! compress  = -over · (1 - 1/2)   dB
//! expand    =  over · (2 - 1)     dB
//! gain      = clamp(10^(dB/20), 0.1, 3.0)
//! ```

use brigade_core::{EnvelopeFollower, Module, db_to_linear, linear_to_db};

/// Linear envelope level where gain reduction starts (-20 dB).
pub const THRESHOLD: f32 = 0.1;
/// Compression ratio; the expander applies the inverse.
pub const RATIO: f32 = 2.0;
/// Envelope attack in milliseconds.
pub const ATTACK_MS: f32 = 1.0;
/// Envelope release in milliseconds.
pub const RELEASE_MS: f32 = 50.0;

const MIN_GAIN: f32 = 0.1;
const MAX_GAIN: f32 = 3.0;

/// Compressor/expander pair with independent envelopes.
///
/// Before [`prepare`](Module::prepare) both envelope coefficients are zero, so
/// the envelopes stay at zero and every gain is 1.
#[derive(Debug, Clone)]
pub struct Compander {
    compress_env: EnvelopeFollower,
    expand_env: EnvelopeFollower,
}

impl Compander {
    /// Creates an unprepared compander (unity gain).
    pub fn new() -> Self {
        Self {
            compress_env: EnvelopeFollower::with_times(0.0, ATTACK_MS, RELEASE_MS),
            expand_env: EnvelopeFollower::with_times(0.0, ATTACK_MS, RELEASE_MS),
        }
    }

    /// Compresses one sample ahead of the delay.
    #[inline]
    pub fn compress(&mut self, input: f32) -> f32 {
        let envelope = self.compress_env.process(input);
        input * Self::gain(envelope, -(1.0 - 1.0 / RATIO))
    }

    /// Expands one sample after the delay.
    #[inline]
    pub fn expand(&mut self, input: f32) -> f32 {
        let envelope = self.expand_env.process(input);
        input * Self::gain(envelope, RATIO - 1.0)
    }

    /// Current `(compress, expand)` envelope levels.
    pub fn envelopes(&self) -> (f32, f32) {
        (self.compress_env.level(), self.expand_env.level())
    }

    /// `slope` is dB of gain per dB over threshold.
    #[inline]
    fn gain(envelope: f32, slope: f32) -> f32 {
        if envelope < THRESHOLD {
            return 1.0;
        }
        let over = linear_to_db(envelope + 1e-6) - linear_to_db(THRESHOLD);
        db_to_linear(over * slope).clamp(MIN_GAIN, MAX_GAIN)
    }
}

impl Default for Compander {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Compander {
    fn prepare(&mut self, sample_rate: f64) {
        self.compress_env.set_sample_rate(sample_rate as f32);
        self.expand_env.set_sample_rate(sample_rate as f32);
        self.reset();
    }

    fn reset(&mut self) {
        self.compress_env.reset();
        self.expand_env.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::TAU;

    fn prepared() -> Compander {
        let mut compander = Compander::new();
        compander.prepare(44100.0);
        compander
    }

    #[test]
    fn test_unprepared_is_unity() {
        let mut compander = Compander::new();
        for &x in &[0.0, 0.5, -2.0, 10.0] {
            assert_eq!(compander.compress(x), x);
            assert_eq!(compander.expand(x), x);
        }
        assert_eq!(compander.envelopes(), (0.0, 0.0));
    }

    #[test]
    fn test_below_threshold_round_trip_exact() {
        let mut compander = prepared();
        for n in 0..44100 {
            let x = 0.05 * libm::sinf(TAU * 220.0 * n as f32 / 44100.0);
            let c = compander.compress(x);
            let y = compander.expand(c);
            assert_eq!(y, x, "sample {n}");
        }
    }

    #[test]
    fn test_compression_reduces_loud_signal() {
        let mut compander = prepared();
        let mut y = 0.0;
        for _ in 0..4410 {
            y = compander.compress(1.0);
        }
        // Envelope ≈ 1.0 is 20 dB over; 2:1 takes off 10 dB.
        assert!((y - db_to_linear(-10.0)).abs() < 0.01, "got {y}");
    }

    #[test]
    fn test_expansion_boosts_loud_signal() {
        let mut compander = prepared();
        let mut y = 0.0;
        for _ in 0..4410 {
            y = compander.expand(0.5);
        }
        // 0.5 is ~14 dB over; 1:2 adds the same again, capped at 3x.
        let expected = (0.5 * db_to_linear(linear_to_db(0.5) + 20.0)).min(1.5);
        assert!((y - expected).abs() < 0.01, "got {y}, expected {expected}");
    }

    #[test]
    fn test_gain_clamped() {
        assert_eq!(Compander::gain(50.0, RATIO - 1.0), MAX_GAIN);
        assert_eq!(Compander::gain(1e6, -(1.0 - 1.0 / RATIO)), MIN_GAIN);
        assert_eq!(Compander::gain(0.099, -0.5), 1.0);
    }

    #[test]
    fn test_envelopes_independent() {
        let mut compander = prepared();
        for _ in 0..100 {
            compander.compress(1.0);
        }
        let (c, e) = compander.envelopes();
        assert!(c > 0.5);
        assert_eq!(e, 0.0);
    }

    #[test]
    fn test_reset_zeroes_envelopes() {
        let mut compander = prepared();
        for _ in 0..100 {
            compander.compress(1.0);
            compander.expand(1.0);
        }
        compander.reset();
        assert_eq!(compander.envelopes(), (0.0, 0.0));
    }
}
