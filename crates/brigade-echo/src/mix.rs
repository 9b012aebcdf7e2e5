//! Equal-power dry/wet blend with a smoothed mix control.

use brigade_core::{Module, SmoothedParam, equal_power_gains};

use crate::params::clamp_finite;

/// Time constant of the mix smoother.
pub const MIX_SMOOTHING_MS: f32 = 5.0;

/// Dry/wet mixer for one channel-stage.
///
/// The mix ratio glides toward each requested value (5 ms one-pole) and starts
/// from fully dry after `prepare` or `reset`.
///
/// # Example
///
/// ```rust
/// use brigade_core::Module;
/// use brigade_echo::MixStage;
///
/// let mut mix = MixStage::new();
/// mix.prepare(48000.0);
/// // Freshly prepared: fully dry on the first sample.
/// let out = mix.process_sample(1.0, 0.0, 0.0);
/// assert_eq!(out, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct MixStage {
    mix: SmoothedParam,
}

impl MixStage {
    /// Creates an unprepared mixer; the ratio stays at 0 until prepared.
    pub fn new() -> Self {
        Self {
            mix: SmoothedParam::with_config(0.0, 0.0, MIX_SMOOTHING_MS),
        }
    }

    /// Blends `dry` and `wet`; `mix_percent` is clamped to [0, 100].
    #[inline]
    pub fn process_sample(&mut self, dry: f32, wet: f32, mix_percent: f32) -> f32 {
        self.mix
            .set_target(clamp_finite(mix_percent, 0.0, 100.0) / 100.0);
        let (dry_gain, wet_gain) = equal_power_gains(self.mix.advance());
        dry * dry_gain + wet * wet_gain
    }

    /// Current smoothed mix ratio in [0, 1].
    pub fn ratio(&self) -> f32 {
        self.mix.get()
    }
}

impl Default for MixStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for MixStage {
    fn prepare(&mut self, sample_rate: f64) {
        self.mix.set_sample_rate(sample_rate as f32);
        self.reset();
    }

    fn reset(&mut self) {
        self.mix.set_immediate(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared() -> MixStage {
        let mut mix = MixStage::new();
        mix.prepare(44100.0);
        mix
    }

    /// Runs long enough (~75 ms, 15 time constants) for the ratio to settle.
    fn settle(mix: &mut MixStage, percent: f32) {
        for _ in 0..3308 {
            mix.process_sample(0.0, 0.0, percent);
        }
    }

    #[test]
    fn test_fully_dry_endpoint() {
        let mut mix = prepared();
        settle(&mut mix, 0.0);
        assert_eq!(mix.process_sample(0.3, 0.9, 0.0), 0.3);
    }

    #[test]
    fn test_fully_wet_endpoint() {
        let mut mix = prepared();
        settle(&mut mix, 100.0);
        let out = mix.process_sample(0.3, 0.9, 100.0);
        assert!((out - 0.9).abs() < 1e-4, "got {out}");
    }

    #[test]
    fn test_half_mix_is_equal_power() {
        let mut mix = prepared();
        settle(&mut mix, 50.0);
        let out = mix.process_sample(1.0, 1.0, 50.0);
        assert!((out - core::f32::consts::SQRT_2).abs() < 1e-4, "got {out}");
    }

    #[test]
    fn test_mix_is_smoothed() {
        let mut mix = prepared();
        mix.process_sample(0.0, 0.0, 100.0);
        let first = mix.ratio();
        assert!(first > 0.0 && first < 0.01, "first step {first}");
    }

    #[test]
    fn test_mix_clamped() {
        let mut mix = prepared();
        settle(&mut mix, 400.0);
        assert!((mix.ratio() - 1.0).abs() < 1e-4);
        settle(&mut mix, -50.0);
        assert!(mix.ratio().abs() < 1e-4);
    }

    #[test]
    fn test_reset_returns_to_dry() {
        let mut mix = prepared();
        settle(&mut mix, 100.0);
        mix.reset();
        assert_eq!(mix.ratio(), 0.0);
    }

    #[test]
    fn test_unprepared_stays_dry() {
        let mut mix = MixStage::new();
        for _ in 0..100 {
            assert_eq!(mix.process_sample(0.5, 1.0, 100.0), 0.5);
        }
    }
}
