//! Parameter handling with smoothing for zipper-free changes.
//!
//! Control values arrive once per block; applying them instantly produces
//! audible "zipper noise". [`SmoothedParam`] glides toward each new target
//! with a one-pole lowpass, one step per sample.
//!
//! ## Usage
//!
//! ```rust
//! use brigade_core::SmoothedParam;
//!
//! let mut mix = SmoothedParam::with_config(0.0, 48000.0, 5.0);
//! mix.set_target(1.0);
//!
//! for _ in 0..240 { // 5ms at 48kHz
//!     let _smoothed = mix.advance();
//! }
//! assert!(mix.get() > 0.6);
//! ```

use crate::math::one_pole_coeff;

/// A parameter with built-in exponential smoothing.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Target value we're smoothing towards
    target: f32,
    /// Smoothing coefficient (0 = frozen, 1 = instant)
    coeff: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Smoothing time in milliseconds
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a new smoothed parameter that snaps instantly to new targets.
    ///
    /// Use [`with_config`](Self::with_config) for a smoothed one.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate: 0.0,
            smoothing_time_ms: 0.0,
        }
    }

    /// Create a smoothed parameter with full configuration.
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_coeff();
        param
    }

    /// Set the target value (parameter will smooth towards this).
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and immediately snap to it (no smoothing).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update sample rate and recalculate smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Get the next smoothed value (advances by one sample).
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Get the current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// `coeff = 1 - exp(-1 / (tau * sample_rate))`; a zero smoothing time
    /// means instant response.
    fn recalculate_coeff(&mut self) {
        self.coeff = if self.smoothing_time_ms <= 0.0 {
            1.0
        } else {
            one_pole_coeff(self.smoothing_time_ms, self.sample_rate)
        };
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::expf;

    #[test]
    fn smoothed_param_instant_when_no_smoothing() {
        let mut param = SmoothedParam::with_config(1.0, 48000.0, 0.0);

        param.set_target(0.5);
        let val = param.advance();
        assert!((val - 0.5).abs() < 1e-6, "Should snap instantly");
    }

    #[test]
    fn smoothed_param_converges() {
        let mut param = SmoothedParam::with_config(0.0, 48000.0, 5.0);
        param.set_target(1.0);

        // 15 time constants
        for _ in 0..(48000 * 75 / 1000) {
            param.advance();
        }

        assert!(
            (param.get() - 1.0).abs() < 1e-5,
            "Should converge to target, got {}",
            param.get()
        );
    }

    #[test]
    fn smoothed_param_gradual_approach() {
        let mut param = SmoothedParam::with_config(0.0, 48000.0, 10.0);
        param.set_target(1.0);

        let samples_for_time_constant = (48000.0 * 0.010) as usize;
        for _ in 0..samples_for_time_constant {
            param.advance();
        }

        let expected = 1.0 - expf(-1.0);
        assert!(
            (param.get() - expected).abs() < 0.05,
            "After one time constant, expected ~{}, got {}",
            expected,
            param.get()
        );
    }

    #[test]
    fn smoothed_param_holds_exact_value_at_target() {
        let mut param = SmoothedParam::with_config(0.0, 44100.0, 5.0);
        param.set_target(0.0);
        for _ in 0..1000 {
            assert_eq!(param.advance(), 0.0);
        }
    }

    #[test]
    fn smoothed_param_set_immediate() {
        let mut param = SmoothedParam::with_config(0.0, 44100.0, 5.0);
        param.set_immediate(0.7);
        assert_eq!(param.get(), 0.7);
        assert_eq!(param.advance(), 0.7);
    }
}
