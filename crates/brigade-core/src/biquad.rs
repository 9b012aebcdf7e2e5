//! Biquad (bi-quadratic) filter structure.
//!
//! A generic second-order IIR section plus the RBJ Audio EQ Cookbook lowpass
//! coefficient formula. With `Q = 1/√2` the lowpass is a 2nd-order Butterworth,
//! which is what both filters in the echo's filter stage use.

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// Q factor of a 2nd-order Butterworth response.
pub const BUTTERWORTH_Q: f32 = 0.707;

/// Generic biquad filter coefficients and state.
///
/// Implements the Direct Form I biquad structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Feedforward coefficients
    b0: f32,
    b1: f32,
    b2: f32,

    /// Feedback coefficients (normalized by a0)
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    ///
    /// Initial state: `y[n] = x[n]` (no filtering)
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the biquad coefficients, normalizing by `a0`.
    ///
    /// Filter history is kept, so coefficient changes while running are
    /// continuous in state.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Configures this section as an RBJ lowpass.
    pub fn set_lowpass(&mut self, frequency: f32, q: f32, sample_rate: f32) {
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(frequency, q, sample_rate);
        self.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    /// Processes a single sample through the biquad filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the filter state (delay lines) without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculates low-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.707 for Butterworth response)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn lowpass_coefficients(
    frequency: f32,
    q: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Peak steady-state amplitude of a sine at `freq` through `biquad`.
    fn sine_gain(biquad: &mut Biquad, freq: f32, sample_rate: f32) -> f32 {
        let mut peak = 0.0f32;
        for i in 0..8192 {
            let x = libm::sinf(2.0 * PI * freq * i as f32 / sample_rate);
            let y = biquad.process(x);
            if i > 4096 {
                peak = peak.max(y.abs());
            }
        }
        peak
    }

    #[test]
    fn test_biquad_passthrough() {
        let mut biquad = Biquad::new();
        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = biquad.process(input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn test_biquad_clear() {
        let mut biquad = Biquad::new();
        for _ in 0..10 {
            biquad.process(1.0);
        }
        biquad.clear();
        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);
    }

    #[test]
    fn test_lowpass_coefficients_finite() {
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(5000.0, BUTTERWORTH_Q, 44100.0);
        for c in [b0, b1, b2, a0, a1, a2] {
            assert!(c.is_finite());
        }
        assert!(a0 > 0.0);
    }

    #[test]
    fn test_lowpass_dc_pass() {
        let mut biquad = Biquad::new();
        biquad.set_lowpass(1000.0, BUTTERWORTH_Q, 44100.0);
        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }
        assert!((output - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_butterworth_cutoff_is_minus_3db() {
        let sr = 44100.0;
        let mut biquad = Biquad::new();
        biquad.set_lowpass(5000.0, BUTTERWORTH_Q, sr);
        let gain = sine_gain(&mut biquad, 5000.0, sr);
        assert!((gain - 0.707).abs() < 0.03, "gain at cutoff = {gain}");
    }

    #[test]
    fn test_lowpass_attenuates_above_cutoff() {
        let sr = 44100.0;
        let mut biquad = Biquad::new();
        biquad.set_lowpass(3000.0, BUTTERWORTH_Q, sr);
        let gain = sine_gain(&mut biquad, 12000.0, sr);
        assert!(gain < 0.1, "gain an octave and a half above cutoff = {gain}");
    }
}
