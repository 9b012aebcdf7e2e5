//! Mathematical utility functions for DSP.
//!
//! Allocation-free helpers shared by every module in the signal chain.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Saturation
//!
//! - [`soft_clip`] - Hyperbolic tangent, the only limiter used anywhere in the
//!   echo path. Every feedback write and every output goes through it.
//!
//! # Smoothing and Mixing
//!
//! - [`one_pole_coeff`] - Time constant to per-sample one-pole coefficient
//! - [`equal_power_gains`] - Sine/cosine crossfade law
//!
//! # Utilities
//!
//! - [`ms_to_samples`] - Time conversion
//! - [`flush_denormal`] - Subnormal protection for recursive state

use libm::{cosf, expf, log10f, powf, sinf, tanhf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use brigade_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-6);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    powf(10.0, db / 20.0)
}

/// Convert linear gain to decibels.
///
/// Values at or below zero are floored at 1e-10 (-200 dB) so the result is
/// always finite.
///
/// # Example
/// ```rust
/// use brigade_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.1) - (-20.0)).abs() < 0.001);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    20.0 * log10f(linear.max(1e-10))
}

/// Soft clip using hyperbolic tangent.
///
/// Smooth saturation that approaches ±1 asymptotically. Never hard-clips, so
/// recirculating signals compress gracefully instead of folding or aliasing.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Convert milliseconds to samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// One-pole smoothing coefficient for a time constant.
///
/// `coeff = 1 - exp(-1 / (tau * sample_rate))` with `tau = time_ms / 1000`.
/// Used as `y += coeff * (target - y)`; after one time constant the output has
/// covered 63.2% of a step.
///
/// Returns 0.0 (frozen) when either argument is not positive, which is the
/// state of every follower before its module is prepared.
///
/// # Example
/// ```rust
/// use brigade_core::one_pole_coeff;
///
/// let c = one_pole_coeff(5.0, 48000.0);
/// assert!(c > 0.0 && c < 0.01);
/// assert_eq!(one_pole_coeff(5.0, 0.0), 0.0);
/// ```
#[inline]
pub fn one_pole_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    if time_ms <= 0.0 || sample_rate <= 0.0 {
        return 0.0;
    }
    1.0 - expf(-1.0 / (time_ms * 0.001 * sample_rate))
}

/// Equal-power crossfade gains for a mix ratio in \[0.0, 1.0\].
///
/// Returns `(dry_gain, wet_gain)` = `(cos(mix·π/2), sin(mix·π/2))`, so
/// `dry_gain² + wet_gain² = 1` across the whole range.
///
/// # Example
/// ```rust
/// use brigade_core::equal_power_gains;
///
/// let (dry, wet) = equal_power_gains(0.5);
/// assert!((dry * dry + wet * wet - 1.0).abs() < 1e-6);
/// assert!((dry - wet).abs() < 1e-6);
/// ```
#[inline]
pub fn equal_power_gains(mix: f32) -> (f32, f32) {
    let angle = mix * core::f32::consts::FRAC_PI_2;
    (cosf(angle), sinf(angle))
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures. Values
/// below 1e-20 are replaced with zero, well before the IEEE 754 subnormal range.
///
/// Use this on recursive state that can decay indefinitely toward zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
