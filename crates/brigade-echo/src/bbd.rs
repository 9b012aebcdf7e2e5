//! Bucket-brigade device artifact model.
//!
//! Adds the three things a real BBD chip does to the signal passing through
//! it: a light 12-bit quantization grain, a pinkish clock/thermal noise floor
//! that rises with delay time, and gentle saturation.
//!
//! The noise source is seeded, so output is reproducible and [`reset`] replays
//! the same sequence.
//!
//! [`reset`]: Module::reset

use brigade_core::{DEFAULT_SEED, Module, PinkNoise, WhiteNoise, db_to_linear, soft_clip};

use crate::params::{DELAY_TIME_MAX_MS, clamp_finite};

/// Quantization steps per unit amplitude (12-bit).
const QUANT_STEPS: f32 = 4096.0;
/// Share of the quantized signal in the output blend.
const QUANT_BLEND: f32 = 0.05;
/// Noise floor at zero delay.
const NOISE_FLOOR_DB: f32 = -60.0;
/// Additional noise at the longest delay.
const NOISE_RISE_DB: f32 = 6.0;

/// Per-stage BBD artifact generator.
#[derive(Debug, Clone)]
pub struct BbdModel {
    white: WhiteNoise,
    pink: PinkNoise,
    last_noise: f32,
}

impl BbdModel {
    /// Creates a model with the default noise seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates a model whose noise starts from `seed`.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            white: WhiteNoise::new(seed),
            pink: PinkNoise::new(),
            last_noise: 0.0,
        }
    }

    /// Applies quantization, noise and saturation to one delayed sample.
    ///
    /// Output magnitude never exceeds 1.1.
    #[inline]
    pub fn process_sample(&mut self, input: f32, delay_time_ms: f32) -> f32 {
        let held = Self::quantize(input);
        let noise = self.next_noise(delay_time_ms);
        soft_clip((held + noise) * 0.9) * 1.1
    }

    /// Noise amplitude for a delay time: -60 dB rising to -54 dB at 300 ms.
    ///
    /// The delay time is clamped to [0, 300] ms, NaN to 0.
    pub fn noise_amplitude(delay_time_ms: f32) -> f32 {
        let delay_time_ms = clamp_finite(delay_time_ms, 0.0, DELAY_TIME_MAX_MS);
        db_to_linear(NOISE_FLOOR_DB + delay_time_ms / DELAY_TIME_MAX_MS * NOISE_RISE_DB)
    }

    #[inline]
    fn quantize(input: f32) -> f32 {
        let quantized = libm::roundf(input * QUANT_STEPS) / QUANT_STEPS;
        input * (1.0 - QUANT_BLEND) + quantized * QUANT_BLEND
    }

    #[inline]
    fn next_noise(&mut self, delay_time_ms: f32) -> f32 {
        let white = self.white.next_sample();
        let pink = self.pink.process(white);
        let noise = (pink * 0.8 + white * 0.2) * Self::noise_amplitude(delay_time_ms);
        let smoothed = self.last_noise * 0.3 + noise * 0.7;
        self.last_noise = smoothed;
        smoothed
    }
}

impl Default for BbdModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for BbdModel {
    fn prepare(&mut self, _sample_rate: f64) {
        self.reset();
    }

    fn reset(&mut self) {
        self.white.reset();
        self.pink.reset();
        self.last_noise = 0.0;
    }
}
