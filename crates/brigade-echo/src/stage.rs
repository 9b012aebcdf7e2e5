//! One complete echo stage for one channel.
//!
//! # Signal Flow
//!
//! ```text
//! input ─┬→ compress → delay (+feedback) → BBD → expand → filter ─→ wet ─┐
//!        └──────────────────────────────────────────────────────→ dry ─┴→ mix → output
//! ```
//!
//! No final limiting happens here; the engine applies it after the last stage.

use brigade_core::Module;

use crate::bbd::BbdModel;
use crate::compander::Compander;
use crate::delay_line::BbdDelayLine;
use crate::filter::FilterStage;
use crate::mix::MixStage;
use crate::params::StageParams;

/// Owns one of each chain module.
///
/// # Example
///
/// ```rust
/// use brigade_core::Module;
/// use brigade_echo::{Stage, StageParams};
///
/// let mut stage = Stage::new();
/// stage.prepare(44100.0);
/// let out = stage.process_sample(0.25, &StageParams::default());
/// assert!(out.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Stage {
    compander: Compander,
    delay: BbdDelayLine,
    bbd: BbdModel,
    filter: FilterStage,
    mix: MixStage,
}

impl Stage {
    /// Creates an unprepared stage with the default noise seed.
    pub fn new() -> Self {
        Self::with_seed(brigade_core::DEFAULT_SEED)
    }

    /// Creates an unprepared stage whose BBD noise starts from `seed`.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            compander: Compander::new(),
            delay: BbdDelayLine::new(),
            bbd: BbdModel::with_seed(seed),
            filter: FilterStage::new(),
            mix: MixStage::new(),
        }
    }

    /// Runs one sample through the chain, blending against `input` as dry.
    ///
    /// Controls are clamped into range first; NaN falls to the range minimum.
    #[inline]
    pub fn process_sample(&mut self, input: f32, params: &StageParams) -> f32 {
        let params = params.clamped();
        let compressed = self.compander.compress(input);
        let delayed =
            self.delay
                .process_sample(compressed, params.delay_time_ms, params.feedback_percent);
        let aged = self.bbd.process_sample(delayed, params.delay_time_ms);
        let expanded = self.compander.expand(aged);
        let filtered = self.filter.process_sample(expanded, params.tone_percent);
        self.mix.process_sample(input, filtered, params.mix_percent)
    }

    /// Delay buffer capacity in samples (0 before prepare).
    pub fn delay_capacity(&self) -> usize {
        self.delay.capacity()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Stage {
    fn prepare(&mut self, sample_rate: f64) {
        self.compander.prepare(sample_rate);
        self.delay.prepare(sample_rate);
        self.bbd.prepare(sample_rate);
        self.filter.prepare(sample_rate);
        self.mix.prepare(sample_rate);
    }

    fn reset(&mut self) {
        self.compander.reset();
        self.delay.reset();
        self.bbd.reset();
        self.filter.reset();
        self.mix.reset();
    }
}
