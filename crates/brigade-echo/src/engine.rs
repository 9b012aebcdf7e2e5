//! Multi-channel engine: stage arena, cascade routing, bypass and final limiting.
//!
//! The engine owns `channels × 2` [`Stage`]s in one arena, addressed by
//! `stage * channels + channel`. Both stage slots are allocated up front, so
//! switching between standard and cascaded mode never allocates.
//!
//! # Routing
//!
//! ```text
//! Standard:  x → stage1 → tanh → y
//! Cascaded:  x → stage1 → stage2 (dry = stage1 output) → tanh → y
//! Bypassed:  x → tanh → y
//! ```
//!
//! # Threading
//!
//! Processing runs on one thread behind `&mut self`. The only shared state is
//! the bypass flag, reached through a cloneable [`BypassHandle`] and read once
//! per block.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use brigade_core::{DEFAULT_SEED, Module, soft_clip};

use crate::params::{CascadeMode, EngineParams};
use crate::stage::Stage;

/// Largest supported channel count (stereo).
pub const MAX_CHANNELS: usize = 2;
/// Stage slots per channel.
pub const STAGE_SLOTS: usize = 2;

/// Shared bypass switch.
///
/// Clones refer to the same flag. The control side stores with `Release`; the
/// engine loads with `Acquire` at the start of each block.
#[derive(Debug, Clone, Default)]
pub struct BypassHandle(Arc<AtomicBool>);

impl BypassHandle {
    /// Creates a handle in the active (not bypassed) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engage or release bypass.
    pub fn set_bypassed(&self, bypassed: bool) {
        self.0.store(bypassed, Ordering::Release);
    }

    /// Current bypass state.
    pub fn is_bypassed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Noise seed for an arena slot; slot 0 keeps the default seed.
fn slot_seed(slot: usize) -> u32 {
    DEFAULT_SEED.wrapping_add((slot as u32).wrapping_mul(0x9E37_79B9))
}

/// The echo processor for one mono or stereo stream.
///
/// # Example
///
/// ```rust
/// use brigade_echo::{Engine, EngineParams};
///
/// let mut engine = Engine::stereo();
/// engine.prepare(48000.0, 256);
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// left[0] = 1.0;
/// engine.process_block(&mut [&mut left[..], &mut right[..]], &EngineParams::default());
/// assert!(left.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug)]
pub struct Engine {
    stages: Vec<Stage>,
    channels: usize,
    sample_rate: f64,
    max_block_size: usize,
    bypass: BypassHandle,
    last_mode: Option<CascadeMode>,
}

impl Engine {
    /// Creates an unprepared engine. `channels` is clamped to 1..=2.
    pub fn new(channels: usize) -> Self {
        let channels = channels.clamp(1, MAX_CHANNELS);
        let stages = (0..channels * STAGE_SLOTS)
            .map(|slot| Stage::with_seed(slot_seed(slot)))
            .collect();
        Self {
            stages,
            channels,
            sample_rate: 0.0,
            max_block_size: 0,
            bypass: BypassHandle::new(),
            last_mode: None,
        }
    }

    /// One-channel engine.
    pub fn mono() -> Self {
        Self::new(1)
    }

    /// Two-channel engine.
    pub fn stereo() -> Self {
        Self::new(2)
    }

    /// Sizes every stage for `sample_rate` and clears all state.
    ///
    /// The only call that allocates.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize) {
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        for stage in &mut self.stages {
            stage.prepare(sample_rate);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "engine_prepare: {sample_rate} Hz, block {max_block_size}, {} ch, delay capacity {}",
            self.channels,
            self.delay_capacity()
        );
    }

    /// Clears all history without allocating.
    ///
    /// Output after a reset is bit-identical to output after `prepare` at the
    /// same sample rate.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("engine_reset: {} stages", self.stages.len());
    }

    /// Processes channel buffers in place.
    ///
    /// Buffer `i` is channel `i`. Buffers past the engine's channel count are
    /// silenced. The bypass flag is sampled once for the whole block.
    pub fn process_block(&mut self, buffers: &mut [&mut [f32]], params: &EngineParams) {
        self.track_mode(params.mode);
        let bypassed = self.bypass.is_bypassed();

        for (channel, buffer) in buffers.iter_mut().enumerate() {
            if channel >= self.channels {
                buffer.fill(0.0);
                continue;
            }
            if bypassed {
                for sample in buffer.iter_mut() {
                    *sample = soft_clip(*sample);
                }
                continue;
            }
            for sample in buffer.iter_mut() {
                *sample = self.run(channel, *sample, params);
            }
        }
    }

    /// Processes one sample of one channel. Bypass is not consulted.
    ///
    /// Channels past the engine's channel count produce silence.
    #[inline]
    pub fn process_sample(&mut self, channel: usize, input: f32, params: &EngineParams) -> f32 {
        if channel >= self.channels {
            return 0.0;
        }
        self.track_mode(params.mode);
        self.run(channel, input, params)
    }

    /// Handle for toggling bypass from another thread.
    pub fn bypass_handle(&self) -> BypassHandle {
        self.bypass.clone()
    }

    /// Engage or release bypass.
    pub fn set_bypassed(&self, bypassed: bool) {
        self.bypass.set_bypassed(bypassed);
    }

    /// Current bypass state.
    pub fn is_bypassed(&self) -> bool {
        self.bypass.is_bypassed()
    }

    /// Channel count (1 or 2).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample rate from the last prepare; 0 before.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Block size from the last prepare.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Delay buffer capacity per stage in samples.
    pub fn delay_capacity(&self) -> usize {
        self.stages.first().map_or(0, Stage::delay_capacity)
    }

    /// Mode seen by the most recent processing call.
    pub fn mode(&self) -> Option<CascadeMode> {
        self.last_mode
    }

    /// Each stage's output is the next stage's input (and dry signal).
    #[inline]
    fn run(&mut self, channel: usize, input: f32, params: &EngineParams) -> f32 {
        let mut signal = input;
        for stage in 0..params.mode.stage_count() {
            signal = self.stages[stage * self.channels + channel]
                .process_sample(signal, params.stage(stage));
        }
        soft_clip(signal)
    }

    #[inline]
    fn track_mode(&mut self, mode: CascadeMode) {
        if self.last_mode != Some(mode) {
            #[cfg(feature = "tracing")]
            tracing::debug!("engine_mode: {:?} -> {mode:?}", self.last_mode);
            self.last_mode = Some(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_count_clamped() {
        assert_eq!(Engine::new(0).channels(), 1);
        assert_eq!(Engine::new(2).channels(), 2);
        assert_eq!(Engine::new(8).channels(), 2);
        assert_eq!(Engine::new(8).stages.len(), 4);
    }

    #[test]
    fn test_slot_seeds_distinct() {
        let seeds: Vec<u32> = (0..MAX_CHANNELS * STAGE_SLOTS).map(slot_seed).collect();
        assert_eq!(seeds[0], DEFAULT_SEED);
        for i in 0..seeds.len() {
            for j in (i + 1)..seeds.len() {
                assert_ne!(seeds[i], seeds[j]);
            }
        }
    }

    #[test]
    fn test_prepare_records_configuration() {
        let mut engine = Engine::stereo();
        assert_eq!(engine.delay_capacity(), 0);
        engine.prepare(44100.0, 512);
        assert_eq!(engine.sample_rate(), 44100.0);
        assert_eq!(engine.max_block_size(), 512);
        assert_eq!(engine.delay_capacity(), 13234);
    }

    #[test]
    fn test_bypass_handle_shared() {
        let engine = Engine::mono();
        let handle = engine.bypass_handle();
        assert!(!engine.is_bypassed());
        handle.set_bypassed(true);
        assert!(engine.is_bypassed());
        engine.set_bypassed(false);
        assert!(!handle.is_bypassed());
    }

    #[test]
    fn test_mode_tracking() {
        let mut engine = Engine::mono();
        engine.prepare(44100.0, 64);
        assert_eq!(engine.mode(), None);
        let mut params = EngineParams::default();
        engine.process_sample(0, 0.0, &params);
        assert_eq!(engine.mode(), Some(CascadeMode::Standard));
        params.mode = CascadeMode::Cascaded;
        let mut block = [0.0f32; 8];
        engine.process_block(&mut [&mut block[..]], &params);
        assert_eq!(engine.mode(), Some(CascadeMode::Cascaded));
    }

    #[test]
    fn test_out_of_range_channel_is_silent() {
        let mut engine = Engine::mono();
        engine.prepare(44100.0, 64);
        assert_eq!(engine.process_sample(1, 0.9, &EngineParams::default()), 0.0);
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Engine>();
        assert_send::<BypassHandle>();
    }
}
