//! Control snapshots and the named-parameter layout.
//!
//! A host hands the engine one [`EngineParams`] per processing call. Values are
//! plain `Copy` data with no identity; the engine clamps them as it reads, so
//! any finite snapshot is safe to process.
//!
//! ## Parameter Indices (`ParameterInfo`)
//!
//! | Index | Id | Name | Range | Default |
//! |-------|----|------|-------|---------|
//! | 0 | `delayTime` | Delay Time | 20–300 ms | 100 |
//! | 1 | `feedback` | Feedback | 0–95% | 30 |
//! | 2 | `mix` | Mix | 0–100% | 50 |
//! | 3 | `tone` | Tone | 0–100% | 70 |
//! | 4 | `mode` | Mode | 0 Standard / 1 Cascaded | 0 |
//! | 5 | `delayTime2` | Delay Time 2 | 20–300 ms | 100 |
//! | 6 | `feedback2` | Feedback 2 | 0–95% | 30 |
//! | 7 | `mix2` | Mix 2 | 0–100% | 50 |
//! | 8 | `tone2` | Tone 2 | 0–100% | 70 |

use brigade_core::{ParamDescriptor, ParamId, ParameterInfo};

use crate::error::ParamError;

/// Shortest selectable delay in milliseconds.
pub const DELAY_TIME_MIN_MS: f32 = 20.0;
/// Longest selectable delay in milliseconds.
pub const DELAY_TIME_MAX_MS: f32 = 300.0;
/// Feedback ceiling in percent.
pub const FEEDBACK_MAX_PERCENT: f32 = 95.0;

/// NaN-safe clamp: `f32::max`/`min` return the non-NaN operand.
#[inline]
pub(crate) fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Controls for one echo stage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageParams {
    /// Delay time in milliseconds, 20–300.
    pub delay_time_ms: f32,
    /// Feedback in percent, 0–95.
    pub feedback_percent: f32,
    /// Wet/dry mix in percent, 0–100.
    pub mix_percent: f32,
    /// Tone in percent, 0–100 (3 kHz to 8 kHz lowpass).
    pub tone_percent: f32,
}

impl StageParams {
    /// Returns a copy with every field clamped into its range.
    pub fn clamped(&self) -> Self {
        Self {
            delay_time_ms: clamp_finite(self.delay_time_ms, DELAY_TIME_MIN_MS, DELAY_TIME_MAX_MS),
            feedback_percent: clamp_finite(self.feedback_percent, 0.0, FEEDBACK_MAX_PERCENT),
            mix_percent: clamp_finite(self.mix_percent, 0.0, 100.0),
            tone_percent: clamp_finite(self.tone_percent, 0.0, 100.0),
        }
    }

    fn get(&self, field: usize) -> f32 {
        match field {
            0 => self.delay_time_ms,
            1 => self.feedback_percent,
            2 => self.mix_percent,
            3 => self.tone_percent,
            _ => 0.0,
        }
    }

    fn set(&mut self, field: usize, value: f32) {
        match field {
            0 => self.delay_time_ms = value,
            1 => self.feedback_percent = value,
            2 => self.mix_percent = value,
            3 => self.tone_percent = value,
            _ => {}
        }
    }
}

impl Default for StageParams {
    fn default() -> Self {
        Self {
            delay_time_ms: 100.0,
            feedback_percent: 30.0,
            mix_percent: 50.0,
            tone_percent: 70.0,
        }
    }
}

/// Topology of the echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CascadeMode {
    /// One stage per channel.
    #[default]
    Standard,
    /// Stage 1 output feeds a second, independently configured stage.
    Cascaded,
}

impl CascadeMode {
    /// Decodes the host's float switch: anything above 0.5 is cascaded.
    pub fn from_value(value: f32) -> Self {
        if value > 0.5 {
            CascadeMode::Cascaded
        } else {
            CascadeMode::Standard
        }
    }

    /// Encodes as the host's float switch.
    pub fn as_value(self) -> f32 {
        match self {
            CascadeMode::Standard => 0.0,
            CascadeMode::Cascaded => 1.0,
        }
    }

    /// Number of stages this mode runs per channel.
    pub fn stage_count(self) -> usize {
        match self {
            CascadeMode::Standard => 1,
            CascadeMode::Cascaded => 2,
        }
    }
}

/// Complete control snapshot for one processing call.
///
/// # Example
///
/// ```rust
/// use brigade_echo::{CascadeMode, EngineParams};
///
/// let params = EngineParams::from_named([
///     ("mode", 1.0),
///     ("delayTime2", 250.0),
///     ("mix2", 40.0),
/// ])
/// .unwrap();
/// assert_eq!(params.mode, CascadeMode::Cascaded);
/// assert_eq!(params.stage2.delay_time_ms, 250.0);
/// assert!(EngineParams::from_named([("modulation", 3.0)]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineParams {
    /// Standard or cascaded topology.
    pub mode: CascadeMode,
    /// First stage controls.
    pub stage1: StageParams,
    /// Second stage controls, read only in cascaded mode.
    pub stage2: StageParams,
}

/// Parameters per stage in the flat layout.
const STAGE_PARAM_COUNT: usize = 4;
/// Flat index of the mode switch.
const MODE_INDEX: usize = 4;
/// Total parameters in the flat layout.
const PARAM_COUNT: usize = 9;

impl EngineParams {
    /// Standard mode with default stage controls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controls for `stage` (0 or 1). Indices past the second stage map to it.
    pub fn stage(&self, stage: usize) -> &StageParams {
        if stage == 0 { &self.stage1 } else { &self.stage2 }
    }

    /// Applies one named value, clamped to its descriptor range.
    ///
    /// Non-finite values are rejected and leave the snapshot untouched.
    pub fn set_named(&mut self, id: &str, value: f32) -> Result<(), ParamError> {
        let index = self
            .param_index_by_string_id(id)
            .ok_or_else(|| ParamError::unknown(id))?;
        if !value.is_finite() {
            return Err(ParamError::non_finite(id, value));
        }
        self.set_param(index, value);
        Ok(())
    }

    /// Builds a snapshot from a flat `id -> value` set, starting from defaults.
    ///
    /// Stops at the first invalid entry.
    pub fn from_named<I, K>(values: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = (K, f32)>,
        K: AsRef<str>,
    {
        let mut params = Self::default();
        for (id, value) in values {
            params.set_named(id.as_ref(), value)?;
        }
        Ok(params)
    }

    /// Maps a flat index to `(stage, field)`; `None` for the mode switch.
    fn locate(index: usize) -> Option<(usize, usize)> {
        match index {
            0..MODE_INDEX => Some((0, index)),
            MODE_INDEX => None,
            _ => Some((1, index - MODE_INDEX - 1)),
        }
    }
}

fn stage_descriptor(stage: usize, field: usize) -> Option<ParamDescriptor> {
    let first = stage == 0;
    let desc = match field {
        0 => ParamDescriptor::time_ms(
            if first { "Delay Time" } else { "Delay Time 2" },
            if first { "Time" } else { "Time 2" },
            DELAY_TIME_MIN_MS,
            DELAY_TIME_MAX_MS,
            100.0,
        )
        .with_id(ParamId(2300 + stage as u32 * 10), if first { "delayTime" } else { "delayTime2" }),
        1 => ParamDescriptor::feedback()
            .with_default(30.0)
            .with_step(0.1)
            .with_id(ParamId(2301 + stage as u32 * 10), if first { "feedback" } else { "feedback2" }),
        2 => ParamDescriptor::mix()
            .with_step(0.1)
            .with_id(ParamId(2302 + stage as u32 * 10), if first { "mix" } else { "mix2" }),
        3 => ParamDescriptor::percent("Tone", "Tone", 100.0, 70.0)
            .with_step(0.1)
            .with_id(ParamId(2303 + stage as u32 * 10), if first { "tone" } else { "tone2" }),
        _ => return None,
    };
    Some(if first {
        desc.with_group("stage1")
    } else {
        let desc = desc.with_group("stage2");
        match field {
            1 => ParamDescriptor {
                name: "Feedback 2",
                short_name: "Fdbk 2",
                ..desc
            },
            2 => ParamDescriptor {
                name: "Mix 2",
                short_name: "Mix 2",
                ..desc
            },
            3 => ParamDescriptor {
                name: "Tone 2",
                short_name: "Tone 2",
                ..desc
            },
            _ => desc,
        }
    })
}

impl ParameterInfo for EngineParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        if index >= PARAM_COUNT {
            return None;
        }
        match Self::locate(index) {
            Some((stage, field)) => stage_descriptor(stage, field),
            None => Some(ParamDescriptor::switch("Mode", "Mode").with_id(ParamId(2304), "mode")),
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        if index >= PARAM_COUNT {
            return 0.0;
        }
        match Self::locate(index) {
            Some((stage, field)) => self.stage(stage).get(field),
            None => self.mode.as_value(),
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = self.param_info(index) else {
            return;
        };
        let value = desc.clamp(value);
        match Self::locate(index) {
            Some((0, field)) => self.stage1.set(field, value),
            Some((_, field)) => self.stage2.set(field, value),
            None => self.mode = CascadeMode::from_value(value),
        }
    }
}
