//! Brigade Echo - bucket-brigade analog delay emulation
//!
//! A per-sample echo that reproduces the character of a BBD delay pedal:
//! companded noise reduction, a lossy recirculating delay, clock noise and
//! quantization grain, bandwidth-limited repeats and an equal-power blend,
//! with an optional second stage cascaded after the first.
//!
//! # Signal Chain (per channel, per stage)
//!
//! ```text
//! input → compress → delay (+feedback) → BBD artifacts → expand → filter → mix
//! ```
//!
//! The [`Engine`] runs one or two [`Stage`]s per channel and soft-clips the
//! result. Controls arrive as an [`EngineParams`] snapshot with every call.
//!
//! # Example
//!
//! ```rust
//! use brigade_echo::{CascadeMode, Engine, EngineParams};
//!
//! let mut engine = Engine::mono();
//! engine.prepare(44100.0, 128);
//!
//! let mut params = EngineParams::default();
//! params.mode = CascadeMode::Cascaded;
//! params.stage2.delay_time_ms = 240.0;
//!
//! let mut buffer = [0.0f32; 128];
//! buffer[0] = 1.0;
//! engine.process_block(&mut [&mut buffer[..]], &params);
//! ```
//!
//! # Features
//!
//! - `std` (default) - standard library support
//! - `tracing` - `debug!` events on prepare, reset and mode changes
//! - `serde` - `Serialize`/`Deserialize` for the parameter snapshots

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod bbd;
pub mod compander;
pub mod delay_line;
pub mod engine;
pub mod error;
pub mod filter;
pub mod mix;
pub mod params;
pub mod stage;

pub use bbd::BbdModel;
pub use compander::Compander;
pub use delay_line::BbdDelayLine;
pub use engine::{BypassHandle, Engine, MAX_CHANNELS};
pub use error::ParamError;
pub use filter::FilterStage;
pub use mix::MixStage;
pub use params::{CascadeMode, EngineParams, StageParams};
pub use stage::Stage;
