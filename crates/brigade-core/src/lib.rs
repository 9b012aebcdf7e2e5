//! Brigade Core - DSP primitives for the bucket-brigade echo
//!
//! Building blocks shared by the echo's signal chain, designed for real-time
//! processing with zero allocation after preparation.
//!
//! # Core Abstractions
//!
//! ## Lifecycle
//!
//! - [`Module`] - `prepare` / `reset` contract every chain module follows
//!
//! ## Parameters
//!
//! - [`SmoothedParam`] - Exponential smoothing for zipper-free changes
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Discoverable, range-checked controls
//!
//! ## Filters & Dynamics
//!
//! - [`Biquad`] - Second-order IIR section with RBJ lowpass coefficients
//! - [`EnvelopeFollower`] - Peak detector with attack/release
//!
//! ## Delay
//!
//! - [`HermiteDelay`] - Circular buffer with 4-point Hermite fractional reads
//!
//! ## Noise
//!
//! - [`WhiteNoise`] - Seeded LCG source
//! - [`PinkNoise`] - Three-pole pink shaping filter
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`soft_clip`], [`equal_power_gains`], etc.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! brigade-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: Only `prepare`-time calls allocate
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Deterministic**: Seeded noise, so `reset()` replays exactly

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod delay;
pub mod envelope;
pub mod math;
pub mod module;
pub mod noise;
pub mod param;
pub mod param_info;

pub use biquad::{BUTTERWORTH_Q, Biquad, lowpass_coefficients};
pub use delay::{HermiteDelay, INTERPOLATION_GUARD};
pub use envelope::EnvelopeFollower;
pub use math::{
    db_to_linear, equal_power_gains, flush_denormal, linear_to_db, ms_to_samples, one_pole_coeff,
    soft_clip,
};
pub use module::Module;
pub use noise::{DEFAULT_SEED, PinkNoise, WhiteNoise};
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
