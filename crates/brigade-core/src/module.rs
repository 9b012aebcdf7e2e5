//! Lifecycle trait shared by every signal-chain module.
//!
//! Processing signatures differ from module to module (the delay line takes a
//! time and a feedback amount, the mixer takes a dry and a wet sample), so only
//! the lifecycle is common:
//!
//! - [`prepare`](Module::prepare) runs when the sample rate is known. It may
//!   allocate and always leaves the module in a cleared state.
//! - [`reset`](Module::reset) clears history without allocating. Processing
//!   after a reset is indistinguishable from processing after `prepare` at the
//!   same sample rate.

/// Sample-rate-aware lifecycle of a DSP module.
///
/// # Example
///
/// ```rust
/// use brigade_core::Module;
///
/// struct Hold {
///     last: f32,
/// }
///
/// impl Module for Hold {
///     fn prepare(&mut self, _sample_rate: f64) {
///         self.last = 0.0;
///     }
///
///     fn reset(&mut self) {
///         self.last = 0.0;
///     }
/// }
/// ```
pub trait Module {
    /// Configure for `sample_rate` and clear all state.
    fn prepare(&mut self, sample_rate: f64);

    /// Clear all history while keeping the current configuration.
    fn reset(&mut self);
}
