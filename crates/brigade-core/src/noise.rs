//! Deterministic noise sources.
//!
//! [`WhiteNoise`] is a 32-bit linear congruential generator (Numerical Recipes
//! constants). [`PinkNoise`] shapes any white source with Paul Kellet's
//! economy three-pole filter, which approximates a -3 dB/octave slope across
//! the audio band.
//!
//! Both are allocation-free and reproducible: the same seed always yields the
//! same sequence, so processing after `reset()` is bit-identical to processing
//! after construction.

/// Seed used when none is given.
pub const DEFAULT_SEED: u32 = 0x1234_5678;

/// Uniform white noise in `[-1.0, 1.0)`.
///
/// # Example
///
/// ```rust
/// use brigade_core::WhiteNoise;
///
/// let mut a = WhiteNoise::new(7);
/// let mut b = WhiteNoise::new(7);
/// assert_eq!(a.next_sample(), b.next_sample());
/// ```
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    seed: u32,
    state: u32,
}

impl WhiteNoise {
    /// Creates a generator starting from `seed`.
    pub fn new(seed: u32) -> Self {
        Self { seed, state: seed }
    }

    /// Advances the LCG and returns the next sample.
    ///
    /// The upper 16 bits of the state are used; the low bits of a power-of-two
    /// modulus LCG have short periods.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        let upper = (self.state >> 16) as u16;
        f32::from(upper) / 32_768.0 - 1.0
    }

    /// Rewinds to the construction seed.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }

    /// The seed this generator restarts from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Three-pole pink filter applied to a caller-supplied white sample.
#[derive(Debug, Clone, Default)]
pub struct PinkNoise {
    b0: f32,
    b1: f32,
    b2: f32,
}

impl PinkNoise {
    /// Creates a filter with zeroed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters one white sample into pink.
    ///
    /// Output stays within roughly ±1 for white input in `[-1, 1]`.
    #[inline]
    pub fn process(&mut self, white: f32) -> f32 {
        self.b0 = 0.997_65 * self.b0 + white * 0.099_046;
        self.b1 = 0.963 * self.b1 + white * 0.296_516_4;
        self.b2 = 0.57 * self.b2 + white * 1.052_691_3;
        (self.b0 + self.b1 + self.b2 + white * 0.1848) * 0.11
    }

    /// Zeroes filter state.
    pub fn reset(&mut self) {
        self.b0 = 0.0;
        self.b1 = 0.0;
        self.b2 = 0.0;
    }
}
