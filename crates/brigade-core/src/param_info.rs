//! Parameter introspection for discoverable control values.
//!
//! Hosts talk to the echo through a flat set of named float parameters. This
//! module describes that surface:
//!
//! - [`ParamDescriptor`] - name, unit, range, default and step of one control
//! - [`ParamId`] - stable numeric ID that survives reordering
//! - [`ParamFlags`] - capability flags (automatable, stepped)
//! - [`ParameterInfo`] - index-based access plus lookup by name or id
//!
//! # Example
//!
//! ```rust
//! use brigade_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Level {
//!     mix: f32,
//! }
//!
//! impl ParameterInfo for Level {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::mix().with_id(ParamId(1), "mix")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.mix,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.mix = desc.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut level = Level { mix: 50.0 };
//! let index = level.param_index_by_string_id("mix").unwrap();
//! level.set_param(index, 140.0);
//! assert_eq!(level.mix, 100.0);
//! ```
//!
//! # no_std Support
//!
//! Fully `no_std` compatible; descriptors are `Copy` and hold only `'static`
//! strings.

/// Stable parameter identifier.
///
/// Once assigned, a `ParamId` must never change for a given parameter; presets
/// and automation refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags. Use [`union`](Self::union) to combine.
///
/// ```rust
/// use brigade_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Milliseconds (ms) - delay times.
    Milliseconds,
    /// Percentage (%) - feedback, mix and tone amounts.
    Percent,
    /// No unit - switches and other dimensionless values.
    None,
}

/// Describes a single parameter's metadata for display and validation.
///
/// Normalization is linear over `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Delay Time").
    pub name: &'static str,

    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value at construction.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Stable string ID used by the named-parameter contract (e.g. `"delayTime2"`).
    pub string_id: &'static str,

    /// Capability flags.
    pub flags: ParamFlags,

    /// Parameter group for host tree display (e.g. `"stage2"`).
    ///
    /// Empty string means top-level.
    pub group: &'static str,
}

impl ParamDescriptor {
    /// Standard mix parameter (0–100%, default 50%).
    pub fn mix() -> Self {
        Self::percent("Mix", "Mix", 100.0, 50.0)
    }

    /// Standard feedback parameter (0–95%, default 50%).
    ///
    /// Capped at 95% to prevent runaway oscillation.
    pub fn feedback() -> Self {
        Self::percent("Feedback", "Fdbk", 95.0, 50.0)
    }

    /// Percentage parameter starting at 0 with custom name, ceiling and default.
    pub fn percent(name: &'static str, short_name: &'static str, max: f32, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min: 0.0,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Time parameter with custom name and range (milliseconds).
    pub fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Two-position switch (0 or 1, default 0).
    pub fn switch(name: &'static str, short_name: &'static str) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default: 0.0,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            group: "",
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// ```rust
    /// use brigade_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::mix().with_id(ParamId(3), "mix");
    /// assert_eq!(desc.id, ParamId(3));
    /// assert_eq!(desc.string_id, "mix");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Overrides the default value.
    pub const fn with_default(mut self, default: f32) -> Self {
        self.default = default;
        self
    }

    /// Overrides the step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN maps to `min`.
    ///
    /// ```rust
    /// use brigade_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::feedback();
    /// assert_eq!(desc.clamp(120.0), 95.0);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

/// Index-based parameter access with descriptor lookup.
///
/// Indices must be stable for the lifetime of the implementor. Lookups by name
/// or id scan all parameters and are meant for setup paths, not audio.
pub trait ParameterInfo {
    /// Returns the number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Returns the descriptor at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value at `index`; `0.0` when out of range.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value at `index`, clamped to the descriptor range.
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against both [`ParamDescriptor::name`] and
    /// [`ParamDescriptor::short_name`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Finds a parameter index by its exact [`ParamDescriptor::string_id`].
    fn param_index_by_string_id(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count())
            .find(|&i| self.param_info(i).is_some_and(|d| d.string_id == string_id))
    }

    /// Returns the stable [`ParamId`] for the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}
