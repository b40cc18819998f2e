//! Runtime-configurable pool tunables.
//!
//! The original pool fixes these as compiled-in constants (or, for the
//! RPM/Debian provides semantics, a build-time `#ifdef`). A runtime struct
//! lets one process build pools for either convention without recompiling.

/// Block size the [`crate::solvable::SolvableStore`] grows by.
pub const SOLVABLE_BLOCK: u32 = 255;

/// Minimum headroom reserved in `whatprovidesdata` for lazily-resolved
/// relation providers, beyond the space needed for the initial build.
pub const WHATPROVIDESDATA_EXTRA_MIN: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Whether an unversioned `Provides: foo` satisfies a versioned
    /// `Requires: foo >= 1.0`.
    ///
    /// `true` is RPM semantics (the original's default). `false` is Debian
    /// semantics, where only a versioned provide can satisfy a versioned
    /// requirement.
    pub unversioned_provides_match_versioned_requires: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            unversioned_provides_match_versioned_requires: true,
        }
    }
}
