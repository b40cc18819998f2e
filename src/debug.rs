//! Debug category bitmask and log sink, mirroring the original's
//! `SAT_DEBUG_*` flags and `pool_setdebuglevel`/`pool_debug`.
//!
//! Every category is emitted through `tracing` regardless of the configured
//! level (so an embedder's `tracing-subscriber` filter always sees
//! everything); `DebugLevel` additionally gates an optional caller-supplied
//! callback for embedders that want raw diagnostic strings rather than a
//! `tracing::Subscriber`.

use std::sync::Arc;

/// Debug category bitmask. Matches the original's escalation by numeric
/// level: level 0 is silent, higher levels enable progressively noisier
/// categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugMask(u32);

impl DebugMask {
    pub const RESULT: DebugMask = DebugMask(1 << 0);
    pub const STATS: DebugMask = DebugMask(1 << 1);
    pub const ANALYZE: DebugMask = DebugMask(1 << 2);
    pub const UNSOLVABLE: DebugMask = DebugMask(1 << 3);
    pub const JOB: DebugMask = DebugMask(1 << 4);
    pub const SOLUTIONS: DebugMask = DebugMask(1 << 5);
    pub const POLICY: DebugMask = DebugMask(1 << 6);
    pub const PROPAGATE: DebugMask = DebugMask(1 << 7);
    pub const RULE_CREATION: DebugMask = DebugMask(1 << 8);
    pub const TRACE: DebugMask = DebugMask(1 << 9);

    pub const fn empty() -> DebugMask {
        DebugMask(0)
    }

    pub const fn all() -> DebugMask {
        DebugMask(0x3ff)
    }

    pub fn intersects(self, other: DebugMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for DebugMask {
    type Output = DebugMask;
    fn bitor(self, rhs: DebugMask) -> DebugMask {
        DebugMask(self.0 | rhs.0)
    }
}

/// Map a `0..=5` verbosity level to the cumulative category mask, the same
/// escalation the original uses in `pool_setdebuglevel`.
pub fn level_to_mask(level: u8) -> DebugMask {
    let mut mask = DebugMask::RESULT;
    if level > 0 {
        mask = mask | DebugMask::STATS | DebugMask::ANALYZE | DebugMask::UNSOLVABLE;
    }
    if level > 1 {
        mask = mask | DebugMask::JOB | DebugMask::SOLUTIONS | DebugMask::POLICY;
    }
    if level > 2 {
        mask = mask | DebugMask::PROPAGATE;
    }
    if level > 3 {
        mask = mask | DebugMask::RULE_CREATION;
    }
    if level > 4 {
        mask = mask | DebugMask::TRACE;
    }
    mask
}

pub type DebugCallback = Arc<dyn Fn(DebugMask, &str) + Send + Sync>;

/// Sink for diagnostic messages about malformed input and resolution
/// fallbacks (§7 "Error handling design": these are logged, not returned as
/// [`crate::error::Error`]).
#[derive(Clone, Default)]
pub struct DebugSink {
    mask: DebugMask,
    callback: Option<DebugCallback>,
}

impl DebugSink {
    pub fn set_level(&mut self, level: u8) {
        self.mask = level_to_mask(level);
    }

    pub fn set_callback(&mut self, callback: DebugCallback) {
        self.callback = Some(callback);
    }

    pub fn emit(&self, category: DebugMask, msg: &str) {
        if category.intersects(DebugMask::UNSOLVABLE) {
            tracing::warn!(target: "solv_pool", "{msg}");
        } else {
            tracing::debug!(target: "solv_pool", "{msg}");
        }
        if self.mask.intersects(category) {
            if let Some(cb) = &self.callback {
                cb(category, msg);
            }
        }
    }
}

impl std::fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugSink")
            .field("mask", &self.mask)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
