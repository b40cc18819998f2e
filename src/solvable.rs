//! Installable-unit storage.
//!
//! [`SolvableStore`] is an append-only `Vec<Solvable>` indexed by
//! [`SolvableIx`]. Index `0` is reserved and index `1` is the synthetic
//! system solvable used to satisfy `rpmlib(...)` and namespace queries that
//! have no real provider. Growth happens in blocks, mirroring the original's
//! `pool_add_solvable_block`, so that bulk repo loads don't repeatedly
//! reallocate one solvable at a time.

use crate::config::SOLVABLE_BLOCK;
use crate::id::{Id, Offset, StrId};

/// Index into [`SolvableStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolvableIx(pub u32);

impl SolvableIx {
    pub const RESERVED: SolvableIx = SolvableIx(0);
    pub const SYSTEM: SolvableIx = SolvableIx(1);

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Re-tag this index as an [`Id`] for storage in `whatprovidesdata`.
    /// Solvable indices and `StrId`s share no type relationship, but both
    /// are plain `u32`s in the combined id space the original overloads.
    pub fn to_id(self) -> Id {
        Id::from_str_id(StrId(self.0))
    }
}

/// One installable unit: name/arch/evr/vendor plus the typed dependency
/// lists, each an [`Offset`] into its owning [`crate::repo::Repo`]'s
/// `idarraydata`.
#[derive(Debug, Clone)]
pub struct Solvable {
    pub name: StrId,
    pub arch: StrId,
    pub evr: StrId,
    pub vendor: StrId,
    pub repo: usize,
    pub provides: Offset,
    pub requires: Offset,
    pub conflicts: Offset,
    pub obsoletes: Offset,
    pub recommends: Offset,
    pub suggests: Offset,
    pub supplements: Offset,
    pub enhances: Offset,
    pub freshens: Offset,
}

impl Solvable {
    fn empty(repo: usize) -> Self {
        Self {
            name: StrId(0),
            arch: StrId(0),
            evr: StrId(0),
            vendor: StrId(0),
            repo,
            provides: 0,
            requires: 0,
            conflicts: 0,
            obsoletes: 0,
            recommends: 0,
            suggests: 0,
            supplements: 0,
            enhances: 0,
            freshens: 0,
        }
    }

    /// Whether this slot holds a real solvable (a freed or never-allocated
    /// slot has no name).
    pub fn is_present(&self) -> bool {
        self.name.as_usize() != 0
    }
}

pub struct SolvableStore {
    solvables: Vec<Solvable>,
}

impl SolvableStore {
    /// Create a store with the reserved slot and the system solvable
    /// already populated (`system:system`, `noarch`, empty evr).
    pub fn new(system_name: StrId, noarch: StrId, empty_evr: StrId) -> Self {
        let mut solvables = Vec::with_capacity(SOLVABLE_BLOCK as usize + 1);
        solvables.push(Solvable::empty(0));
        let mut system = Solvable::empty(0);
        system.name = system_name;
        system.arch = noarch;
        system.evr = empty_evr;
        solvables.push(system);
        Self { solvables }
    }

    /// Allocate one solvable slot, rounding the backing storage up to the
    /// next block boundary.
    pub fn add_one(&mut self, repo: usize) -> SolvableIx {
        self.reserve_for(1);
        let ix = SolvableIx(self.solvables.len() as u32);
        self.solvables.push(Solvable::empty(repo));
        ix
    }

    /// Allocate `n` contiguous solvable slots.
    pub fn add_block(&mut self, repo: usize, n: u32) -> SolvableIx {
        self.reserve_for(n as usize);
        let start = SolvableIx(self.solvables.len() as u32);
        for _ in 0..n {
            self.solvables.push(Solvable::empty(repo));
        }
        start
    }

    fn reserve_for(&mut self, additional: usize) {
        let needed = self.solvables.len() + additional;
        let blocks = needed.div_ceil(SOLVABLE_BLOCK as usize + 1);
        let rounded = blocks * (SOLVABLE_BLOCK as usize + 1);
        if self.solvables.capacity() < rounded {
            self.solvables.reserve(rounded - self.solvables.len());
        }
    }

    /// Zero a contiguous range of solvables. If the range touches the end
    /// of the store and `reuse_tail_ids` is set, the store is truncated so
    /// the freed indices can be reassigned; otherwise the slots remain
    /// reserved (and absent) forever, matching the original's no-free-list
    /// design.
    pub fn free_block(&mut self, start: SolvableIx, n: u32, reuse_tail_ids: bool) {
        let start_ix = start.as_usize();
        let end_ix = start_ix + n as usize;
        for s in &mut self.solvables[start_ix..end_ix] {
            *s = Solvable::empty(s.repo);
        }
        if reuse_tail_ids && end_ix == self.solvables.len() {
            self.solvables.truncate(start_ix);
        }
    }

    pub fn get(&self, ix: SolvableIx) -> &Solvable {
        &self.solvables[ix.as_usize()]
    }

    pub fn get_mut(&mut self, ix: SolvableIx) -> &mut Solvable {
        &mut self.solvables[ix.as_usize()]
    }

    pub fn len(&self) -> usize {
        self.solvables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SolvableIx, &Solvable)> {
        self.solvables
            .iter()
            .enumerate()
            .map(|(i, s)| (SolvableIx(i as u32), s))
    }
}

/// Format `name-evr.arch`, the original's `solvable2str` shape, as an owned
/// `String` rather than a reused global ring buffer (see the design note on
/// format buffers).
pub fn format_solvable(strings: &crate::string_pool::StringPool, s: &Solvable) -> String {
    format!(
        "{}-{}.{}",
        strings.str(s.name),
        strings.str(s.evr),
        strings.str(s.arch)
    )
}

/// `fmt::Display` wrapper so solvables can be interpolated directly,
/// following the `DisplaySolvable` pattern used for pool-interned values
/// elsewhere in this crate.
pub struct DisplaySolvable<'a> {
    pub strings: &'a crate::string_pool::StringPool,
    pub solvable: &'a Solvable,
}

impl std::fmt::Display for DisplaySolvable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_solvable(self.strings, self.solvable))
    }
}
