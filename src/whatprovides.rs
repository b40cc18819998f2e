//! The packed provides index: `whatprovides[StrId] -> Offset` plus the flat
//! `whatprovidesdata` pool of `0`-terminated provider runs.
//!
//! [`WhatProvidesIndex::build`] is the two-pass construction described in
//! the original's `pool_createwhatprovides`: a counting pass sizes each
//! name's run, a layout pass turns counts into offsets, and a fill pass
//! writes the actual solvable ids. [`crate::shrink`] then deduplicates
//! identical runs.

use crate::config::WHATPROVIDESDATA_EXTRA_MIN;
use crate::debug::DebugMask;
use crate::id::{Id, Offset};
use crate::pool::Pool;
use crate::rel_pool::RelPool;
use crate::solvable::SolvableIx;

pub struct WhatProvidesIndex {
    pub(crate) whatprovides: Vec<Offset>,
    pub(crate) whatprovides_rel: Vec<Offset>,
    pub(crate) data: Vec<Id>,
}

impl WhatProvidesIndex {
    pub fn empty() -> Self {
        Self {
            whatprovides: Vec::new(),
            whatprovides_rel: Vec::new(),
            // Slots 0 and 1 are reserved sentinels ("no data" / "empty list").
            data: vec![Id::NULL, Id::NULL],
        }
    }

    pub fn is_built(&self) -> bool {
        !self.whatprovides.is_empty()
    }

    /// `&[Id]` slice for a provider run, up to (excluding) its terminator.
    pub fn run(&self, offset: Offset) -> &[Id] {
        if offset <= 1 {
            return &[];
        }
        let start = offset as usize;
        let len = self.data[start..]
            .iter()
            .position(|id| id.is_null())
            .expect("whatprovidesdata run missing null terminator");
        &self.data[start..start + len]
    }

    /// Append `q` as a new `0`-terminated run, growing `data` if needed.
    /// Returns the sentinel offset `1` for an empty queue instead of
    /// allocating a run.
    pub fn enqueue(&mut self, q: &[Id]) -> Offset {
        if q.is_empty() {
            return 1;
        }
        let offset = self.data.len() as Offset;
        self.data.extend_from_slice(q);
        self.data.push(Id::NULL);
        offset
    }
}

impl Default for WhatProvidesIndex {
    fn default() -> Self {
        Self::empty()
    }
}

/// Build (or rebuild) the whatprovides index for `pool`, then shrink it.
///
/// `installable` decides which solvables participate: typically
/// "architecture compatible with host, and not itself scheduled for
/// removal". The predicate is pure over pool state.
pub fn build(pool: &mut Pool, installable: impl Fn(&Pool, SolvableIx) -> bool) -> crate::error::Result<()> {
    let nstrings = pool.strings.len();
    let nrels = pool.rels.len();

    let mut whatprovides = vec![0i32; nstrings];

    // Counting pass.
    for (ix, solvable) in pool.solvables.iter() {
        if solvable.provides == 0 || !installable(pool, ix) {
            continue;
        }
        let repo = &pool.repos[solvable.repo];
        for &id in repo.idarray(solvable.provides) {
            let name = pool.rels.unwrap_to_name(id);
            if let Some(str_id) = name.as_str_id() {
                whatprovides[str_id.as_usize()] += 1;
            }
        }
    }

    // Layout pass.
    let mut off: Offset = 2;
    for count in &mut whatprovides {
        if *count > 0 {
            let start = off;
            off += *count + 1;
            *count = start;
        }
    }

    let extra = WHATPROVIDESDATA_EXTRA_MIN.max(2 * nrels);
    let mut data = vec![Id::NULL; off as usize + extra];
    // cursor[i] tracks the next free write position for name i's run.
    let mut cursor = whatprovides.clone();

    // Fill pass, with within-solvable consecutive-duplicate suppression.
    for (ix, solvable) in pool.solvables.iter() {
        if solvable.provides == 0 || !installable(pool, ix) {
            continue;
        }
        let repo = &pool.repos[solvable.repo];
        for &id in repo.idarray(solvable.provides) {
            let name = pool.rels.unwrap_to_name(id);
            let Some(str_id) = name.as_str_id() else {
                continue;
            };
            let slot = &mut cursor[str_id.as_usize()];
            let write_at = *slot as usize;
            if write_at > 0 && data[write_at - 1] == ix.to_id() {
                // Same solvable already wrote this name via another relation.
                continue;
            }
            data[write_at] = ix.to_id();
            *slot += 1;
        }
    }

    pool.debug.emit(
        DebugMask::STATS,
        &format!(
            "whatprovides: {nstrings} names, {} bytes of provider data",
            data.len()
        ),
    );

    pool.whatprovides = WhatProvidesIndex {
        whatprovides,
        whatprovides_rel: vec![0; nrels],
        data,
    };

    crate::shrink::shrink(pool)
}
