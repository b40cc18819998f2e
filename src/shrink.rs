//! Deduplicates identical provider runs so that names sharing a provider
//! list (e.g. a soname and its unversioned counterpart, both provided only
//! by the same package) share storage — the original's
//! `pool_shrink_whatprovides`.
//!
//! Precondition: `whatprovides_rel` must still be all-zero; this only runs
//! once, right after [`crate::whatprovides::build`]'s fill pass, before any
//! relation has had a chance to append its own run.

use crate::error::{Error, Result};
use crate::id::{Id, Offset, StrId};
use crate::pool::Pool;

pub fn shrink(pool: &mut Pool) -> Result<()> {
    debug_assert!(
        pool.whatprovides.whatprovides_rel.iter().all(|&o| o == 0),
        "shrink must run before any relation provider is resolved"
    );

    let wp = &mut pool.whatprovides;
    let nstrings = wp.whatprovides.len();

    // Collect real (non-empty) runs (owned, to sidestep borrowing `wp` while
    // also mutating it) and sort by content so identical runs become
    // adjacent. Ties broken by id for a reproducible, stable order.
    let mut real: Vec<(StrId, Vec<Id>)> = (1..nstrings as u32)
        .map(StrId)
        .filter(|&id| wp.whatprovides[id.as_usize()] >= 2)
        .map(|id| (id, wp.run(wp.whatprovides[id.as_usize()]).to_vec()))
        .collect();
    real.sort_by(|(a, ra), (b, rb)| ra.cmp(rb).then(a.cmp(b)));

    // Group equal-content runs; within a group, the smallest id becomes the
    // leader so the later compaction pass (which walks ids in increasing
    // order) always resolves a back-reference after its leader has already
    // been compacted.
    let mut i = 0;
    while i < real.len() {
        let mut j = i + 1;
        while j < real.len() && real[j].1 == real[i].1 {
            j += 1;
        }
        if j - i > 1 {
            let leader = real[i..j].iter().map(|(id, _)| id.0).min().unwrap();
            for (id, _) in &real[i..j] {
                if id.0 != leader {
                    wp.whatprovides[id.as_usize()] = -(leader as Offset);
                }
            }
        }
        i = j;
    }

    // Compaction pass: walk in natural StrId order, copying each still-real
    // run forward and resolving back-references to their (already
    // compacted) leader offset.
    let mut new_data = vec![Id::NULL, Id::NULL];
    for id in 1..nstrings {
        let slot = wp.whatprovides[id];
        if slot == 0 {
            continue;
        }
        if slot < 0 {
            let leader = (-slot) as usize;
            if leader >= id {
                tracing::error!(target: "solv_pool", "shrink back-reference {id} -> {leader} does not point to an earlier id");
                return Err(Error::Invariant(format!(
                    "back-reference {id} -> {leader} does not point to an earlier id"
                )));
            }
            wp.whatprovides[id] = wp.whatprovides[leader];
            continue;
        }
        if slot as usize >= wp.data.len() {
            tracing::error!(target: "solv_pool", "shrink source offset {slot} for id {id} overran whatprovidesdata");
            return Err(Error::ShrinkOverrun);
        }
        let run = run_at(wp, slot).to_vec();
        let new_offset = new_data.len() as Offset;
        new_data.extend_from_slice(&run);
        new_data.push(Id::NULL);
        wp.whatprovides[id] = new_offset;
    }

    wp.data = new_data;

    pool.debug.emit(
        crate::debug::DebugMask::STATS,
        &format!("whatprovides shrunk to {} ids", pool.whatprovides.data.len()),
    );

    Ok(())
}

fn run_at(wp: &crate::whatprovides::WhatProvidesIndex, offset: Offset) -> &[Id] {
    wp.run(offset)
}
