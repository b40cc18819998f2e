//! Extracts `/absolute/path` dependency strings so an external filelist
//! scanner can turn them into synthetic provides — the original's
//! `pool_addfileprovides`.
//!
//! After the caller's filelist scanner has injected new provides for the
//! returned paths, [`crate::whatprovides::build`] must be re-run: this
//! module only discovers which paths are worth scanning for.

use std::collections::HashSet;

use crate::id::Id;
use crate::pool::Pool;
use crate::rel_pool::REL_NAMESPACE;

/// Walk every solvable's dependency lists and collect the literal file
/// paths referenced as plain (non-relation) requirements.
pub fn scan(pool: &Pool) -> Vec<String> {
    let mut visited: HashSet<u32> = HashSet::new();
    let mut paths = Vec::new();

    for (_, solvable) in pool.solvables.iter() {
        if !solvable.is_present() {
            continue;
        }
        let repo = &pool.repos[solvable.repo];
        for offset in [
            solvable.obsoletes,
            solvable.conflicts,
            solvable.requires,
            solvable.recommends,
            solvable.suggests,
            solvable.supplements,
            solvable.enhances,
            solvable.freshens,
        ] {
            if offset == 0 {
                continue;
            }
            for &id in repo.idarray(offset) {
                walk(pool, id, &mut visited, &mut paths);
            }
        }
    }

    paths
}

/// Combined `StrId + RelId` visited key, matching the original's single
/// bitmap over `nstrings + rel_index`.
fn visited_key(pool: &Pool, id: Id) -> u32 {
    match id.as_rel_id() {
        Some(rel) => pool.strings.len() as u32 + rel.as_usize() as u32,
        None => id.raw(),
    }
}

fn walk(pool: &Pool, id: Id, visited: &mut HashSet<u32>, paths: &mut Vec<String>) {
    let key = visited_key(pool, id);
    if !visited.insert(key) {
        return;
    }

    match id.as_rel_id() {
        None => {
            if let Some(str_id) = id.as_str_id() {
                let s = pool.strings.str(str_id);
                if s.starts_with('/') {
                    paths.push(s.to_string());
                }
            }
        }
        Some(rel_id) => {
            let rd = *pool.rels.get(rel_id);
            if rd.flags < 8 {
                // Versioned relation: only the name side can be a file path.
                walk(pool, rd.name, visited, paths);
            } else if rd.flags == REL_NAMESPACE {
                if rd.name == crate::id::Id::from_str_id(crate::id::builtin::NAMESPACE_INSTALLED) {
                    return;
                }
                walk(pool, rd.evr, visited, paths);
            } else {
                walk(pool, rd.name, visited, paths);
                walk(pool, rd.evr, visited, paths);
            }
        }
    }
}
