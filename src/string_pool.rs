//! String interning.
//!
//! Append-only: once a [`StrId`] is assigned it never changes for the life
//! of the pool. A `HashMap` reverse index gives expected-O(1) interning —
//! a hand-rolled open-addressing table would not be idiomatic Rust when
//! `std::collections::HashMap` already does the job.

use std::collections::HashMap;

use crate::id::{builtin, StrId};

pub struct StringPool {
    strings: Vec<Box<str>>,
    rev: HashMap<Box<str>, StrId>,
}

impl StringPool {
    /// Create a pool pre-populated with the built-in reserved strings.
    pub fn new() -> Self {
        let mut pool = Self {
            strings: Vec::with_capacity(builtin::STRINGS.len()),
            rev: HashMap::with_capacity(builtin::STRINGS.len()),
        };
        for s in builtin::STRINGS {
            let id = StrId(pool.strings.len() as u32);
            pool.strings.push((*s).into());
            pool.rev.insert((*s).into(), id);
        }
        debug_assert_eq!(
            pool.strings.len(),
            builtin::REPODATA_LOCATION.as_usize() + 1,
            "built-in string table drifted from its reserved-id constants"
        );
        pool
    }

    /// Intern `s`, returning its existing [`StrId`] if already present.
    pub fn intern(&mut self, s: &str) -> StrId {
        if let Some(&id) = self.rev.get(s) {
            return id;
        }
        let id = StrId(self.strings.len() as u32);
        self.strings.push(s.into());
        self.rev.insert(s.into(), id);
        id
    }

    pub fn lookup(&self, s: &str) -> Option<StrId> {
        self.rev.get(s).copied()
    }

    pub fn str(&self, id: StrId) -> &str {
        &self.strings[id.as_usize()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_preinterned() {
        let pool = StringPool::new();
        assert_eq!(pool.str(builtin::SYSTEM_SYSTEM), "system:system");
        assert_eq!(pool.lookup("system:system"), Some(builtin::SYSTEM_SYSTEM));
    }

    #[test]
    fn intern_round_trip() {
        let mut pool = StringPool::new();
        let id = pool.intern("libfoo.so.1");
        assert_eq!(pool.str(id), "libfoo.so.1");
    }

    #[test]
    fn intern_dedup() {
        let mut pool = StringPool::new();
        let a = pool.intern("libfoo.so.1");
        let b = pool.intern("libfoo.so.1");
        assert_eq!(a, b);
    }

    #[test]
    fn lookup_missing() {
        let pool = StringPool::new();
        assert_eq!(pool.lookup("does-not-exist"), None);
    }
}
