//! Relation (compound dependency) interning.
//!
//! A [`Reldep`] is `(name, flags, evr)` — either a versioned comparison
//! (`flags` in `1..=7`) or one of the logical combinators `REL_AND`,
//! `REL_OR`, `REL_WITH`, `REL_NAMESPACE`. Interning follows the same
//! arena + reverse-lookup idiom as [`crate::string_pool::StringPool`].

use std::collections::HashMap;

use crate::id::{Id, RelId};

/// Bit 0: `>`, bit 1: `=`, bit 2: `<`. `0` means unversioned, `7` means "any
/// version" (a catch-all used by namespace-qualified requires).
pub const REL_GT: u8 = 1 << 0;
pub const REL_EQ: u8 = 1 << 1;
pub const REL_LT: u8 = 1 << 2;
pub const REL_ANY: u8 = REL_GT | REL_EQ | REL_LT;

/// Logical combinators, occupying the range above the 3-bit comparator mask.
pub const REL_AND: u8 = 8;
pub const REL_OR: u8 = 9;
pub const REL_WITH: u8 = 10;
pub const REL_NAMESPACE: u8 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reldep {
    pub name: Id,
    pub evr: Id,
    pub flags: u8,
}

pub struct RelPool {
    rels: Vec<Reldep>,
    rev: HashMap<Reldep, RelId>,
}

impl RelPool {
    /// `rels[0]` is a reserved, never-dereferenced slot (mirrors
    /// `StringPool`'s `ID_NULL`).
    pub fn new() -> Self {
        let reserved = Reldep {
            name: Id::NULL,
            evr: Id::NULL,
            flags: 0,
        };
        Self {
            rels: vec![reserved],
            rev: HashMap::new(),
        }
    }

    pub fn intern_rel(&mut self, name: Id, flags: u8, evr: Id) -> RelId {
        let key = Reldep { name, evr, flags };
        if let Some(&id) = self.rev.get(&key) {
            return id;
        }
        let id = RelId(self.rels.len() as u32);
        self.rels.push(key);
        self.rev.insert(key, id);
        id
    }

    pub fn get(&self, id: RelId) -> &Reldep {
        &self.rels[id.as_usize()]
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.len() <= 1
    }

    /// Follow the `name` side of nested relations until a plain string is
    /// reached. Used by the whatprovides builder's counting/fill passes,
    /// which index `whatprovides` by `StrId` only.
    pub fn unwrap_to_name(&self, mut id: Id) -> Id {
        while let Some(rel_id) = id.as_rel_id() {
            id = self.get(rel_id).name;
        }
        id
    }
}

impl Default for RelPool {
    fn default() -> Self {
        Self::new()
    }
}
