//! Tagged identifiers shared between [`crate::string_pool::StringPool`] and
//! [`crate::rel_pool::RelPool`].
//!
//! A single `u32` space is split by its high bit: clear means "index into the
//! string table", set means "index into the relation table". This mirrors the
//! original C pool's overloaded `Id` type, but as a Rust sum type the
//! discriminant is checked at the accessor, not left to the caller.

use std::fmt;

/// High bit of the 32-bit ID space; set for [`RelId`]s, clear for [`StrId`]s.
const REL_TAG: u32 = 1 << 31;

/// Dense index into the string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrId(pub(crate) u32);

/// Dense index into the relation table, stored untagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelId(pub(crate) u32);

impl StrId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl RelId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A value from the combined string/relation ID space, as stored in
/// `provides`/`requires`/… arrays and returned by [`crate::pool::Pool::providers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(u32);

impl Id {
    pub const NULL: Id = Id(0);

    pub fn from_str_id(id: StrId) -> Id {
        Id(id.0)
    }

    pub fn from_rel_id(id: RelId) -> Id {
        Id(id.0 | REL_TAG)
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn is_rel(self) -> bool {
        self.0 & REL_TAG != 0
    }

    /// Raw 32-bit encoding, as stored in `whatprovidesdata` and `idarraydata`.
    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn from_raw(raw: u32) -> Id {
        Id(raw)
    }

    /// View as a [`StrId`], panicking if this is actually a relation ID.
    ///
    /// Used on the "head" of a provides/requires entry once the caller has
    /// already unwrapped any relation wrapper (see
    /// [`crate::rel_pool::RelPool::unwrap_to_name`]).
    pub fn as_str_id(self) -> Option<StrId> {
        (!self.is_rel()).then_some(StrId(self.0))
    }

    pub fn as_rel_id(self) -> Option<RelId> {
        self.is_rel().then_some(RelId(self.0 & !REL_TAG))
    }
}

impl From<StrId> for Id {
    fn from(id: StrId) -> Self {
        Id::from_str_id(id)
    }
}

impl From<RelId> for Id {
    fn from(id: RelId) -> Self {
        Id::from_rel_id(id)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rel() {
            write!(f, "rel#{}", self.0 & !REL_TAG)
        } else {
            write!(f, "str#{}", self.0)
        }
    }
}

/// Offset into `whatprovidesdata` or a `Repo`'s `idarraydata`.
///
/// `0` means "no data"; `1` means "empty list" (used only in `whatprovides`,
/// where the distinction between "never built" and "built, zero providers"
/// matters).
pub type Offset = i32;

/// Built-in string IDs whose numeric value is fixed across every pool,
/// mirroring the original's `initpool_data` prefix. `ID_NULL` occupies slot 0
/// implicitly (the empty arena slot); `ID_EMPTY` is the first real entry.
pub mod builtin {
    use super::StrId;

    pub const ID_EMPTY: StrId = StrId(1);
    pub const SOLVABLE_NAME: StrId = StrId(2);
    pub const SOLVABLE_ARCH: StrId = StrId(3);
    pub const SOLVABLE_EVR: StrId = StrId(4);
    pub const SOLVABLE_VENDOR: StrId = StrId(5);
    pub const SOLVABLE_PROVIDES: StrId = StrId(6);
    pub const SOLVABLE_OBSOLETES: StrId = StrId(7);
    pub const SOLVABLE_CONFLICTS: StrId = StrId(8);
    pub const SOLVABLE_REQUIRES: StrId = StrId(9);
    pub const SOLVABLE_RECOMMENDS: StrId = StrId(10);
    pub const SOLVABLE_SUGGESTS: StrId = StrId(11);
    pub const SOLVABLE_SUPPLEMENTS: StrId = StrId(12);
    pub const SOLVABLE_ENHANCES: StrId = StrId(13);
    pub const SOLVABLE_FRESHENS: StrId = StrId(14);
    pub const RPM_DBID: StrId = StrId(15);
    pub const SOLVABLE_PREREQMARKER: StrId = StrId(16);
    pub const SOLVABLE_FILEMARKER: StrId = StrId(17);
    pub const NAMESPACE_INSTALLED: StrId = StrId(18);
    pub const NAMESPACE_MODALIAS: StrId = StrId(19);
    pub const SYSTEM_SYSTEM: StrId = StrId(20);
    pub const ARCH_SRC: StrId = StrId(21);
    pub const ARCH_NOSRC: StrId = StrId(22);
    pub const ARCH_NOARCH: StrId = StrId(23);
    pub const REPODATA_EXTERNAL: StrId = StrId(24);
    pub const REPODATA_KEYS: StrId = StrId(25);
    pub const REPODATA_LOCATION: StrId = StrId(26);

    /// Fixed strings interned at pool creation, in ID order. Slot 0 is a
    /// placeholder for `ID_NULL`, which is never dereferenced; real strings
    /// start at slot 1 (`ID_EMPTY`). `StringPool::new` asserts this list's
    /// length against the constants above so the two can't silently drift.
    pub const STRINGS: &[&str] = &[
        "<null>",
        "",
        "solvable:name",
        "solvable:arch",
        "solvable:evr",
        "solvable:vendor",
        "solvable:provides",
        "solvable:obsoletes",
        "solvable:conflicts",
        "solvable:requires",
        "solvable:recommends",
        "solvable:suggests",
        "solvable:supplements",
        "solvable:enhances",
        "solvable:freshens",
        "rpm:dbid",
        "solvable:prereqmarker",
        "solvable:filemarker",
        "namespace:installed",
        "namespace:modalias",
        "system:system",
        "src",
        "nosrc",
        "noarch",
        "repodata:external",
        "repodata:keys",
        "repodata:location",
    ];
}
