//! Flat, shared dependency-list storage.
//!
//! A [`Repo`] owns one `idarraydata` array. Solvables belonging to it store
//! only an [`Offset`] into this array for each dependency list; the array
//! itself is a concatenation of `0`-terminated `Id` runs, appended to as
//! solvables are loaded. This is the minimal concrete stand-in for the
//! external metadata-loading collaborator the system overview treats as
//! out of scope (RPM/deb/ebuild parsing is not implemented here).

use crate::id::{Id, Offset};

pub struct Repo {
    pub name: String,
    idarraydata: Vec<Id>,
}

impl Repo {
    pub fn new(name: impl Into<String>) -> Self {
        // Offset 0 means "no data" and must never be a valid run start.
        Self {
            name: name.into(),
            idarraydata: vec![Id::NULL],
        }
    }

    /// Append a `0`-terminated run, returning its start offset.
    ///
    /// An empty `ids` still gets a real entry (a lone terminator) rather
    /// than reusing offset `0`, so callers can distinguish "never set" from
    /// "explicitly empty" if they choose to.
    pub fn add_idarray(&mut self, ids: &[Id]) -> Offset {
        let offset = self.idarraydata.len() as Offset;
        self.idarraydata.extend_from_slice(ids);
        self.idarraydata.push(Id::NULL);
        offset
    }

    /// Walk the `0`-terminated run starting at `offset`.
    pub fn idarray(&self, offset: Offset) -> &[Id] {
        if offset == 0 {
            return &[];
        }
        let start = offset as usize;
        let len = self.idarraydata[start..]
            .iter()
            .position(|id| id.is_null())
            .expect("idarraydata run missing null terminator");
        &self.idarraydata[start..start + len]
    }
}
