//! The top-level façade: owns every arena and the whatprovides index, and
//! is the single entry point collaborators (repo loaders, the solver) use.
//!
//! Lifecycle: [`Pool::new`] creates the built-in strings, the reserved
//! relation slot, and the system solvable. Callers then create one or more
//! [`Repo`]s, load solvables into them, and call [`Pool::create_whatprovides`]
//! once loading is done. After that, [`Pool::providers`] answers "who
//! provides this name or relation" queries, lazily resolving and memoizing
//! relation results as they're asked for.

use std::sync::Arc;

use crate::config::PoolConfig;
use crate::debug::DebugSink;
use crate::evr::{DefaultEvrCompare, EvrCompare};
use crate::id::{builtin, Id, Offset};
use crate::rel_pool::RelPool;
use crate::repo::Repo;
use crate::solvable::{SolvableIx, SolvableStore};
use crate::string_pool::StringPool;
use crate::whatprovides::WhatProvidesIndex;

/// Policy callback resolving a `namespace:foo(bar)` dependency. Returns `0`
/// for "no providers", `1` for "only the system solvable", or a
/// pre-enqueued [`Offset`] (see §4.7 of the design notes).
pub type NamespaceCallback = Arc<dyn Fn(&Pool, Id, Id) -> Offset + Send + Sync>;

pub struct Pool {
    pub(crate) strings: StringPool,
    pub(crate) rels: RelPool,
    pub(crate) solvables: SolvableStore,
    pub(crate) repos: Vec<Repo>,
    pub(crate) whatprovides: WhatProvidesIndex,
    pub(crate) debug: DebugSink,
    pub(crate) config: PoolConfig,
    pub(crate) evr_cmp: Box<dyn EvrCompare + Send + Sync>,
    pub(crate) namespace_callback: Option<NamespaceCallback>,
}

impl Pool {
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    pub fn with_config(config: PoolConfig) -> Self {
        let strings = StringPool::new();
        let solvables = SolvableStore::new(
            builtin::SYSTEM_SYSTEM,
            builtin::ARCH_NOARCH,
            builtin::ID_EMPTY,
        );
        Self {
            strings,
            rels: RelPool::new(),
            solvables,
            repos: Vec::new(),
            whatprovides: WhatProvidesIndex::empty(),
            debug: DebugSink::default(),
            config,
            evr_cmp: Box::new(DefaultEvrCompare),
            namespace_callback: None,
        }
    }

    // --- string/relation interning ---

    pub fn intern_str(&mut self, s: &str) -> Id {
        Id::from_str_id(self.strings.intern(s))
    }

    pub fn lookup_str(&self, s: &str) -> Option<Id> {
        self.strings.lookup(s).map(Id::from_str_id)
    }

    pub fn str(&self, id: Id) -> &str {
        self.strings.str(id.as_str_id().expect("str() called with a relation id"))
    }

    pub fn intern_rel(&mut self, name: Id, flags: u8, evr: Id) -> Id {
        Id::from_rel_id(self.rels.intern_rel(name, flags, evr))
    }

    // --- repos ---

    pub fn add_repo(&mut self, name: impl Into<String>) -> usize {
        self.repos.push(Repo::new(name));
        self.repos.len() - 1
    }

    pub fn repo(&self, ix: usize) -> &Repo {
        &self.repos[ix]
    }

    pub fn repo_mut(&mut self, ix: usize) -> &mut Repo {
        &mut self.repos[ix]
    }

    // --- solvables ---

    pub fn add_solvable(&mut self, repo: usize) -> SolvableIx {
        self.solvables.add_one(repo)
    }

    pub fn add_solvable_block(&mut self, repo: usize, n: u32) -> SolvableIx {
        self.solvables.add_block(repo, n)
    }

    pub fn solvable(&self, ix: SolvableIx) -> &crate::solvable::Solvable {
        self.solvables.get(ix)
    }

    pub fn solvable_mut(&mut self, ix: SolvableIx) -> &mut crate::solvable::Solvable {
        self.solvables.get_mut(ix)
    }

    pub fn free_solvable_block(&mut self, start: SolvableIx, n: u32, reuse_tail_ids: bool) {
        self.solvables.free_block(start, n, reuse_tail_ids);
        // Any existing index may now dangle on freed names; force a rebuild.
        self.free_whatprovides();
    }

    pub fn solvable_to_string(&self, ix: SolvableIx) -> String {
        crate::solvable::format_solvable(&self.strings, self.solvables.get(ix))
    }

    // --- namespace callback ---

    pub fn set_namespace_callback(&mut self, callback: NamespaceCallback) {
        self.namespace_callback = Some(callback);
    }

    // --- debug ---

    pub fn set_debug_level(&mut self, level: u8) {
        self.debug.set_level(level);
    }

    pub fn set_debug_callback(&mut self, callback: crate::debug::DebugCallback) {
        self.debug.set_callback(callback);
    }

    // --- evr comparator ---

    pub fn set_evr_comparator(&mut self, cmp: Box<dyn EvrCompare + Send + Sync>) {
        self.evr_cmp = cmp;
    }

    // --- whatprovides lifecycle ---

    pub fn create_whatprovides(
        &mut self,
        installable: impl Fn(&Pool, SolvableIx) -> bool,
    ) -> crate::error::Result<()> {
        crate::whatprovides::build(self, installable)
    }

    pub fn free_whatprovides(&mut self) {
        self.whatprovides = WhatProvidesIndex::empty();
    }

    pub fn has_whatprovides(&self) -> bool {
        self.whatprovides.is_built()
    }

    /// Providers for `id` (a plain name or a relation), resolving and
    /// memoizing relation providers on first query.
    pub fn providers(&mut self, id: Id) -> &[Id] {
        if !self.whatprovides.is_built() {
            return &[];
        }
        // Strings/relations interned after the last build fall outside the
        // arrays sized at build time; grow them lazily rather than forcing
        // every caller to rebuild for a name nobody provides anyway.
        if self.whatprovides.whatprovides.len() < self.strings.len() {
            self.whatprovides.whatprovides.resize(self.strings.len(), 0);
        }
        if self.whatprovides.whatprovides_rel.len() < self.rels.len() {
            self.whatprovides.whatprovides_rel.resize(self.rels.len(), 0);
        }
        let offset = match id.as_str_id() {
            Some(str_id) => self.whatprovides.whatprovides[str_id.as_usize()],
            None => {
                let rel_id = id.as_rel_id().expect("id is neither a str nor a rel id");
                let memoized = self.whatprovides.whatprovides_rel[rel_id.as_usize()];
                if memoized != 0 {
                    memoized
                } else {
                    crate::rel_resolve::resolve(self, rel_id)
                }
            }
        };
        self.whatprovides.run(offset)
    }

    /// Append `q` to `whatprovidesdata`, returning its offset. Exposed so
    /// external callers (typically the solver) can intern synthesized
    /// provider sets the same way relation resolution does.
    pub fn enqueue_providers(&mut self, q: &[Id]) -> Offset {
        self.whatprovides.enqueue(q)
    }

    /// Extract literal file-path dependencies for an external filelist
    /// scanner (see [`crate::file_provides`]). The caller is responsible
    /// for injecting the resulting provides and calling
    /// [`Pool::create_whatprovides`] again.
    pub fn add_file_provides(&self) -> Vec<String> {
        crate::file_provides::scan(self)
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
