//! An in-memory, interned package dependency database.
//!
//! [`Pool`] stores [`Solvable`](solvable::Solvable)s — name/version/arch plus
//! typed dependency lists — behind a dense, tagged [`id::Id`] space shared by
//! interned strings and interned relations. Once every repo has loaded its
//! solvables, [`Pool::create_whatprovides`] builds a packed inverted index
//! so that "who provides this name or relation" queries are array lookups
//! rather than linear scans, with versioned and compound (`AND`/`OR`/`WITH`/
//! namespace) relations resolved lazily on first query.
//!
//! This crate stops at "give me the provider list" — it does not pick a
//! consistent set of packages. That's a SAT solver's job, built on top of
//! [`Pool::providers`].

mod config;
mod debug;
mod error;
mod evr;
mod file_provides;
mod id;
mod pool;
mod rel_pool;
mod rel_resolve;
mod repo;
mod shrink;
mod solvable;
mod string_pool;
mod whatprovides;

pub use config::PoolConfig;
pub use debug::{DebugCallback, DebugMask};
pub use error::{Error, Result};
pub use evr::{DefaultEvrCompare, EvrCompare, MatchMode};
pub use id::{builtin, Id, Offset, RelId, StrId};
pub use pool::{NamespaceCallback, Pool};
pub use rel_pool::{Reldep, REL_AND, REL_ANY, REL_EQ, REL_GT, REL_LT, REL_NAMESPACE, REL_OR, REL_WITH};
pub use repo::Repo;
pub use solvable::{DisplaySolvable, Solvable, SolvableIx};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn always_installable(_pool: &Pool, _ix: SolvableIx) -> bool {
        true
    }

    /// Add a solvable with a name and a `provides` list built from plain
    /// name strings (no versioned relations), returning its index.
    fn add_solvable(pool: &mut Pool, repo: usize, name: &str, provides: &[&str]) -> SolvableIx {
        let ix = pool.add_solvable(repo);
        let name_id = pool.intern_str(name).as_str_id().unwrap();
        let provide_ids: Vec<Id> = provides.iter().map(|p| pool.intern_str(p)).collect();
        let offset = pool.repo_mut(repo).add_idarray(&provide_ids);
        let s = pool.solvable_mut(ix);
        s.name = name_id;
        s.provides = offset;
        ix
    }

    #[test]
    fn solve_single_package_no_deps() {
        let mut pool = Pool::new();
        let repo = pool.add_repo("main");
        let rust = add_solvable(&mut pool, repo, "dev-lang/rust", &["dev-lang/rust"]);
        pool.create_whatprovides(always_installable).unwrap();

        let want = pool.intern_str("dev-lang/rust");
        let providers = pool.providers(want);
        assert_eq!(providers, &[rust.to_id()]);
    }

    #[test]
    fn solve_with_dependency_chain() {
        let mut pool = Pool::new();
        let repo = pool.add_repo("main");
        let app = add_solvable(&mut pool, repo, "app/top", &["app/top"]);
        let lib_a = add_solvable(&mut pool, repo, "dev-libs/a", &["dev-libs/a"]);
        let lib_b = add_solvable(&mut pool, repo, "dev-libs/b", &["dev-libs/b"]);

        let a_req = pool.intern_str("dev-libs/a");
        let b_req = pool.intern_str("dev-libs/b");
        let offset = pool.repo_mut(repo).add_idarray(&[a_req, b_req]);
        pool.solvable_mut(app).requires = offset;

        pool.create_whatprovides(always_installable).unwrap();

        let chain: Vec<Id> = [a_req, b_req]
            .iter()
            .flat_map(|&id| pool.providers(id).to_vec())
            .collect();
        assert_eq!(chain, vec![lib_a.to_id(), lib_b.to_id()]);
    }

    #[test]
    fn solve_any_of_via_rel_or() {
        let mut pool = Pool::new();
        let repo = pool.add_repo("main");
        let openssl = add_solvable(&mut pool, repo, "dev-libs/openssl", &["dev-libs/openssl"]);
        let libressl = add_solvable(&mut pool, repo, "dev-libs/libressl", &["dev-libs/libressl"]);

        let a = pool.intern_str("dev-libs/openssl");
        let b = pool.intern_str("dev-libs/libressl");
        let any_of = pool.intern_rel(a, REL_OR, b);

        pool.create_whatprovides(always_installable).unwrap();

        let providers = pool.providers(any_of);
        assert_eq!(providers, &[openssl.to_id(), libressl.to_id()]);
    }

    #[test]
    fn namespace_dependency_through_callback() {
        let mut pool = Pool::new();
        let name = pool.intern_str("namespace:modalias");
        let arg = pool.intern_str("pci:v00008086");
        let dep = pool.intern_rel(name, REL_NAMESPACE, arg);

        pool.set_namespace_callback(Arc::new(|_pool, _name, _evr| 1));
        pool.create_whatprovides(always_installable).unwrap();

        assert_eq!(pool.providers(dep), &[SolvableIx::SYSTEM.to_id()]);
    }

    #[test]
    fn file_provides_round_trip() {
        let mut pool = Pool::new();
        let repo = pool.add_repo("main");
        let perl = add_solvable(&mut pool, repo, "dev-lang/perl", &["dev-lang/perl"]);
        let path = pool.intern_str("/usr/bin/perl");
        let offset = pool.repo_mut(repo).add_idarray(&[path]);
        pool.solvable_mut(perl).requires = offset;

        pool.create_whatprovides(always_installable).unwrap();
        let paths = pool.add_file_provides();
        assert_eq!(paths, vec!["/usr/bin/perl".to_string()]);
    }
}
