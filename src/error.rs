//! Error handling for solv-pool.
//!
//! Most resolution failures are not represented here — a missing namespace
//! callback or an unmatched relation degrades to an empty provider list and a
//! debug-sink log line (see the module docs on [`crate::pool::Pool`]). This
//! enum is reserved for the small set of conditions that indicate a broken
//! invariant rather than ordinary "nothing provides this" results.

/// solv-pool error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A whatprovides offset pointed outside the allocated data array.
    #[error("whatprovides invariant violated: {0}")]
    Invariant(String),

    /// The shrink compaction pass tried to write past its own read cursor.
    #[error("whatprovides shrink pass overran its source data")]
    ShrinkOverrun,

    /// A dependency list was missing its null terminator.
    #[error("unterminated id array at offset {0}")]
    UnterminatedIdArray(crate::id::Offset),
}

pub type Result<T> = std::result::Result<T, Error>;
