//! Epoch:version-release comparison.
//!
//! The original leaves the exact tie-breaking rules as a build-time
//! compiled comparator; this crate exposes it as the [`EvrCompare`] trait so
//! embedders can swap in their distro's conventions, with
//! [`DefaultEvrCompare`] providing the classic rpm-style "alternating digit
//! and non-digit runs" algorithm as a usable default.

use std::cmp::Ordering;

use crate::id::StrId;
use crate::string_pool::StringPool;

/// Controls whether a missing release component is tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Compare epoch, version, and release.
    Full,
    /// If either side lacks a release, compare only epoch and version.
    MatchRelease,
}

pub trait EvrCompare {
    fn evrcmp(&self, strings: &StringPool, a: StrId, b: StrId, mode: MatchMode) -> Ordering;
}

/// rpm-style epoch:version-release comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEvrCompare;

impl EvrCompare for DefaultEvrCompare {
    fn evrcmp(&self, strings: &StringPool, a: StrId, b: StrId, mode: MatchMode) -> Ordering {
        let (ea, va, ra) = split_evr(strings.str(a));
        let (eb, vb, rb) = split_evr(strings.str(b));

        let epoch_ord = ea.cmp(&eb);
        if epoch_ord != Ordering::Equal {
            return epoch_ord;
        }

        let version_ord = compare_segment(va, vb);
        if version_ord != Ordering::Equal {
            return version_ord;
        }

        match mode {
            MatchMode::MatchRelease if ra.is_none() || rb.is_none() => Ordering::Equal,
            _ => compare_segment(ra.unwrap_or(""), rb.unwrap_or("")),
        }
    }
}

/// Split `[epoch:]version[-release]` into its three parts. A missing epoch
/// defaults to `0`; a missing release is reported as `None` so
/// `MatchMode::MatchRelease` can detect it.
fn split_evr(s: &str) -> (u64, &str, Option<&str>) {
    let (epoch, rest) = match s.split_once(':') {
        Some((e, rest)) => (e.parse().unwrap_or(0), rest),
        None => (0, s),
    };
    match rest.rsplit_once('-') {
        Some((version, release)) => (epoch, version, Some(release)),
        None => (epoch, rest, None),
    }
}

/// Compare two version/release segments by alternating runs of digits and
/// non-digits: numeric runs compare numerically, other runs compare
/// byte-lexically, and a present run outranks a missing one.
fn compare_segment(a: &str, b: &str) -> Ordering {
    let mut a = a.as_bytes();
    let mut b = b.as_bytes();
    loop {
        // Skip matching non-alphanumeric separators without deciding order.
        let a_skip = a.iter().take_while(|c| !c.is_ascii_alphanumeric()).count();
        let b_skip = b.iter().take_while(|c| !c.is_ascii_alphanumeric()).count();
        a = &a[a_skip..];
        b = &b[b_skip..];

        if a.is_empty() && b.is_empty() {
            return Ordering::Equal;
        }
        if a.is_empty() {
            return Ordering::Less;
        }
        if b.is_empty() {
            return Ordering::Greater;
        }

        if a[0].is_ascii_digit() && b[0].is_ascii_digit() {
            let a_len = a.iter().take_while(|c| c.is_ascii_digit()).count();
            let b_len = b.iter().take_while(|c| c.is_ascii_digit()).count();
            let (a_num, a_rest) = a.split_at(a_len);
            let (b_num, b_rest) = b.split_at(b_len);
            let ord = compare_numeric_run(a_num, b_num);
            if ord != Ordering::Equal {
                return ord;
            }
            a = a_rest;
            b = b_rest;
        } else if a[0].is_ascii_digit() {
            // Numeric run outranks a non-numeric one at the same position.
            return Ordering::Greater;
        } else if b[0].is_ascii_digit() {
            return Ordering::Less;
        } else {
            let a_len = a.iter().take_while(|c| !c.is_ascii_digit()).count();
            let b_len = b.iter().take_while(|c| !c.is_ascii_digit()).count();
            let (a_run, a_rest) = a.split_at(a_len);
            let (b_run, b_rest) = b.split_at(b_len);
            let ord = a_run.cmp(b_run);
            if ord != Ordering::Equal {
                return ord;
            }
            a = a_rest;
            b = b_rest;
        }
    }
}

fn compare_numeric_run(a: &[u8], b: &[u8]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Strip leading `'0'` bytes, keeping at least one so `"0"` doesn't become
/// an empty run.
fn strip_leading_zeros(s: &[u8]) -> &[u8] {
    let n = s.iter().take_while(|&&c| c == b'0').count();
    &s[n.min(s.len().saturating_sub(1))..]
}
