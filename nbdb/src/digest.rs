// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Hashed handles for display names.
//!
//! OVN restricts the `name` column of some tables to identifiers that are safe to use in
//! logical flow match expressions.  Display names may contain characters outside that
//! grammar, so the database stores a digest of the display name instead and keeps the
//! display name itself in `external_ids`.

use fnv::FnvHasher;
use std::hash::Hasher;

/// A pure function from a display name to a handle accepted by the naming-constrained
/// system.
///
/// Implementations must be deterministic: every producer and consumer of a handle has to
/// agree on it, across processes and across releases.
pub trait NameDigest {
    /// Compute the handle for `display_name`.
    fn digest(&self, display_name: &str) -> String;
}

/// The digest OVN address sets have always been named with.
///
/// 64-bit FNV-1a over the UTF-8 bytes of the display name, rendered as the letter `a`
/// followed by the decimal value of the hash.  The result matches `[a][0-9]{1,20}`, which
/// is a valid OVN identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OvnNameDigest;

impl NameDigest for OvnNameDigest {
    fn digest(&self, display_name: &str) -> String {
        hash_for_ovn(display_name)
    }
}

/// Compute the [`OvnNameDigest`] handle of `s`.
#[must_use]
pub fn hash_for_ovn(s: &str) -> String {
    let mut hasher = FnvHasher::default();
    hasher.write(s.as_bytes());
    format!("a{}", hasher.finish())
}

impl<F> NameDigest for F
where
    F: Fn(&str) -> String,
{
    fn digest(&self, display_name: &str) -> String {
        self(display_name)
    }
}
