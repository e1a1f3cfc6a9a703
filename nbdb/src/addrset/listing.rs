// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Read address set references back from a database listing.
//!
//! The input is the output of
//! `ovn-nbctl --data=bare --no-heading --columns=external_ids find address_set`:
//! whitespace separated `key=value` pairs, where the `name` key holds the display name.

use tracing::{debug, warn};

use crate::addrset::AddressSetRef;
use crate::digest::{NameDigest, OvnNameDigest};

/// The `external_ids` key holding the display name of an address set.
pub const NAME_KEY: &str = "name";

/// Call `f` with every parseable address set reference found in `output`.
///
/// Display names which do not parse are logged and skipped.
pub fn for_each_address_set<D, F>(output: &str, digest: &D, mut f: F)
where
    D: NameDigest + ?Sized,
    F: FnMut(AddressSetRef),
{
    for field in output.split_whitespace() {
        let Some(display_name) = field
            .split_once('=')
            .filter(|(key, _)| *key == NAME_KEY)
            .map(|(_, value)| value)
        else {
            continue;
        };
        let reference = AddressSetRef::parse_with(display_name, digest);
        if reference.is_unparseable() {
            warn!("Could not parse address set {field:?}; ignoring");
            continue;
        }
        debug!("Found address set {reference} ({})", reference.hashed_name());
        f(reference);
    }
}

/// Collect the parseable address set references found in `output`.
#[must_use]
pub fn parse_listing(output: &str) -> Vec<AddressSetRef> {
    let mut refs = Vec::new();
    for_each_address_set(output, &OvnNameDigest, |reference| refs.push(reference));
    refs
}
