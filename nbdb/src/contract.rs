// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Value generators for property testing.

use bolero::{Driver, ValueGenerator};
use std::ops::Bound;

use crate::addrset::{IpFamily, Owner};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-";
const KNOWN_OWNER_TYPES: [&str; 4] = [
    Owner::NAMESPACE,
    Owner::NETWORK_POLICY,
    "EgressFirewall",
    "EgressQoS",
];

/// Generate a name component of `min..=max` characters which never contains a `.`.
#[must_use]
pub struct ComponentGenerator {
    min: usize,
    max: usize,
}

impl ComponentGenerator {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl ValueGenerator for ComponentGenerator {
    type Output = String;

    fn generate<D: Driver>(&self, driver: &mut D) -> Option<Self::Output> {
        let len = driver.gen_usize(Bound::Included(&self.min), Bound::Included(&self.max))?;
        let mut component = String::with_capacity(len);
        for _ in 0..len {
            let idx = driver.gen_usize(Bound::Included(&0), Bound::Excluded(&ALPHABET.len()))?;
            component.push(char::from(ALPHABET[idx]));
        }
        Some(component)
    }
}

/// Generate [`Owner`]s whose display name parses back into the same owner.
///
/// Namespaces are never empty, no component contains a `.`, and owners encoded with the
/// tagged layout always carry at least one arg.
pub struct RoundTripOwnerGenerator;

impl ValueGenerator for RoundTripOwnerGenerator {
    type Output = Owner;

    fn generate<D: Driver>(&self, driver: &mut D) -> Option<Self::Output> {
        let pick = driver.gen_usize(
            Bound::Included(&0),
            Bound::Included(&KNOWN_OWNER_TYPES.len()),
        )?;
        let owner_type = match KNOWN_OWNER_TYPES.get(pick) {
            Some(known) => (*known).to_string(),
            None => ComponentGenerator::new(1, 12).generate(driver)?,
        };
        let family = IpFamily::from(driver.gen_bool(Some(0.5))?);
        let namespace = ComponentGenerator::new(1, 16).generate(driver)?;
        let name = ComponentGenerator::new(0, 16).generate(driver)?;
        let nargs = driver.gen_usize(Bound::Included(&0), Bound::Included(&4))?;
        let mut args = Vec::with_capacity(nargs + 1);
        for _ in 0..nargs {
            args.push(ComponentGenerator::new(0, 8).generate(driver)?);
        }
        let mut owner = Owner::new(owner_type, family, namespace, name).with_args(args);
        if owner.legacy_layout().is_none() && owner.args.is_empty() {
            owner.args.push(ComponentGenerator::new(0, 8).generate(driver)?);
        }
        Some(owner)
    }
}
