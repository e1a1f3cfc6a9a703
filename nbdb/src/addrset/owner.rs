// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use crate::addrset::IpFamily;

/// The object an address set exists for.
///
/// `owner_type` is a free-form tag chosen by the caller.  [`Owner::NAMESPACE`] and
/// [`Owner::NETWORK_POLICY`] are the tags with a [`LegacyLayout`].
///
/// # Note
///
/// Components are joined with `.` and no escaping takes place.  A component containing a
/// `.` yields a display name which does not parse back into the same owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Owner {
    pub owner_type: String,
    pub family: IpFamily,
    pub namespace: String,
    pub name: String,
    /// Extra components (policy direction, rule index, ...).  Order is significant.
    pub args: Vec<String>,
}

impl Owner {
    pub const NAMESPACE: &'static str = "Namespace";
    pub const NETWORK_POLICY: &'static str = "NetworkPolicy";

    #[must_use]
    pub fn new(
        owner_type: impl Into<String>,
        family: IpFamily,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Owner {
        Owner {
            owner_type: owner_type.into(),
            family,
            namespace: namespace.into(),
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Replace the extra components of this owner.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Owner
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The owner of the address set holding the pod IPs of a namespace.
    #[must_use]
    pub fn namespace(family: IpFamily, namespace: impl Into<String>) -> Owner {
        Owner::new(Owner::NAMESPACE, family, namespace, "")
    }

    /// The owner of an address set backing a network policy rule.
    #[must_use]
    pub fn network_policy(
        family: IpFamily,
        namespace: impl Into<String>,
        policy: impl Into<String>,
    ) -> Owner {
        Owner::new(Owner::NETWORK_POLICY, family, namespace, policy)
    }

    /// The legacy layout this owner is encoded with, if any.
    #[must_use]
    pub fn legacy_layout(&self) -> Option<LegacyLayout> {
        legacy_layout(&self.owner_type).filter(|layout| layout.admits(self))
    }
}

/// Display name layouts which predate the tagged `.Type.family.namespace.name` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyLayout {
    /// The display name is the namespace alone.
    BareNamespace,
    /// `namespace.name.args...`, without type or family.
    CompactPolicy,
}

impl LegacyLayout {
    /// Returns true iff `owner` can be written with this layout without losing information.
    #[must_use]
    pub fn admits(self, owner: &Owner) -> bool {
        match self {
            LegacyLayout::BareNamespace => {
                owner.family == IpFamily::V4 && owner.name.is_empty() && owner.args.is_empty()
            }
            LegacyLayout::CompactPolicy => owner.family == IpFamily::V4,
        }
    }
}

/// The legacy layout associated with an owner type.
///
/// New owner types get the tagged layout; add an entry here only for names which already
/// exist in deployed databases.
#[must_use]
pub fn legacy_layout(owner_type: &str) -> Option<LegacyLayout> {
    match owner_type {
        Owner::NAMESPACE => Some(LegacyLayout::BareNamespace),
        Owner::NETWORK_POLICY => Some(LegacyLayout::CompactPolicy),
        _ => None,
    }
}
