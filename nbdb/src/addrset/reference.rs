// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::fmt::Display;

use crate::addrset::{IpFamily, LegacyLayout, Owner};
use crate::digest::{NameDigest, OvnNameDigest};

const SEPARATOR: &str = ".";

/// The structure recovered from (or encoded into) a display name.
///
/// Each variant corresponds to one display name layout:
///
/// * `BareNamespace`: `namespace`
/// * `CompactPolicy`: `namespace.name.args...`
/// * `Tagged`: `.owner_type.family.namespace.name.args...`
///
/// `Unparseable` is produced only when parsing a display name that matches none of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "layout", rename_all = "kebab-case"))]
pub enum Identity {
    BareNamespace {
        namespace: String,
    },
    CompactPolicy {
        namespace: String,
        name: String,
        args: Vec<String>,
    },
    Tagged {
        owner_type: String,
        family: IpFamily,
        namespace: String,
        name: String,
        args: Vec<String>,
    },
    Unparseable,
}

impl Identity {
    fn encode(owner: Owner) -> Identity {
        match owner.legacy_layout() {
            Some(LegacyLayout::BareNamespace) => Identity::BareNamespace {
                namespace: owner.namespace,
            },
            Some(LegacyLayout::CompactPolicy) => Identity::CompactPolicy {
                namespace: owner.namespace,
                name: owner.name,
                args: owner.args,
            },
            None => Identity::Tagged {
                owner_type: owner.owner_type,
                family: owner.family,
                namespace: owner.namespace,
                name: owner.name,
                args: owner.args,
            },
        }
    }

    fn parse(display_name: &str) -> Identity {
        let parts: Vec<&str> = display_name.split(SEPARATOR).collect();
        // A tagged name with no args has exactly five parts and is not recognized.
        // Names of that shape exist in deployed databases, so the threshold stays as is.
        match parts.as_slice() {
            ["", owner_type, family, namespace, name, args @ ..] if !args.is_empty() => {
                Identity::Tagged {
                    owner_type: (*owner_type).to_owned(),
                    family: IpFamily::from_tag(family),
                    namespace: (*namespace).to_owned(),
                    name: (*name).to_owned(),
                    args: owned_parts(args),
                }
            }
            [namespace, name, args @ ..] if !namespace.is_empty() => Identity::CompactPolicy {
                namespace: (*namespace).to_owned(),
                name: (*name).to_owned(),
                args: owned_parts(args),
            },
            [namespace] if !namespace.is_empty() => Identity::BareNamespace {
                namespace: (*namespace).to_owned(),
            },
            _ => Identity::Unparseable,
        }
    }

    /// The display name of this identity, or `None` if it is [`Identity::Unparseable`].
    fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = match self {
            Identity::BareNamespace { namespace } => vec![namespace.as_str()],
            Identity::CompactPolicy {
                namespace,
                name,
                args,
            } => [namespace.as_str(), name.as_str()]
                .into_iter()
                .chain(args.iter().map(String::as_str))
                .collect(),
            Identity::Tagged {
                owner_type,
                family,
                namespace,
                name,
                args,
            } => [
                "",
                owner_type.as_str(),
                family.tag(),
                namespace.as_str(),
                name.as_str(),
            ]
                .into_iter()
                .chain(args.iter().map(String::as_str))
                .collect(),
            Identity::Unparseable => return None,
        };
        Some(parts.join(SEPARATOR))
    }

    #[must_use]
    pub fn is_unparseable(&self) -> bool {
        matches!(self, Identity::Unparseable)
    }

    #[must_use]
    pub fn owner_type(&self) -> Option<&str> {
        match self {
            Identity::BareNamespace { .. } => Some(Owner::NAMESPACE),
            Identity::CompactPolicy { .. } => Some(Owner::NETWORK_POLICY),
            Identity::Tagged { owner_type, .. } => Some(owner_type),
            Identity::Unparseable => None,
        }
    }

    #[must_use]
    pub fn family(&self) -> Option<IpFamily> {
        match self {
            Identity::BareNamespace { .. } | Identity::CompactPolicy { .. } => Some(IpFamily::V4),
            Identity::Tagged { family, .. } => Some(*family),
            Identity::Unparseable => None,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Identity::BareNamespace { namespace }
            | Identity::CompactPolicy { namespace, .. }
            | Identity::Tagged { namespace, .. } => Some(namespace),
            Identity::Unparseable => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Identity::BareNamespace { .. } => Some(""),
            Identity::CompactPolicy { name, .. } | Identity::Tagged { name, .. } => Some(name),
            Identity::Unparseable => None,
        }
    }

    #[must_use]
    pub fn args(&self) -> Option<&[String]> {
        match self {
            Identity::BareNamespace { .. } => Some(&[]),
            Identity::CompactPolicy { args, .. } | Identity::Tagged { args, .. } => Some(args),
            Identity::Unparseable => None,
        }
    }

    /// Rebuild the [`Owner`] tuple, or `None` if this identity is [`Identity::Unparseable`].
    #[must_use]
    pub fn owner(&self) -> Option<Owner> {
        Some(
            Owner::new(
                self.owner_type()?,
                self.family()?,
                self.namespace()?,
                self.name()?,
            )
            .with_args(self.args()?.iter().cloned()),
        )
    }
}

fn owned_parts(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_owned()).collect()
}

/// A reference to an address set: its display name, its hashed handle, and the identity
/// of its owner.
///
/// Values are immutable.  Build one with [`AddressSetRef::new`] when creating an address
/// set, or with [`AddressSetRef::parse`] when reading one back from the database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AddressSetRef {
    display_name: String,
    hashed_name: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    identity: Identity,
}

impl AddressSetRef {
    /// Build the reference to the address set of `owner`, hashed with [`OvnNameDigest`].
    #[must_use]
    pub fn new(owner: Owner) -> AddressSetRef {
        AddressSetRef::new_with(owner, &OvnNameDigest)
    }

    /// Build the reference to the address set of `owner`, hashed with `digest`.
    #[must_use]
    pub fn new_with<D: NameDigest + ?Sized>(owner: Owner, digest: &D) -> AddressSetRef {
        let identity = Identity::encode(owner);
        let display_name = identity.display_name().unwrap_or_else(|| unreachable!());
        let hashed_name = digest.digest(&display_name);
        AddressSetRef {
            display_name,
            hashed_name,
            identity,
        }
    }

    /// Parse a display name, hashing it with [`OvnNameDigest`].
    ///
    /// This never fails: a display name which matches no known layout yields a reference
    /// whose identity is [`Identity::Unparseable`].  The hashed name is computed in every
    /// case.
    #[must_use]
    pub fn parse(display_name: &str) -> AddressSetRef {
        AddressSetRef::parse_with(display_name, &OvnNameDigest)
    }

    /// Parse a display name, hashing it with `digest`.
    #[must_use]
    pub fn parse_with<D: NameDigest + ?Sized>(display_name: &str, digest: &D) -> AddressSetRef {
        AddressSetRef {
            display_name: display_name.to_owned(),
            hashed_name: digest.digest(display_name),
            identity: Identity::parse(display_name),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The handle the address set is stored under.
    #[must_use]
    pub fn hashed_name(&self) -> &str {
        &self.hashed_name
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn is_unparseable(&self) -> bool {
        self.identity.is_unparseable()
    }

    #[must_use]
    pub fn owner(&self) -> Option<Owner> {
        self.identity.owner()
    }
}

impl Display for AddressSetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Build an [`AddressSetRef`] from its components.
#[must_use]
pub fn encode<I, S>(
    owner_type: &str,
    ipv6: bool,
    namespace: &str,
    name: &str,
    args: I,
) -> AddressSetRef
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AddressSetRef::new(Owner::new(owner_type, IpFamily::from(ipv6), namespace, name).with_args(args))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod test {
    use super::{AddressSetRef, Identity, encode};
    use crate::addrset::{IpFamily, Owner};
    use crate::contract::RoundTripOwnerGenerator;
    use crate::digest::hash_for_ovn;
    use pretty_assertions::assert_eq;

    const NO_ARGS: [&str; 0] = [];

    #[test]
    fn ipv4_namespace_is_the_bare_namespace() {
        let ns = encode("Namespace", false, "testing", "", NO_ARGS);
        assert_eq!(ns.display_name(), "testing");
        assert_eq!(ns.hashed_name(), hash_for_ovn("testing"));
    }

    #[test]
    fn backward_compatible_hashed_names() {
        let ns = encode("Namespace", false, "testing", "", NO_ARGS);

        // a name switches to the tagged layout
        let named = encode("Namespace", false, "testing", "also-testing", NO_ARGS);
        assert_eq!(named.display_name(), ".Namespace.v4.testing.also-testing");
        assert_ne!(named.hashed_name(), ns.hashed_name());

        // so do args
        let with_args = encode("Namespace", false, "testing", "", ["blah", "blah"]);
        assert_eq!(with_args.display_name(), ".Namespace.v4.testing..blah.blah");
        assert_ne!(with_args.hashed_name(), ns.hashed_name());
        assert_ne!(with_args.hashed_name(), named.hashed_name());

        // and IPv6
        let ns6 = encode("Namespace", true, "testing", "", NO_ARGS);
        assert_eq!(ns6.display_name(), ".Namespace.v6.testing.");
        assert_ne!(ns6.hashed_name(), ns.hashed_name());
        assert_ne!(ns6.hashed_name(), named.hashed_name());
        assert_ne!(ns6.hashed_name(), with_args.hashed_name());
    }

    #[test]
    fn ipv4_network_policy_has_no_type_or_family() {
        let np = encode("NetworkPolicy", false, "testing", "policy", ["ingress", "1"]);
        assert_eq!(np.display_name(), "testing.policy.ingress.1");
        assert_eq!(np.hashed_name(), hash_for_ovn("testing.policy.ingress.1"));

        let np6 = encode("NetworkPolicy", true, "testing", "policy", ["ingress", "1"]);
        assert_eq!(
            np6.display_name(),
            ".NetworkPolicy.v6.testing.policy.ingress.1"
        );
        assert_ne!(np6.hashed_name(), np.hashed_name());
    }

    #[test]
    fn other_owner_types_are_tagged() {
        let r = AddressSetRef::new(
            Owner::new("EgressFirewall", IpFamily::V4, "testing", "fw").with_args(["0"]),
        );
        assert_eq!(r.display_name(), ".EgressFirewall.v4.testing.fw.0");
    }

    #[test]
    fn parse_tagged() {
        let r = AddressSetRef::parse(".NetworkPolicy.v6.testing.policy.ingress.1");
        assert_eq!(
            r.identity(),
            &Identity::Tagged {
                owner_type: "NetworkPolicy".to_string(),
                family: IpFamily::V6,
                namespace: "testing".to_string(),
                name: "policy".to_string(),
                args: vec!["ingress".to_string(), "1".to_string()],
            }
        );
        assert_eq!(r.hashed_name(), hash_for_ovn(r.display_name()));
    }

    #[test]
    fn parse_compact_policy() {
        let r = AddressSetRef::parse("testing.policy.ingress.1");
        assert_eq!(
            r.owner().unwrap(),
            Owner::network_policy(IpFamily::V4, "testing", "policy").with_args(["ingress", "1"])
        );
        let r = AddressSetRef::parse("testing.");
        assert_eq!(
            r.owner().unwrap(),
            Owner::network_policy(IpFamily::V4, "testing", "")
        );
    }

    #[test]
    fn parse_bare_namespace() {
        let r = AddressSetRef::parse("testing");
        assert_eq!(r.owner().unwrap(), Owner::namespace(IpFamily::V4, "testing"));
        assert_eq!(r.identity().name(), Some(""));
        let no_args: &[String] = &[];
        assert_eq!(r.identity().args(), Some(no_args));
    }

    #[test]
    fn empty_name_is_unparseable() {
        let r = AddressSetRef::parse("");
        assert!(r.is_unparseable());
        assert_eq!(r.owner(), None);
        assert_eq!(r.identity().namespace(), None);
        assert_eq!(r.hashed_name(), hash_for_ovn(""));
    }

    #[test]
    fn leading_separator_without_enough_parts_is_unparseable() {
        for name in [".", "..", ".testing", ".Namespace.v4.testing"] {
            let r = AddressSetRef::parse(name);
            assert!(r.is_unparseable(), "{name} should not parse");
            assert_eq!(r.hashed_name(), hash_for_ovn(name));
        }
    }

    /// Tagged names need at least one arg to be recognized.  This pins the current
    /// behavior: the references below are encoded fine but do not parse back.
    #[test]
    fn tagged_names_without_args_do_not_parse() {
        let named = encode("Namespace", false, "testing", "also-testing", NO_ARGS);
        assert!(AddressSetRef::parse(named.display_name()).is_unparseable());

        let ns6 = encode("Namespace", true, "testing", "", NO_ARGS);
        assert!(AddressSetRef::parse(ns6.display_name()).is_unparseable());

        let with_arg = encode("Namespace", true, "testing", "", [""]);
        assert_eq!(with_arg.display_name(), ".Namespace.v6.testing..");
        assert_eq!(
            AddressSetRef::parse(with_arg.display_name()).owner(),
            with_arg.owner()
        );
    }

    #[test]
    fn parse_keeps_the_display_name() {
        let r = AddressSetRef::parse(".Namespace.v4.testing..blah.blah");
        assert_eq!(r.display_name(), ".Namespace.v4.testing..blah.blah");
        assert_eq!(r.to_string(), ".Namespace.v4.testing..blah.blah");
    }

    #[test]
    fn custom_digest() {
        let digest = |s: &str| format!("x{}", s.len());
        let r = AddressSetRef::new_with(Owner::namespace(IpFamily::V4, "testing"), &digest);
        assert_eq!(r.hashed_name(), "x7");
        let r = AddressSetRef::parse_with("", &digest);
        assert_eq!(r.hashed_name(), "x0");
    }

    #[test]
    fn round_trip() {
        bolero::check!()
            .with_generator(RoundTripOwnerGenerator)
            .for_each(|owner: &Owner| {
                let encoded = AddressSetRef::new(owner.clone());
                let decoded = AddressSetRef::parse(encoded.display_name());
                assert_eq!(decoded.owner().as_ref(), Some(owner));
                assert_eq!(decoded.hashed_name(), encoded.hashed_name());
                assert_eq!(decoded, encoded);
            });
    }

    #[test]
    fn parse_never_panics_and_always_hashes() {
        bolero::check!().with_type::<String>().for_each(|name: &String| {
            let r = AddressSetRef::parse(name);
            assert_eq!(r.hashed_name(), hash_for_ovn(name));
            assert_eq!(r.display_name(), name);
        });
    }
}
