// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::fmt::Display;

/// The address family an address set holds addresses of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IpFamily {
    #[default]
    V4,
    V6,
}

impl IpFamily {
    /// The tag written into tagged display names.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            IpFamily::V4 => "v4",
            IpFamily::V6 => "v6",
        }
    }

    /// Read a family tag back.
    ///
    /// Only `v6` names the IPv6 family; any other tag is read as IPv4.
    #[must_use]
    pub fn from_tag(tag: &str) -> IpFamily {
        if tag == IpFamily::V6.tag() {
            IpFamily::V6
        } else {
            IpFamily::V4
        }
    }

    #[must_use]
    pub const fn is_ipv6(self) -> bool {
        matches!(self, IpFamily::V6)
    }
}

impl From<bool> for IpFamily {
    /// `true` selects IPv6.
    fn from(ipv6: bool) -> Self {
        if ipv6 { IpFamily::V6 } else { IpFamily::V4 }
    }
}

impl Display for IpFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
