// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Gateway router naming and the `ovn-nbctl` queries used to find gateway VIP targets.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Prefix of the name of a node's gateway router.
pub const GATEWAY_ROUTER_PREFIX: &str = "GR_";

/// Name of the gateway router of `node`.
#[must_use]
pub fn gateway_router_name(node: &str) -> String {
    format!("{GATEWAY_ROUTER_PREFIX}{node}")
}

/// Load balancer protocols with a per-gateway load balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LbProtocol {
    Tcp,
    Udp,
    Sctp,
}

impl LbProtocol {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LbProtocol::Tcp => "tcp",
            LbProtocol::Udp => "udp",
            LbProtocol::Sctp => "sctp",
        }
    }
}

impl Display for LbProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown load balancer protocol '{0}': allowed values are tcp|udp|sctp")]
pub struct InvalidLbProtocol(pub String);

impl FromStr for LbProtocol {
    type Err = InvalidLbProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(LbProtocol::Tcp),
            "udp" => Ok(LbProtocol::Udp),
            "sctp" => Ok(LbProtocol::Sctp),
            _ => Err(InvalidLbProtocol(s.to_string())),
        }
    }
}

/// The `external_ids` key tagging the `protocol` load balancer of a gateway router.
#[must_use]
pub fn lb_gateway_external_id_key(protocol: LbProtocol) -> String {
    format!("{protocol}_lb_gateway_router")
}

/// List the names of all gateway routers (routers bound to a chassis).
#[must_use]
pub fn list_gateway_routers_args() -> Vec<String> {
    [
        "--data=bare",
        "--no-heading",
        "--columns=name",
        "find",
        "logical_router",
        "options:chassis!=null",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Read the physical IP of a gateway router.
#[must_use]
pub fn gateway_physical_ip_args(gateway: &str) -> Vec<String> {
    vec![
        "get".to_string(),
        "logical_router".to_string(),
        gateway.to_string(),
        "external_ids:physical_ip".to_string(),
    ]
}

/// Find the uuid of the `protocol` load balancer of a gateway router.
#[must_use]
pub fn gateway_load_balancer_args(gateway: &str, protocol: LbProtocol) -> Vec<String> {
    vec![
        "--data=bare".to_string(),
        "--no-heading".to_string(),
        "--columns=_uuid".to_string(),
        "find".to_string(),
        "load_balancer".to_string(),
        format!(
            "external_ids:{}={gateway}",
            lb_gateway_external_id_key(protocol)
        ),
    ]
}
