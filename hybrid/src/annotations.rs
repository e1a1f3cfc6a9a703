// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::collections::BTreeMap;

use ipnet::IpNet;
use k8s_openapi::api::core::v1::{Namespace, Node};
use thiserror::Error;

use crate::{HYBRID_OVERLAY_EXTERNAL_GW, HYBRID_OVERLAY_NODE_SUBNET, HYBRID_OVERLAY_VTEP};

const NODE_INTERNAL_IP: &str = "InternalIP";

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("error parsing node {node} annotation {key} value {value:?}: {source}")]
    InvalidJson {
        node: String,
        key: &'static str,
        value: String,
        source: serde_json::Error,
    },
    #[error("error parsing node {node} annotation {key} value {value:?}: {source}")]
    InvalidCidr {
        node: String,
        key: &'static str,
        value: String,
        source: ipnet::AddrParseError,
    },
    #[error("failed to read node {0:?} InternalIP")]
    NoInternalIp(String),
}

fn node_name(node: &Node) -> &str {
    node.metadata.name.as_deref().unwrap_or_default()
}

/// Parse a CIDR, clearing host bits.
fn parse_cidr(cidr: &str) -> Result<IpNet, ipnet::AddrParseError> {
    cidr.parse::<IpNet>().map(|net| net.trunc())
}

/// The hybrid overlay host subnets of `node`.
///
/// Returns `Ok(None)` if the node has no such annotation.  The annotation is either a
/// single CIDR (the single-stack form) or a JSON list of CIDRs.
///
/// # Errors
///
/// Fails if the annotation is present but is neither a CIDR nor a JSON list of CIDRs.
pub fn parse_host_subnets(node: &Node) -> Result<Option<Vec<IpNet>>, AnnotationError> {
    let Some(annotation) = node
        .metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(HYBRID_OVERLAY_NODE_SUBNET))
    else {
        return Ok(None);
    };

    if let Ok(subnet) = parse_cidr(annotation) {
        return Ok(Some(vec![subnet]));
    }

    let cidrs: Vec<String> =
        serde_json::from_str(annotation).map_err(|source| AnnotationError::InvalidJson {
            node: node_name(node).to_string(),
            key: HYBRID_OVERLAY_NODE_SUBNET,
            value: annotation.clone(),
            source,
        })?;

    cidrs
        .iter()
        .map(|cidr| {
            parse_cidr(cidr).map_err(|source| AnnotationError::InvalidCidr {
                node: node_name(node).to_string(),
                key: HYBRID_OVERLAY_NODE_SUBNET,
                value: cidr.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Returns true iff both subnets are absent, or both are present and equal.
#[must_use]
pub fn same_ip_net(a: Option<&IpNet>, b: Option<&IpNet>) -> bool {
    a == b
}

/// The first `InternalIP` address reported in the status of `node`.
///
/// # Errors
///
/// Fails if the node reports no `InternalIP` address.
pub fn node_internal_ip(node: &Node) -> Result<&str, AnnotationError> {
    node.status
        .as_ref()
        .and_then(|status| status.addresses.as_ref())
        .into_iter()
        .flatten()
        .find(|address| address.type_ == NODE_INTERNAL_IP)
        .map(|address| address.address.as_str())
        .ok_or_else(|| AnnotationError::NoInternalIp(node_name(node).to_string()))
}

/// The hybrid overlay annotations a pod inherits from its namespace.
#[must_use]
pub fn namespace_annotations_for_pod(namespace: &Namespace) -> BTreeMap<String, String> {
    let Some(annotations) = namespace.metadata.annotations.as_ref() else {
        return BTreeMap::new();
    };
    [HYBRID_OVERLAY_EXTERNAL_GW, HYBRID_OVERLAY_VTEP]
        .into_iter()
        .filter_map(|key| {
            annotations
                .get(key)
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}
