// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Hybrid overlay helpers: node and namespace annotations, and selection of the nodes
//! which do not take part in the OVN overlay.

#![deny(clippy::all, clippy::pedantic)]

pub mod annotations;
pub mod selector;

/// Node annotation holding the hybrid overlay host subnet(s) of a node.
pub const HYBRID_OVERLAY_NODE_SUBNET: &str = "k8s.ovn.org/hybrid-overlay-node-subnet";
/// Namespace (and pod) annotation naming the external gateway of the hybrid overlay.
pub const HYBRID_OVERLAY_EXTERNAL_GW: &str = "k8s.ovn.org/hybrid-overlay-external-gw";
/// Namespace (and pod) annotation naming the VTEP of the hybrid overlay.
pub const HYBRID_OVERLAY_VTEP: &str = "k8s.ovn.org/hybrid-overlay-vtep";

// re-exports
pub use annotations::{
    AnnotationError, namespace_annotations_for_pod, node_internal_ip, parse_host_subnets,
    same_ip_net,
};
pub use selector::{SelectorError, is_hybrid_overlay_node, selector_matches};
