// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Node;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Invalid label selector operator '{0}'")]
    UnknownOperator(String),
    #[error("Operator '{operator}' on key '{key}' requires at least one value")]
    MissingValues { key: String, operator: String },
    #[error("Operator '{operator}' on key '{key}' does not accept values")]
    UnexpectedValues { key: String, operator: String },
}

fn requirement_matches(
    requirement: &LabelSelectorRequirement,
    labels: &BTreeMap<String, String>,
) -> Result<bool, SelectorError> {
    let values = requirement.values.as_deref().unwrap_or_default();
    let label = labels.get(&requirement.key);
    let operator = requirement.operator.as_str();
    match operator {
        "In" | "NotIn" if values.is_empty() => Err(SelectorError::MissingValues {
            key: requirement.key.clone(),
            operator: operator.to_string(),
        }),
        "Exists" | "DoesNotExist" if !values.is_empty() => Err(SelectorError::UnexpectedValues {
            key: requirement.key.clone(),
            operator: operator.to_string(),
        }),
        "In" => Ok(label.is_some_and(|label| values.contains(label))),
        "NotIn" => Ok(!label.is_some_and(|label| values.contains(label))),
        "Exists" => Ok(label.is_some()),
        "DoesNotExist" => Ok(label.is_none()),
        _ => Err(SelectorError::UnknownOperator(operator.to_string())),
    }
}

/// Evaluate a label selector against a set of labels.
///
/// An empty selector matches everything.
///
/// # Errors
///
/// Fails if any requirement of the selector is malformed, regardless of whether the other
/// requirements match.
pub fn selector_matches(
    selector: &LabelSelector,
    labels: &BTreeMap<String, String>,
) -> Result<bool, SelectorError> {
    let mut matched = selector
        .match_labels
        .iter()
        .flatten()
        .all(|(key, value)| labels.get(key) == Some(value));
    for requirement in selector.match_expressions.iter().flatten() {
        matched &= requirement_matches(requirement, labels)?;
    }
    Ok(matched)
}

/// Returns true iff `node` is selected by the configured no-host-subnet node selector,
/// i.e. it does not take part in the OVN overlay.
///
/// Without a selector no node is a hybrid overlay node.  A malformed selector selects
/// nothing.
#[must_use]
pub fn is_hybrid_overlay_node(node: &Node, no_host_subnet_nodes: Option<&LabelSelector>) -> bool {
    let Some(selector) = no_host_subnet_nodes else {
        return false;
    };
    let empty = BTreeMap::new();
    let labels = node.metadata.labels.as_ref().unwrap_or(&empty);
    selector_matches(selector, labels).unwrap_or_else(|e| {
        warn!("Ignoring no-host-subnet node selector: {e}");
        false
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use tracing_test::traced_test;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn requirement(key: &str, operator: &str, values: &[&str]) -> LabelSelectorRequirement {
        LabelSelectorRequirement {
            key: key.to_string(),
            operator: operator.to_string(),
            values: if values.is_empty() {
                None
            } else {
                Some(values.iter().map(|v| (*v).to_string()).collect())
            },
        }
    }

    fn windows_node() -> Node {
        Node {
            metadata: ObjectMeta {
                name: Some("win1".to_string()),
                labels: Some(labels(&[("kubernetes.io/os", "windows")])),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn empty_selector_matches_everything() {
        assert!(selector_matches(&LabelSelector::default(), &BTreeMap::new()).unwrap());
    }

    #[test]
    fn match_labels() {
        let selector = LabelSelector {
            match_labels: Some(labels(&[("kubernetes.io/os", "windows")])),
            ..Default::default()
        };
        assert!(selector_matches(&selector, &labels(&[("kubernetes.io/os", "windows")])).unwrap());
        assert!(!selector_matches(&selector, &labels(&[("kubernetes.io/os", "linux")])).unwrap());
        assert!(!selector_matches(&selector, &BTreeMap::new()).unwrap());
    }

    #[test]
    fn match_expressions() {
        let node_labels = labels(&[("kubernetes.io/os", "windows"), ("zone", "a")]);
        let check = |req: LabelSelectorRequirement| {
            let selector = LabelSelector {
                match_expressions: Some(vec![req]),
                ..Default::default()
            };
            selector_matches(&selector, &node_labels)
        };
        assert_eq!(check(requirement("zone", "In", &["a", "b"])), Ok(true));
        assert_eq!(check(requirement("zone", "In", &["c"])), Ok(false));
        assert_eq!(check(requirement("zone", "NotIn", &["c"])), Ok(true));
        assert_eq!(check(requirement("rack", "NotIn", &["c"])), Ok(true));
        assert_eq!(check(requirement("zone", "Exists", &[])), Ok(true));
        assert_eq!(check(requirement("rack", "DoesNotExist", &[])), Ok(true));
        assert_eq!(
            check(requirement("zone", "Gt", &["1"])),
            Err(SelectorError::UnknownOperator("Gt".to_string()))
        );
        assert!(matches!(
            check(requirement("zone", "In", &[])),
            Err(SelectorError::MissingValues { .. })
        ));
        assert!(matches!(
            check(requirement("zone", "Exists", &["a"])),
            Err(SelectorError::UnexpectedValues { .. })
        ));
    }

    #[test]
    fn no_selector_means_no_hybrid_nodes() {
        assert!(!is_hybrid_overlay_node(&windows_node(), None));
    }

    #[test]
    fn selected_node_is_hybrid() {
        let selector = LabelSelector {
            match_labels: Some(labels(&[("kubernetes.io/os", "windows")])),
            ..Default::default()
        };
        assert!(is_hybrid_overlay_node(&windows_node(), Some(&selector)));
        assert!(!is_hybrid_overlay_node(&Node::default(), Some(&selector)));
    }

    #[test]
    #[traced_test]
    fn malformed_selector_selects_nothing() {
        let selector = LabelSelector {
            match_expressions: Some(vec![requirement("kubernetes.io/os", "Matches", &["win"])]),
            ..Default::default()
        };
        assert!(!is_hybrid_overlay_node(&windows_node(), Some(&selector)));
        assert!(logs_contain("Invalid label selector operator 'Matches'"));
    }
}
