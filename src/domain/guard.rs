//! Cycle guard: descendant sets and reparent validation.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::entities::Node;
use crate::domain::error::RejectReason;

/// Collect the full transitive descendant set of `node_id`.
///
/// Traverses the parent edges in reverse: every node whose parent chain
/// passes through `node_id` is included, not just immediate children.
#[instrument(level = "trace", skip(nodes))]
pub fn descendants_of(node_id: &str, nodes: &[Node]) -> HashSet<String> {
    let mut children_of: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in nodes {
        if let Some(parent_id) = node.parent_id.as_deref() {
            children_of.entry(parent_id).or_default().push(node.id.as_str());
        }
    }

    let mut descendants = HashSet::new();
    let mut stack = vec![node_id];
    while let Some(current) = stack.pop() {
        if let Some(children) = children_of.get(current) {
            for &child in children {
                // insert returning false means we looped through bad data
                if descendants.insert(child.to_string()) {
                    stack.push(child);
                }
            }
        }
    }
    descendants
}

/// Check whether moving `source_id` under `target_parent_id` keeps the
/// structure a forest. Promoting to root (`None`) is always legal.
#[instrument(level = "trace", skip(nodes))]
pub fn can_reparent(source_id: &str, target_parent_id: Option<&str>, nodes: &[Node]) -> bool {
    validate_reparent(source_id, target_parent_id, nodes).is_none()
}

/// Like [`can_reparent`] but reports why a move is illegal.
pub fn validate_reparent(
    source_id: &str,
    target_parent_id: Option<&str>,
    nodes: &[Node],
) -> Option<RejectReason> {
    let target = match target_parent_id {
        Some(t) => t,
        None => return None,
    };

    if target == source_id {
        debug!(source = %source_id, "reparent rejected: self-parent");
        return Some(RejectReason::SelfParent);
    }
    if !nodes.iter().any(|n| n.id == target) {
        debug!(source = %source_id, target = %target, "reparent rejected: unknown target");
        return Some(RejectReason::UnknownTarget);
    }
    if descendants_of(source_id, nodes).contains(target) {
        debug!(source = %source_id, target = %target, "reparent rejected: would create cycle");
        return Some(RejectReason::WouldCycle);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str, parent: Option<&str>) -> Node {
        Node::new(id, name, parent.map(String::from))
    }

    fn chain() -> Vec<Node> {
        vec![
            node("1", "Root", None),
            node("2", "Child", Some("1")),
            node("3", "Grand", Some("2")),
        ]
    }

    #[test]
    fn given_chain_when_collecting_descendants_then_transitive_set_returned() {
        let nodes = chain();
        let descendants = descendants_of("1", &nodes);
        assert_eq!(
            descendants,
            HashSet::from(["2".to_string(), "3".to_string()])
        );
    }

    #[test]
    fn given_leaf_when_collecting_descendants_then_empty() {
        assert!(descendants_of("3", &chain()).is_empty());
    }

    #[test]
    fn given_descendant_target_when_validating_then_rejected() {
        let nodes = chain();
        assert!(!can_reparent("1", Some("3"), &nodes));
        assert_eq!(
            validate_reparent("1", Some("3"), &nodes),
            Some(RejectReason::WouldCycle)
        );
    }

    #[test]
    fn given_ancestor_target_when_validating_then_accepted() {
        assert!(can_reparent("3", Some("1"), &chain()));
    }

    #[test]
    fn given_self_target_when_validating_then_rejected() {
        assert_eq!(
            validate_reparent("2", Some("2"), &chain()),
            Some(RejectReason::SelfParent)
        );
    }

    #[test]
    fn given_root_target_when_validating_then_always_accepted() {
        assert!(can_reparent("1", None, &chain()));
        assert!(can_reparent("3", None, &chain()));
    }

    #[test]
    fn given_unknown_target_when_validating_then_rejected() {
        assert_eq!(
            validate_reparent("2", Some("missing"), &chain()),
            Some(RejectReason::UnknownTarget)
        );
    }
}
