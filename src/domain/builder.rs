//! Tree builder: flat parent-pointer lists to rooted, sorted forests.

use std::collections::{HashMap, HashSet};

use tracing::{instrument, warn};

use crate::domain::entities::Node;

/// Derived projection of a node within a built forest.
///
/// Rebuilt from the flat list on every mutation, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub node: Node,
    pub children: Vec<TreeNode>,
    /// 0 for forest roots, parent depth + 1 otherwise
    pub depth: usize,
}

/// Build a rooted forest from a flat node list.
///
/// A node becomes a forest root when its `parent_id` is `None` or does not
/// resolve to an existing node (dangling references heal to orphaned roots).
/// Nodes trapped in a pre-existing parent cycle are healed by promoting the
/// member that sorts first to a root. Children at every level, and the roots
/// themselves, are ordered case-insensitively by name with id as tiebreaker.
///
/// Idempotent: the same input always yields a structurally identical forest.
#[instrument(level = "debug", skip(nodes), fields(count = nodes.len()))]
pub fn build(nodes: &[Node]) -> Vec<TreeNode> {
    let index: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    // Reverse adjacency: resolved parent id -> child nodes
    let mut children_of: HashMap<&str, Vec<&Node>> = HashMap::new();
    let mut roots: Vec<&Node> = Vec::new();

    for node in nodes {
        match node.parent_id.as_deref() {
            Some(parent_id) if index.contains_key(parent_id) && parent_id != node.id => {
                children_of.entry(parent_id).or_default().push(node);
            }
            Some(parent_id) => {
                warn!(
                    node = %node.id,
                    parent = %parent_id,
                    "unresolved parent reference, promoting node to orphaned root"
                );
                roots.push(node);
            }
            None => roots.push(node),
        }
    }

    roots.sort_by_key(|n| n.sort_key());

    let mut visited: HashSet<&str> = HashSet::new();
    let mut forest: Vec<TreeNode> = roots
        .iter()
        .map(|root| attach(root, 0, &children_of, &mut visited))
        .collect();

    // Anything still unvisited sits in a parent cycle. Promote a
    // deterministic representative per cycle until all nodes are placed.
    loop {
        let mut remaining: Vec<&Node> = nodes
            .iter()
            .filter(|n| !visited.contains(n.id.as_str()))
            .collect();
        if remaining.is_empty() {
            break;
        }
        remaining.sort_by_key(|n| n.sort_key());
        let promoted = remaining[0];
        warn!(node = %promoted.id, "parent cycle in input data, promoting member to root");
        forest.push(attach(promoted, 0, &children_of, &mut visited));
    }

    forest.sort_by_key(|t| t.node.sort_key());
    forest
}

fn attach<'a>(
    node: &'a Node,
    depth: usize,
    children_of: &HashMap<&str, Vec<&'a Node>>,
    visited: &mut HashSet<&'a str>,
) -> TreeNode {
    visited.insert(node.id.as_str());

    let mut child_nodes: Vec<&Node> = children_of
        .get(node.id.as_str())
        .map(|v| v.to_vec())
        .unwrap_or_default();
    child_nodes.sort_by_key(|n| n.sort_key());

    let children = child_nodes
        .into_iter()
        // visited guard keeps cycle healing from re-descending into the cycle
        .filter_map(|child| {
            if visited.contains(child.id.as_str()) {
                None
            } else {
                Some(attach(child, depth + 1, children_of, visited))
            }
        })
        .collect();

    TreeNode {
        node: node.clone(),
        children,
        depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str, parent: Option<&str>) -> Node {
        Node::new(id, name, parent.map(String::from))
    }

    // root
    // ├── Apple
    // └── Zebra
    #[test]
    fn given_unsorted_siblings_when_building_then_sorted_by_name() {
        let nodes = vec![
            node("1", "root", None),
            node("2", "Zebra", Some("1")),
            node("3", "Apple", Some("1")),
        ];

        let forest = build(&nodes);

        assert_eq!(forest.len(), 1);
        let names: Vec<_> = forest[0].children.iter().map(|c| c.node.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Zebra"]);
    }

    #[test]
    fn given_dangling_parent_when_building_then_node_becomes_root() {
        let nodes = vec![node("1", "a", None), node("2", "b", Some("gone"))];

        let forest = build(&nodes);

        assert_eq!(forest.len(), 2);
        assert!(forest.iter().all(|t| t.depth == 0));
    }

    #[test]
    fn given_parent_cycle_when_building_then_first_member_promoted() {
        let nodes = vec![node("1", "beta", Some("2")), node("2", "alpha", Some("1"))];

        let forest = build(&nodes);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].node.name, "alpha");
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].node.name, "beta");
        assert_eq!(forest[0].children[0].depth, 1);
    }

    #[test]
    fn given_same_input_when_building_twice_then_forests_identical() {
        let nodes = vec![
            node("1", "root", None),
            node("2", "child", Some("1")),
            node("3", "other", None),
        ];

        assert_eq!(build(&nodes), build(&nodes));
    }
}
