//! Path resolver: root-to-node breadcrumbs and depths.

use std::collections::HashMap;

use tracing::{instrument, warn};

use crate::domain::entities::Node;

/// Root-to-node name sequence.
///
/// `truncated` is set when the upward walk hit the hop cap before reaching a
/// root, which only happens when a cycle entered the data from a misbehaving
/// external write. The longest prefix found is still returned so breadcrumb
/// rendering degrades instead of hanging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub names: Vec<String>,
    pub truncated: bool,
}

impl ResolvedPath {
    /// Render as a breadcrumb, e.g. `Portfolio > Program > Project`.
    pub fn breadcrumb(&self) -> String {
        self.names.join(" > ")
    }
}

/// Walk parent pointers upward from `node_id`, collecting names root-first.
///
/// The walk is capped at `nodes.len()` hops; exceeding the cap is reported
/// as a data-integrity warning, not an error. Unknown ids yield an empty
/// path.
#[instrument(level = "trace", skip(nodes))]
pub fn path_of(node_id: &str, nodes: &[Node]) -> ResolvedPath {
    let index: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut names = Vec::new();
    let mut truncated = false;
    let mut current = index.get(node_id).copied();
    let mut hops = 0;

    while let Some(node) = current {
        if hops >= nodes.len() {
            warn!(node = %node_id, "path walk exceeded node count, cycle in data");
            truncated = true;
            break;
        }
        hops += 1;
        names.push(node.name.clone());
        current = node
            .parent_id
            .as_deref()
            .and_then(|p| index.get(p).copied());
    }

    names.reverse();
    ResolvedPath { names, truncated }
}

/// Number of parent hops from `node_id` to its root; 0 for roots and for
/// unknown ids. Subject to the same defensive cap as [`path_of`].
pub fn depth_of(node_id: &str, nodes: &[Node]) -> usize {
    let path = path_of(node_id, nodes);
    path.names.len().saturating_sub(1)
}
