//! Fail-soft per-node metric aggregation.
//!
//! The engine never fetches counts itself; the host hands in a pre-fetched
//! mapping. A failed fetch for one node must not abort the aggregation, the
//! convention is "default to 0 and continue".

use std::collections::HashMap;

use tracing::warn;

use crate::domain::entities::Node;
use crate::domain::guard::descendants_of;

/// Pre-fetched per-node counts, e.g. open item counts per project.
#[derive(Debug, Clone, Default)]
pub struct NodeCounts {
    counts: HashMap<String, u64>,
}

impl NodeCounts {
    pub fn new(counts: HashMap<String, u64>) -> Self {
        Self { counts }
    }

    /// Build from per-node fetch results, defaulting failed entries to 0.
    pub fn from_results<E: std::fmt::Display>(
        results: impl IntoIterator<Item = (String, Result<u64, E>)>,
    ) -> Self {
        let mut counts = HashMap::new();
        for (id, result) in results {
            match result {
                Ok(count) => {
                    counts.insert(id, count);
                }
                Err(e) => {
                    warn!(node = %id, error = %e, "count fetch failed, defaulting to 0");
                    counts.insert(id, 0);
                }
            }
        }
        Self { counts }
    }

    /// Count for one node, 0 when missing.
    pub fn count_for(&self, node_id: &str) -> u64 {
        self.counts.get(node_id).copied().unwrap_or(0)
    }

    /// Count for a node plus all of its transitive descendants.
    pub fn subtree_count(&self, node_id: &str, nodes: &[Node]) -> u64 {
        let mut total = self.count_for(node_id);
        for id in descendants_of(node_id, nodes) {
            total += self.count_for(&id);
        }
        total
    }
}
