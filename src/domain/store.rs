//! Node store: the flat node set, single source of truth.

use tracing::{debug, instrument};

use crate::domain::builder::{build, TreeNode};
use crate::domain::entities::{MoveCommand, Node};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::guard::validate_reparent;

/// Holds the flat set of nodes with parent references.
///
/// The only mutation besides wholesale replacement is [`NodeStore::apply`],
/// which validates the move through the cycle guard before touching any
/// parent reference. The tree projection is recomputed on demand and never
/// cached.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Immutable copy of the current node list, the rollback unit.
    pub fn snapshot(&self) -> Vec<Node> {
        self.nodes.clone()
    }

    /// Replace the node list with a previously taken snapshot.
    pub fn restore(&mut self, snapshot: Vec<Node>) {
        self.nodes = snapshot;
    }

    /// Apply a move command after cycle-guard validation.
    ///
    /// Illegal moves are rejected before any mutation, so a failed `apply`
    /// leaves the store untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, command: &MoveCommand) -> DomainResult<()> {
        if self.get(&command.source_id).is_none() {
            return Err(DomainError::NodeNotFound(command.source_id.clone()));
        }
        if let Some(reason) =
            validate_reparent(&command.source_id, command.target_parent_id.as_deref(), &self.nodes)
        {
            return Err(DomainError::MoveRejected {
                source: command.source_id.clone(),
                target: command.target_parent_id.clone(),
                reason,
            });
        }

        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == command.source_id)
            .ok_or_else(|| DomainError::NodeNotFound(command.source_id.clone()))?;
        node.parent_id = command.target_parent_id.clone();
        debug!(%command, "move applied");
        Ok(())
    }

    /// Current forest projection.
    pub fn forest(&self) -> Vec<TreeNode> {
        build(&self.nodes)
    }
}
