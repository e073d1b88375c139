//! Domain entities: core data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entity in the flat node set.
///
/// `parent_id` is either `None` (forest root) or the id of another node in
/// the same set. A `parent_id` that does not resolve is treated as an
/// orphaned root by the builder, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: String,
    /// Display name, drives sibling ordering
    pub name: String,
    /// Parent reference, `None` for roots
    pub parent_id: Option<String>,
    /// Workflow status, carried for the host to render
    pub status: NodeStatus,
    /// Creation timestamp, set by the host
    pub created_at: DateTime<Utc>,
}

impl Node {
    /// Create a node with the given identity and parent link.
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            status: NodeStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Sort key for sibling ordering: case-insensitive name, id breaks ties.
    pub fn sort_key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.id.clone())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Workflow status of a node. The engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Active,
    OnHold,
    Done,
    Archived,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeStatus::Active => "active",
            NodeStatus::OnHold => "on-hold",
            NodeStatus::Done => "done",
            NodeStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for NodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(NodeStatus::Active),
            "on-hold" | "on_hold" => Ok(NodeStatus::OnHold),
            "done" => Ok(NodeStatus::Done),
            "archived" => Ok(NodeStatus::Archived),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// The only mutation primitive the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    /// Node being reparented
    pub source_id: String,
    /// New parent, `None` promotes to root
    pub target_parent_id: Option<String>,
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target_parent_id {
            Some(target) => write!(f, "move {} under {}", self.source_id, target),
            None => write!(f, "move {} to root", self.source_id),
        }
    }
}
