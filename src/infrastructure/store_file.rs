//! JSON node file: the reference node source and persistence sink.
//!
//! The engine has no wire format of its own; this is the file-backed
//! collaborator the CLI uses. A host application would substitute its API
//! client here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::session::MoveSink;
use crate::domain::entities::{MoveCommand, Node};
use crate::infrastructure::error::{InfraError, InfraResult};

/// Flat node list persisted as a JSON array.
#[derive(Debug, Clone)]
pub struct NodeFile {
    path: PathBuf,
}

impl NodeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the node list. A missing file reads as an empty list so a fresh
    /// workspace works without setup.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> InfraResult<Vec<Node>> {
        if !self.path.exists() {
            debug!("node file missing, starting empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| InfraError::io(format!("reading {}", self.path.display()), e))?;
        serde_json::from_str(&content).map_err(|e| InfraError::Format {
            path: self.path.clone(),
            source: e,
        })
    }

    #[instrument(level = "debug", skip(self, nodes), fields(path = %self.path.display()))]
    pub fn save(&self, nodes: &[Node]) -> InfraResult<()> {
        let content = serde_json::to_string_pretty(nodes).map_err(|e| InfraError::Format {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, content)
            .map_err(|e| InfraError::io(format!("writing {}", self.path.display()), e))
    }
}

/// [`MoveSink`] over a [`NodeFile`]: rewrites the parent reference on disk.
///
/// Errors are folded into the reason string the sink contract requires, so
/// the session can roll back and surface them.
pub struct FileSink {
    file: NodeFile,
}

impl FileSink {
    pub fn new(file: NodeFile) -> Self {
        Self { file }
    }
}

impl MoveSink for FileSink {
    fn move_persist(&mut self, command: &MoveCommand) -> Result<(), String> {
        let mut nodes = self.file.load().map_err(|e| e.to_string())?;
        let node = nodes
            .iter_mut()
            .find(|n| n.id == command.source_id)
            .ok_or_else(|| format!("node {} not found in store", command.source_id))?;
        node.parent_id = command.target_parent_id.clone();
        self.file.save(&nodes).map_err(|e| e.to_string())
    }
}
