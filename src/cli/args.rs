//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::NodeStatus;

/// Hierarchical resource tree manager: forests from flat parent-pointer lists,
/// cycle-safe reparenting
#[derive(Parser, Debug)]
#[command(name = "retree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Node file (JSON array of nodes)
    #[arg(short, long, global = true, env = "RETREE_FILE", default_value = "nodes.json")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the forest as a tree
    Tree,

    /// Linear pre-order listing with indentation
    List,

    /// Show root-to-node breadcrumb
    Path {
        /// Node id
        id: String,
    },

    /// Reparent a node (validated against cycles, rolled back on failure)
    Move {
        /// Node to move
        id: String,

        /// New parent id
        #[arg(long, conflicts_with = "root")]
        to: Option<String>,

        /// Promote to forest root
        #[arg(long, conflicts_with = "to")]
        root: bool,
    },

    /// Create a node
    Add {
        /// Display name
        name: String,

        /// Parent id (omit for a root)
        #[arg(long)]
        parent: Option<String>,

        /// Initial status
        #[arg(long, default_value = "active")]
        status: NodeStatus,
    },

    /// Delete a node (children become orphaned roots)
    Rm {
        /// Node id
        id: String,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
