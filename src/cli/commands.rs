//! Command dispatch: drives the engine against the JSON node file.

use termtree::Tree;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::{ApplicationError, DropTarget, ReparentSession};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::domain::{
    flatten, path_of, validate_reparent, Node, NodeStatus, NodeStore, TreeNode,
};
use crate::infrastructure::{FileSink, NodeFile};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let file = NodeFile::new(&cli.file);
    match &cli.command {
        Some(Commands::Tree) => _tree(&file),
        Some(Commands::List) => _list(&file),
        Some(Commands::Path { id }) => _path(&file, id),
        Some(Commands::Move { id, to, root }) => _move(&file, id, to.as_deref(), *root),
        Some(Commands::Add {
            name,
            parent,
            status,
        }) => _add(&file, name, parent.as_deref(), *status),
        Some(Commands::Rm { id }) => _rm(&file, id),
        // Completion is handled in main before dispatch
        Some(Commands::Completion { .. }) | None => Ok(()),
    }
}

fn label(tree_node: &TreeNode) -> String {
    format!(
        "{} [{}] ({})",
        tree_node.node.name, tree_node.node.status, tree_node.node.id
    )
}

fn to_termtree(tree_node: &TreeNode) -> Tree<String> {
    let leaves: Vec<_> = tree_node.children.iter().map(to_termtree).collect();
    Tree::new(label(tree_node)).with_leaves(leaves)
}

#[instrument(skip(file))]
fn _tree(file: &NodeFile) -> CliResult<()> {
    let store = NodeStore::new(file.load()?);
    for root in store.forest() {
        output::info(&to_termtree(&root));
    }
    Ok(())
}

#[instrument(skip(file))]
fn _list(file: &NodeFile) -> CliResult<()> {
    let store = NodeStore::new(file.load()?);
    let forest = store.forest();
    for entry in flatten(&forest) {
        output::info(&format!("{}{}", "  ".repeat(entry.depth), label(entry)));
    }
    Ok(())
}

#[instrument(skip(file))]
fn _path(file: &NodeFile, id: &str) -> CliResult<()> {
    let nodes = file.load()?;
    let path = path_of(id, &nodes);
    if path.names.is_empty() {
        return Err(CliError::InvalidArgs(format!("node not found: {}", id)));
    }
    if path.truncated {
        output::warning("parent chain is cyclic, showing longest prefix");
    }
    output::info(&path.breadcrumb());
    Ok(())
}

#[instrument(skip(file))]
fn _move(file: &NodeFile, id: &str, to: Option<&str>, root: bool) -> CliResult<()> {
    if to.is_none() && !root {
        return Err(CliError::InvalidArgs(
            "specify --to <parent> or --root".to_string(),
        ));
    }

    let mut store = NodeStore::new(file.load()?);
    let mut session = ReparentSession::new();
    session.begin_drag(id, &store).map_err(CliError::from)?;

    let target = match to {
        Some(parent) => DropTarget::Node(parent.to_string()),
        None => DropTarget::RootZone,
    };
    let accepted = session.hover(target, &store).map_err(CliError::from)?;
    if !accepted {
        // Recover the guard's reason for a proper message
        let reason = validate_reparent(id, to, store.nodes())
            .map(|r| r.to_string())
            .unwrap_or_else(|| "move rejected".to_string());
        return Err(CliError::InvalidArgs(reason));
    }

    let mut sink = FileSink::new(file.clone());
    match session.commit_via(&mut sink, &mut store) {
        Ok(Some(command)) => {
            output::success(&format!("{}", command));
            Ok(())
        }
        Ok(None) => {
            output::detail(&format!("{} is already a root, nothing to do", id));
            Ok(())
        }
        Err(ApplicationError::MoveFailed { reason }) => {
            output::failure(&format!("move failed, rolled back: {}", reason));
            Ok(())
        }
        Err(e) => Err(CliError::from(e)),
    }
}

#[instrument(skip(file))]
fn _add(file: &NodeFile, name: &str, parent: Option<&str>, status: NodeStatus) -> CliResult<()> {
    let mut nodes = file.load()?;
    if let Some(parent_id) = parent {
        if !nodes.iter().any(|n| n.id == parent_id) {
            return Err(CliError::InvalidArgs(format!(
                "parent not found: {}",
                parent_id
            )));
        }
    }

    let mut node = Node::new(
        Uuid::new_v4().to_string(),
        name,
        parent.map(String::from),
    );
    node.status = status;
    debug!(id = %node.id, "creating node");
    let created = format!("added {}", node);
    nodes.push(node);
    file.save(&nodes)?;
    output::success(&created);
    Ok(())
}

#[instrument(skip(file))]
fn _rm(file: &NodeFile, id: &str) -> CliResult<()> {
    let mut nodes = file.load()?;
    let before = nodes.len();
    nodes.retain(|n| n.id != id);
    if nodes.len() == before {
        return Err(CliError::InvalidArgs(format!("node not found: {}", id)));
    }

    let orphaned = nodes
        .iter()
        .filter(|n| n.parent_id.as_deref() == Some(id))
        .count();
    if orphaned > 0 {
        output::warning(&format!("{} child node(s) promoted to root", orphaned));
    }
    file.save(&nodes)?;
    output::success(&format!("removed {}", id));
    Ok(())
}
