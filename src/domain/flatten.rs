//! Pre-order flattener for linear, indentation-aware rendering.

use crate::domain::builder::TreeNode;

/// Flatten a forest into a pre-order sequence.
///
/// A parent always appears strictly before all of its descendants; siblings
/// keep the builder's sort order. Each entry carries its own `depth` for
/// indentation.
pub fn flatten(forest: &[TreeNode]) -> Vec<&TreeNode> {
    let mut out = Vec::new();
    // Explicit stack, children pushed in reverse for left-to-right order
    let mut stack: Vec<&TreeNode> = forest.iter().rev().collect();
    while let Some(current) = stack.pop() {
        out.push(current);
        for child in current.children.iter().rev() {
            stack.push(child);
        }
    }
    out
}
