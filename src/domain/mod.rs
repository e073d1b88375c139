//! Domain layer: the hierarchy engine
//!
//! Pure functions over immutable node snapshots, no I/O. The store is the
//! single source of truth; everything else is a projection over it.

pub mod builder;
pub mod entities;
pub mod error;
pub mod flatten;
pub mod guard;
pub mod path;
pub mod store;

pub use builder::{build, TreeNode};
pub use entities::{MoveCommand, Node, NodeStatus};
pub use error::{DomainError, DomainResult, RejectReason};
pub use flatten::flatten;
pub use guard::{can_reparent, descendants_of, validate_reparent};
pub use path::{depth_of, path_of, ResolvedPath};
pub use store::NodeStore;
