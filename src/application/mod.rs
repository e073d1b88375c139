//! Application layer: orchestration over the domain engine
//!
//! Hosts the move-session state machine and metric aggregation; depends on
//! the persistence boundary trait, never on concrete I/O.

pub mod error;
pub mod metrics;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use metrics::NodeCounts;
pub use session::{DropTarget, MoveSink, ReparentSession, SessionState};
