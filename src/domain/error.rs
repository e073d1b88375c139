//! Domain-level errors (no external dependencies)

use std::fmt;

/// Why a reparent request was rejected by the cycle guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Target equals the source node
    SelfParent,
    /// Target is a descendant of the source, the move would close a cycle
    WouldCycle,
    /// Target id does not resolve to an existing node
    UnknownTarget,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::SelfParent => "a node cannot be its own parent",
            RejectReason::WouldCycle => "target is a descendant of the source",
            RejectReason::UnknownTarget => "target node does not exist",
        };
        write!(f, "{}", s)
    }
}

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
// Display/Error implemented by hand: thiserror's derive treats the
// `source` field of `MoveRejected` as an error source, which `String`
// cannot be, and the field name is fixed by the spec.
#[derive(Debug)]
pub enum DomainError {
    NodeNotFound(String),

    MoveRejected {
        source: String,
        target: Option<String>,
        reason: RejectReason,
    },

    MoveInFlight,

    InvalidTransition(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NodeNotFound(id) => write!(f, "node not found: {}", id),
            DomainError::MoveRejected {
                source,
                target,
                reason,
            } => write!(f, "illegal move of {} to {:?}: {}", source, target, reason),
            DomainError::MoveInFlight => {
                write!(f, "a move is already in flight, gesture rejected")
            }
            DomainError::InvalidTransition(msg) => {
                write!(f, "invalid session transition: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
