//! Reparent session: the drag-and-drop move state machine.
//!
//! One session instance per active gesture. The session never owns the node
//! list; it operates on a [`NodeStore`] handed into each transition, which
//! keeps the machine testable without a UI harness.

use tracing::{debug, instrument, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{MoveCommand, Node};
use crate::domain::error::DomainError;
use crate::domain::guard::can_reparent;
use crate::domain::store::NodeStore;

/// Persistence collaborator for move commands.
///
/// Failure carries a human-readable reason suitable for surfacing to an
/// operator; there is no partial success.
pub trait MoveSink {
    fn move_persist(&mut self, command: &MoveCommand) -> Result<(), String>;
}

/// Drop candidate under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Hovering over another node
    Node(String),
    /// Hovering over the designated root zone (reparent to `None`)
    RootZone,
}

impl DropTarget {
    fn parent_id(&self) -> Option<String> {
        match self {
            DropTarget::Node(id) => Some(id.clone()),
            DropTarget::RootZone => None,
        }
    }
}

/// Session states. `Committing` holds the pre-move snapshot, the only
/// rollback unit in the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Dragging {
        source_id: String,
    },
    Hovering {
        source_id: String,
        target: DropTarget,
    },
    Committing {
        command: MoveCommand,
        snapshot: Vec<Node>,
    },
}

/// Drag-and-drop reparent workflow with optimistic update and rollback.
#[derive(Debug, Default)]
pub struct ReparentSession {
    state: SessionState,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl ReparentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    /// Begin a move gesture on `source_id`.
    ///
    /// Rejected while a commit is in flight (only one move may be pending
    /// per tree instance) and for unknown source ids.
    #[instrument(level = "debug", skip(self, store))]
    pub fn begin_drag(&mut self, source_id: &str, store: &NodeStore) -> ApplicationResult<()> {
        match self.state {
            SessionState::Idle => {}
            SessionState::Committing { .. } => {
                warn!(source = %source_id, "gesture rejected, move in flight");
                return Err(DomainError::MoveInFlight.into());
            }
            _ => {
                return Err(DomainError::InvalidTransition(
                    "gesture already in progress".to_string(),
                )
                .into())
            }
        }
        if store.get(source_id).is_none() {
            return Err(DomainError::NodeNotFound(source_id.to_string()).into());
        }
        self.state = SessionState::Dragging {
            source_id: source_id.to_string(),
        };
        Ok(())
    }

    /// Pointer-over-candidate event.
    ///
    /// Returns `true` when the hover is accepted. An illegal target (self,
    /// descendant, unknown id) is rejected and the state falls back to
    /// `Dragging`, so the UI never indicates a legal drop where none exists.
    /// The root zone is always a legal hover.
    #[instrument(level = "trace", skip(self, store))]
    pub fn hover(&mut self, target: DropTarget, store: &NodeStore) -> ApplicationResult<bool> {
        let source_id = match &self.state {
            SessionState::Dragging { source_id } | SessionState::Hovering { source_id, .. } => {
                source_id.clone()
            }
            _ => {
                return Err(DomainError::InvalidTransition(
                    "hover without an active gesture".to_string(),
                )
                .into())
            }
        };

        if can_reparent(&source_id, target.parent_id().as_deref(), store.nodes()) {
            self.state = SessionState::Hovering { source_id, target };
            Ok(true)
        } else {
            debug!(source = %source_id, ?target, "hover rejected");
            self.state = SessionState::Dragging { source_id };
            Ok(false)
        }
    }

    /// Drop on the current hover target.
    ///
    /// Applies the move to the store optimistically, snapshots the pre-move
    /// state and enters `Committing`. The returned command is what the host
    /// dispatches to its persistence sink before calling [`resolve`].
    ///
    /// Dropping an already-root node on the root zone is a no-op: the
    /// transition is allowed but the commit is skipped and `None` returned.
    ///
    /// [`resolve`]: ReparentSession::resolve
    #[instrument(level = "debug", skip(self, store))]
    pub fn drop_gesture(&mut self, store: &mut NodeStore) -> ApplicationResult<Option<MoveCommand>> {
        let (source_id, target) = match std::mem::take(&mut self.state) {
            SessionState::Hovering { source_id, target } => (source_id, target),
            other => {
                self.state = other;
                return Err(DomainError::InvalidTransition(
                    "drop without a hover target".to_string(),
                )
                .into());
            }
        };

        let target_parent_id = target.parent_id();
        let already_root = store.get(&source_id).map(Node::is_root).unwrap_or(false);
        if target_parent_id.is_none() && already_root {
            debug!(source = %source_id, "root-zone drop on root node, commit skipped");
            return Ok(None);
        }

        let command = MoveCommand {
            source_id,
            target_parent_id,
        };
        let snapshot = store.snapshot();
        store.apply(&command)?;
        debug!(%command, "optimistic move applied, awaiting persistence");
        self.state = SessionState::Committing {
            command: command.clone(),
            snapshot,
        };
        Ok(Some(command))
    }

    /// Report the persistence outcome for the in-flight move.
    ///
    /// Success keeps the optimistic projection. Failure restores the
    /// pre-move snapshot and surfaces the sink's reason; this is the only
    /// rollback path in the system. Either way the session returns to
    /// `Idle`.
    #[instrument(level = "debug", skip(self, store, outcome))]
    pub fn resolve(
        &mut self,
        outcome: Result<(), String>,
        store: &mut NodeStore,
    ) -> ApplicationResult<()> {
        let (command, snapshot) = match std::mem::take(&mut self.state) {
            SessionState::Committing { command, snapshot } => (command, snapshot),
            other => {
                self.state = other;
                return Err(DomainError::InvalidTransition(
                    "resolve without a pending commit".to_string(),
                )
                .into());
            }
        };

        match outcome {
            Ok(()) => {
                debug!(%command, "move persisted");
                Ok(())
            }
            Err(reason) => {
                warn!(%command, %reason, "persistence failed, rolling back");
                store.restore(snapshot);
                Err(ApplicationError::MoveFailed { reason })
            }
        }
    }

    /// Cancel the gesture, discarding all session data. No command is
    /// issued. An in-flight commit cannot be cancelled (fire-and-await).
    pub fn cancel(&mut self) -> ApplicationResult<()> {
        if matches!(self.state, SessionState::Committing { .. }) {
            return Err(DomainError::MoveInFlight.into());
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Drive drop + persistence + resolution against a synchronous sink.
    ///
    /// Returns the command that was persisted, `None` for the root-zone
    /// no-op.
    pub fn commit_via(
        &mut self,
        sink: &mut dyn MoveSink,
        store: &mut NodeStore,
    ) -> ApplicationResult<Option<MoveCommand>> {
        match self.drop_gesture(store)? {
            Some(command) => {
                let outcome = sink.move_persist(&command);
                self.resolve(outcome, store)?;
                Ok(Some(command))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str, parent: Option<&str>) -> Node {
        Node::new(id, name, parent.map(String::from))
    }

    fn store() -> NodeStore {
        NodeStore::new(vec![
            node("1", "Root", None),
            node("2", "Child", Some("1")),
            node("3", "Grand", Some("2")),
        ])
    }

    struct AcceptingSink;
    impl MoveSink for AcceptingSink {
        fn move_persist(&mut self, _command: &MoveCommand) -> Result<(), String> {
            Ok(())
        }
    }

    struct RejectingSink;
    impl MoveSink for RejectingSink {
        fn move_persist(&mut self, _command: &MoveCommand) -> Result<(), String> {
            Err("backend validation failed".to_string())
        }
    }

    #[test]
    fn given_illegal_hover_when_hovering_then_stays_dragging() {
        let store = store();
        let mut session = ReparentSession::new();
        session.begin_drag("1", &store).unwrap();

        let accepted = session.hover(DropTarget::Node("3".into()), &store).unwrap();

        assert!(!accepted);
        assert!(matches!(
            session.state(),
            SessionState::Dragging { source_id } if source_id == "1"
        ));
    }

    #[test]
    fn given_accepting_sink_when_committing_then_projection_kept() {
        let mut store = store();
        let mut session = ReparentSession::new();
        session.begin_drag("3", &store).unwrap();
        assert!(session.hover(DropTarget::Node("1".into()), &store).unwrap());

        let command = session
            .commit_via(&mut AcceptingSink, &mut store)
            .unwrap()
            .unwrap();

        assert_eq!(command.target_parent_id.as_deref(), Some("1"));
        assert_eq!(store.get("3").unwrap().parent_id.as_deref(), Some("1"));
        assert!(session.is_idle());
    }

    #[test]
    fn given_rejecting_sink_when_committing_then_rolled_back() {
        let mut store = store();
        let before = store.snapshot();
        let mut session = ReparentSession::new();
        session.begin_drag("2", &store).unwrap();
        assert!(session.hover(DropTarget::RootZone, &store).unwrap());

        let err = session
            .commit_via(&mut RejectingSink, &mut store)
            .unwrap_err();

        assert!(matches!(err, ApplicationError::MoveFailed { .. }));
        assert_eq!(store.snapshot(), before);
        assert!(session.is_idle());
    }

    #[test]
    fn given_root_node_when_dropped_on_root_zone_then_commit_skipped() {
        let mut store = store();
        let mut session = ReparentSession::new();
        session.begin_drag("1", &store).unwrap();
        assert!(session.hover(DropTarget::RootZone, &store).unwrap());

        let command = session.drop_gesture(&mut store).unwrap();

        assert!(command.is_none());
        assert!(session.is_idle());
    }

    #[test]
    fn given_commit_in_flight_when_starting_second_gesture_then_rejected() {
        let mut store = store();
        let mut session = ReparentSession::new();
        session.begin_drag("3", &store).unwrap();
        session.hover(DropTarget::RootZone, &store).unwrap();
        session.drop_gesture(&mut store).unwrap().unwrap();

        let err = session.begin_drag("2", &store).unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MoveInFlight)
        ));
    }

    #[test]
    fn given_commit_in_flight_when_cancelling_then_rejected() {
        let mut store = store();
        let mut session = ReparentSession::new();
        session.begin_drag("3", &store).unwrap();
        session.hover(DropTarget::RootZone, &store).unwrap();
        session.drop_gesture(&mut store).unwrap().unwrap();

        assert!(session.cancel().is_err());

        session.resolve(Ok(()), &mut store).unwrap();
        assert!(session.is_idle());
    }

    #[test]
    fn given_active_gesture_when_cancelling_then_idle_without_mutation() {
        let mut store = store();
        let before = store.snapshot();
        let mut session = ReparentSession::new();
        session.begin_drag("2", &store).unwrap();
        session.hover(DropTarget::RootZone, &store).unwrap();

        session.cancel().unwrap();

        assert!(session.is_idle());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn given_unknown_source_when_beginning_drag_then_rejected() {
        let store = store();
        let mut session = ReparentSession::new();
        let err = session.begin_drag("missing", &store).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NodeNotFound(_))
        ));
        assert!(session.is_idle());
    }
}
