//! retree: hierarchical resource tree engine
//!
//! Builds rooted forests from flat parent-pointer lists, computes breadcrumb
//! paths and depths, guards reparent operations against cycles, and drives a
//! drag-and-drop move workflow with optimistic update and rollback.
//!
//! The engine itself (`domain`, `application`) is synchronous and pure over
//! immutable node snapshots; all I/O lives behind the collaborator seams in
//! `infrastructure`.

pub mod application;
pub mod cli;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
