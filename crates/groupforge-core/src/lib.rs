//! GroupForge Core - Core types for repeat-aware group assignment
//!
//! This crate provides the fundamental data model for GroupForge:
//! - Participants with a stable identifier and a level
//! - Groups and the flattened group layout
//! - The sparse pairing-history ledger and its per-round update
//! - Rosters, per-session snapshots and solved group assignments
//! - Solve statuses, objective weights and error types

pub mod domain;
pub mod error;
pub mod status;

pub use domain::{
    AssignmentRow, Group, GroupAssignment, GroupId, GroupLayout, Level, ObjectiveWeights,
    PairingHistory, Participant, ParticipantId, Roster, RosterEntry, Snapshot,
};
pub use error::{GroupForgeError, ModelConstructionError, Result};
pub use status::SolveStatus;
