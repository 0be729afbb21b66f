//! Domain model for group assignment
//!
//! - `Participant`: someone to place, identified by a `ParticipantId`
//! - `GroupLayout`: the numbered groups and their required sizes
//! - `PairingHistory`: sparse ledger of prior co-assignments
//! - `Roster` / `Snapshot`: everything known vs. what one session solves over
//! - `GroupAssignment`: the solved partition

mod assignment;
mod group;
mod history;
mod participant;
mod roster;
mod weights;

pub use assignment::{AssignmentRow, GroupAssignment};
pub use group::{Group, GroupId, GroupLayout};
pub use history::PairingHistory;
pub use participant::{Level, Participant, ParticipantId};
pub use roster::{Roster, RosterEntry, Snapshot};
pub use weights::ObjectiveWeights;

#[cfg(test)]
mod tests;
