//! Solved partition of participants into groups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::group::GroupId;
use super::participant::ParticipantId;

/// One row of the assignment list handed to output writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub participant: ParticipantId,
    pub group: GroupId,
}

/// Members of every group.
///
/// Groups iterate in identifier order; members keep insertion order until
/// [`GroupAssignment::sort_members`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    groups: BTreeMap<GroupId, Vec<ParticipantId>>,
}

impl GroupAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group, so that empty groups still show up.
    pub fn add_group(&mut self, group: GroupId) {
        self.groups.entry(group).or_default();
    }

    pub fn assign(&mut self, participant: ParticipantId, group: GroupId) {
        self.groups.entry(group).or_default().push(participant);
    }

    pub fn members(&self, group: GroupId) -> &[ParticipantId] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &[ParticipantId])> + '_ {
        self.groups.iter().map(|(&id, members)| (id, members.as_slice()))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of placements across all groups.
    pub fn participant_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// The group holding `participant`, if any.
    pub fn group_of(&self, participant: &ParticipantId) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|(_, members)| members.contains(participant))
            .map(|(&id, _)| id)
    }

    /// Sorts every member list by identifier.
    pub fn sort_members(&mut self) {
        for members in self.groups.values_mut() {
            members.sort();
        }
    }

    /// Every ordered pair of distinct participants sharing a group.
    pub fn co_assigned_pairs(
        &self,
    ) -> impl Iterator<Item = (&ParticipantId, &ParticipantId, GroupId)> + '_ {
        self.groups.iter().flat_map(|(&group, members)| {
            members.iter().flat_map(move |a| {
                members
                    .iter()
                    .filter(move |b| *b != a)
                    .map(move |b| (a, b, group))
            })
        })
    }

    /// Flattens the assignment into rows, ordered by group then member.
    pub fn rows(&self) -> Vec<AssignmentRow> {
        self.groups
            .iter()
            .flat_map(|(&group, members)| {
                members.iter().map(move |participant| AssignmentRow {
                    participant: participant.clone(),
                    group,
                })
            })
            .collect()
    }
}
