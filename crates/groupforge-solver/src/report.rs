//! Run summary and solved round.

use std::fmt;
use std::time::Duration;

use groupforge_core::{
    AssignmentRow, GroupAssignment, GroupForgeError, GroupId, Level, PairingHistory, Result,
    SolveStatus,
};

/// Size and level of one solved group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub id: GroupId,
    pub size: usize,
    /// Sum of member levels.
    pub level: Level,
    /// Whether the group holds a scarce-level participant.
    pub has_level_one: bool,
}

/// Values read back from a solved model.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub status: SolveStatus,
    pub assignment: GroupAssignment,
    /// One entry per group, in group order.
    pub groups: Vec<GroupSummary>,
    pub squared_repeat_cost: i64,
    pub level_one_group_count: u32,
    pub objective_value: f64,
}

impl Round {
    pub fn summary(&self, group: GroupId) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.id == group)
    }

    /// The assignment list, ordered by group then participant.
    pub fn assignment_rows(&self) -> Vec<AssignmentRow> {
        self.assignment.rows()
    }

    /// Applies this round to `previous`.
    pub fn next_history(&self, previous: &PairingHistory) -> PairingHistory {
        previous.record_round(&self.assignment)
    }
}

/// Outcome of one session run.
///
/// A report exists for every run that got past model construction. When
/// the engine found no assignment, `round` is `None` and the report says
/// so explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub session: Option<String>,
    pub status: SolveStatus,
    pub elapsed: Duration,
    pub round: Option<Round>,
}

impl RunReport {
    pub fn solved(session: Option<String>, round: Round, elapsed: Duration) -> Self {
        RunReport {
            session,
            status: round.status,
            elapsed,
            round: Some(round),
        }
    }

    pub fn unsolved(session: Option<String>, status: SolveStatus, elapsed: Duration) -> Self {
        RunReport {
            session,
            status,
            elapsed,
            round: None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.round.is_some()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// The assignment list, empty when nothing was solved.
    pub fn assignment_rows(&self) -> Vec<AssignmentRow> {
        self.round
            .as_ref()
            .map(Round::assignment_rows)
            .unwrap_or_default()
    }

    /// The solved round, or `NoSolutionFound` with the raw status.
    pub fn into_round(self) -> Result<Round> {
        let status = self.status;
        self.round.ok_or(GroupForgeError::NoSolutionFound { status })
    }

    /// The ledger after this run, or `None` when nothing was solved.
    ///
    /// An unsolved run leaves the previous ledger untouched; callers keep
    /// using it.
    pub fn next_history(&self, previous: &PairingHistory) -> Option<PairingHistory> {
        self.round.as_ref().map(|round| round.next_history(previous))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(session) = &self.session {
            writeln!(f, "Session: {}", session)?;
        }
        writeln!(f, "Status: {}", self.status)?;
        match &self.round {
            Some(round) => {
                writeln!(f, "Objective function value is {}", round.objective_value)?;
                writeln!(
                    f,
                    "Squared sum of repeated assignments: {}",
                    round.squared_repeat_cost
                )?;
                writeln!(
                    f,
                    "Groups with at least one participant with level 1: {}",
                    round.level_one_group_count
                )?;
                writeln!(f)?;
                for summary in &round.groups {
                    writeln!(f, "Group {}:", summary.id)?;
                    writeln!(f, "Level of the group: {}", summary.level)?;
                    for member in round.assignment.members(summary.id) {
                        writeln!(f, "{}", member)?;
                    }
                    writeln!(f)?;
                }
            }
            None => writeln!(f, "No solution found.")?,
        }
        write!(f, "Execution time: {:.2} seconds", self.elapsed.as_secs_f64())
    }
}
