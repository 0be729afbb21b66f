//! Result extraction.
//!
//! Reads an [`EngineSolution`] back into a [`Round`]. Values are checked
//! against the model, and the reported costs must match a recomputation
//! from the assignment.

use groupforge_core::{GroupAssignment, GroupForgeError, Result, SolveStatus};
use groupforge_model::{EngineSolution, OptimizationModel};

use crate::report::{GroupSummary, Round};

/// Boolean decision threshold.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Tolerance used when checking solved values against the model.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-5;

/// Turns an engine outcome into a round.
///
/// # Errors
///
/// - [`GroupForgeError::NoSolutionFound`] for `INFEASIBLE` and `UNKNOWN`
/// - [`GroupForgeError::SolverInternal`] for `MODEL_INVALID`, or when the
///   values contradict the model
pub fn extract(model: &OptimizationModel, solution: &EngineSolution) -> Result<Round> {
    let values = match (solution.status, &solution.values) {
        (SolveStatus::Optimal | SolveStatus::Feasible, Some(values)) => values.as_slice(),
        (SolveStatus::Optimal | SolveStatus::Feasible, None) => {
            return Err(GroupForgeError::SolverInternal(format!(
                "engine reported {} without values",
                solution.status
            )))
        }
        (SolveStatus::Infeasible | SolveStatus::Unknown, _) => {
            return Err(GroupForgeError::NoSolutionFound {
                status: solution.status,
            })
        }
        (SolveStatus::ModelInvalid, _) => {
            return Err(GroupForgeError::SolverInternal(
                solution
                    .message
                    .clone()
                    .unwrap_or_else(|| "engine rejected the model".to_string()),
            ))
        }
    };

    let violations = model.model().violations(values, FEASIBILITY_TOLERANCE);
    if let Some(first) = violations.first() {
        return Err(GroupForgeError::SolverInternal(format!(
            "solved values violate {} model constraint(s), first: {}",
            violations.len(),
            first
        )));
    }

    let grouping = model.grouping();
    let layout = grouping.layout();
    let x = grouping.assignment_vars();
    let participants = grouping.participants();

    // group index per participant
    let mut placement = Vec::with_capacity(participants.len());
    let mut assignment = GroupAssignment::new();
    for group in layout.groups() {
        assignment.add_group(group.id);
    }
    for (i, participant) in participants.iter().enumerate() {
        let mut chosen = x
            .row(i)
            .iter()
            .enumerate()
            .filter(|&(_, &var)| values[var.index()] > DECISION_THRESHOLD)
            .map(|(g, _)| g);
        let g = match (chosen.next(), chosen.next()) {
            (Some(g), None) => g,
            _ => {
                return Err(GroupForgeError::SolverInternal(format!(
                    "participant {} is not in exactly one group",
                    participant
                )))
            }
        };
        placement.push(g);
        assignment.assign(participant.clone(), layout.groups()[g].id);
    }
    assignment.sort_members();

    let aggregates = grouping.aggregates();
    let mut groups = Vec::with_capacity(layout.len());
    for (g, group) in layout.groups().iter().enumerate() {
        let members = assignment.members(group.id).len();
        if members != group.size {
            return Err(GroupForgeError::SolverInternal(format!(
                "group {} holds {} participants, expected {}",
                group.id, members, group.size
            )));
        }
        let level = values[aggregates.level[g].index()].round() as u32;
        let has_level_one = values[aggregates.has_level_one[g].index()] > DECISION_THRESHOLD;

        let (expected_level, expected_flag) = placement
            .iter()
            .zip(grouping.levels())
            .filter(|&(&pg, _)| pg == g)
            .fold((0, false), |(sum, flag), (_, &l)| {
                (sum + l, flag || l == grouping.scarce_level())
            });
        if level != expected_level || has_level_one != expected_flag {
            return Err(GroupForgeError::SolverInternal(format!(
                "group {} aggregates disagree with its members",
                group.id
            )));
        }

        groups.push(GroupSummary {
            id: group.id,
            size: group.size,
            level,
            has_level_one,
        });
    }

    let squared_repeat_cost: i64 = grouping
        .co_assignment_vars()
        .pairs()
        .iter()
        .filter(|pair| placement[pair.first] == placement[pair.second])
        .map(|pair| pair.squared_count())
        .sum();
    let level_one_group_count = groups.iter().filter(|g| g.has_level_one).count() as u32;

    let terms = model.terms();
    let reported_cost = values[terms.squared_repeat_cost.index()].round() as i64;
    let reported_count = values[terms.level_one_group_count.index()].round() as u32;
    if reported_cost != squared_repeat_cost || reported_count != level_one_group_count {
        return Err(GroupForgeError::SolverInternal(format!(
            "objective terms ({}, {}) disagree with the assignment ({}, {})",
            reported_cost, reported_count, squared_repeat_cost, level_one_group_count
        )));
    }

    Ok(Round {
        status: solution.status,
        assignment,
        groups,
        squared_repeat_cost,
        level_one_group_count,
        objective_value: model
            .weights()
            .combine(squared_repeat_cost, i64::from(level_one_group_count)),
    })
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
