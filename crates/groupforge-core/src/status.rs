//! Solve status reported by a solving engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one engine invocation.
///
/// # Examples
///
/// ```
/// use groupforge_core::SolveStatus;
///
/// assert!(SolveStatus::Optimal.has_solution());
/// assert!(!SolveStatus::Infeasible.has_solution());
/// assert_eq!(SolveStatus::ModelInvalid.as_str(), "MODEL_INVALID");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// Proven optimal assignment.
    Optimal,
    /// Valid assignment, optimality not proven.
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The engine stopped without a verdict (limit reached, internal failure).
    Unknown,
    /// The engine rejected the model itself.
    ModelInvalid,
}

impl SolveStatus {
    /// Returns the status as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
            SolveStatus::ModelInvalid => "MODEL_INVALID",
        }
    }

    /// Returns true if variable values are available.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
