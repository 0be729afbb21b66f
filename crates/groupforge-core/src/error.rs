//! Error types for GroupForge

use thiserror::Error;

use crate::domain::{GroupId, ParticipantId};
use crate::status::SolveStatus;

/// Input problems detected before the solving engine is invoked.
///
/// Every variant carries enough detail to fix the input; no partial model
/// is ever handed to an engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelConstructionError {
    #[error("no active participants to assign")]
    EmptyParticipants,

    #[error("no groups configured")]
    EmptyGroups,

    #[error("group {group} has non-positive size {size}")]
    NonPositiveGroupSize { group: GroupId, size: usize },

    #[error("group sizes sum to {capacity} but there are {participants} participants")]
    SizeMismatch { capacity: usize, participants: usize },

    #[error("participant {0} has no level value")]
    MissingLevel(ParticipantId),

    #[error("participant {0} appears more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("participant {0} is not part of the snapshot")]
    UnknownParticipant(ParticipantId),

    #[error("participant {participant} is pinned to unknown group {group}")]
    UnknownGroup {
        participant: ParticipantId,
        group: GroupId,
    },

    #[error("objective weight `{name}` must be finite and non-negative (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },
}

/// Main error type for GroupForge operations
#[derive(Debug, Error)]
pub enum GroupForgeError {
    /// The inputs cannot form a valid model
    #[error("Model construction error: {0}")]
    ModelConstruction(#[from] ModelConstructionError),

    /// The engine finished without an assignment
    #[error("No solution found (solver status {status})")]
    NoSolutionFound { status: SolveStatus },

    /// The engine rejected the model or returned values that contradict it
    #[error("Solver internal error: {0}")]
    SolverInternal(String),
}

impl GroupForgeError {
    /// Returns the raw solve status for solve-outcome errors.
    pub fn status(&self) -> Option<SolveStatus> {
        match self {
            GroupForgeError::NoSolutionFound { status } => Some(*status),
            GroupForgeError::SolverInternal(_) => Some(SolveStatus::ModelInvalid),
            GroupForgeError::ModelConstruction(_) => None,
        }
    }
}

/// Result type alias for GroupForge operations
pub type Result<T> = std::result::Result<T, GroupForgeError>;
