//! GroupForge - Repeat-Aware Group Assignment in Rust
//!
//! Splits the attendees of a session into fixed-size groups so that pairs
//! who already worked together rarely meet again, while participants of the
//! scarce level are spread across as many groups as possible.
//!
//! # Example
//!
//! ```rust
//! use groupforge::prelude::*;
//!
//! let participants = [("A", 1), ("B", 0), ("C", 1), ("D", 0)]
//!     .into_iter()
//!     .map(|(id, level)| Participant::new(id, level))
//!     .collect();
//! let snapshot = Snapshot::new(participants, &PairingHistory::new()).unwrap();
//! let config = RunConfig::new().with_groups(2, 2);
//!
//! let report = groupforge::run(&snapshot, &config).unwrap();
//! assert_eq!(report.round().unwrap().level_one_group_count, 2);
//! ```

// Domain types
pub use groupforge_core::{
    AssignmentRow, Group, GroupAssignment, GroupForgeError, GroupId, GroupLayout, Level,
    ModelConstructionError, ObjectiveWeights, PairingHistory, Participant, ParticipantId, Result,
    Roster, RosterEntry, Snapshot, SolveStatus,
};

// Configuration
pub use groupforge_config::{ConfigError, EngineConfig, GroupSizeConfig, RunConfig};

// Model construction
pub use groupforge_model::{
    build_model, GroupingModel, Model, ModelBuilder, ModelOptions, ObjectiveComposer,
    OptimizationModel,
};

// Engines, extraction and reports
pub use groupforge_solver::{
    extract, model_options, solve_batch, solve_model, solve_session, Deadline, EngineSolution,
    GroupSummary, MilpEngine, Round, RunReport, SolvingEngine,
};

#[cfg(feature = "console")]
pub use groupforge_console as console;

mod plan;
pub use plan::{plan_session, run, run_with};

pub mod prelude {
    pub use super::{plan_session, run, run_with};
    pub use super::{
        GroupAssignment, GroupForgeError, GroupId, PairingHistory, Participant, ParticipantId,
        Roster,
        RosterEntry, Snapshot, SolveStatus,
    };
    pub use super::{MilpEngine, Round, RunConfig, RunReport, SolvingEngine};
}
