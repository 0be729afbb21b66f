//! GroupForge Solver
//!
//! This crate drives one session from input to summary:
//! - [`MilpEngine`], an exact engine behind the [`SolvingEngine`] seam
//! - [`Deadline`], a wall-clock limit for engines without one
//! - Result extraction with consistency checks
//! - The run pipeline and [`RunReport`]
//! - Parallel batch solving

pub mod batch;
pub mod deadline;
pub mod extract;
pub mod milp;
pub mod report;
pub mod run;

pub use batch::solve_batch;
pub use deadline::Deadline;
pub use extract::{extract, DECISION_THRESHOLD, FEASIBILITY_TOLERANCE};
pub use groupforge_model::{EngineSolution, SolvingEngine};
pub use milp::MilpEngine;
pub use report::{GroupSummary, Round, RunReport};
pub use run::{model_options, solve_model, solve_session};
