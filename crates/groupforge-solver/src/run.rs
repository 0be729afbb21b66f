//! Session run pipeline.
//!
//! Logging levels:
//! - **INFO**: run start, model scale, solve end
//! - **WARN**: no solution, deadline reached
//! - **DEBUG**: model construction details

use std::time::Instant;

use groupforge_config::RunConfig;
use groupforge_core::{GroupForgeError, Result, Snapshot};
use groupforge_model::{build_model, ModelOptions, OptimizationModel, SolvingEngine};
use tracing::{debug, info, warn};

use crate::extract::extract;
use crate::report::{Round, RunReport};

/// Model options carried by a run configuration.
pub fn model_options(config: &RunConfig) -> ModelOptions {
    ModelOptions {
        weights: config.weights,
        scarce_level: config.scarce_level,
        pins: config.pinned.clone(),
    }
}

/// Solves an already built model and reads the result back.
pub fn solve_model<E>(model: &OptimizationModel, engine: &E) -> Result<Round>
where
    E: SolvingEngine + ?Sized,
{
    let solution = engine.solve(model.model());
    if let Some(message) = &solution.message {
        debug!(engine = engine.name(), status = %solution.status, message = %message);
    }
    extract(model, &solution)
}

/// Runs one session end to end: build, solve, extract.
///
/// An engine that finds no assignment still yields a report, with
/// `round == None`. Construction problems and engine inconsistencies are
/// returned as errors.
///
/// # Errors
///
/// - [`GroupForgeError::ModelConstruction`] before the engine is invoked
/// - [`GroupForgeError::SolverInternal`] when the engine rejects the model
///   or returns inconsistent values
pub fn solve_session<E>(snapshot: &Snapshot, config: &RunConfig, engine: &E) -> Result<RunReport>
where
    E: SolvingEngine + ?Sized,
{
    let start = Instant::now();
    let layout = config.group_layout();

    info!(
        event = "run_start",
        session = config.session.as_deref().unwrap_or("-"),
        participants = snapshot.len(),
        groups = layout.len(),
        history_pairs = snapshot.history().len(),
        engine = engine.name(),
    );

    let model = build_model(snapshot, &layout, &model_options(config))?;

    info!(
        event = "model_built",
        variables = model.model().variable_count(),
        constraints = model.model().constraint_count(),
    );

    let session = config.session.clone();
    match solve_model(&model, engine) {
        Ok(round) => {
            let elapsed = start.elapsed();
            info!(
                event = "solve_end",
                status = %round.status,
                objective = round.objective_value,
                squared_repeat_cost = round.squared_repeat_cost,
                level_one_groups = round.level_one_group_count,
                elapsed_ms = elapsed.as_millis() as u64,
            );
            Ok(RunReport::solved(session, round, elapsed))
        }
        Err(GroupForgeError::NoSolutionFound { status }) => {
            let elapsed = start.elapsed();
            warn!(
                event = "no_solution",
                status = %status,
                elapsed_ms = elapsed.as_millis() as u64,
            );
            Ok(RunReport::unsolved(session, status, elapsed))
        }
        Err(e) => Err(e),
    }
}
