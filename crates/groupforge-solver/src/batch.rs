//! Parallel solving of independent sessions.

use groupforge_config::RunConfig;
use groupforge_core::{Result, Snapshot};
use groupforge_model::SolvingEngine;
use rayon::prelude::*;
use tracing::info;

use crate::report::RunReport;
use crate::run::solve_session;

/// Solves every `(snapshot, config)` job in parallel.
///
/// Jobs share nothing but the engine. Results come back in job order, one
/// per job, so a failing job never hides the others.
pub fn solve_batch<E>(jobs: &[(Snapshot, RunConfig)], engine: &E) -> Vec<Result<RunReport>>
where
    E: SolvingEngine + ?Sized,
{
    info!(event = "batch_start", jobs = jobs.len());

    let results: Vec<Result<RunReport>> = jobs
        .par_iter()
        .map(|(snapshot, config)| solve_session(snapshot, config, engine))
        .collect();

    let solved = results
        .iter()
        .filter(|r| matches!(r, Ok(report) if report.is_solved()))
        .count();
    info!(event = "batch_end", jobs = jobs.len(), solved = solved);
    results
}
