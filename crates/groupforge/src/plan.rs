//! Entry points that hide engine wiring.

use groupforge_config::RunConfig;
use groupforge_core::{PairingHistory, Result, Roster, Snapshot};
use groupforge_model::SolvingEngine;
use groupforge_solver::{solve_session, Deadline, MilpEngine, RunReport};

/// Solves one snapshot with the default engine.
///
/// The engine deadline comes from `config.engine`.
pub fn run(snapshot: &Snapshot, config: &RunConfig) -> Result<RunReport> {
    let engine = MilpEngine::from_config(&config.engine);
    solve_session(snapshot, config, &engine)
}

/// Solves one snapshot with a caller-supplied engine.
///
/// A deadline in `config.engine` bounds the engine through [`Deadline`].
pub fn run_with<E>(snapshot: &Snapshot, config: &RunConfig, engine: E) -> Result<RunReport>
where
    E: SolvingEngine + 'static,
{
    match config.time_limit() {
        Some(limit) => solve_session(snapshot, config, &Deadline::new(engine, limit)),
        None => solve_session(snapshot, config, &engine),
    }
}

/// Plans the next session of a roster.
///
/// Attendees of `config.session` are solved; without a session every roster
/// entry takes part. Returns the report and, when a round was found, the
/// roster ledger updated with that round.
pub fn plan_session(
    roster: &Roster,
    config: &RunConfig,
) -> Result<(RunReport, Option<PairingHistory>)> {
    let snapshot = match config.session.as_deref() {
        Some(session) => roster.snapshot(session)?,
        None => roster.snapshot_all()?,
    };
    let report = run(&snapshot, config)?;
    let next = report.next_history(&roster.history);
    Ok((report, next))
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
