//! Wall-clock deadline for engines without a native time limit.
//!
//! The inner engine runs on a worker thread; the caller stops waiting once
//! the limit expires and reports [`SolveStatus::Unknown`]. A worker cannot
//! be interrupted. It keeps its own handle to the inner engine until the
//! engine returns, then drops the late result and exits. [`Deadline::outstanding`]
//! counts workers that are still running.
//!
//! [`MilpEngine`](crate::MilpEngine) enforces its limit inside the backend
//! and does not need this wrapper.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError};
use groupforge_core::SolveStatus;
use groupforge_model::{EngineSolution, Model, SolvingEngine};
use tracing::warn;

/// Bounds the wall-clock time of every `solve` call of `E`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use groupforge_solver::{Deadline, MilpEngine, SolvingEngine};
///
/// let engine = Deadline::new(MilpEngine::new(), Duration::from_secs(30));
/// assert_eq!(engine.limit(), Duration::from_secs(30));
/// assert_eq!(engine.name(), "microlp");
/// ```
#[derive(Debug)]
pub struct Deadline<E> {
    inner: Arc<E>,
    limit: Duration,
}

impl<E: SolvingEngine + 'static> Deadline<E> {
    pub fn new(inner: E, limit: Duration) -> Self {
        Self::from_arc(Arc::new(inner), limit)
    }

    /// Wraps an engine the caller keeps a handle to.
    pub fn from_arc(inner: Arc<E>, limit: Duration) -> Self {
        Deadline { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Workers still running after their caller gave up on them.
    pub fn outstanding(&self) -> usize {
        // the wrapper's own handle plus one per live worker
        Arc::strong_count(&self.inner) - 1
    }
}

impl<E: SolvingEngine + 'static> SolvingEngine for Deadline<E> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn solve(&self, model: &Model) -> EngineSolution {
        let (sender, receiver) = channel::bounded(1);
        let engine = Arc::clone(&self.inner);
        let owned = model.clone();
        let spawned = thread::Builder::new()
            .name("groupforge-deadline".to_string())
            .spawn(move || {
                let solution = engine.solve(&owned);
                // The receiver is gone once the deadline passed.
                let _ = sender.send(solution);
            });
        if let Err(e) = spawned {
            return EngineSolution::unsolved(SolveStatus::Unknown)
                .with_message(format!("failed to start engine thread: {}", e));
        }

        match receiver.recv_timeout(self.limit) {
            Ok(solution) => solution,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    event = "deadline_reached",
                    limit_secs = self.limit.as_secs_f64(),
                );
                EngineSolution::unsolved(SolveStatus::Unknown).with_message("deadline reached")
            }
            Err(RecvTimeoutError::Disconnected) => EngineSolution::unsolved(SolveStatus::Unknown)
                .with_message("engine thread stopped without a result"),
        }
    }
}

#[cfg(test)]
#[path = "deadline_tests.rs"]
mod tests;
