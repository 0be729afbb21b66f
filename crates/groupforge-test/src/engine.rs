//! Engine double and hand-made solutions.
//!
//! # Example
//!
//! ```
//! use groupforge_core::SolveStatus;
//! use groupforge_model::{Model, SolvingEngine};
//! use groupforge_test::engine::StatusEngine;
//!
//! let engine = StatusEngine::new(SolveStatus::Infeasible);
//! let solution = engine.solve(&Model::new());
//! assert_eq!(solution.status, SolveStatus::Infeasible);
//! assert_eq!(engine.calls(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use groupforge_core::SolveStatus;
use groupforge_model::{EngineSolution, Model, OptimizationModel, SolvingEngine};

/// Returns the same outcome for every model and counts invocations.
#[derive(Debug)]
pub struct StatusEngine {
    status: SolveStatus,
    values: Option<Vec<f64>>,
    message: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StatusEngine {
    pub fn new(status: SolveStatus) -> Self {
        Self {
            status,
            values: None,
            message: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Values returned with the status, indexed by variable.
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sleeps this long inside every `solve` call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `solve` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SolvingEngine for StatusEngine {
    fn name(&self) -> &'static str {
        "status-double"
    }

    fn solve(&self, _model: &Model) -> EngineSolution {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        EngineSolution {
            status: self.status,
            values: self.values.clone(),
            message: self.message.clone(),
        }
    }
}

/// Values for every variable of `model` describing `placement`.
///
/// `placement[i]` is the group index of participant `i`. The result
/// satisfies every model constraint as long as the placement respects the
/// group sizes and pins.
pub fn consistent_values(model: &OptimizationModel, placement: &[usize]) -> Vec<f64> {
    let grouping = model.grouping();
    let group_count = grouping.layout().len();
    let levels = grouping.levels();
    let mut values = vec![0.0; model.model().variable_count()];

    let x = grouping.assignment_vars();
    for (i, &g) in placement.iter().enumerate() {
        values[x.get(i, g).index()] = 1.0;
    }

    let z = grouping.co_assignment_vars();
    let mut cost = 0;
    for (k, pair) in z.pairs().iter().enumerate() {
        let g = placement[pair.first];
        if placement[pair.second] == g {
            values[z.get(k, g).index()] = 1.0;
            cost += pair.squared_count();
        }
    }

    let aggregates = grouping.aggregates();
    let mut count = 0u32;
    for g in 0..group_count {
        let mut level = 0;
        let mut scarce = false;
        for (i, &pg) in placement.iter().enumerate() {
            if pg == g {
                level += levels[i];
                scarce |= levels[i] == grouping.scarce_level();
            }
        }
        values[aggregates.level[g].index()] = f64::from(level);
        if scarce {
            values[aggregates.has_level_one[g].index()] = 1.0;
            count += 1;
        }
    }

    let terms = model.terms();
    values[terms.squared_repeat_cost.index()] = cost as f64;
    values[terms.level_one_group_count.index()] = f64::from(count);
    values
}
