//! Mixed-integer engine backed by `good_lp` and its pure-Rust `microlp` backend.
//!
//! A time limit is handed to the backend itself, which stops branch-and-bound
//! on the calling thread. The best incumbent found by then is reported as
//! [`SolveStatus::Feasible`]; without one the status is
//! [`SolveStatus::Unknown`].

use std::time::Duration;

use good_lp::{
    default_solver, variable, variables, Expression, ResolutionError, Solution, SolutionStatus,
    SolverModel, Variable, WithTimeLimit,
};
use groupforge_config::EngineConfig;
use groupforge_core::SolveStatus;
use groupforge_model::{Domain, EngineSolution, LinearExpr, Model, Relation, SolvingEngine};
use tracing::{debug, warn};

/// Exact branch-and-bound engine.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use groupforge_solver::MilpEngine;
///
/// let engine = MilpEngine::new().with_time_limit(Duration::from_secs(30));
/// assert_eq!(engine.time_limit(), Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MilpEngine {
    time_limit: Option<Duration>,
}

impl MilpEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Takes the deadline from the `[engine]` section of a run configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        MilpEngine {
            time_limit: config.time_limit(),
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    fn deadline_reached(&self) {
        if let Some(limit) = self.time_limit {
            warn!(
                event = "deadline_reached",
                limit_secs = limit.as_secs_f64(),
            );
        }
    }
}

impl SolvingEngine for MilpEngine {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &Model) -> EngineSolution {
        let mut vars = variables!();
        let handles: Vec<Variable> = model
            .variables()
            .iter()
            .map(|def| {
                let definition = match def.domain {
                    Domain::Binary => variable().binary(),
                    Domain::Integer { lower, upper } => {
                        variable().integer().min(lower as f64).max(upper as f64)
                    }
                };
                vars.add(definition.name(def.name.clone()))
            })
            .collect();

        let objective = to_expression(model.objective(), &handles);
        let mut problem = vars.minimise(objective).using(default_solver);
        if let Some(limit) = self.time_limit {
            problem = problem.with_time_limit(limit.as_secs_f64());
        }
        for c in model.constraints() {
            let lhs = to_expression(&c.expr, &handles);
            let constraint = match c.relation {
                Relation::LessOrEqual => lhs.leq(c.rhs),
                Relation::Equal => lhs.eq(c.rhs),
                Relation::GreaterOrEqual => lhs.geq(c.rhs),
            };
            problem = problem.with(constraint);
        }

        debug!(
            variables = handles.len(),
            constraints = model.constraint_count(),
            "Handing model to microlp"
        );

        match problem.solve() {
            Ok(solution) => {
                let values = handles.iter().map(|&v| solution.value(v)).collect();
                match solution.status() {
                    SolutionStatus::Optimal => EngineSolution::solved(SolveStatus::Optimal, values),
                    SolutionStatus::TimeLimit => {
                        self.deadline_reached();
                        EngineSolution::solved(SolveStatus::Feasible, values)
                            .with_message("deadline reached, returning best incumbent")
                    }
                    SolutionStatus::GapLimit => {
                        EngineSolution::solved(SolveStatus::Feasible, values)
                    }
                }
            }
            Err(ResolutionError::Infeasible) => EngineSolution::unsolved(SolveStatus::Infeasible),
            Err(ResolutionError::Unbounded) => EngineSolution::unsolved(SolveStatus::ModelInvalid)
                .with_message("objective is unbounded"),
            // microlp reports an expired limit without incumbent as `Other`
            Err(ResolutionError::Other(message)) if self.time_limit.is_some() => {
                self.deadline_reached();
                EngineSolution::unsolved(SolveStatus::Unknown).with_message(message)
            }
            Err(other) => {
                EngineSolution::unsolved(SolveStatus::Unknown).with_message(other.to_string())
            }
        }
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::with_capacity(expr.terms().len());
    for &(var, coefficient) in expr.terms() {
        out.add_mul(coefficient, handles[var.index()]);
    }
    out + expr.constant_value()
}
