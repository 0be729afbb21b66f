//! Seam between model construction and the solving engine.

use std::sync::Arc;

use groupforge_core::SolveStatus;

use crate::linear::Model;

/// Raw outcome of one engine invocation.
///
/// `values` is indexed by [`VarId::index`](crate::VarId::index) and is
/// present only for [`SolveStatus::Optimal`] and [`SolveStatus::Feasible`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSolution {
    pub status: SolveStatus,
    pub values: Option<Vec<f64>>,
    /// Engine diagnostic, if any.
    pub message: Option<String>,
}

impl EngineSolution {
    pub fn solved(status: SolveStatus, values: Vec<f64>) -> Self {
        EngineSolution {
            status,
            values: Some(values),
            message: None,
        }
    }

    pub fn unsolved(status: SolveStatus) -> Self {
        EngineSolution {
            status,
            values: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// An engine able to minimize a [`Model`].
///
/// Implementations must be shareable across threads so one engine can
/// serve a batch of sessions.
pub trait SolvingEngine: Send + Sync {
    /// Short engine name used in logs.
    fn name(&self) -> &'static str;

    /// Solves `model` to optimality or until the engine gives up.
    fn solve(&self, model: &Model) -> EngineSolution;
}

impl<E: SolvingEngine + ?Sized> SolvingEngine for &E {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> EngineSolution {
        (**self).solve(model)
    }
}

impl<E: SolvingEngine + ?Sized> SolvingEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> EngineSolution {
        (**self).solve(model)
    }
}

impl<E: SolvingEngine + ?Sized> SolvingEngine for Arc<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> EngineSolution {
        (**self).solve(model)
    }
}
