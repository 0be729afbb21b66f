//! GroupForge Model - optimization model construction
//!
//! Turns a participant snapshot and a group layout into a solver-agnostic
//! mixed-integer linear model:
//! - [`ModelBuilder`] creates the variables and hard constraints
//! - [`ObjectiveComposer`] adds the accumulators and weighted objective
//! - [`SolvingEngine`] is the seam an external engine plugs into

pub mod builder;
pub mod engine;
pub mod linear;
pub mod objective;
pub mod variables;

pub use builder::{GroupingModel, ModelBuilder};
pub use engine::{EngineSolution, SolvingEngine};
pub use linear::{
    ConstraintKind, Domain, LinearConstraint, LinearExpr, Model, Relation, VarId, VariableDef,
    VariableKind,
};
pub use objective::{build_model, ModelOptions, ObjectiveComposer, OptimizationModel};
pub use variables::{AssignmentVars, CoAssignmentVars, GroupAggregates, HistoryPair, ObjectiveTerms};
