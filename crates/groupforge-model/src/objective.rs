//! Objective composition.
//!
//! Adds the two accumulators to a [`GroupingModel`] and sets the weighted
//! objective `repeat * squared_repeat_cost - level * level_one_group_count`.

use std::collections::BTreeMap;

use groupforge_core::{
    GroupId, GroupLayout, Level, ModelConstructionError, ObjectiveWeights, ParticipantId,
    Snapshot,
};
use tracing::debug;

use crate::builder::{GroupingModel, ModelBuilder};
use crate::linear::{ConstraintKind, Domain, LinearExpr, Model, Relation, VariableKind};
use crate::variables::ObjectiveTerms;

/// Composes the weighted objective on top of a structural model.
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveComposer {
    weights: ObjectiveWeights,
}

impl ObjectiveComposer {
    /// # Errors
    ///
    /// `InvalidWeight` for a negative or non-finite weight.
    pub fn new(weights: ObjectiveWeights) -> Result<Self, ModelConstructionError> {
        weights.validate()?;
        Ok(ObjectiveComposer { weights })
    }

    pub fn weights(&self) -> ObjectiveWeights {
        self.weights
    }

    /// Adds both accumulators and their defining equalities, then sets the
    /// objective.
    ///
    /// Pairs with a zero count keep their `z` variables but contribute
    /// nothing to the cost sum.
    pub fn compose(&self, mut grouping: GroupingModel) -> OptimizationModel {
        let z = grouping.co_assignment_vars().clone();
        let group_count = grouping.layout().len();
        let cost_upper: i64 = z.pairs().iter().map(|p| p.squared_count()).sum();

        let model = &mut grouping.model;
        let squared_repeat_cost = model.add_variable(
            "squared_repeat_cost",
            VariableKind::SquaredRepeatCost,
            Domain::Integer {
                lower: 0,
                upper: cost_upper,
            },
        );
        let level_one_group_count = model.add_variable(
            "level_one_group_count",
            VariableKind::LevelOneGroupCount,
            Domain::Integer {
                lower: 0,
                upper: group_count as i64,
            },
        );

        let mut cost = LinearExpr::with_capacity(z.len() + 1).term(squared_repeat_cost, 1.0);
        for (k, pair) in z.pairs().iter().enumerate() {
            let weight = pair.squared_count();
            if weight == 0 {
                continue;
            }
            for g in 0..group_count {
                cost.add_term(z.get(k, g), -(weight as f64));
            }
        }
        model.post(ConstraintKind::SquaredRepeatCost, cost, Relation::Equal, 0.0);

        let mut count = LinearExpr::with_capacity(group_count + 1).term(level_one_group_count, 1.0);
        for &y in &grouping.aggregates().has_level_one {
            count.add_term(y, -1.0);
        }
        grouping
            .model
            .post(ConstraintKind::LevelOneGroupCount, count, Relation::Equal, 0.0);

        grouping.model.set_objective(
            LinearExpr::new()
                .term(squared_repeat_cost, self.weights.repeat)
                .term(level_one_group_count, -self.weights.level),
        );

        debug!(
            repeat_weight = self.weights.repeat,
            level_weight = self.weights.level,
            cost_upper_bound = cost_upper,
            "Objective composed"
        );

        OptimizationModel {
            grouping,
            terms: ObjectiveTerms {
                squared_repeat_cost,
                level_one_group_count,
            },
            weights: self.weights,
        }
    }
}

/// A complete model: structure, accumulators and objective.
#[derive(Debug, Clone)]
pub struct OptimizationModel {
    grouping: GroupingModel,
    terms: ObjectiveTerms,
    weights: ObjectiveWeights,
}

impl OptimizationModel {
    pub fn model(&self) -> &Model {
        self.grouping.model()
    }

    pub fn grouping(&self) -> &GroupingModel {
        &self.grouping
    }

    pub fn terms(&self) -> ObjectiveTerms {
        self.terms
    }

    pub fn weights(&self) -> ObjectiveWeights {
        self.weights
    }
}

/// Everything besides the snapshot and layout that shapes a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    pub weights: ObjectiveWeights,
    pub scarce_level: Level,
    pub pins: BTreeMap<ParticipantId, GroupId>,
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            weights: ObjectiveWeights::default(),
            scarce_level: 1,
            pins: BTreeMap::new(),
        }
    }
}

impl ModelOptions {
    pub fn new(weights: ObjectiveWeights) -> Self {
        ModelOptions {
            weights,
            ..Self::default()
        }
    }

    pub fn with_scarce_level(mut self, level: Level) -> Self {
        self.scarce_level = level;
        self
    }

    pub fn with_pin(mut self, participant: impl Into<ParticipantId>, group: GroupId) -> Self {
        self.pins.insert(participant.into(), group);
        self
    }
}

/// Builds and composes the full model in one call.
///
/// # Example
///
/// ```
/// use groupforge_core::{GroupLayout, PairingHistory, Participant, Snapshot};
/// use groupforge_model::{build_model, ModelOptions};
///
/// let snapshot = Snapshot::new(
///     vec![Participant::new("a", 1), Participant::new("b", 0)],
///     &PairingHistory::new(),
/// )
/// .unwrap();
/// let model = build_model(&snapshot, &GroupLayout::from_sizes([2]), &ModelOptions::default())
///     .unwrap();
///
/// assert_eq!(model.model().objective().terms().len(), 2);
/// ```
pub fn build_model(
    snapshot: &Snapshot,
    layout: &GroupLayout,
    options: &ModelOptions,
) -> Result<OptimizationModel, ModelConstructionError> {
    let composer = ObjectiveComposer::new(options.weights)?;
    let grouping = ModelBuilder::new(snapshot, layout, options.scarce_level)?
        .with_pins(options.pins.iter())?
        .build();
    Ok(composer.compose(grouping))
}
