//! Model builder: decision variables and hard constraints.
//!
//! The builder turns a [`Snapshot`] and a [`GroupLayout`] into a [`Model`]
//! with four variable families and the constraints tying them together:
//!
//! - `x[i,g]` assignment booleans, one per participant and group
//! - `z[i,j,g]` co-assignment booleans, only for ledger pairs
//! - `l[g]` level sums and `y[g]` "has a scarce-level participant" flags
//!
//! Construction problems are reported before any variable is created.

use groupforge_core::{
    GroupId, GroupLayout, Level, ModelConstructionError, ParticipantId, Snapshot,
};
use tracing::debug;

use crate::linear::{ConstraintKind, Domain, LinearExpr, Model, Relation, VariableKind};
use crate::variables::{AssignmentVars, CoAssignmentVars, GroupAggregates, HistoryPair};

/// Builds the structural part of the grouping model.
///
/// # Example
///
/// ```
/// use groupforge_core::{GroupLayout, PairingHistory, Participant, Snapshot};
/// use groupforge_model::{ModelBuilder, VariableKind};
///
/// let mut history = PairingHistory::new();
/// history.insert_symmetric("a", "b", 1);
/// let snapshot = Snapshot::new(
///     vec![
///         Participant::new("a", 1),
///         Participant::new("b", 0),
///         Participant::new("c", 1),
///         Participant::new("d", 0),
///     ],
///     &history,
/// )
/// .unwrap();
/// let layout = GroupLayout::from_sizes([2, 2]);
///
/// let grouping = ModelBuilder::new(&snapshot, &layout, 1).unwrap().build();
/// let model = grouping.model();
///
/// assert_eq!(model.count_variables(VariableKind::Assignment), 8);
/// assert_eq!(model.count_variables(VariableKind::CoAssignment), 4);
/// ```
#[derive(Debug)]
pub struct ModelBuilder<'a> {
    snapshot: &'a Snapshot,
    layout: &'a GroupLayout,
    scarce_level: Level,
    pins: Vec<(usize, usize)>,
    model: Model,
}

impl<'a> ModelBuilder<'a> {
    /// Validates the inputs and starts an empty model.
    ///
    /// # Errors
    ///
    /// `EmptyParticipants` for an empty snapshot, otherwise whatever
    /// [`GroupLayout::validate`] reports for the participant count.
    pub fn new(
        snapshot: &'a Snapshot,
        layout: &'a GroupLayout,
        scarce_level: Level,
    ) -> Result<Self, ModelConstructionError> {
        if snapshot.is_empty() {
            return Err(ModelConstructionError::EmptyParticipants);
        }
        layout.validate(snapshot.len())?;
        Ok(ModelBuilder {
            snapshot,
            layout,
            scarce_level,
            pins: Vec::new(),
            model: Model::new(),
        })
    }

    /// Forces `participant` into `group`.
    pub fn pin(
        &mut self,
        participant: &ParticipantId,
        group: GroupId,
    ) -> Result<(), ModelConstructionError> {
        let p = self
            .snapshot
            .index_of(participant)
            .ok_or_else(|| ModelConstructionError::UnknownParticipant(participant.clone()))?;
        let g = self
            .layout
            .index_of(group)
            .ok_or_else(|| ModelConstructionError::UnknownGroup {
                participant: participant.clone(),
                group,
            })?;
        self.pins.push((p, g));
        Ok(())
    }

    /// Pins every `(participant, group)` pair.
    pub fn with_pins<'p>(
        mut self,
        pins: impl IntoIterator<Item = (&'p ParticipantId, &'p GroupId)>,
    ) -> Result<Self, ModelConstructionError> {
        for (participant, &group) in pins {
            self.pin(participant, group)?;
        }
        Ok(self)
    }

    /// One boolean per (participant, group): N x G variables.
    pub fn create_assignment_variables(&mut self) -> AssignmentVars {
        let groups = self.layout.groups();
        let mut vars = Vec::with_capacity(self.snapshot.len() * groups.len());
        for p in self.snapshot.participants() {
            for g in groups {
                vars.push(self.model.add_variable(
                    format!("x_{}_{}", p.id, g.id),
                    VariableKind::Assignment,
                    Domain::Binary,
                ));
            }
        }
        AssignmentVars::new(groups.len(), vars)
    }

    /// One boolean per (ledger pair, group).
    ///
    /// Pairs absent from the ledger get no variable at all.
    pub fn create_co_assignment_variables(&mut self) -> CoAssignmentVars {
        let groups = self.layout.groups();
        let participants = self.snapshot.participants();
        let pairs: Vec<HistoryPair> = self
            .snapshot
            .indexed_pairs()
            .into_iter()
            .map(|(first, second, count)| HistoryPair {
                first,
                second,
                count,
            })
            .collect();

        let mut vars = Vec::with_capacity(pairs.len() * groups.len());
        for pair in &pairs {
            let (a, b) = (&participants[pair.first].id, &participants[pair.second].id);
            for g in groups {
                vars.push(self.model.add_variable(
                    format!("z_{}_{}_{}", a, b, g.id),
                    VariableKind::CoAssignment,
                    Domain::Binary,
                ));
            }
        }
        CoAssignmentVars::new(groups.len(), pairs, vars)
    }

    /// One level sum `l[g]` and one flag `y[g]` per group.
    ///
    /// `l[g]` ranges over `0..=max_size * max(1, max_level)`, so a group
    /// can never be infeasible because of its level total alone.
    pub fn create_group_aggregates(&mut self) -> GroupAggregates {
        let max_level = i64::from(self.snapshot.max_level().max(1));
        let upper = self.layout.max_size() as i64 * max_level;

        let mut level = Vec::with_capacity(self.layout.len());
        let mut has_level_one = Vec::with_capacity(self.layout.len());
        for g in self.layout.groups() {
            level.push(self.model.add_variable(
                format!("l_{}", g.id),
                VariableKind::GroupLevel,
                Domain::Integer { lower: 0, upper },
            ));
            has_level_one.push(self.model.add_variable(
                format!("y_{}", g.id),
                VariableKind::HasLevelOne,
                Domain::Binary,
            ));
        }
        GroupAggregates {
            level,
            has_level_one,
        }
    }

    /// Posts every structural constraint.
    pub fn post_constraints(
        &mut self,
        x: &AssignmentVars,
        z: &CoAssignmentVars,
        aggregates: &GroupAggregates,
    ) {
        let participants = self.snapshot.participants();
        let groups = self.layout.groups();

        for i in 0..participants.len() {
            let expr = x
                .row(i)
                .iter()
                .fold(LinearExpr::with_capacity(groups.len()), |e, &v| e.term(v, 1.0));
            self.model
                .post(ConstraintKind::AssignOnce, expr, Relation::Equal, 1.0);
        }

        for (g, group) in groups.iter().enumerate() {
            let expr = (0..participants.len())
                .fold(LinearExpr::with_capacity(participants.len()), |e, i| {
                    e.term(x.get(i, g), 1.0)
                });
            self.model.post(
                ConstraintKind::GroupSize,
                expr,
                Relation::Equal,
                group.size as f64,
            );
        }

        for (k, pair) in z.pairs().iter().enumerate() {
            for g in 0..groups.len() {
                let (zv, xi, xj) = (z.get(k, g), x.get(pair.first, g), x.get(pair.second, g));
                self.model.post(
                    ConstraintKind::CoAssignFirst,
                    LinearExpr::new().term(zv, 1.0).term(xi, -1.0),
                    Relation::LessOrEqual,
                    0.0,
                );
                self.model.post(
                    ConstraintKind::CoAssignSecond,
                    LinearExpr::new().term(zv, 1.0).term(xj, -1.0),
                    Relation::LessOrEqual,
                    0.0,
                );
                self.model.post(
                    ConstraintKind::CoAssignBoth,
                    LinearExpr::new().term(zv, 1.0).term(xi, -1.0).term(xj, -1.0),
                    Relation::GreaterOrEqual,
                    -1.0,
                );
            }
        }

        for (g, group) in groups.iter().enumerate() {
            let mut level_sum = LinearExpr::new().term(aggregates.level[g], 1.0);
            let mut scarce = LinearExpr::new();
            for (i, p) in participants.iter().enumerate() {
                if p.level > 0 {
                    level_sum.add_term(x.get(i, g), -f64::from(p.level));
                }
                if p.level == self.scarce_level {
                    scarce.add_term(x.get(i, g), 1.0);
                }
            }
            self.model
                .post(ConstraintKind::GroupLevel, level_sum, Relation::Equal, 0.0);

            let y = aggregates.has_level_one[g];
            let mut lower = LinearExpr::new().term(y, group.size as f64);
            let mut upper = LinearExpr::new().term(y, 1.0);
            for &(var, coefficient) in scarce.terms() {
                lower.add_term(var, -coefficient);
                upper.add_term(var, -coefficient);
            }
            self.model.post(
                ConstraintKind::LevelOneLower,
                lower,
                Relation::GreaterOrEqual,
                0.0,
            );
            self.model
                .post(ConstraintKind::LevelOneUpper, upper, Relation::LessOrEqual, 0.0);
        }

        for &(p, g) in &self.pins {
            self.model.post(
                ConstraintKind::Pin,
                LinearExpr::from(x.get(p, g)),
                Relation::Equal,
                1.0,
            );
        }
    }

    /// Creates all variables and posts all constraints.
    pub fn build(mut self) -> GroupingModel {
        let x = self.create_assignment_variables();
        let z = self.create_co_assignment_variables();
        let aggregates = self.create_group_aggregates();
        self.post_constraints(&x, &z, &aggregates);

        debug!(
            participants = self.snapshot.len(),
            groups = self.layout.len(),
            history_pairs = z.pairs().len(),
            variables = self.model.variable_count(),
            constraints = self.model.constraint_count(),
            "Structural model built"
        );

        let participants = self.snapshot.participants();
        GroupingModel {
            model: self.model,
            participants: participants.iter().map(|p| p.id.clone()).collect(),
            levels: participants.iter().map(|p| p.level).collect(),
            layout: self.layout.clone(),
            scarce_level: self.scarce_level,
            x,
            z,
            aggregates,
        }
    }
}

/// A built model together with the index arenas needed to read it back.
#[derive(Debug, Clone)]
pub struct GroupingModel {
    pub(crate) model: Model,
    participants: Vec<ParticipantId>,
    levels: Vec<Level>,
    layout: GroupLayout,
    scarce_level: Level,
    x: AssignmentVars,
    z: CoAssignmentVars,
    aggregates: GroupAggregates,
}

impl GroupingModel {
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Participants in model index order.
    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn layout(&self) -> &GroupLayout {
        &self.layout
    }

    pub fn scarce_level(&self) -> Level {
        self.scarce_level
    }

    pub fn assignment_vars(&self) -> &AssignmentVars {
        &self.x
    }

    pub fn co_assignment_vars(&self) -> &CoAssignmentVars {
        &self.z
    }

    pub fn aggregates(&self) -> &GroupAggregates {
        &self.aggregates
    }
}
