//! Solver-agnostic linear model over boolean and bounded integer variables.

use std::fmt;

/// Index of a variable in its [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Value domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// 0 or 1.
    Binary,
    /// Any integer in `lower..=upper`.
    Integer { lower: i64, upper: i64 },
}

impl Domain {
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Domain::Binary => (0, 1),
            Domain::Integer { lower, upper } => (lower, upper),
        }
    }
}

/// Role a variable plays in the grouping model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// `x[i,g]`
    Assignment,
    /// `z[i,j,g]`
    CoAssignment,
    /// `l[g]`
    GroupLevel,
    /// `y[g]`
    HasLevelOne,
    SquaredRepeatCost,
    LevelOneGroupCount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub kind: VariableKind,
    pub domain: Domain,
}

/// Sum of weighted variables plus a constant.
///
/// # Examples
///
/// ```
/// use groupforge_model::{Domain, LinearExpr, Model, VariableKind};
///
/// let mut model = Model::new();
/// let a = model.add_variable("a", VariableKind::Assignment, Domain::Binary);
/// let b = model.add_variable("b", VariableKind::Assignment, Domain::Binary);
///
/// let expr = LinearExpr::new().term(a, 2.0).term(b, -1.0).constant(3.0);
/// assert_eq!(expr.evaluate(&[1.0, 1.0]), 4.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LinearExpr {
            terms: Vec::with_capacity(capacity),
            constant: 0.0,
        }
    }

    /// Adds `coefficient * var`, builder style.
    pub fn term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    /// Adds a constant, builder style.
    pub fn constant(mut self, value: f64) -> Self {
        self.constant += value;
        self
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant_value(&self) -> f64 {
        self.constant
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under `values`, indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * values[var.index()])
            .sum::<f64>()
            + self.constant
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::new().term(var, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::LessOrEqual => "<=",
            Relation::Equal => "==",
            Relation::GreaterOrEqual => ">=",
        })
    }
}

/// Which family a constraint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Each participant sits in exactly one group.
    AssignOnce,
    /// Each group holds exactly its size.
    GroupSize,
    /// `z <= x[i,g]`
    CoAssignFirst,
    /// `z <= x[j,g]`
    CoAssignSecond,
    /// `z >= x[i,g] + x[j,g] - 1`
    CoAssignBoth,
    /// `l[g]` equals the level sum.
    GroupLevel,
    /// Forces `y[g]` up when a scarce-level participant is present.
    LevelOneLower,
    /// Forces `y[g]` down when none is present.
    LevelOneUpper,
    SquaredRepeatCost,
    LevelOneGroupCount,
    /// Fixed pre-assignment.
    Pin,
}

/// `expr <relation> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub kind: ConstraintKind,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Returns true if `values` satisfy the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::LessOrEqual => lhs <= self.rhs + tolerance,
            Relation::Equal => (lhs - self.rhs).abs() <= tolerance,
            Relation::GreaterOrEqual => lhs >= self.rhs - tolerance,
        }
    }
}

/// Variables, constraints and a linear objective to minimize.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<VariableDef>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        kind: VariableKind,
        domain: Domain,
    ) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(VariableDef {
            name: name.into(),
            kind,
            domain,
        });
        id
    }

    pub fn post(&mut self, kind: ConstraintKind, expr: LinearExpr, relation: Relation, rhs: f64) {
        self.constraints.push(LinearConstraint {
            kind,
            expr,
            relation,
            rhs,
        });
    }

    /// Replaces the objective. The objective is always minimized.
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    pub fn variable(&self, var: VarId) -> &VariableDef {
        &self.variables[var.index()]
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn count_variables(&self, kind: VariableKind) -> usize {
        self.variables.iter().filter(|v| v.kind == kind).count()
    }

    pub fn count_constraints(&self, kind: ConstraintKind) -> usize {
        self.constraints.iter().filter(|c| c.kind == kind).count()
    }

    /// Constraints or domains violated by `values`.
    ///
    /// Returns an empty list for a consistent assignment. `values` shorter
    /// than the variable list is reported as a single domain violation.
    pub fn violations(&self, values: &[f64], tolerance: f64) -> Vec<String> {
        if values.len() != self.variables.len() {
            return vec![format!(
                "expected {} values, got {}",
                self.variables.len(),
                values.len()
            )];
        }
        let mut violations = Vec::new();
        for (def, &value) in self.variables.iter().zip(values) {
            let (lower, upper) = def.domain.bounds();
            let integral = (value - value.round()).abs() <= tolerance;
            if !integral || value < lower as f64 - tolerance || value > upper as f64 + tolerance {
                violations.push(format!("{} = {} outside {:?}", def.name, value, def.domain));
            }
        }
        for c in &self.constraints {
            if !c.is_satisfied(values, tolerance) {
                violations.push(format!(
                    "{:?}: {} {} {}",
                    c.kind,
                    c.expr.evaluate(values),
                    c.relation,
                    c.rhs
                ));
            }
        }
        violations
    }
}
