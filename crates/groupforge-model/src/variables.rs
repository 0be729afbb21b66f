//! Dense variable arenas indexed by participant, pair and group position.

use crate::linear::VarId;

/// `x[i,g]` stored row-major by participant.
#[derive(Debug, Clone)]
pub struct AssignmentVars {
    group_count: usize,
    vars: Vec<VarId>,
}

impl AssignmentVars {
    pub(crate) fn new(group_count: usize, vars: Vec<VarId>) -> Self {
        AssignmentVars { group_count, vars }
    }

    /// Variable for participant index `participant` and group index `group`.
    #[inline]
    pub fn get(&self, participant: usize, group: usize) -> VarId {
        self.vars[participant * self.group_count + group]
    }

    /// All variables of one participant, in group order.
    pub fn row(&self, participant: usize) -> &[VarId] {
        let start = participant * self.group_count;
        &self.vars[start..start + self.group_count]
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// One ordered ledger pair, by participant index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPair {
    pub first: usize,
    pub second: usize,
    pub count: u32,
}

impl HistoryPair {
    /// Cost of sharing a group once more.
    #[inline]
    pub fn squared_count(&self) -> i64 {
        let count = i64::from(self.count);
        count * count
    }
}

/// `z[i,j,g]` for ledger pairs only, stored row-major by pair.
#[derive(Debug, Clone)]
pub struct CoAssignmentVars {
    group_count: usize,
    pairs: Vec<HistoryPair>,
    vars: Vec<VarId>,
}

impl CoAssignmentVars {
    pub(crate) fn new(group_count: usize, pairs: Vec<HistoryPair>, vars: Vec<VarId>) -> Self {
        CoAssignmentVars {
            group_count,
            pairs,
            vars,
        }
    }

    #[inline]
    pub fn get(&self, pair: usize, group: usize) -> VarId {
        self.vars[pair * self.group_count + group]
    }

    pub fn pairs(&self) -> &[HistoryPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Per-group `l[g]` and `y[g]`.
#[derive(Debug, Clone)]
pub struct GroupAggregates {
    pub level: Vec<VarId>,
    pub has_level_one: Vec<VarId>,
}

/// The two objective accumulators.
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveTerms {
    pub squared_repeat_cost: VarId,
    pub level_one_group_count: VarId,
}
