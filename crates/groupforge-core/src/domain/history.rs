//! Sparse ledger of prior co-assignments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::assignment::GroupAssignment;
use super::participant::ParticipantId;

/// How many times each ordered pair of participants has shared a group.
///
/// The ledger is sparse: a pair that never appeared has no entry, which is
/// different from an entry with count zero (the latter is a pair the model
/// still tracks). Self pairs are never stored.
///
/// # Examples
///
/// ```
/// use groupforge_core::PairingHistory;
///
/// let mut history = PairingHistory::new();
/// history.insert_symmetric("ana", "ben", 2);
///
/// assert_eq!(history.get(&"ana".into(), &"ben".into()), Some(2));
/// assert_eq!(history.get(&"ben".into(), &"ana".into()), Some(2));
/// assert_eq!(history.count(&"ana".into(), &"cleo".into()), 0);
/// assert_eq!(history.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct PairingHistory {
    counts: BTreeMap<(ParticipantId, ParticipantId), u32>,
}

#[derive(Serialize, Deserialize)]
struct HistoryEntry {
    first: ParticipantId,
    second: ParticipantId,
    count: u32,
}

impl From<Vec<HistoryEntry>> for PairingHistory {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut history = PairingHistory::new();
        for e in entries {
            history.insert(e.first, e.second, e.count);
        }
        history
    }
}

impl From<PairingHistory> for Vec<HistoryEntry> {
    fn from(history: PairingHistory) -> Self {
        history
            .counts
            .into_iter()
            .map(|((first, second), count)| HistoryEntry {
                first,
                second,
                count,
            })
            .collect()
    }
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count of the ordered pair `(first, second)`.
    ///
    /// Returns the previous count. Self pairs are ignored.
    pub fn insert(
        &mut self,
        first: impl Into<ParticipantId>,
        second: impl Into<ParticipantId>,
        count: u32,
    ) -> Option<u32> {
        let (first, second) = (first.into(), second.into());
        if first == second {
            return None;
        }
        self.counts.insert((first, second), count)
    }

    /// Sets the count of both `(a, b)` and `(b, a)`.
    pub fn insert_symmetric(
        &mut self,
        a: impl Into<ParticipantId>,
        b: impl Into<ParticipantId>,
        count: u32,
    ) {
        let (a, b) = (a.into(), b.into());
        self.insert(a.clone(), b.clone(), count);
        self.insert(b, a, count);
    }

    /// Count of an ordered pair, `None` when the pair has no entry.
    pub fn get(&self, first: &ParticipantId, second: &ParticipantId) -> Option<u32> {
        self.counts
            .get(&(first.clone(), second.clone()))
            .copied()
    }

    /// Count of an ordered pair, treating a missing entry as zero.
    pub fn count(&self, first: &ParticipantId, second: &ParticipantId) -> u32 {
        self.get(first, second).unwrap_or(0)
    }

    pub fn contains(&self, first: &ParticipantId, second: &ParticipantId) -> bool {
        self.get(first, second).is_some()
    }

    /// Number of ordered pairs with an entry.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates entries in `(first, second)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantId, u32)> + '_ {
        self.counts.iter().map(|((a, b), &count)| (a, b, count))
    }

    /// Returns true if every `(a, b)` entry has an equal `(b, a)` entry.
    pub fn is_symmetric(&self) -> bool {
        self.iter().all(|(a, b, count)| self.get(b, a) == Some(count))
    }

    /// Keeps only the pairs whose participants both satisfy `keep`.
    pub fn restricted_to(&self, mut keep: impl FnMut(&ParticipantId) -> bool) -> PairingHistory {
        let counts = self
            .counts
            .iter()
            .filter(|((a, b), _)| keep(a) && keep(b))
            .map(|(pair, &count)| (pair.clone(), count))
            .collect();
        PairingHistory { counts }
    }

    /// Returns the ledger after one more round played as `assignment`.
    ///
    /// Every ordered pair of distinct participants sharing a group is
    /// incremented by one, creating the entry if it was absent. All other
    /// entries, and the absence of entries, are carried over unchanged.
    /// Applying the same assignment twice counts two rounds.
    ///
    /// A co-assigned pair with no data becomes a count of 1; sharing a group
    /// always turns "no data" into a known count. Pairs that never met stay
    /// absent.
    pub fn record_round(&self, assignment: &GroupAssignment) -> PairingHistory {
        let mut next = self.clone();
        for (first, second, _) in assignment.co_assigned_pairs() {
            *next
                .counts
                .entry((first.clone(), second.clone()))
                .or_insert(0) += 1;
        }
        next
    }

    /// Builds a ledger from a square table over `ids`.
    ///
    /// `rows[r][c]` is the count of `(ids[r], ids[c])`; `None` means no data.
    /// Diagonal cells are ignored, and cells beyond `ids` are dropped.
    pub fn from_matrix(ids: &[ParticipantId], rows: &[Vec<Option<u32>>]) -> PairingHistory {
        let mut history = PairingHistory::new();
        for (first, row) in ids.iter().zip(rows) {
            for (second, cell) in ids.iter().zip(row) {
                if let Some(count) = *cell {
                    history.insert(first.clone(), second.clone(), count);
                }
            }
        }
        history
    }

    /// Renders the ledger as a square table over `ids`.
    pub fn to_matrix(&self, ids: &[ParticipantId]) -> Vec<Vec<Option<u32>>> {
        ids.iter()
            .map(|first| ids.iter().map(|second| self.get(first, second)).collect())
            .collect()
    }
}

impl<P: Into<ParticipantId>> FromIterator<(P, P, u32)> for PairingHistory {
    fn from_iter<I: IntoIterator<Item = (P, P, u32)>>(iter: I) -> Self {
        let mut history = PairingHistory::new();
        for (a, b, count) in iter {
            history.insert(a, b, count);
        }
        history
    }
}
