//! Rosters and per-session snapshots.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::history::PairingHistory;
use super::participant::{Level, Participant, ParticipantId};
use crate::error::ModelConstructionError;

/// One person known to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: ParticipantId,
    /// Level, if one was recorded.
    #[serde(default)]
    pub level: Option<Level>,
    /// Sessions this person attends.
    #[serde(default)]
    pub sessions: BTreeSet<String>,
}

impl RosterEntry {
    pub fn new(id: impl Into<ParticipantId>, level: Option<Level>) -> Self {
        RosterEntry {
            id: id.into(),
            level,
            sessions: BTreeSet::new(),
        }
    }

    pub fn attending(mut self, session: impl Into<String>) -> Self {
        self.sessions.insert(session.into());
        self
    }

    pub fn attends(&self, session: &str) -> bool {
        self.sessions.contains(session)
    }
}

/// Everyone known across sessions, plus the full pairing ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
    #[serde(default)]
    pub history: PairingHistory,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>, history: PairingHistory) -> Self {
        Roster { entries, history }
    }

    /// Identifiers in roster order.
    pub fn ids(&self) -> Vec<ParticipantId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// Selects the attendees of `session` in roster order.
    ///
    /// # Errors
    ///
    /// `MissingLevel` if an attendee has no level, `DuplicateParticipant`
    /// if an attendee is listed twice.
    pub fn snapshot(&self, session: &str) -> Result<Snapshot, ModelConstructionError> {
        let participants = self
            .entries
            .iter()
            .filter(|e| e.attends(session))
            .map(|e| match e.level {
                Some(level) => Ok(Participant::new(e.id.clone(), level)),
                None => Err(ModelConstructionError::MissingLevel(e.id.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Snapshot::new(participants, &self.history)
    }

    /// Snapshot over every roster entry, ignoring attendance.
    pub fn snapshot_all(&self) -> Result<Snapshot, ModelConstructionError> {
        let participants = self
            .entries
            .iter()
            .map(|e| {
                e.level
                    .map(|level| Participant::new(e.id.clone(), level))
                    .ok_or_else(|| ModelConstructionError::MissingLevel(e.id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Snapshot::new(participants, &self.history)
    }
}

/// The immutable input of one run.
///
/// Participants keep the order they were given in; that order defines the
/// dense participant index used by the model. The ledger is restricted to
/// pairs of active participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    participants: Vec<Participant>,
    index: HashMap<ParticipantId, usize>,
    history: PairingHistory,
}

impl Snapshot {
    /// Creates a snapshot, dropping ledger entries that involve anyone
    /// outside `participants`.
    pub fn new(
        participants: Vec<Participant>,
        history: &PairingHistory,
    ) -> Result<Self, ModelConstructionError> {
        let mut index = HashMap::with_capacity(participants.len());
        for (idx, p) in participants.iter().enumerate() {
            if index.insert(p.id.clone(), idx).is_some() {
                return Err(ModelConstructionError::DuplicateParticipant(p.id.clone()));
            }
        }
        let history = history.restricted_to(|id| index.contains_key(id));
        Ok(Snapshot {
            participants,
            index,
            history,
        })
    }

    /// Builds a snapshot from an active list and a level table.
    pub fn from_levels(
        active: impl IntoIterator<Item = ParticipantId>,
        levels: &HashMap<ParticipantId, Level>,
        history: &PairingHistory,
    ) -> Result<Self, ModelConstructionError> {
        let participants = active
            .into_iter()
            .map(|id| match levels.get(&id) {
                Some(&level) => Ok(Participant::new(id, level)),
                None => Err(ModelConstructionError::MissingLevel(id)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(participants, history)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn index_of(&self, id: &ParticipantId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.index.contains_key(id)
    }

    pub fn level_of(&self, id: &ParticipantId) -> Option<Level> {
        self.index_of(id).map(|idx| self.participants[idx].level)
    }

    /// Largest level among the participants, 0 when empty.
    pub fn max_level(&self) -> Level {
        self.participants.iter().map(|p| p.level).max().unwrap_or(0)
    }

    /// The ledger restricted to active participants.
    pub fn history(&self) -> &PairingHistory {
        &self.history
    }

    /// Ledger entries as `(first index, second index, count)` triples.
    pub fn indexed_pairs(&self) -> Vec<(usize, usize, u32)> {
        self.history
            .iter()
            .filter_map(|(a, b, count)| Some((self.index_of(a)?, self.index_of(b)?, count)))
            .collect()
    }
}
