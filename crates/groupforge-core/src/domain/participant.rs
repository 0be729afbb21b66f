//! Participants and their identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scarce-attribute level of a participant.
pub type Level = u32;

/// Stable participant identifier.
///
/// Identifiers are compared and ordered as plain strings, which keeps every
/// iteration over participants deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        ParticipantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        ParticipantId::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        ParticipantId(id)
    }
}

/// A participant of one session: identifier plus level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub level: Level,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, level: Level) -> Self {
        Participant {
            id: id.into(),
            level,
        }
    }
}
