//! Groups and the flattened group layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelConstructionError;

/// Group identifier, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(u32);

impl GroupId {
    pub const fn new(id: u32) -> Self {
        GroupId(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A target group with its required occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub size: usize,
}

/// The numbered list of groups a session is split into.
///
/// Groups are numbered 1..=G in the order their sizes are supplied.
///
/// # Examples
///
/// ```
/// use groupforge_core::{GroupId, GroupLayout};
///
/// // Two groups of three and one group of two
/// let layout = GroupLayout::from_size_counts([(3, 2), (2, 1)]);
///
/// assert_eq!(layout.len(), 3);
/// assert_eq!(layout.capacity(), 8);
/// assert_eq!(layout.size_of(GroupId::new(3)), Some(2));
/// assert_eq!(layout.max_size(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupLayout {
    groups: Vec<Group>,
}

impl GroupLayout {
    /// Creates a layout with one group per size, numbered in order.
    pub fn from_sizes(sizes: impl IntoIterator<Item = usize>) -> Self {
        let groups = sizes
            .into_iter()
            .enumerate()
            .map(|(idx, size)| Group {
                id: GroupId::new(idx as u32 + 1),
                size,
            })
            .collect();
        GroupLayout { groups }
    }

    /// Flattens `(size, count)` pairs into numbered groups.
    pub fn from_size_counts(size_counts: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self::from_sizes(
            size_counts
                .into_iter()
                .flat_map(|(size, count)| std::iter::repeat(size).take(count)),
        )
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.groups.iter().map(|g| g.id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of all group sizes.
    pub fn capacity(&self) -> usize {
        self.groups.iter().map(|g| g.size).sum()
    }

    /// Largest group size, 0 for an empty layout.
    pub fn max_size(&self) -> usize {
        self.groups.iter().map(|g| g.size).max().unwrap_or(0)
    }

    /// Position of a group in the layout.
    pub fn index_of(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    pub fn size_of(&self, id: GroupId) -> Option<usize> {
        self.index_of(id).map(|idx| self.groups[idx].size)
    }

    /// Checks that the layout can hold exactly `participant_count` participants.
    pub fn validate(&self, participant_count: usize) -> Result<(), ModelConstructionError> {
        if self.groups.is_empty() {
            return Err(ModelConstructionError::EmptyGroups);
        }
        if let Some(group) = self.groups.iter().find(|g| g.size == 0) {
            return Err(ModelConstructionError::NonPositiveGroupSize {
                group: group.id,
                size: group.size,
            });
        }
        let capacity = self.capacity();
        if capacity != participant_count {
            return Err(ModelConstructionError::SizeMismatch {
                capacity,
                participants: participant_count,
            });
        }
        Ok(())
    }
}
