//! Weights of the two objective terms.

use serde::{Deserialize, Serialize};

use crate::error::ModelConstructionError;

/// Weights combining repeat cost and level-one spread.
///
/// The objective minimized is
/// `repeat * squared_repeat_cost - level * level_one_group_count`.
/// No normalization happens; callers scale the terms themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ObjectiveWeights {
    #[serde(default = "default_repeat_weight")]
    pub repeat: f64,
    #[serde(default = "default_level_weight")]
    pub level: f64,
}

fn default_repeat_weight() -> f64 {
    100.0
}

fn default_level_weight() -> f64 {
    1.0
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        ObjectiveWeights {
            repeat: default_repeat_weight(),
            level: default_level_weight(),
        }
    }
}

impl ObjectiveWeights {
    pub fn new(repeat: f64, level: f64) -> Self {
        ObjectiveWeights { repeat, level }
    }

    /// Rejects negative, NaN and infinite weights.
    pub fn validate(&self) -> Result<(), ModelConstructionError> {
        for (name, value) in [("repeat", self.repeat), ("level", self.level)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelConstructionError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }

    /// Combined objective for given accumulator values.
    pub fn combine(&self, squared_repeat_cost: i64, level_one_group_count: i64) -> f64 {
        self.repeat * squared_repeat_cost as f64 - self.level * level_one_group_count as f64
    }
}
