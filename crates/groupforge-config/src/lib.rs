//! Configuration system for GroupForge.
//!
//! Load run configuration from TOML or YAML files to control group sizes,
//! objective weights, pins and the engine deadline without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use groupforge_config::RunConfig;
//! use std::time::Duration;
//!
//! let config = RunConfig::from_toml_str(r#"
//!     session = "S5"
//!     scarce_level = 1
//!
//!     [weights]
//!     repeat = 100
//!     level = 1
//!
//!     [[groups]]
//!     size = 2
//!     count = 10
//!
//!     [engine]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.session.as_deref(), Some("S5"));
//! assert_eq!(config.group_layout().len(), 10);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use groupforge_config::RunConfig;
//!
//! let config = RunConfig::load("groupforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use groupforge_core::{GroupId, GroupLayout, Level, ObjectiveWeights, ParticipantId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Immutable configuration of one run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RunConfig {
    /// Session identifier used to select attendees.
    #[serde(default)]
    pub session: Option<String>,

    /// Objective weights.
    #[serde(default)]
    pub weights: ObjectiveWeights,

    /// Group sizes as `(size, count)` entries, numbered in declaration order.
    #[serde(default)]
    pub groups: Vec<GroupSizeConfig>,

    /// Level whose holders are spread across groups.
    #[serde(default = "default_scarce_level")]
    pub scarce_level: Level,

    /// Fixed pre-assignments.
    #[serde(default)]
    pub pinned: BTreeMap<ParticipantId, GroupId>,

    /// Solving engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_scarce_level() -> Level {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            session: None,
            weights: ObjectiveWeights::default(),
            groups: Vec::new(),
            scarce_level: default_scarce_level(),
            pinned: BTreeMap::new(),
            engine: EngineConfig::default(),
        }
    }
}

impl RunConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the session identifier.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Sets both objective weights.
    pub fn with_weights(mut self, repeat: f64, level: f64) -> Self {
        self.weights = ObjectiveWeights::new(repeat, level);
        self
    }

    /// Adds `count` groups of `size`.
    pub fn with_groups(mut self, size: usize, count: usize) -> Self {
        self.groups.push(GroupSizeConfig { size, count });
        self
    }

    /// Pins a participant to a group.
    pub fn with_pin(mut self, participant: impl Into<ParticipantId>, group: u32) -> Self {
        self.pinned.insert(participant.into(), GroupId::new(group));
        self
    }

    /// Sets the engine deadline.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.engine.seconds_spent_limit = Some(seconds);
        self
    }

    /// Flattens the group entries into numbered groups.
    pub fn group_layout(&self) -> GroupLayout {
        GroupLayout::from_size_counts(self.groups.iter().map(|g| (g.size, g.count)))
    }

    /// Returns the engine deadline, if configured.
    ///
    /// Convenience method that delegates to `engine.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.engine.time_limit()
    }

    /// Checks the settings that do not depend on a snapshot.
    ///
    /// Size/participant agreement is checked later, when the model is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.groups.is_empty() {
            return Err(ConfigError::Invalid("no groups configured".to_string()));
        }
        if let Some(entry) = self.groups.iter().find(|g| g.size == 0) {
            return Err(ConfigError::Invalid(format!(
                "group size must be positive (got {} x {})",
                entry.count, entry.size
            )));
        }
        let group_count = self.group_layout().len() as u32;
        if let Some((participant, group)) = self
            .pinned
            .iter()
            .find(|(_, g)| g.get() == 0 || g.get() > group_count)
        {
            return Err(ConfigError::Invalid(format!(
                "participant {} pinned to group {} but only groups 1..={} exist",
                participant, group, group_count
            )));
        }
        Ok(())
    }
}

/// A number of groups sharing one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupSizeConfig {
    /// Required occupancy of each group.
    pub size: usize,

    /// How many groups have this size.
    #[serde(default = "default_group_count")]
    pub count: usize,
}

fn default_group_count() -> usize {
    1
}

/// Solving engine configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,
}

impl EngineConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
