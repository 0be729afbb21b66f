//! Shared test fixtures for GroupForge crates.
//!
//! This crate provides data and engine doubles for testing.
//! It does NOT depend on `groupforge-solver`, so the solver can use it as a
//! dev-dependency.
//!
//! - [`scenarios`] - small hand-written snapshots with known optima
//! - [`classroom`] - seeded random rosters with sessions and history
//! - [`engine`] - an engine double and hand-made solution values
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! groupforge-test = { workspace = true }
//! ```

pub mod classroom;
pub mod engine;
pub mod scenarios;

pub use classroom::ClassroomGenerator;
pub use engine::{consistent_values, StatusEngine};
pub use scenarios::{
    five_participants, four_participants, four_participants_config, four_participants_with_history,
    six_with_repeats,
};
