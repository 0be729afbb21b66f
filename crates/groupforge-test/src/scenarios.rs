//! Small scenarios with known answers.
//!
//! # Example
//!
//! ```
//! use groupforge_test::scenarios::{four_participants, four_participants_config};
//!
//! let snapshot = four_participants();
//! let config = four_participants_config();
//! assert_eq!(snapshot.len(), config.group_layout().capacity());
//! ```

use groupforge_config::RunConfig;
use groupforge_core::{PairingHistory, Participant, Snapshot};

/// `{A:1, B:0, C:1, D:0}` with an empty ledger.
///
/// With two groups of two and weights 100/1 the optimum splits A and C,
/// giving two level-1 groups and an objective of -2.
pub fn four_participants() -> Snapshot {
    four_participants_with_history(&PairingHistory::new())
}

/// The four-participant roster over a caller-provided ledger.
pub fn four_participants_with_history(history: &PairingHistory) -> Snapshot {
    snapshot(
        vec![
            Participant::new("A", 1),
            Participant::new("B", 0),
            Participant::new("C", 1),
            Participant::new("D", 0),
        ],
        history,
    )
}

/// Two groups of two, default weights.
pub fn four_participants_config() -> RunConfig {
    RunConfig::new().with_session("S1").with_groups(2, 2)
}

/// Five participants, which no 2+2 layout can hold.
pub fn five_participants() -> Snapshot {
    snapshot(
        ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|id| Participant::new(id, 0))
            .collect(),
        &PairingHistory::new(),
    )
}

/// Six level-0 participants where `P1`/`P2` and `P3`/`P4` already met twice.
pub fn six_with_repeats() -> (Snapshot, RunConfig) {
    let mut history = PairingHistory::new();
    history.insert_symmetric("P1", "P2", 2);
    history.insert_symmetric("P3", "P4", 2);
    history.insert_symmetric("P5", "P6", 1);
    let participants = (1..=6)
        .map(|i| Participant::new(format!("P{}", i), 0))
        .collect();
    let config = RunConfig::new().with_session("S2").with_groups(3, 2);
    (snapshot(participants, &history), config)
}

fn snapshot(participants: Vec<Participant>, history: &PairingHistory) -> Snapshot {
    match Snapshot::new(participants, history) {
        Ok(snapshot) => snapshot,
        Err(e) => panic!("fixture snapshot is invalid: {}", e),
    }
}
