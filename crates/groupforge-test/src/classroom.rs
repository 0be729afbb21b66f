//! Seeded classroom rosters.
//!
//! # Example
//!
//! ```
//! use groupforge_test::classroom::ClassroomGenerator;
//!
//! let roster = ClassroomGenerator::new(42).with_participants(12).generate();
//! let snapshot = roster.snapshot("S1").unwrap();
//!
//! assert!(snapshot.len() <= 12);
//! assert!(snapshot.history().is_symmetric());
//! ```

use groupforge_config::RunConfig;
use groupforge_core::{PairingHistory, ParticipantId, Roster, RosterEntry};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates rosters with levels, session attendance and a symmetric ledger.
///
/// The same seed always yields the same roster.
#[derive(Debug, Clone)]
pub struct ClassroomGenerator {
    seed: u64,
    participants: usize,
    sessions: Vec<String>,
    attendance: f64,
    level_one_share: f64,
    past_rounds: usize,
    group_size: usize,
}

impl ClassroomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            participants: 20,
            sessions: vec!["S1".to_string(), "S2".to_string()],
            attendance: 0.9,
            level_one_share: 0.3,
            past_rounds: 3,
            group_size: 4,
        }
    }

    pub fn with_participants(mut self, participants: usize) -> Self {
        self.participants = participants;
        self
    }

    pub fn with_sessions(mut self, sessions: &[&str]) -> Self {
        self.sessions = sessions.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Probability that a participant attends a given session.
    pub fn with_attendance(mut self, attendance: f64) -> Self {
        self.attendance = attendance;
        self
    }

    /// Probability that a participant has level 1.
    pub fn with_level_one_share(mut self, share: f64) -> Self {
        self.level_one_share = share;
        self
    }

    /// Number of random past rounds folded into the ledger.
    pub fn with_past_rounds(mut self, rounds: usize) -> Self {
        self.past_rounds = rounds;
        self
    }

    pub fn with_group_size(mut self, size: usize) -> Self {
        self.group_size = size.max(1);
        self
    }

    pub fn generate(&self) -> Roster {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let ids: Vec<ParticipantId> = (1..=self.participants)
            .map(|i| ParticipantId::new(format!("P{:02}", i)))
            .collect();

        let entries = ids
            .iter()
            .map(|id| {
                let level = u32::from(rng.random_bool(self.level_one_share));
                let mut entry = RosterEntry::new(id.clone(), Some(level));
                for session in &self.sessions {
                    if rng.random_bool(self.attendance) {
                        entry = entry.attending(session.as_str());
                    }
                }
                entry
            })
            .collect();

        let mut history = PairingHistory::new();
        for _ in 0..self.past_rounds {
            let mut order: Vec<usize> = (0..ids.len()).collect();
            order.shuffle(&mut rng);
            for chunk in order.chunks(self.group_size) {
                for &a in chunk {
                    for &b in chunk {
                        if a != b {
                            let count = history.count(&ids[a], &ids[b]);
                            history.insert(ids[a].clone(), ids[b].clone(), count + 1);
                        }
                    }
                }
            }
        }

        Roster::new(entries, history)
    }

    /// A configuration whose groups hold exactly `participants` people.
    ///
    /// Uses groups of the generator's size plus one smaller group for the
    /// remainder.
    pub fn config_for(&self, session: &str, participants: usize) -> RunConfig {
        let full = participants / self.group_size;
        let rest = participants % self.group_size;
        let mut config = RunConfig::new().with_session(session);
        if full > 0 {
            config = config.with_groups(self.group_size, full);
        }
        if rest > 0 {
            config = config.with_groups(rest, 1);
        }
        config
    }
}
