//! Classroom Example
//!
//! Twelve students meet for several sessions. Each session they are split
//! into groups of three; students who already worked together should meet
//! again as rarely as possible, and the four advanced (level 1) students
//! should end up in different groups.
//!
//! The pairing ledger produced by one session feeds the next.

use std::error::Error;

use groupforge::prelude::*;

const SESSIONS: [&str; 3] = ["S1", "S2", "S3"];

/// Students as `(name, level)`.
const STUDENTS: [(&str, u32); 12] = [
    ("Ada", 1),
    ("Ben", 0),
    ("Cleo", 0),
    ("Dev", 1),
    ("Eli", 0),
    ("Fay", 0),
    ("Gus", 1),
    ("Hana", 0),
    ("Ivo", 0),
    ("Jun", 1),
    ("Kai", 0),
    ("Lea", 0),
];

fn roster(history: PairingHistory) -> Roster {
    let entries = STUDENTS
        .iter()
        .map(|&(name, level)| {
            SESSIONS
                .iter()
                .fold(RosterEntry::new(name, Some(level)), |entry, s| {
                    entry.attending(*s)
                })
        })
        .collect();
    Roster::new(entries, history)
}

/// Pairs who shared a table before the first session.
fn previous_term() -> PairingHistory {
    let mut history = PairingHistory::new();
    for group in [["Ada", "Dev", "Ben"], ["Gus", "Jun", "Cleo"], ["Eli", "Fay", "Hana"]] {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                history.insert_symmetric(*a, *b, 1);
            }
        }
    }
    history
}

fn main() -> Result<(), Box<dyn Error>> {
    groupforge::console::init();

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/groupforge.toml");
    let base = RunConfig::load(path).unwrap_or_else(|_| RunConfig::new().with_groups(3, 4));
    base.validate()?;

    let mut history = previous_term();
    for session in SESSIONS {
        let config = base.clone().with_session(session);
        let (report, next) = plan_session(&roster(history.clone()), &config)?;

        println!("\n{}\n", report);

        match next {
            Some(next) => history = next,
            None => {
                println!("Stopping: session {} could not be planned.", session);
                break;
            }
        }
    }

    let repeated = history.iter().filter(|(_, _, count)| *count > 1).count() / 2;
    println!("\nPairs that met more than once: {}", repeated);
    Ok(())
}
