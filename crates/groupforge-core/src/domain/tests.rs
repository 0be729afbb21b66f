//! Tests for the domain model.

use std::collections::HashMap;

use super::*;
use crate::error::ModelConstructionError;

fn id(s: &str) -> ParticipantId {
    ParticipantId::new(s)
}

fn assignment(groups: &[(u32, &[&str])]) -> GroupAssignment {
    let mut assignment = GroupAssignment::new();
    for &(group, members) in groups {
        for m in members {
            assignment.assign(id(m), GroupId::new(group));
        }
    }
    assignment
}

#[test]
fn test_layout_flattens_size_counts_in_order() {
    let layout = GroupLayout::from_size_counts([(2, 2), (3, 1)]);
    let sizes: Vec<usize> = layout.groups().iter().map(|g| g.size).collect();
    let ids: Vec<u32> = layout.ids().map(GroupId::get).collect();

    assert_eq!(sizes, vec![2, 2, 3]);
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(layout.capacity(), 7);
    assert_eq!(layout.index_of(GroupId::new(3)), Some(2));
    assert_eq!(layout.size_of(GroupId::new(4)), None);
}

#[test]
fn test_layout_validation() {
    assert_eq!(
        GroupLayout::default().validate(0),
        Err(ModelConstructionError::EmptyGroups)
    );
    assert_eq!(
        GroupLayout::from_sizes([2, 0]).validate(2),
        Err(ModelConstructionError::NonPositiveGroupSize {
            group: GroupId::new(2),
            size: 0,
        })
    );
    assert_eq!(
        GroupLayout::from_sizes([2, 2]).validate(5),
        Err(ModelConstructionError::SizeMismatch {
            capacity: 4,
            participants: 5,
        })
    );
    assert!(GroupLayout::from_sizes([2, 3]).validate(5).is_ok());
}

#[test]
fn test_history_ignores_self_pairs() {
    let mut history = PairingHistory::new();
    assert_eq!(history.insert("a", "a", 4), None);
    assert!(history.is_empty());
}

#[test]
fn test_history_restriction_keeps_active_pairs_only() {
    let mut history = PairingHistory::new();
    history.insert_symmetric("a", "b", 1);
    history.insert_symmetric("a", "c", 2);
    history.insert_symmetric("b", "c", 3);

    let restricted = history.restricted_to(|p| p.as_str() != "c");

    assert_eq!(restricted.len(), 2);
    assert_eq!(restricted.get(&id("a"), &id("b")), Some(1));
    assert!(!restricted.contains(&id("a"), &id("c")));
}

#[test]
fn test_record_round_increments_co_assigned_pairs() {
    let mut history = PairingHistory::new();
    history.insert_symmetric("a", "b", 2);
    history.insert_symmetric("a", "c", 1);
    history.insert("c", "d", 0);

    let round = assignment(&[(1, &["a", "b"]), (2, &["c", "d"])]);
    let next = history.record_round(&round);

    assert_eq!(next.get(&id("a"), &id("b")), Some(3));
    assert_eq!(next.get(&id("b"), &id("a")), Some(3));
    assert_eq!(next.get(&id("c"), &id("d")), Some(1));
    // (d, c) was absent but the pair shared a group: created.
    assert_eq!(next.get(&id("d"), &id("c")), Some(1));
    // Never co-assigned: unchanged, absent stays absent.
    assert_eq!(next.get(&id("a"), &id("c")), Some(1));
    assert_eq!(next.get(&id("b"), &id("d")), None);
    // Input ledger untouched.
    assert_eq!(history.get(&id("a"), &id("b")), Some(2));
}

#[test]
fn test_record_round_is_monotonic_and_counts_rounds() {
    let mut history = PairingHistory::new();
    history.insert_symmetric("a", "b", 1);
    history.insert_symmetric("c", "e", 5);
    let round = assignment(&[(1, &["a", "b", "c"]), (2, &["d", "e", "f"])]);

    let once = history.record_round(&round);
    let twice = once.record_round(&round);

    for (a, b, old) in history.iter() {
        assert!(once.count(a, b) >= old);
    }
    for (a, b, group) in round.co_assigned_pairs() {
        assert_eq!(round.group_of(a), Some(group));
        assert_eq!(once.count(a, b), history.count(a, b) + 1);
        assert_eq!(twice.count(a, b), history.count(a, b) + 2);
    }
    assert_eq!(once.count(&id("c"), &id("e")), 5);
    assert!(once.is_symmetric());
}

#[test]
fn test_record_round_turns_no_data_into_counts() {
    let ids = vec![id("a"), id("b"), id("c"), id("d")];
    let empty: Vec<Vec<Option<u32>>> = vec![vec![None; 4]; 4];
    let history = PairingHistory::from_matrix(&ids, &empty);

    let next = history.record_round(&assignment(&[(1, &["a", "b"]), (2, &["c", "d"])]));
    let table = next.to_matrix(&ids);

    assert_eq!(table[0][1], Some(1));
    assert_eq!(table[1][0], Some(1));
    assert_eq!(table[2][3], Some(1));
    assert_eq!(table[0][2], None);
    assert_eq!(table[1][3], None);
    assert_eq!(table[0][0], None);
}

#[test]
fn test_history_matrix_conversion() {
    let ids = vec![id("a"), id("b"), id("c")];
    let rows = vec![
        vec![Some(9), Some(1), None],
        vec![Some(1), None, Some(0)],
        vec![None, Some(0), None],
    ];

    let history = PairingHistory::from_matrix(&ids, &rows);

    assert_eq!(history.len(), 4);
    assert_eq!(history.get(&id("b"), &id("c")), Some(0));
    assert!(!history.contains(&id("a"), &id("a")));

    let back = history.to_matrix(&ids);
    assert_eq!(back[0], vec![None, Some(1), None]);
    assert_eq!(back[1], rows[1]);
}

#[test]
fn test_history_serde_round_trip() {
    let history: PairingHistory = [("a", "b", 2), ("b", "a", 2)].into_iter().collect();
    let json = serde_json::to_string(&history).unwrap();
    assert!(json.contains("\"count\":2"));

    let back: PairingHistory = serde_json::from_str(&json).unwrap();
    assert_eq!(back, history);
}

#[test]
fn test_assignment_rows_and_pairs() {
    let mut round = assignment(&[(2, &["d", "c"]), (1, &["b", "a"])]);
    round.sort_members();

    let rows: Vec<(String, u32)> = round
        .rows()
        .into_iter()
        .map(|r| (r.participant.to_string(), r.group.get()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 1),
            ("c".to_string(), 2),
            ("d".to_string(), 2),
        ]
    );
    assert_eq!(round.co_assigned_pairs().count(), 4);
    assert_eq!(round.participant_count(), 4);
    assert_eq!(round.group_of(&id("z")), None);
}

#[test]
fn test_roster_snapshot_filters_attendance() {
    let mut history = PairingHistory::new();
    history.insert_symmetric("ana", "ben", 1);
    history.insert_symmetric("ana", "cleo", 2);
    let roster = Roster::new(
        vec![
            RosterEntry::new("ana", Some(1)).attending("S1"),
            RosterEntry::new("ben", Some(0)).attending("S1").attending("S2"),
            RosterEntry::new("cleo", None).attending("S2"),
        ],
        history,
    );

    let snapshot = roster.snapshot("S1").unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.index_of(&id("ben")), Some(1));
    assert_eq!(snapshot.history().len(), 2);
    assert_eq!(snapshot.indexed_pairs(), vec![(0, 1, 1), (1, 0, 1)]);

    assert_eq!(
        roster.snapshot("S2"),
        Err(ModelConstructionError::MissingLevel(id("cleo")))
    );
    assert!(roster.snapshot("S9").unwrap().is_empty());
}

#[test]
fn test_snapshot_rejects_duplicates_and_missing_levels() {
    let dup = Snapshot::new(
        vec![Participant::new("a", 0), Participant::new("a", 1)],
        &PairingHistory::new(),
    );
    assert_eq!(
        dup,
        Err(ModelConstructionError::DuplicateParticipant(id("a")))
    );

    let levels: HashMap<ParticipantId, Level> = [(id("a"), 1)].into_iter().collect();
    let missing = Snapshot::from_levels([id("a"), id("b")], &levels, &PairingHistory::new());
    assert_eq!(
        missing,
        Err(ModelConstructionError::MissingLevel(id("b")))
    );
}

#[test]
fn test_weights_validation_and_combination() {
    let weights = ObjectiveWeights::default();
    assert_eq!(weights, ObjectiveWeights::new(100.0, 1.0));
    assert!(weights.validate().is_ok());
    assert_eq!(weights.combine(0, 2), -2.0);
    assert_eq!(weights.combine(9, 1), 899.0);

    assert!(matches!(
        ObjectiveWeights::new(-1.0, 1.0).validate(),
        Err(ModelConstructionError::InvalidWeight { name: "repeat", .. })
    ));
    assert!(ObjectiveWeights::new(1.0, f64::NAN).validate().is_err());
}
