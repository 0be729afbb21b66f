//! End-to-end runs against the MILP engine.

use std::time::{Duration, Instant};

use groupforge_config::RunConfig;
use groupforge_core::{
    GroupAssignment, GroupForgeError, GroupId, GroupLayout, ModelConstructionError,
    PairingHistory, ParticipantId, Snapshot, SolveStatus,
};
use groupforge_model::build_model;
use groupforge_solver::{
    model_options, solve_batch, solve_session, MilpEngine, SolvingEngine, DECISION_THRESHOLD,
};
use groupforge_test::{
    five_participants, four_participants, four_participants_config, six_with_repeats,
    ClassroomGenerator,
};

fn id(s: &str) -> ParticipantId {
    ParticipantId::new(s)
}

fn pinned_config(base: RunConfig, assignment: &GroupAssignment) -> RunConfig {
    assignment
        .groups()
        .flat_map(|(group, members)| members.iter().map(move |m| (m.clone(), group)))
        .fold(base, |config, (member, group)| {
            config.with_pin(member, group.get())
        })
}

#[test]
fn test_four_participants_spread_level_one() {
    let report = solve_session(
        &four_participants(),
        &four_participants_config(),
        &MilpEngine::new(),
    )
    .unwrap();

    let round = report.round().unwrap();
    assert_eq!(report.status, SolveStatus::Optimal);
    assert_eq!(round.level_one_group_count, 2);
    assert_eq!(round.squared_repeat_cost, 0);
    assert_eq!(round.objective_value, -2.0);
    assert_ne!(
        round.assignment.group_of(&id("A")),
        round.assignment.group_of(&id("C"))
    );
    for summary in &round.groups {
        assert_eq!(summary.size, 2);
        assert_eq!(summary.level, 1);
        assert!(summary.has_level_one);
    }
}

#[test]
fn test_repeated_pairs_are_split() {
    let (snapshot, config) = six_with_repeats();
    let report = solve_session(&snapshot, &config, &MilpEngine::new()).unwrap();
    let round = report.round().unwrap();

    assert_eq!(round.squared_repeat_cost, 0);
    for (a, b) in [("P1", "P2"), ("P3", "P4"), ("P5", "P6")] {
        assert_ne!(
            round.assignment.group_of(&id(a)),
            round.assignment.group_of(&id(b))
        );
    }
    for (_, members) in round.assignment.groups() {
        assert_eq!(members.len(), 3);
    }
}

#[test]
fn test_co_assignment_matches_solved_assignment() {
    let (snapshot, config) = six_with_repeats();
    let model = build_model(&snapshot, &config.group_layout(), &model_options(&config)).unwrap();
    let solution = MilpEngine::new().solve(model.model());
    let values = solution.values.unwrap();

    let grouping = model.grouping();
    let x = grouping.assignment_vars();
    let z = grouping.co_assignment_vars();
    for (k, pair) in z.pairs().iter().enumerate() {
        for g in 0..grouping.layout().len() {
            let both = values[x.get(pair.first, g).index()] > DECISION_THRESHOLD
                && values[x.get(pair.second, g).index()] > DECISION_THRESHOLD;
            assert_eq!(values[z.get(k, g).index()] > DECISION_THRESHOLD, both);
        }
    }
}

#[test]
fn test_size_mismatch_fails_before_solving() {
    let result = solve_session(
        &five_participants(),
        &RunConfig::new().with_groups(2, 2),
        &MilpEngine::new(),
    );
    assert!(matches!(
        result,
        Err(GroupForgeError::ModelConstruction(
            ModelConstructionError::SizeMismatch { .. }
        ))
    ));
}

#[test]
fn test_contradictory_pins_report_no_solution() {
    let config = four_participants_config()
        .with_pin("A", 1)
        .with_pin("B", 1)
        .with_pin("C", 1);
    let history = PairingHistory::new();

    let report = solve_session(&four_participants(), &config, &MilpEngine::new()).unwrap();

    assert!(!report.is_solved());
    assert_eq!(report.status, SolveStatus::Infeasible);
    assert!(report.next_history(&history).is_none());
    assert!(report.to_string().contains("No solution found."));
}

#[test]
fn test_forced_resolve_reproduces_increment() {
    let (snapshot, config) = six_with_repeats();
    let history = snapshot.history().clone();
    let engine = MilpEngine::new();

    let first = solve_session(&snapshot, &config, &engine).unwrap();
    let first_round = first.round().unwrap();
    let after_first = first.next_history(&history).unwrap();

    let replay = snapshot_with_history(&snapshot, &after_first);
    let forced = pinned_config(config, &first_round.assignment);
    let second = solve_session(&replay, &forced, &engine).unwrap();
    let second_round = second.round().unwrap();
    assert_eq!(second_round.assignment, first_round.assignment);

    let after_second = second.next_history(&after_first).unwrap();
    for (a, b, _) in first_round.assignment.co_assigned_pairs() {
        let step_one = after_first.count(a, b) - history.count(a, b);
        let step_two = after_second.count(a, b) - after_first.count(a, b);
        assert_eq!(step_one, 1);
        assert_eq!(step_two, step_one);
    }
    for (a, b, count) in history.iter() {
        if first_round.assignment.group_of(a) != first_round.assignment.group_of(b) {
            assert_eq!(after_second.count(a, b), count);
        }
    }
}

fn snapshot_with_history(snapshot: &Snapshot, history: &PairingHistory) -> Snapshot {
    Snapshot::new(snapshot.participants().to_vec(), history).unwrap()
}

#[test]
fn test_generous_deadline_still_solves() {
    let engine = MilpEngine::new().with_time_limit(Duration::from_secs(60));
    let report = solve_session(&four_participants(), &four_participants_config(), &engine).unwrap();
    assert!(report.is_solved());
}

#[test]
fn test_short_deadline_returns_promptly() {
    let generator = ClassroomGenerator::new(11)
        .with_participants(24)
        .with_attendance(1.0)
        .with_group_size(4)
        .with_past_rounds(6);
    let snapshot = generator.generate().snapshot("S1").unwrap();
    let config = generator.config_for("S1", snapshot.len());
    let engine = MilpEngine::new().with_time_limit(Duration::from_secs(1));

    let start = Instant::now();
    let report = solve_session(&snapshot, &config, &engine).unwrap();

    assert!(start.elapsed() < Duration::from_secs(20));
    match report.status {
        SolveStatus::Optimal | SolveStatus::Feasible => {
            let round = report.round().unwrap();
            assert_eq!(round.assignment.participant_count(), 24);
            for (_, members) in round.assignment.groups() {
                assert_eq!(members.len(), 4);
            }
        }
        SolveStatus::Unknown => assert!(!report.is_solved()),
        other => panic!("unexpected status {}", other),
    }
}

#[test]
fn test_batch_keeps_job_order() {
    let (six, six_config) = six_with_repeats();
    let jobs = vec![
        (four_participants(), four_participants_config()),
        (five_participants(), four_participants_config()),
        (six, six_config),
    ];

    let results = solve_batch(&jobs, &MilpEngine::new());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().session.as_deref(), Some("S1"));
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().session.as_deref(), Some("S2"));
}

#[test]
fn test_generated_classroom_session() {
    let generator = ClassroomGenerator::new(7)
        .with_participants(6)
        .with_attendance(1.0)
        .with_group_size(3)
        .with_past_rounds(2);
    let roster = generator.generate();
    let snapshot = roster.snapshot("S1").unwrap();
    let config = generator.config_for("S1", snapshot.len());

    let report = solve_session(&snapshot, &config, &MilpEngine::new()).unwrap();
    let round = report.round().unwrap();

    let recomputed: i64 = round
        .assignment
        .co_assigned_pairs()
        .map(|(a, b, _)| i64::from(snapshot.history().count(a, b)).pow(2))
        .sum();
    assert_eq!(round.squared_repeat_cost, recomputed);
    assert_eq!(round.assignment.participant_count(), 6);
    assert_eq!(round.assignment.members(GroupId::new(1)).len(), 3);
    assert_eq!(config.group_layout(), GroupLayout::from_sizes([3, 3]));
}
