use std::sync::Arc;
use std::time::{Duration, Instant};

use groupforge_core::{
    GroupForgeError, ModelConstructionError, PairingHistory, ParticipantId, Roster, RosterEntry,
    SolveStatus,
};
use groupforge_test::{four_participants, four_participants_config, StatusEngine};

use super::*;

fn id(s: &str) -> ParticipantId {
    ParticipantId::new(s)
}

fn classroom() -> Roster {
    let mut history = PairingHistory::new();
    history.insert_symmetric("A", "B", 2);
    history.insert_symmetric("A", "E", 1);
    Roster::new(
        vec![
            RosterEntry::new("A", Some(1)).attending("S1"),
            RosterEntry::new("B", Some(0)).attending("S1"),
            RosterEntry::new("C", Some(1)).attending("S1"),
            RosterEntry::new("D", Some(0)).attending("S1"),
            RosterEntry::new("E", None).attending("S2"),
        ],
        history,
    )
}

#[test]
fn test_run_uses_default_engine() {
    let report = run(&four_participants(), &four_participants_config()).unwrap();
    assert_eq!(report.status, SolveStatus::Optimal);
    assert_eq!(report.session.as_deref(), Some("S1"));
}

#[test]
fn test_run_with_engine_double() {
    let engine = Arc::new(StatusEngine::new(SolveStatus::Unknown));
    let report = run_with(
        &four_participants(),
        &four_participants_config(),
        Arc::clone(&engine),
    )
    .unwrap();
    assert!(!report.is_solved());
    assert_eq!(engine.calls(), 1);
}

#[test]
fn test_run_with_applies_configured_deadline() {
    let engine = StatusEngine::new(SolveStatus::Optimal).with_delay(Duration::from_secs(5));
    let config = four_participants_config().with_time_limit_seconds(1);

    let start = Instant::now();
    let report = run_with(&four_participants(), &config, engine).unwrap();

    assert_eq!(report.status, SolveStatus::Unknown);
    assert!(!report.is_solved());
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_plan_session_updates_ledger() {
    let roster = classroom();
    let (report, next) = plan_session(&roster, &four_participants_config()).unwrap();

    let round = report.round().unwrap();
    assert_eq!(round.squared_repeat_cost, 0);
    assert_ne!(
        round.assignment.group_of(&id("A")),
        round.assignment.group_of(&id("B"))
    );

    let next = next.unwrap();
    assert!(next.is_symmetric());
    assert_eq!(next.count(&id("A"), &id("B")), 2);
    // non-attendee pairs are carried over untouched
    assert_eq!(next.count(&id("A"), &id("E")), 1);
    let partner = round
        .assignment
        .members(round.assignment.group_of(&id("A")).unwrap())
        .iter()
        .find(|m| **m != id("A"))
        .cloned()
        .unwrap();
    assert_eq!(next.count(&id("A"), &partner), 1);
}

#[test]
fn test_plan_session_without_session_needs_every_level() {
    let roster = classroom();
    let config = RunConfig::new().with_groups(5, 1);
    let result = plan_session(&roster, &config);
    assert!(matches!(
        result,
        Err(GroupForgeError::ModelConstruction(
            ModelConstructionError::MissingLevel(ref p)
        )) if *p == id("E")
    ));
}

#[test]
fn test_plan_session_unsolved_has_no_ledger() {
    let roster = classroom();
    let config = four_participants_config()
        .with_pin("A", 1)
        .with_pin("B", 1)
        .with_pin("C", 1);
    let (report, next) = plan_session(&roster, &config).unwrap();
    assert_eq!(report.status, SolveStatus::Infeasible);
    assert!(next.is_none());
}
