//! Tests for run configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        session = "S5"
        scarce_level = 2

        [weights]
        repeat = 50.5
        level = 3

        [[groups]]
        size = 3
        count = 2

        [[groups]]
        size = 2

        [pinned]
        ana = 1
        ben = 3

        [engine]
        minutes_spent_limit = 1
        seconds_spent_limit = 30
    "#;

    let config = RunConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.session.as_deref(), Some("S5"));
    assert_eq!(config.scarce_level, 2);
    assert_eq!(config.weights, ObjectiveWeights::new(50.5, 3.0));
    assert_eq!(config.groups.len(), 2);
    assert_eq!(config.groups[1].count, 1);
    assert_eq!(config.pinned[&ParticipantId::new("ben")], GroupId::new(3));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(90)));

    let sizes: Vec<usize> = config.group_layout().groups().iter().map(|g| g.size).collect();
    assert_eq!(sizes, vec![3, 3, 2]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        session: S1
        weights:
          repeat: 10
        groups:
          - size: 2
            count: 10
        pinned:
          ana: 4
    "#;

    let config = RunConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.session.as_deref(), Some("S1"));
    assert_eq!(config.weights.repeat, 10.0);
    assert_eq!(config.weights.level, 1.0);
    assert_eq!(config.scarce_level, 1);
    assert_eq!(config.group_layout().capacity(), 20);
    assert_eq!(config.time_limit(), None);
}

#[test]
fn test_defaults() {
    let config = RunConfig::from_toml_str("").unwrap();
    assert_eq!(config.scarce_level, 1);
    assert_eq!(config.weights, ObjectiveWeights::default());
    assert!(config.groups.is_empty());
    assert_eq!(RunConfig::default().scarce_level, 1);
}

#[test]
fn test_builder() {
    let config = RunConfig::new()
        .with_session("S2")
        .with_weights(100.0, 1.0)
        .with_groups(2, 2)
        .with_pin("ana", 2)
        .with_time_limit_seconds(5);

    assert_eq!(config.session.as_deref(), Some("S2"));
    assert_eq!(config.group_layout().len(), 2);
    assert_eq!(config.pinned.len(), 1);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_failures() {
    assert!(matches!(
        RunConfig::new().validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(RunConfig::new().with_groups(0, 2).validate().is_err());
    assert!(RunConfig::new()
        .with_groups(2, 2)
        .with_weights(-5.0, 1.0)
        .validate()
        .is_err());
    assert!(RunConfig::new()
        .with_groups(2, 2)
        .with_pin("ana", 3)
        .validate()
        .is_err());
}

#[test]
fn test_missing_file() {
    let result = RunConfig::load("/definitely/not/here/groupforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
