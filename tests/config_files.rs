use std::fs;

use classic_agents::{
    AdversarialStrategy, AgentsConfig, Error, SearchStrategy,
    config::{AdversarialConfig, MiraConfig, NaiveBayesConfig, SearchConfig},
};
use tempfile::tempdir;

#[test]
fn config_round_trips_through_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("agents.json");

    let config = AgentsConfig::default()
        .with_search(SearchConfig::default().with_strategy(SearchStrategy::AStar))
        .with_adversarial(
            AdversarialConfig::default()
                .with_strategy(AdversarialStrategy::AlphaBeta)
                .with_depth(3),
        )
        .with_mira(MiraConfig::default().with_auto_tune(true))
        .with_naive_bayes(NaiveBayesConfig::default().with_k_grid(vec![0.5, 1.0]));

    config.to_json_file(&path).unwrap();
    let loaded = AgentsConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded.search, config.search);
    assert_eq!(loaded.adversarial, config.adversarial);
    assert!(loaded.mira.auto_tune);
    assert_eq!(loaded.mira.c_grid.len(), 3);
    assert_eq!(loaded.naive_bayes.k_grid, vec![0.5, 1.0]);
    assert_eq!(loaded.value_iteration.iterations, 100);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"a-star\""));
    assert!(text.contains("\"alpha-beta\""));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let result = AgentsConfig::from_json_file(dir.path().join("absent.json"));
    match result {
        Err(Error::Io { operation, .. }) => assert!(operation.contains("absent.json")),
        other => panic!("expected an IO error, got {other:?}"),
    }
}

#[test]
fn malformed_json_reports_serialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"search\": ").unwrap();
    assert!(matches!(
        AgentsConfig::from_json_file(&path),
        Err(Error::Serialization(_))
    ));
}

#[test]
fn loaded_config_is_validated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("invalid.json");
    fs::write(&path, r#"{ "value_iteration": { "discount": 2.0 } }"#).unwrap();
    assert!(matches!(
        AgentsConfig::from_json_file(&path),
        Err(Error::InvalidDiscount { .. })
    ));

    fs::write(&path, r#"{ "naive_bayes": { "auto_tune": true, "k_grid": [] } }"#).unwrap();
    assert!(matches!(
        AgentsConfig::from_json_file(&path),
        Err(Error::EmptyCandidateGrid { .. })
    ));
}

#[test]
fn empty_object_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "{}").unwrap();
    assert_eq!(
        AgentsConfig::from_json_file(&path).unwrap(),
        AgentsConfig::default()
    );
}
