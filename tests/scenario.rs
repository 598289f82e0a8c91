use std::fs;

use warren::{error::SimulationError, scenario::ScenarioLoader};

fn fixture_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn meadow_fixture_parses() {
    let scenario = fixture_loader()
        .load("scenarios/meadow.yaml")
        .expect("fixture parses");
    assert_eq!(scenario.name, "meadow");
    assert_eq!(scenario.initial_agents, 10);
    assert_eq!(scenario.carrying_capacity, 50);
    assert_eq!(scenario.seed, 42);
    assert_eq!(scenario.years(None), 20);
}

#[test]
fn meadow_fixture_runs_to_completion() {
    let scenario = fixture_loader()
        .load("scenarios/meadow.yaml")
        .expect("fixture parses");
    let mut engine = scenario.build_engine().expect("fixture is valid");

    let mut reports = Vec::new();
    engine.run_with_hook(scenario.years(None), |report| reports.push(report.clone()));

    assert_eq!(reports.len(), 20);
    assert_eq!(reports.last().map(|report| report.year), Some(20));
}

#[test]
fn omitted_fields_fall_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("burrow.yaml"),
        "name: burrow\ninitial_agents: 4\ncarrying_capacity: 12\n",
    )
    .expect("fixture written");

    let scenario = ScenarioLoader::new(dir.path())
        .load("burrow.yaml")
        .expect("parses");
    assert_eq!(scenario.seed, 42);
    assert_eq!(scenario.years(None), 20);
    assert!(scenario.description.is_none());
}

#[test]
fn year_override_wins_over_scenario_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("burrow.yaml"),
        "name: burrow\ninitial_agents: 4\ncarrying_capacity: 12\nyears: 30\n",
    )
    .expect("fixture written");

    let scenario = ScenarioLoader::new(dir.path())
        .load("burrow.yaml")
        .expect("parses");
    assert_eq!(scenario.years(Some(5)), 5);
    assert_eq!(scenario.years(None), 30);
}

#[test]
fn zero_capacity_scenario_is_rejected_at_build() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("barren.yaml"),
        "name: barren\ninitial_agents: 4\ncarrying_capacity: 0\n",
    )
    .expect("fixture written");

    let scenario = ScenarioLoader::new(dir.path())
        .load("barren.yaml")
        .expect("parses");
    let err = scenario.build_engine().expect_err("capacity 0 must fail");
    assert!(matches!(err, SimulationError::InvalidConfiguration { .. }));
}

#[test]
fn missing_scenario_file_reports_context() {
    let err = fixture_loader()
        .load("scenarios/does_not_exist.yaml")
        .expect_err("missing file");
    assert!(format!("{err:#}").contains("does_not_exist.yaml"));
}
