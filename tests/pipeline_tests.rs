mod common;

use std::{fs, path::Path};

use clap::Parser;
use common::{init_test_env, write_result_file};
use scioly_elo::{
    args::Args,
    error::ProcessorError,
    model::constants::OVERALL_CATEGORY,
    output::output_structs::{MetaFile, StateOutput},
    runner
};

fn args_for(results_dir: &Path, output_dir: &Path, extra: &[&str]) -> Args {
    let mut argv = vec![
        "scioly-elo".to_string(),
        "--log-level".to_string(),
        "warn".to_string(),
        "-r".to_string(),
        results_dir.to_string_lossy().into_owned(),
        "-o".to_string(),
        output_dir.to_string_lossy().into_owned(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));

    Args::parse_from(argv)
}

fn run(results_dir: &Path, output_dir: &Path, extra: &[&str]) -> scioly_elo::error::Result<()> {
    let args = args_for(results_dir, output_dir, extra);
    let config = args.resolve_config()?;

    runner::run(&args, &config).map(|_| ())
}

fn read_state(output_dir: &Path, division_dir: &str, state: &str) -> StateOutput {
    let json = fs::read_to_string(output_dir.join(division_dir).join(format!("{}.json", state))).unwrap();
    serde_json::from_str(&json).unwrap()
}

fn read_meta(output_dir: &Path, division_dir: &str) -> MetaFile {
    let json = fs::read_to_string(output_dir.join(division_dir).join("meta.json")).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_two_team_tournament_end_to_end() {
    init_test_env();
    let results = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_result_file(
        results.path(),
        "2024-01-20_alpha_invitational_c",
        "Invitational",
        &[("Alpha", "OH", Some(1)), ("Beta", "OH", Some(2))]
    );

    run(results.path(), output.path(), &["-d", "C"]).unwrap();

    let ohio = read_state(output.path(), "statesC", "OH");
    let alpha = &ohio["Alpha Varsity"].seasons["2024"].events[OVERALL_CATEGORY];
    let beta = &ohio["Beta Varsity"].seasons["2024"].events[OVERALL_CATEGORY];

    assert!(alpha.rating > 1500.0);
    assert!(beta.rating < 1500.0);
    assert!((alpha.rating + beta.rating - 3000.0).abs() < 0.02);
    assert_eq!(alpha.history.len(), 1);
    assert_eq!(alpha.history[0].place, 1);
    assert_eq!(alpha.history[0].date, "2024-01-21");
    assert!(ohio["Alpha Varsity"].seasons["2024"].events.contains_key("Anatomy"));
    assert_eq!(ohio["Alpha Varsity"].meta.events, 1);

    let meta = read_meta(output.path(), "statesC");
    assert_eq!(meta.teams, vec!["Alpha Varsity".to_string(), "Beta Varsity".to_string()]);
    assert_eq!(meta.events, vec!["Anatomy".to_string()]);
    assert_eq!(meta.tournaments.len(), 1);
    assert_eq!(meta.states["OH"], "Ohio");
    assert_eq!(meta.tournament_timeline["2024"].len(), 1);
    assert_eq!(meta.tournament_timeline["2024"][0].tournament_id, 0);
    assert!(meta.tournament_timeline["2024"][0]
        .link
        .ends_with("2024-01-20_alpha_invitational_c"));
}

#[test]
fn test_output_is_deterministic() {
    init_test_env();
    let results = tempfile::tempdir().unwrap();
    write_result_file(
        results.path(),
        "2024-01-20_alpha_invitational_c",
        "Invitational",
        &[("Alpha", "OH", Some(1)), ("Beta", "MI", Some(2)), ("Gamma", "OH", Some(3))]
    );
    write_result_file(
        results.path(),
        "2024-02-10_beta_invitational_c",
        "Invitational",
        &[("Gamma", "OH", Some(1)), ("Alpha", "OH", Some(2)), ("Beta", "MI", None)]
    );

    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    run(results.path(), first.path(), &["-d", "C"]).unwrap();
    run(results.path(), second.path(), &["-d", "C", "--parallel-divisions"]).unwrap();

    for file in ["OH.json", "MI.json", "meta.json"] {
        let a = fs::read(first.path().join("statesC").join(file)).unwrap();
        let b = fs::read(second.path().join("statesC").join(file)).unwrap();
        assert_eq!(a, b, "{} differs between runs", file);
    }
}

#[test]
fn test_missing_state_code_aborts_run() {
    init_test_env();
    let results = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_result_file(
        results.path(),
        "2024-01-20_alpha_invitational_c",
        "Invitational",
        &[("Alpha", "OH", Some(1)), ("Beta", "  ", Some(2))]
    );

    let result = run(results.path(), output.path(), &["-d", "C"]);

    match result {
        Err(e @ ProcessorError::MissingStateCode { .. }) => assert!(e.is_fatal()),
        other => panic!("expected MissingStateCode, got {:?}", other)
    }
    assert!(!output.path().join("statesC").join("meta.json").exists());
}

#[test]
fn test_unreadable_file_is_skipped() {
    init_test_env();
    let results = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_result_file(
        results.path(),
        "2024-01-20_alpha_invitational_c",
        "Invitational",
        &[("Alpha", "OH", Some(1)), ("Beta", "OH", Some(2))]
    );
    fs::write(results.path().join("2024-01-27_broken_invitational_c.yaml"), "Teams: [unclosed").unwrap();

    run(results.path(), output.path(), &["-d", "C"]).unwrap();

    let meta = read_meta(output.path(), "statesC");
    assert_eq!(meta.tournaments.len(), 1);
}

#[test]
fn test_divisions_are_independent() {
    init_test_env();
    let results = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_result_file(
        results.path(),
        "2024-01-20_alpha_invitational_b",
        "Invitational",
        &[("Alpha", "OH", Some(1)), ("Beta", "OH", Some(2))]
    );
    write_result_file(
        results.path(),
        "2024-01-20_alpha_invitational_c",
        "Invitational",
        &[("Gamma", "CA", Some(1)), ("Delta", "CA", Some(2))]
    );

    run(results.path(), output.path(), &["-d", "B"]).unwrap();

    assert!(output.path().join("statesB").join("OH.json").exists());
    assert!(!output.path().join("statesC").exists());
    assert!(!output.path().join("statesB").join("CA.json").exists());
}

#[test]
fn test_jv_demotion_is_published() {
    init_test_env();
    let results = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_result_file(
        results.path(),
        "2024-01-20_alpha_invitational_c",
        "Invitational",
        &[
            ("Alpha", "OH", Some(1)),
            ("Beta", "OH", Some(2)),
            ("Gamma", "OH", Some(3)),
            ("Gamma", "OH", Some(4)),
        ]
    );

    run(results.path(), output.path(), &["-d", "C", "--set", "jvLossThreshold=20"]).unwrap();

    let ohio = read_state(output.path(), "statesC", "OH");
    let gamma_jv = &ohio["Gamma JV"].seasons["2024"].events[OVERALL_CATEGORY];
    assert_eq!(gamma_jv.history.len(), 1);
    assert!(gamma_jv.history[0].note.is_some());
    assert!(ohio["Gamma Varsity"].seasons["2024"].events[OVERALL_CATEGORY]
        .history
        .is_empty());
}

#[test]
fn test_skip_output_and_metrics() {
    init_test_env();
    let results = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_result_file(
        results.path(),
        "2024-01-20_alpha_invitational_c",
        "Invitational",
        &[("Alpha", "OH", Some(1)), ("Beta", "OH", Some(2))]
    );
    let metrics_path = output.path().join("reports").join("metrics.json");
    let metrics_arg = metrics_path.to_string_lossy().into_owned();

    run(
        results.path(),
        output.path(),
        &["-d", "C", "--skip-output", "--metrics-out", metrics_arg.as_str()]
    )
    .unwrap();

    assert!(!output.path().join("statesC").exists());
    let metrics: serde_json::Value = serde_json::from_str(&fs::read_to_string(&metrics_path).unwrap()).unwrap();
    assert_eq!(metrics["divisions"]["C"]["tournamentsScored"], 1);
}
