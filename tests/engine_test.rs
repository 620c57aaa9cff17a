use kra_ranker::application::{Application, ApplicationStatus};
use kra_ranker::config::ScoringConfig;
use kra_ranker::engine::{finalize_all, load_applications, run, write_applications};
use kra_ranker::error::EngineError;
use tempfile::TempDir;

#[test]
fn test_engine_on_fixture() {
    let config = ScoringConfig::default();
    let result = run(
        std::path::Path::new("tests/fixtures/applications.json"),
        &config,
    )
    .unwrap();

    assert_eq!(result.source_name, "applications.json");
    assert_eq!(result.outcomes.len(), 3);
    assert_eq!(result.finalized(), 2);
    assert_eq!(result.failed(), 1);
    assert!(!result.all_succeeded());

    let ids: Vec<_> = result
        .outcomes
        .iter()
        .map(|o| o.application.id.as_str())
        .collect();
    assert_eq!(ids, ["APP-001", "APP-002", "APP-003"]);

    let first = result.outcomes[0].result.as_ref().unwrap();
    assert!((first.breakdown.final_score - 22.25).abs() < 1e-9);

    // kra1: 25 + min(12, 10) = 35; 35*.8 + 30*.1
    let second = result.outcomes[1].result.as_ref().unwrap();
    assert!((second.breakdown.final_score - 31.0).abs() < 1e-9);

    let third = result.outcomes[2].result.as_ref().unwrap_err();
    assert!(third.is_configuration());
    assert_eq!(
        result.outcomes[2].application.status,
        ApplicationStatus::PendingEvaluation
    );
}

#[test]
fn test_finalize_all_keeps_order() {
    let config = ScoringConfig::default();
    let applications: Vec<_> = (0..64)
        .map(|i| {
            let mut app = Application::new(&format!("APP-{i}"), "Instructor I");
            app.kra1_score = Some(i as f64);
            app
        })
        .collect();

    let outcomes = finalize_all(applications, &config);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.application.id, format!("APP-{i}"));
        let score = outcome.result.as_ref().unwrap().breakdown.final_score;
        let expected = (i as f64).min(40.0) * 0.8;
        assert!((score - expected).abs() < 1e-9);
    }
}

#[test]
fn test_engine_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = run(&dir.path().join("missing.json"), &ScoringConfig::default());
    assert!(matches!(result, Err(EngineError::Read { .. })));
}

#[test]
fn test_engine_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("apps.json");
    std::fs::write(&path, "{ not json").unwrap();
    let result = run(&path, &ScoringConfig::default());
    assert!(matches!(result, Err(EngineError::Parse { .. })));
}

#[test]
fn test_written_applications_are_finalized() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("apps.json");
    let output = dir.path().join("out.json");
    std::fs::write(
        &input,
        r#"[{"id": "A", "faculty_rank": "Professor I", "kra2_score": 50}]"#,
    )
    .unwrap();

    let config = ScoringConfig::default();
    let result = run(&input, &config).unwrap();
    write_applications(&output, &result).unwrap();

    let written = load_applications(&output).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].status, ApplicationStatus::Evaluated);
    assert_eq!(written[0].final_score, Some(20.0));

    // a second pass over the written records refuses to rescore
    let again = run(&output, &config).unwrap();
    assert_eq!(again.failed(), 1);
}
