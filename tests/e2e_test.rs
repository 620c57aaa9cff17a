use std::path::Path;
use std::time::Duration;

use kra_ranker::config::ScoringConfig;
use kra_ranker::reporter::cli::CliReporter;
use kra_ranker::reporter::json::JsonReporter;
use kra_ranker::reporter::Reporter;

#[test]
fn test_e2e_fixture_cli_output() {
    let config = ScoringConfig::default();
    let result =
        kra_ranker::engine::run(Path::new("tests/fixtures/applications.json"), &config).unwrap();

    let output = CliReporter.format(&result, true, Duration::ZERO);
    println!("{output}");
    assert!(output.contains("applications.json"));
    assert!(output.contains("APP-002"));
    assert!(output.contains("submissions not yet scored"));
}

#[test]
fn test_e2e_json_output() {
    let config = ScoringConfig::default();
    let result =
        kra_ranker::engine::run(Path::new("tests/fixtures/applications.json"), &config).unwrap();

    let json_str = JsonReporter.format(&result, true, Duration::ZERO);
    let json: serde_json::Value = serde_json::from_str(&json_str).unwrap();

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    for r in &results[..2] {
        let score = r["final_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert!(r["highest_attainable_rank"].is_string());
    }
    assert_eq!(results[1]["rank_category"], "Instructor");
    assert_eq!(results[1]["breakdown"]["raw"]["kra1"].as_f64().unwrap(), 35.0);
    assert_eq!(results[2]["error"]["kind"], "configuration");
}
