use std::process::Command;

use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/applications.json";

#[test]
fn test_invalid_format_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_kra-ranker"))
        .args([FIXTURE, "--format", "jsn"])
        .output()
        .expect("binary should run");

    assert!(
        !output.status.success(),
        "Invalid --format values should cause a non-zero exit"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value"),
        "stderr should explain invalid format value. stderr: {stderr}"
    );
}

#[test]
fn test_failed_application_exits_nonzero() {
    let output = Command::new(env!("CARGO_BIN_EXE_kra-ranker"))
        .args([FIXTURE, "--format", "json"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["finalized"].as_u64().unwrap(), 2);
}

#[test]
fn test_score_flag_with_custom_config() {
    let dir = TempDir::new().unwrap();
    let apps = dir.path().join("apps.json");
    let config = dir.path().join("tables.toml");
    std::fs::write(
        &apps,
        r#"[{"id": "X", "faculty_rank": "Lecturer II", "kra1_score": 20, "kra2_score": 60}]"#,
    )
    .unwrap();
    std::fs::write(
        &config,
        r#"
[weights."Lecturer"]
kra1 = 0.5
kra2 = 0.5
kra3 = 0.0
kra4 = 0.0
"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_kra-ranker"))
        .arg(&apps)
        .arg("--config")
        .arg(&config)
        .arg("--score")
        .output()
        .expect("binary should run");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "X 40.00\n");
}

#[test]
fn test_invalid_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("tables.toml");
    std::fs::write(&config, "[weights.\"Instructor\"]\nkra1 = 2.0\nkra2 = 0.0\nkra3 = 0.0\nkra4 = 0.0\n")
        .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_kra-ranker"))
        .arg(FIXTURE)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sum to"), "stderr: {stderr}");
}
