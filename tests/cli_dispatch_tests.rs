use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const FLEET_JSON: &str = r#"[
    {"name": "A", "money": 400, "marines": 100},
    {"name": "B", "money": 300, "marines": 150},
    {"name": "C", "money": 100, "marines": 5},
    {"name": "D", "money": 350, "marines": 90},
    {"name": "E", "money": 300, "marines": 100}
]"#;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_plunder")
}

fn unique_temp_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("plunder-{name}-{stamp}.{ext}"))
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin())
        .args(args)
        .env("PLUNDER_CONFIG", "does-not-exist.json")
        .output()
        .expect("plunder should run")
}

#[test]
fn select_command_emits_plan_json() {
    let path = unique_temp_path("select", "json");
    fs::write(&path, FLEET_JSON).expect("fixture should be written");

    let output = run(&["select", path.to_string_lossy().as_ref(), "200"]);

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("select should emit json");
    let names: Vec<&str> = payload
        .as_array()
        .expect("plan is an array")
        .iter()
        .filter_map(|entry| entry["island"].as_str())
        .collect();
    assert_eq!(names, vec!["C", "A", "D", "E"]);

    let _ = fs::remove_file(path);
}

#[test]
fn batch_command_reads_csv() {
    let path = unique_temp_path("batch", "csv");
    fs::write(&path, "name,money,marines\nA,400,100\nB,300,150\nC,100,5\nD,350,90\nE,300,100\n")
        .expect("fixture should be written");

    let output = run(&["batch", path.to_string_lossy().as_ref(), "0", "3", "4", "4"]);

    assert_eq!(output.status.code(), Some(0));
    let payload: Vec<f64> =
        serde_json::from_slice(&output.stdout).expect("batch should emit a json array");
    assert_eq!(payload, vec![0.0, 60.0, 80.0, 80.0]);

    let _ = fs::remove_file(path);
}

#[test]
fn simulate_command_reports_idle_pirates() {
    let path = unique_temp_path("simulate", "json");
    fs::write(&path, r#"[{"name": "A", "money": 400, "marines": 100}]"#)
        .expect("fixture should be written");

    let output = run(&["simulate", path.to_string_lossy().as_ref(), "11", "10"]);

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("simulate should emit json");
    let day = payload[0].as_array().expect("one day of assignments");
    assert_eq!(day.len(), 11);
    assert_eq!(day[0]["island"], "A");
    assert_eq!(day[0]["plunder"], 40.0);
    assert!(day[10]["island"].is_null());
    assert_eq!(day[10]["idle"], "no_targets");

    let _ = fs::remove_file(path);
}

#[test]
fn negative_crew_is_a_usage_error() {
    let path = unique_temp_path("negative", "json");
    fs::write(&path, FLEET_JSON).expect("fixture should be written");

    let output = run(&["select", path.to_string_lossy().as_ref(), "-5"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must not be negative"));

    let _ = fs::remove_file(path);
}

#[test]
fn unknown_command_prints_usage() {
    let output = run(&["serve"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: plunder"));
}

#[test]
fn validate_command_returns_non_zero_on_invalid_data() {
    let path = unique_temp_path("invalid", "json");
    fs::write(&path, r#"[{"name": "", "money": -1, "marines": 3}]"#)
        .expect("fixture should be written");

    let output = run(&["validate", path.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_passes_clean_data() {
    let path = unique_temp_path("valid", "json");
    fs::write(&path, FLEET_JSON).expect("fixture should be written");

    let output = run(&["validate", path.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("validation passed"));

    let _ = fs::remove_file(path);
}
