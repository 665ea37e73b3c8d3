use predicates::str::contains;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("queueflow-errors-{}.{}", nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

#[test]
fn missing_config_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queueflow");
    cmd.args(["run", "--config", "/nonexistent/queueflow/day.toml"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: failed to read config"));
}

#[test]
fn empty_queues_fail() {
    let path = write_temp_config("queues = []\n", "toml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queueflow");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: queues must not be empty"));
}

#[test]
fn zero_service_time_fails() {
    let path = write_temp_config(
        "queues = [{ name = \"Front Desk\", avg_service_minutes = 0 }]\n",
        "toml",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queueflow");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert().failure().stderr(contains(
        "Error: average service time must be > 0 in queue 'Front Desk'",
    ));
}

#[test]
fn script_referencing_unknown_queue_fails() {
    let config = r#"
queues = [{ name = "Front Desk", avg_service_minutes = 4 }]

[[script]]
at_ms = 0
action = "undo"
queue = "Back Office"
"#;
    let path = write_temp_config(config, "toml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queueflow");
    cmd.args(["show-config", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: unknown queue 'Back Office'"));
}

#[test]
fn unsupported_extension_fails() {
    let path = write_temp_config("queues: []\n", "yaml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queueflow");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: unsupported config format 'yaml'"));
}

#[test]
fn malformed_toml_fails() {
    let path = write_temp_config("queues = [", "toml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queueflow");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: failed to parse TOML"));
}

#[test]
fn estimate_with_zero_service_time_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queueflow");
    cmd.args(["estimate", "--ahead", "3", "--avg-service", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: average service time must be > 0"));
}

#[test]
fn unknown_format_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queueflow");
    cmd.args(["run", "--config", "day.toml", "--format", "xml"]);
    cmd.assert().failure().stderr(contains("Error:"));
}
