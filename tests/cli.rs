use assert_cmd::Command;
use axum::{Json, Router, routing::get};
use predicates::str::contains;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

const BINARY_NAME: &str = "smarthome-hub";
const PLACEHOLDER_URL: &str = "https://PASTE_YOUR_BACKEND_URL_HERE";

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp home
fn config_file_path(home: &tempfile::TempDir) -> PathBuf {
    home.path().join(".smarthome").join("config.json")
}

/// The binary with an isolated home and no address override from the caller.
fn hub(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path()).env_remove("SMARTHOME_API_URL");
    cmd
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let home = temp_home();
    hub(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Terminal dashboard for the smart home backend"))
        .stdout(contains("set-limits"));
}

#[test]
/// Argument handling runs before the home directory is looked up.
fn cli_version_does_not_need_home() {
    Command::cargo_bin(BINARY_NAME)
        .unwrap()
        .env_remove("HOME")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
/// Unknown subcommands are rejected by the parser.
fn cli_rejects_unknown_subcommand() {
    Command::cargo_bin(BINARY_NAME)
        .unwrap()
        .env_remove("HOME")
        .arg("dance")
        .assert()
        .failure()
        .stderr(contains("unrecognized subcommand"));
}

#[test]
/// A placeholder address fails the command without touching the network.
fn send_with_placeholder_address_reports_failure() {
    let home = temp_home();
    hub(&home)
        .args(["send", "kitchen", "LIGHT_ON", "--api-url", PLACEHOLDER_URL])
        .assert()
        .failure()
        .stdout(contains("Failed to send command"));
}

#[test]
fn snapshot_with_placeholder_address_is_a_config_error() {
    let home = temp_home();
    hub(&home)
        .args(["snapshot"])
        .env("SMARTHOME_API_URL", PLACEHOLDER_URL)
        .assert()
        .failure()
        .stdout(contains("Config error"));
}

#[test]
fn set_limits_requires_a_threshold() {
    let home = temp_home();
    hub(&home)
        .args(["set-limits", "kitchen", "--api-url", PLACEHOLDER_URL])
        .assert()
        .failure()
        .stdout(contains("at least one threshold is required"));
}

#[test]
/// Configure writes the config file and reset deletes it.
fn configure_then_reset_round_trip() {
    let home = temp_home();
    let config_path = config_file_path(&home);

    hub(&home)
        .args(["configure", "--api-url", "local", "--poll-interval-ms", "1000"])
        .assert()
        .success()
        .stdout(contains("Configuration saved"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(saved, json!({"api_url": "local", "poll_interval_ms": 1000}));

    hub(&home)
        .arg("reset")
        .assert()
        .success()
        .stdout(contains("Configuration removed"));
    assert!(!config_path.exists());

    hub(&home)
        .arg("reset")
        .assert()
        .success()
        .stdout(contains("No config file found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
/// The snapshot command prints every node served by the backend.
async fn snapshot_prints_nodes_from_backend() {
    let app = Router::new().route(
        "/realtime",
        get(|| async {
            Json(json!({
                "kitchen": {
                    "node": "kitchen", "temp": 22.5, "gas": 0.3,
                    "temp_th": 30, "gas_th": 1.0, "time": "12:00:01"
                }
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let home = temp_home();
    let assert = tokio::task::spawn_blocking(move || {
        hub(&home)
            .args(["snapshot", "--api-url", &base])
            .assert()
            .success()
    })
    .await
    .unwrap();

    assert.stdout(contains(
        "kitchen [12:00:01] temp 22.5°C | gas 0.3V | limits 30 / 1.0",
    ));
}
