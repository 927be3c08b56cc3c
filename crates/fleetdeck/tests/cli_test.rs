//! Integration tests for the `fleetdeck` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! alert viewing, and error handling — all without a live tracking service.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `fleetdeck` binary with env isolation.
///
/// Clears all `FLEETDECK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn fleetdeck_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("fleetdeck");
    cmd.env("HOME", "/tmp/fleetdeck-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/fleetdeck-test-nonexistent")
        .env_remove("FLEETDECK_PROFILE")
        .env_remove("FLEETDECK_API_URL")
        .env_remove("FLEETDECK_API_KEY")
        .env_remove("FLEETDECK_OUTPUT")
        .env_remove("FLEETDECK_INSECURE")
        .env_remove("FLEETDECK_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = fleetdeck_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    fleetdeck_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("tracking devices")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("warehouses"))
            .and(predicate::str::contains("alerts")),
    );
}

#[test]
fn test_version_flag() {
    fleetdeck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fleetdeck"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    fleetdeck_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    fleetdeck_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Alerts (client-side data, no service needed) ────────────────────

#[test]
fn test_alerts_list() {
    fleetdeck_cmd()
        .args(["alerts", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("MH12 AB 1234").and(predicate::str::contains("Tamper")),
        );
}

#[test]
fn test_alerts_list_status_filter() {
    fleetdeck_cmd()
        .args(["alerts", "list", "--status", "RESOLVED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ACTIVE").not());
}

#[test]
fn test_alerts_show_includes_history_stub() {
    fleetdeck_cmd()
        .args(["alerts", "show", "MH12 AB 1234"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Ignition history (sample data)")
                .and(predicate::str::contains("18.5204")),
        );
}

#[test]
fn test_alerts_show_unknown_vehicle() {
    let output = fleetdeck_cmd()
        .args(["alerts", "show", "ZZ00 XX 0000"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "Expected NOT_FOUND exit code");
}

#[test]
fn test_alerts_list_json() {
    fleetdeck_cmd()
        .args(["--output", "json", "alerts", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"vehicle_number\"")
                .and(predicate::str::contains("POWER_CUT")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = fleetdeck_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_list_no_service_configured() {
    fleetdeck_cmd()
        .args(["devices", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("Configuration"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    fleetdeck_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_invalid_output_format() {
    let output = fleetdeck_cmd()
        .args(["--output", "invalid", "alerts", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_device_create_validates_before_any_network_call() {
    // No service is configured BUT a URL flag is given; validation must
    // fail locally (exit 2) before the unreachable URL matters.
    let output = fleetdeck_cmd()
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "devices",
            "create",
            "--imei",
            "350000000000001",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "Expected USAGE exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("qrCode") && text.contains("locationType"),
        "Expected per-field errors:\n{text}"
    );
}

#[test]
fn test_warehouse_create_aggregator_requires_selection() {
    let output = fleetdeck_cmd()
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "warehouses",
            "create",
            "--code",
            "WH-1",
            "--name",
            "Test",
            "--warehouse-type",
            "LOCAL",
            "--owner-type",
            "AGGREGATOR",
            "--address",
            "Plot 1",
            "--city",
            "Pune",
            "--state",
            "MH",
            "--pincode",
            "411001",
            "--contact-name",
            "S K",
            "--contact-email",
            "ops@example.com",
            "--contact-mobile",
            "9822012345",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "Expected USAGE exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("aggregatorId"),
        "Expected aggregatorId error:\n{text}"
    );
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be about
    // missing service config, not about argument parsing.
    fleetdeck_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--insecure",
            "--timeout",
            "60",
            "devices",
            "list",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("Configuration"))
                .or(predicate::str::contains("profile")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_devices_subcommands_exist() {
    fleetdeck_cmd()
        .args(["devices", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("create"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_warehouses_subcommands_exist() {
    fleetdeck_cmd()
        .args(["warehouses", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("set-status"))
                .and(predicate::str::contains("toggle")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    fleetdeck_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}
