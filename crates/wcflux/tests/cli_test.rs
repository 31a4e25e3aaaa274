//! Integration tests for the `wcflux` binary.
//!
//! Argument parsing, completions, config profile handling, and a couple of
//! store-backed commands against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// `wcflux` with env isolation and the config file pointed at `config`.
fn wcflux_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wcflux");
    cmd.env("WCFLUX_CONFIG", config)
        .env_remove("WCFLUX_PROFILE")
        .env_remove("WCFLUX_SITE_URL")
        .env_remove("WCFLUX_USERNAME")
        .env_remove("WCFLUX_PASSWORD")
        .env_remove("WCFLUX_OUTPUT")
        .env_remove("WCFLUX_INSECURE")
        .env_remove("WCFLUX_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let file = dir.path().join("config.toml");
    std::fs::write(
        &file,
        r#"
default_profile = "main"

[profiles.main]
site_url = "https://main.test"
username = "admin"
password = "plain-secret"

[profiles.staging]
site_url = "https://staging.test"
auth_mode = "consumer-key"
consumer_key = "ck_1"
consumer_secret = "cs_1"
"#,
    )
    .unwrap();
    file
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = wcflux_cmd(&dir.path().join("none.toml")).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_resources() {
    let dir = tempfile::tempdir().unwrap();
    wcflux_cmd(&dir.path().join("none.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("products")
                .and(predicate::str::contains("variations"))
                .and(predicate::str::contains("reviews")),
        );
}

#[test]
fn completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    wcflux_cmd(&dir.path().join("none.toml"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wcflux"));
}

#[test]
fn unknown_output_format_rejected() {
    let dir = tempfile::tempdir().unwrap();
    wcflux_cmd(&dir.path().join("none.toml"))
        .args(["-o", "xml", "products", "list"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn missing_config_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    wcflux_cmd(&dir.path().join("none.toml"))
        .args(["products", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No store configured"));
}

#[test]
fn malformed_config_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[profiles.main\nsite_url = ").unwrap();

    let output = wcflux_cmd(&config)
        .args(["products", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("config loading failed"), "{text}");
    assert!(!text.contains("No store configured"), "{text}");
}

#[test]
fn unknown_profile_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    wcflux_cmd(&config)
        .args(["-p", "nope", "products", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn profiles_marks_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    wcflux_cmd(&config)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("main *")
                .and(predicate::str::contains("staging\thttps://staging.test")),
        );
}

#[test]
fn use_switches_default_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    wcflux_cmd(&config)
        .args(["config", "use", "staging"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("default_profile = \"staging\""));
    // Other profiles survive the rewrite.
    assert!(written.contains("[profiles.main]"));
}

#[test]
fn use_unknown_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    wcflux_cmd(&config)
        .args(["config", "use", "ghost"])
        .assert()
        .code(2);
}

#[test]
fn show_masks_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    let output = wcflux_cmd(&config)
        .args(["-o", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("****"));
    assert!(!stdout.contains("plain-secret"));
    assert!(!stdout.contains("cs_1"));
}

// ── Store-backed commands ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn products_get_renders_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Linen Shirt",
            "sku": "LS-1",
            "regular_price": "49.00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let uri = server.uri();
    let config = dir.path().join("none.toml");
    let output = tokio::task::spawn_blocking(move || {
        wcflux_cmd(&config)
            .args(["--site-url", &uri, "--username", "admin", "--password", "pw"])
            .args(["-o", "json", "products", "get", "42"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Linen Shirt"));
    assert!(stdout.contains("LS-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn products_get_missing_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "woocommerce_rest_product_invalid_id",
            "message": "Invalid ID.",
            "data": { "status": 404 }
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let uri = server.uri();
    let config = dir.path().join("none.toml");
    let output = tokio::task::spawn_blocking(move || {
        wcflux_cmd(&config)
            .args(["--site-url", &uri, "--username", "admin", "--password", "pw"])
            .args(["products", "get", "7"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_all_stops_on_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Mug"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let uri = server.uri();
    let config = dir.path().join("none.toml");
    let output = tokio::task::spawn_blocking(move || {
        wcflux_cmd(&config)
            .args(["--site-url", &uri, "--username", "admin", "--password", "pw"])
            .args(["-o", "plain", "products", "list", "--all", "--limit", "0"])
            .timeout(std::time::Duration::from_secs(30))
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
}

#[test]
fn unreachable_store_is_connection_error() {
    // Bind then drop to get a local port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let dir = tempfile::tempdir().unwrap();
    let output = wcflux_cmd(&dir.path().join("none.toml"))
        .args(["--site-url", &format!("http://127.0.0.1:{port}")])
        .args(["--username", "a", "--password", "b"])
        .args(["products", "get", "1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}

#[test]
fn delete_without_yes_refuses_non_interactive() {
    let dir = tempfile::tempdir().unwrap();
    wcflux_cmd(&dir.path().join("none.toml"))
        .args(["--site-url", "http://127.0.0.1:9", "--username", "a", "--password", "b"])
        .args(["products", "delete", "5"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}
