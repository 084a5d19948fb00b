//! End-to-end checks of the geomarket binary that need no marketplace API.

use std::path::Path;
use std::process::{Command, Output};

fn geomarket(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_geomarket"))
        .args(args)
        .current_dir(dir)
        .env_remove("GEOMARKET_API_URL")
        .env_remove("GEOMARKET_PAGE_SIZE")
        .env_remove("GEOMARKET_CLOUD_COVER_MAX")
        .output()
        .expect("Failed to execute command")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_families_json_lists_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(dir.path(), &["families", "--json"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");
    let families = parsed["data"].as_array().unwrap();
    assert_eq!(families.len(), 5);
    assert_eq!(families[0]["id"], "imagery");
    assert_eq!(families[0]["available"], true);
}

#[test]
fn test_products_json_shows_family() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(dir.path(), &["products", "imagery", "--json"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    assert_eq!(parsed["data"]["id"], "imagery");
    assert!(!parsed["data"]["types"].as_array().unwrap().is_empty());
}

#[test]
fn test_unknown_family_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(dir.path(), &["products", "no-such-family"]);
    assert!(!output.status.success());
}

#[test]
fn test_empty_draft_starts_at_first_step() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(dir.path(), &["draft", "--json"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    assert_eq!(parsed["data"]["step"], 1);
    assert_eq!(parsed["data"]["selectedScenes"].as_array().unwrap().len(), 0);
}

#[test]
fn test_submit_incomplete_draft_fails_without_sending() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(dir.path(), &["submit", "--api-url", "http://127.0.0.1:9"]);
    assert!(!output.status.success());
    assert!(!dir.path().join(".geomarket").exists());
}

#[test]
fn test_config_reports_cli_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(dir.path(), &["config", "--json", "--page-size", "50"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    let rows = parsed["data"].as_array().unwrap();
    let page_size = rows.iter().find(|r| r["key"] == "page_size").unwrap();
    assert_eq!(page_size["value"], "50");
}

#[test]
fn test_order_wizard_refuses_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(dir.path(), &["order", "--json"]);
    assert!(!output.status.success());
}

#[test]
fn test_search_rejects_bad_circle() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(dir.path(), &["search", "--circle", "1,2", "--api-url", "http://127.0.0.1:9"]);
    assert!(!output.status.success());
}

#[test]
fn test_search_dry_run_prints_request_without_sending() {
    let dir = tempfile::tempdir().unwrap();
    let output = geomarket(
        dir.path(),
        &[
            "search",
            "--circle",
            "0,0,111.32",
            "--start",
            "2024-03-01",
            "--end",
            "2024-03-31",
            "--dry-run",
            "--json",
            "--api-url",
            "http://127.0.0.1:9",
        ],
    );
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    assert_eq!(parsed["data"]["dry_run"], true);
    let payload = &parsed["data"]["payload"];
    assert_eq!(payload["datetime"], "2024-03-01T00:00:00Z/2024-03-31T23:59:59Z");
    assert_eq!(payload["limit"], 20);
    let bbox: Vec<f64> =
        payload["bbox"].as_array().unwrap().iter().map(|v| v.as_f64().unwrap()).collect();
    assert_eq!(bbox.len(), 4);
    assert!((bbox[0] + 1.0).abs() < 1e-9 && (bbox[3] - 1.0).abs() < 1e-9);
}
