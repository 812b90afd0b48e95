use std::fs;
use std::process::Command;

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const SAMPLE: &str = "test/oil_sample.csv";

/// Helper function to run oilboard against a dataset
fn run_oilboard(data: &str, args: &[&str]) -> Result<Vec<u8>, String> {
    let output = Command::new(env!("CARGO_BIN_EXE_oilboard"))
        .arg("--data")
        .arg(data)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
}

const CHART_IDS: [&str; 6] = [
    "top_states",
    "bottom_states",
    "oil_type_share",
    "region_share",
    "yearly_trend",
    "yearly_by_oil_type",
];

#[test]
fn test_summary_unfiltered_drops_bad_rows() {
    let out = run_oilboard(SAMPLE, &["summary"]).expect("summary failed");
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total Production:   3,500 KL"), "{}", text);
    assert!(text.contains("Average Production: 1,167 KL"), "{}", text);
    assert!(text.contains("States:             2"), "{}", text);
}

#[test]
fn test_summary_json_filtered() {
    let out = run_oilboard(SAMPLE, &["summary", "--state", "Assam", "--json"]).expect("summary failed");
    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["total_production"], 3000);
    assert_eq!(json["avg_production"], 1500);
    assert_eq!(json["state_count"], 1);
    assert_eq!(json["region_count"], 1);
}

#[test]
fn test_summary_no_match() {
    let out = run_oilboard(SAMPLE, &["summary", "--state", "Assam", "--region", "West", "--json"])
        .expect("summary failed");
    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["total_production"], 0);
    assert_eq!(json["avg_production"], 0);
}

#[test]
fn test_page_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dashboard.html");
    run_oilboard(SAMPLE, &["page", "--region", "West", "-o", path.to_str().unwrap()])
        .expect("page failed");
    let html = fs::read_to_string(&path).unwrap();
    assert!(html.contains("500 KL"));
    assert!(html.contains(r#"<option value="West" selected>West</option>"#));
    assert_eq!(html.matches("Plotly.newPlot").count(), 6);
}

#[test]
fn test_render_png_charts() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("charts");
    run_oilboard(SAMPLE, &["render", "--out-dir", out_dir.to_str().unwrap()]).expect("render failed");
    for id in CHART_IDS {
        let bytes = fs::read(out_dir.join(format!("{}.png", id))).unwrap();
        assert!(is_valid_png(&bytes), "{} is not a valid PNG", id);
    }
}

#[test]
fn test_render_svg_via_options() {
    let dir = TempDir::new().unwrap();
    run_oilboard(
        SAMPLE,
        &["render", "--out-dir", dir.path().to_str().unwrap(), "--options", r#"{"type": "svg"}"#],
    )
    .expect("render failed");
    let svg = fs::read_to_string(dir.path().join("top_states.svg")).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Best Performing States"));
}

#[test]
fn test_render_options_size_unsized_chart() {
    let dir = TempDir::new().unwrap();
    run_oilboard(
        SAMPLE,
        &[
            "render",
            "--out-dir",
            dir.path().to_str().unwrap(),
            "--options",
            r#"{"width": 640, "height": 300}"#,
        ],
    )
    .expect("render failed");
    let bytes = fs::read(dir.path().join("top_states.png")).unwrap();
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    assert_eq!((width, height), (640, 300));
}

#[test]
fn test_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "STATE/UT,Region,Year,Production\nAssam,North East,2019,10\n").unwrap();
    let err = run_oilboard(path.to_str().unwrap(), &["summary"]).unwrap_err();
    assert!(err.contains("Oil_type"), "{}", err);
}

#[test]
fn test_missing_file_fails() {
    let err = run_oilboard("test/does_not_exist.csv", &["summary"]).unwrap_err();
    assert!(err.contains("Failed to load dataset"), "{}", err);
}

#[test]
fn test_bundled_dataset_loads() {
    let out = run_oilboard("data/oil_production.csv", &["summary", "--json"]).expect("summary failed");
    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["state_count"], 11);
    assert_eq!(json["region_count"], 7);
}
