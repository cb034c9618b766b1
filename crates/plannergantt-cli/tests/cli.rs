//! CLI integration tests
//!
//! Exercise the built binary end to end: a successful render writes the
//! HTML document and reports the path; every fatal error exits non-zero
//! with a user-facing message.

use std::io::Write;
use std::process::{Command, Output};

fn plannergantt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plannergantt"))
        .args(args)
        .output()
        .expect("failed to execute plannergantt")
}

fn write_export(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

const EXPORT: &str = "Task Name,Bucket Name,Assigned To,Progress,Start date,Due date\n\
    Ship v2,Engineering,Alice Smith,In progress,01/05/2026,01/09/2026\n\
    Plan v3,Product,Bob Jones,Not started,01/12/2026,\n";

#[test]
fn renders_a_chart_and_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path(), "q1_tasks.csv", EXPORT);
    let output = dir.path().join("out/chart.html");

    let result = plannergantt(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Wrote Gantt chart to"));

    // Parent directory was created on demand
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    // Default title is the input stem
    assert!(html.contains("q1_tasks"));
    assert!(html.contains("Ship v2"));
}

#[test]
fn title_flag_overrides_the_stem() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path(), "tasks.csv", EXPORT);
    let output = dir.path().join("chart.html");

    let result = plannergantt(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--title",
        "Q1 Delivery",
    ]);

    assert!(result.status.success());
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("Q1 Delivery"));
}

#[test]
fn csv_alias_matches_input_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path(), "tasks.csv", EXPORT);
    let output = dir.path().join("chart.html");

    let result = plannergantt(&[
        "--csv",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);

    assert!(result.status.success());
}

#[test]
fn missing_input_exits_nonzero() {
    let result = plannergantt(&["--input", "/nonexistent/export.csv"]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Input not found"));
}

#[test]
fn unsupported_format_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path(), "export.json", "{}");

    let result = plannergantt(&["--input", input.to_str().unwrap()]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Unsupported file type"));
}

#[test]
fn excluding_every_bucket_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path(), "tasks.csv", EXPORT);
    let output = dir.path().join("chart.html");

    let result = plannergantt(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--exclude-bucket",
        "Engineering",
        "--exclude-bucket",
        "Product",
    ]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("No tasks with schedule info"));
    assert!(!output.exists());
}

#[test]
fn exclude_bucket_globs_filter_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path(), "tasks.csv", EXPORT);
    let output = dir.path().join("chart.html");

    let result = plannergantt(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--exclude-bucket",
        "Eng*",
    ]);

    assert!(result.status.success());
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(!html.contains("Ship v2"));
    assert!(html.contains("Plan v3"));
}
