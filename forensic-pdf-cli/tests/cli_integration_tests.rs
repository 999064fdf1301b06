//! Integration tests for the `fpdf` CLI binary.
//!
//! Spawns the built binary and inspects its stdout/stderr/exit code, the
//! way the original integration tests in this crate did, but against the
//! forensic command surface (`info`, `extract-text`, `cache`, `find`,
//! `pipeline-tjpb`) rather than PDF creation.

use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;
use tempfile::{tempdir, TempDir};

fn get_cli_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("fpdf");
    #[cfg(windows)]
    path.set_extension("exe");
    path
}

fn setup_temp_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

fn run_cli_command(args: &[&str]) -> Result<std::process::Output> {
    let output = Command::new(get_cli_path()).args(args).output()?;
    Ok(output)
}

/// A minimal but structurally valid single-page PDF, built the same way
/// the ingestion pipeline's own tests build one.
fn minimal_pdf_bytes() -> Vec<u8> {
    let header = b"%PDF-1.4\n";
    let obj1_start = header.len();
    let obj1 = b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n";
    let obj2_start = obj1_start + obj1.len();
    let obj2 = b"2 0 obj\n<< /Type /Pages /Kids [] /Count 0 >>\nendobj\n";
    let xref_start = obj2_start + obj2.len();
    let xref = format!(
        "xref\n0 3\n0000000000 65535 f \n{:010} 00000 n \n{:010} 00000 n \ntrailer\n<< /Size 3 /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        obj1_start, obj2_start, xref_start
    );

    let mut content = Vec::new();
    content.extend_from_slice(header);
    content.extend_from_slice(obj1);
    content.extend_from_slice(obj2);
    content.extend_from_slice(xref.as_bytes());
    content
}

#[test]
fn test_cli_help_command() {
    let output = run_cli_command(&["--help"]).expect("Help command should work");

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fpdf"), "Should show program name");
    assert!(stdout.contains("Commands"), "Should show available commands");
    assert!(stdout.contains("info"), "Should list info command");
    assert!(stdout.contains("load"), "Should list load command");
    assert!(stdout.contains("find"), "Should list find command");
}

#[test]
fn test_cli_version_command() {
    let output = run_cli_command(&["--version"]).expect("Version command should work");

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fpdf"), "Should show program name");
}

#[test]
fn test_cli_invalid_command() {
    let output = run_cli_command(&["invalid-command"]).expect("Command should run");

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unrecognized"),
        "Should show error for invalid command"
    );
}

#[test]
fn test_cli_info_command_with_nonexistent_file() {
    let temp_dir = setup_temp_dir();
    let nonexistent_path = temp_dir.path().join("nonexistent.pdf");

    let output = run_cli_command(&[nonexistent_path.to_str().unwrap(), "info"])
        .expect("CLI command should run");

    assert!(!output.status.success(), "Command should fail for nonexistent file");
    assert_eq!(output.status.code(), Some(1), "missing file is a user error");
}

#[test]
fn test_cli_info_command_with_minimal_pdf() {
    let temp_dir = setup_temp_dir();
    let pdf_path = temp_dir.path().join("minimal.pdf");
    std::fs::write(&pdf_path, minimal_pdf_bytes()).unwrap();

    let output = run_cli_command(&[pdf_path.to_str().unwrap(), "info"])
        .expect("info command should run");

    assert!(output.status.success(), "info should succeed on a valid PDF");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PDF Version"), "should show the PDF version");
}

#[test]
fn test_cli_extract_text_with_minimal_pdf() {
    let temp_dir = setup_temp_dir();
    let pdf_path = temp_dir.path().join("minimal.pdf");
    std::fs::write(&pdf_path, minimal_pdf_bytes()).unwrap();
    let output_path = temp_dir.path().join("out.txt");

    let output = run_cli_command(&[
        pdf_path.to_str().unwrap(),
        "extract-text",
        "-o",
        output_path.to_str().unwrap(),
    ])
    .expect("extract-text should run");

    assert!(output.status.success());
    assert!(output_path.exists(), "output text file should be created");
}

#[test]
fn test_cli_load_and_cache_list_round_trip() {
    let temp_dir = setup_temp_dir();
    let cache_dir = temp_dir.path().join("cache");
    let pdf_path = temp_dir.path().join("minimal.pdf");
    std::fs::write(&pdf_path, minimal_pdf_bytes()).unwrap();

    let load_output = run_cli_command(&[
        "--cache-dir",
        cache_dir.to_str().unwrap(),
        "-",
        "load",
        "--input-file",
        pdf_path.to_str().unwrap(),
    ])
    .expect("load should run");
    assert!(load_output.status.success(), "load should succeed for a valid PDF");

    let list_output = run_cli_command(&["--cache-dir", cache_dir.to_str().unwrap(), "-", "cache", "list"])
        .expect("cache list should run");
    assert!(list_output.status.success());
    let stdout = String::from_utf8_lossy(&list_output.stdout);
    assert!(stdout.contains("minimal.pdf"), "cache list should show the loaded file");
}

#[test]
fn test_cli_cache_stats_on_empty_cache() {
    let temp_dir = setup_temp_dir();
    let cache_dir = temp_dir.path().join("cache");

    let output = run_cli_command(&["--cache-dir", cache_dir.to_str().unwrap(), "-", "cache", "stats"])
        .expect("cache stats should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("caches: 0"));
}

#[test]
fn test_cli_cache_clear_without_confirm_is_rejected() {
    let temp_dir = setup_temp_dir();
    let cache_dir = temp_dir.path().join("cache");

    let output = run_cli_command(&["--cache-dir", cache_dir.to_str().unwrap(), "-", "cache", "clear"])
        .expect("cache clear should run");

    assert!(!output.status.success(), "clear without --confirm must fail");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_find_without_selector_is_a_user_error() {
    let temp_dir = setup_temp_dir();
    let cache_dir = temp_dir.path().join("cache");

    let output = run_cli_command(&[
        "--cache-dir",
        cache_dir.to_str().unwrap(),
        "find",
        "--text",
        "invoice",
    ])
    .expect("find should run");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_pipeline_tjpb_rejects_pg_uri() {
    let temp_dir = setup_temp_dir();

    let output = run_cli_command(&[
        "-",
        "pipeline-tjpb",
        "--input-dir",
        temp_dir.path().to_str().unwrap(),
        "--pg-uri",
        "postgres://example",
    ])
    .expect("pipeline-tjpb should run");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pg-uri"), "should explain why --pg-uri was rejected");
}

#[test]
fn test_cli_missing_required_arguments() {
    let output = run_cli_command(&["-", "load"]).expect("Command should run");

    assert!(!output.status.success(), "load without input should fail");
    assert_eq!(output.status.code(), Some(1));
}
