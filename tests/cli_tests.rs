mod common;

use common::fixtures::sample_session;
use common::{GeneratedPdf, TestResult};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn powerdeck(args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_powerdeck"))
        .args(args)
        .env("RUST_LOG", "powerdeck=warn")
        .output()
}

fn write_session(dir: &Path, session: &serde_json::Value) -> Result<String, Box<dyn std::error::Error>> {
    let path = dir.join("session.json");
    fs::write(&path, serde_json::to_vec_pretty(session)?)?;
    Ok(path.to_string_lossy().into_owned())
}

#[test]
fn exports_one_section_as_pdf() -> TestResult {
    let dir = tempfile::tempdir()?;
    let session = write_session(dir.path(), &sample_session())?;
    let out = dir.path().join("out");

    let output = powerdeck(&[&session, "--section", "Overview", "--format", "pdf", "--out", &out.to_string_lossy()])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = GeneratedPdf::from_bytes(fs::read(out.join("overview.pdf"))?)?;
    assert_eq!(pdf.page_count(), 1);
    assert!(!out.join("overview.docx").exists());
    Ok(())
}

#[test]
fn exports_the_report_in_every_format() -> TestResult {
    let dir = tempfile::tempdir()?;
    let session = write_session(dir.path(), &sample_session())?;
    let out = dir.path().join("out");

    let output = powerdeck(&[&session, "--report", "--out", &out.to_string_lossy()])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = GeneratedPdf::from_bytes(fs::read(out.join("consolidated-report.pdf"))?)?;
    assert_eq!(pdf.page_count(), 2);
    for extension in ["docx", "pptx"] {
        let bytes = fs::read(out.join(format!("consolidated-report.{}", extension)))?;
        assert!(bytes.starts_with(b"PK"));
    }
    Ok(())
}

#[test]
fn titles_and_configuration_shape_the_output() -> TestResult {
    let dir = tempfile::tempdir()?;
    let session = write_session(dir.path(), &sample_session())?;
    let config = dir.path().join("config.json");
    fs::write(&config, serde_json::to_vec(&json!({"report": {"sections": ["Expenses"]}}))?)?;
    let out = dir.path().join("out");

    let output = powerdeck(&[
        &session,
        "--report",
        "--format",
        "pdf",
        "--title",
        "Monthly Pack",
        "--config",
        &config.to_string_lossy(),
        "--out",
        &out.to_string_lossy(),
    ])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = GeneratedPdf::from_bytes(fs::read(out.join("monthly-pack.pdf"))?)?;
    assert_eq!(pdf.page_count(), 1);
    Ok(())
}

#[test]
fn report_without_charts_fails() -> TestResult {
    let dir = tempfile::tempdir()?;
    let session = write_session(
        dir.path(),
        &json!({"sections": [{"name": "Forecasting", "charts": [{"title": "Forecast"}]}]}),
    )?;
    let out = dir.path().join("out");

    let output = powerdeck(&[&session, "--report", "--out", &out.to_string_lossy()])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("NothingToExport"));
    Ok(())
}

#[test]
fn empty_section_is_reported_but_still_exported() -> TestResult {
    let dir = tempfile::tempdir()?;
    let session = write_session(dir.path(), &sample_session())?;
    let out = dir.path().join("out");

    let output = powerdeck(&[&session, "--section", "Comparison", "--format", "pdf", "--out", &out.to_string_lossy()])?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Comparison"));
    assert!(out.join("comparison.pdf").exists());
    Ok(())
}

#[test]
fn section_or_report_is_required() -> TestResult {
    let dir = tempfile::tempdir()?;
    let session = write_session(dir.path(), &sample_session())?;
    assert!(!powerdeck(&[&session])?.status.success());
    assert!(!powerdeck(&[&session, "--report", "--section", "Overview"])?.status.success());
    Ok(())
}
