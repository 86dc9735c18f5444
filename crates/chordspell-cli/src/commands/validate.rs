//! Validate command implementation
//!
//! Cross-checks every dictionary entry and reports the source provenance.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use chordspell_core::{validate_dictionary, DuplicateCluster, ValidationReport};

use super::json_output::{self, issue_to_json, CommandOutput};
use super::reporting;
use crate::input::{LoadResult, SourceKind};

/// Result payload of `validate --json`.
#[derive(Debug, Serialize)]
pub struct ValidateResult {
    /// Source label: file path or `<builtin>`
    pub source: String,
    pub source_kind: SourceKind,
    /// Number of entries checked
    pub checked: usize,
    pub issue_count: usize,
    /// Qualities sharing a stored pitch-class set (informational)
    pub duplicates: Vec<DuplicateCluster>,
    pub duration_ms: u64,
}

/// Run the validate command
///
/// # Arguments
/// * `dictionary` - Optional dictionary path (default: bundled dictionary)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if any issue was found
pub fn run(dictionary: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(dictionary)
    } else {
        run_human(dictionary)
    }
}

/// Validates the loaded entries and folds in the entries skipped at load time.
fn check(loaded: &LoadResult) -> ValidationReport {
    let mut report = validate_dictionary(&loaded.dictionary);
    report.merge_load_issues(loaded.skipped.iter().cloned());
    report
}

fn exit_code(report: &ValidationReport) -> ExitCode {
    if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(dictionary: Option<&Path>) -> Result<ExitCode> {
    let start = Instant::now();

    let label = dictionary
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<builtin>".to_string());
    println!("{} {}", "Validating:".cyan().bold(), label);

    let loaded = crate::input::load_dictionary(dictionary)
        .with_context(|| format!("Failed to load dictionary: {}", label))?;
    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        loaded.source_kind.as_str(),
        loaded.short_hash()
    );

    let report = check(&loaded);
    let duration_ms = start.elapsed().as_millis() as u64;

    print_validation_results(&report);

    if report.is_ok() {
        println!(
            "\n{} {} qualities are consistent ({}ms)",
            "SUCCESS".green().bold(),
            report.checked,
            duration_ms
        );
    } else {
        println!(
            "\n{} Dictionary has {} issue(s) in {} checked qualities ({}ms)",
            "FAILED".red().bold(),
            report.issues.len(),
            report.checked,
            duration_ms
        );
    }
    Ok(exit_code(&report))
}

fn print_validation_results(report: &ValidationReport) {
    if !report.issues.is_empty() {
        println!("\n{}", "Issues:".red().bold());
        for issue in &report.issues {
            println!(
                "  {} {} [{}] {}",
                "x".red(),
                issue.kind.code().red(),
                issue.quality,
                issue.kind.label()
            );
            println!(
                "      {} {}",
                "expected:".dimmed(),
                issue.expected
            );
            println!("      {} {}", "actual:  ".dimmed(), issue.actual);
        }
    }

    if !report.duplicates.is_empty() {
        println!("\n{}", "Shared pitch-class sets:".blue().bold());
        for cluster in &report.duplicates {
            println!(
                "  {} {:?}: {}",
                "i".blue(),
                cluster.pcs,
                cluster.qualities.join(", ")
            );
        }
    }
}

/// Run validate with machine-readable JSON output
fn run_json(dictionary: Option<&Path>) -> Result<ExitCode> {
    let start = Instant::now();

    let Some(loaded) = reporting::load_json(dictionary)? else {
        return Ok(ExitCode::from(1));
    };

    let report = check(&loaded);
    let duration_ms = start.elapsed().as_millis() as u64;

    let result = ValidateResult {
        source: loaded.source_label(),
        source_kind: loaded.source_kind,
        checked: report.checked,
        issue_count: report.issues.len(),
        duplicates: report.duplicates.clone(),
        duration_ms,
    };

    // Skipped entries are already issues here, so they are not repeated as warnings.
    let output = CommandOutput {
        success: report.is_ok(),
        errors: report.issues.iter().map(issue_to_json).collect(),
        warnings: Vec::new(),
        result: Some(result),
        source_hash: Some(loaded.source_hash.clone()),
    };
    json_output::print(&output)?;

    Ok(exit_code(&report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_dictionary;
    use chordspell_core::IssueKind;
    use pretty_assertions::assert_eq;

    fn write_dictionary(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
        let path = dir.path().join("chords.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_builtin_is_valid() {
        let loaded = load_dictionary(None).unwrap();
        let report = check(&loaded);
        assert!(report.is_ok(), "issues: {:?}", report.issues);
        assert_eq!(report.checked, 31);
        assert_eq!(run(None, true).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_skipped_entries_become_issues() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_dictionary(
            &tmp,
            r#"{
                "maj": {
                    "intervals": ["R", "3", "5"],
                    "notes": ["C", "E", "G"],
                    "pcs": [0, 4, 7],
                    "binary": "000010010001",
                    "decimal": 145
                },
                "broken": { "intervals": "R 3 5" }
            }"#,
        );

        let loaded = load_dictionary(Some(&path)).unwrap();
        let report = check(&loaded);
        assert_eq!(report.checked, 1);
        assert_eq!(report.count(IssueKind::MalformedEntry), 1);
        assert_eq!(report.issues_for("broken").count(), 1);

        assert_eq!(run(Some(&path), true).unwrap(), ExitCode::from(1));
        assert_eq!(run(Some(&path), false).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn test_binary_mismatch_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_dictionary(
            &tmp,
            r#"{
                "maj": {
                    "intervals": ["R", "3", "5"],
                    "notes": ["C", "E", "G"],
                    "pcs": [0, 4, 7],
                    "binary": "100010010001",
                    "decimal": 145
                }
            }"#,
        );

        let loaded = load_dictionary(Some(&path)).unwrap();
        let kinds: Vec<IssueKind> = check(&loaded).issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::BinaryPcsMismatch,
                IssueKind::BinaryDecimalMismatch,
            ]
        );
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/chords.json");
        assert_eq!(run(Some(path), true).unwrap(), ExitCode::from(1));
        assert!(run(Some(path), false).is_err());
    }
}
