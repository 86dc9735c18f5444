//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`. Output is one pretty-printed JSON object
//! with a `success` flag, coded errors and warnings, and a command-specific
//! `result`.

use serde::{Deserialize, Serialize};

use chordspell_core::{ChordError, ValidationIssue};

use crate::input::{InputError, LoadResult};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Chord errors pass through their own codes (`C001`...) and dictionary
/// issues theirs (`V001`...).
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Dictionary document is not a JSON object
    pub const NOT_AN_OBJECT: &str = "CLI_003";
}

/// Warning codes for CLI operations.
pub mod warning_codes {
    /// Dictionary entry skipped while loading
    pub const ENTRY_SKIPPED: &str = "CLI_W001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "C002", "V003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Quality the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Suggestion for fixing the error (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            quality: None,
            file: None,
            suggestion: None,
        }
    }

    /// Sets the quality for this error.
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "CLI_W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Quality the warning refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            quality: None,
        }
    }

    /// Sets the quality for this warning.
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }
}

/// JSON envelope shared by every command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T: Serialize> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Warnings, e.g. skipped dictionary entries
    pub warnings: Vec<JsonWarning>,
    /// Command result (on success, and for validate also on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// BLAKE3 hash of the dictionary source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, loaded: &LoadResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings: skipped_warnings(loaded),
            result: Some(result),
            source_hash: Some(loaded.source_hash.clone()),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, loaded: Option<&LoadResult>) -> Self {
        Self {
            success: false,
            errors,
            warnings: loaded.map(skipped_warnings).unwrap_or_default(),
            result: None,
            source_hash: loaded.map(|l| l.source_hash.clone()),
        }
    }
}

/// Prints an output as pretty JSON.
pub fn print<T: Serialize>(output: &CommandOutput<T>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(output)?;
    println!("{}", json);
    Ok(())
}

/// Warnings for entries skipped while loading.
pub fn skipped_warnings(loaded: &LoadResult) -> Vec<JsonWarning> {
    loaded
        .skipped
        .iter()
        .map(|issue| {
            JsonWarning::new(
                warning_codes::ENTRY_SKIPPED,
                format!("entry skipped: {}", issue.actual),
            )
            .with_quality(issue.quality.clone())
        })
        .collect()
}

/// Converts a load error to a JSON error.
pub fn input_error_to_json(error: &InputError, file: Option<&str>) -> JsonError {
    let code = match error {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::JsonParse { .. } => error_codes::JSON_PARSE,
        InputError::NotAnObject { .. } => error_codes::NOT_AN_OBJECT,
    };
    let json_error = JsonError::new(code, error.to_string());
    match file {
        Some(file) => json_error.with_file(file),
        None => json_error,
    }
}

/// Converts a chord error to a JSON error, keeping its own code.
pub fn chord_error_to_json(error: &ChordError) -> JsonError {
    let json_error = JsonError::new(error.code(), error.to_string());
    match error {
        ChordError::UnknownQuality { name } => json_error
            .with_quality(name.clone())
            .with_suggestion("run `chordspell list` to see available qualities"),
        ChordError::AccidentalOutOfRange { .. } => {
            json_error.with_suggestion("respell the root with fewer accidentals")
        }
        ChordError::InvalidNoteSymbol { .. } => {
            json_error.with_suggestion("use a letter A-G with an optional ♯, ♭, #, b, 𝄪, x or 𝄫")
        }
        _ => json_error,
    }
}

/// Converts a validation issue to a JSON error.
pub fn issue_to_json(issue: &ValidationIssue) -> JsonError {
    JsonError::new(issue.kind.code(), issue.to_string()).with_quality(issue.quality.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordspell_core::IssueKind;

    #[test]
    fn test_json_error_skips_empty_fields() {
        let error = JsonError::new(error_codes::FILE_READ, "missing");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "CLI_001", "message": "missing" })
        );
    }

    #[test]
    fn test_chord_error_keeps_code() {
        let error = chord_error_to_json(&ChordError::UnknownQuality {
            name: "maj13".to_string(),
        });
        assert_eq!(error.code, "C002");
        assert_eq!(error.quality.as_deref(), Some("maj13"));
        assert!(error.suggestion.is_some());
    }

    #[test]
    fn test_issue_to_json() {
        let issue = ValidationIssue::new(
            "maj7",
            IssueKind::BinaryPcsMismatch,
            "[0, 4, 7, 11]",
            "[0, 4, 7]",
        );
        let error = issue_to_json(&issue);
        assert_eq!(error.code, "V003");
        assert_eq!(error.quality.as_deref(), Some("maj7"));
    }

    #[test]
    fn test_input_error_codes() {
        let error = input_error_to_json(
            &InputError::JsonParse {
                message: "eof".to_string(),
            },
            Some("chords.json"),
        );
        assert_eq!(error.code, "CLI_002");
        assert_eq!(error.file.as_deref(), Some("chords.json"));

        let error = input_error_to_json(&InputError::NotAnObject { found: "array" }, None);
        assert_eq!(error.code, "CLI_003");
        assert!(error.file.is_none());
    }

    #[test]
    fn test_failure_envelope() {
        let output: CommandOutput<()> =
            CommandOutput::failure(vec![JsonError::new(error_codes::FILE_READ, "nope")], None);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("result").is_none());
        assert!(json.get("source_hash").is_none());
    }
}
