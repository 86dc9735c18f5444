//! Error types for chord spelling, transposition, and dictionary validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the core spelling and transposition operations.
///
/// Every variant except [`ChordError::UnreachableAlteration`] is an ordinary,
/// caller-recoverable condition. `UnreachableAlteration` means the interval
/// table or the codec is broken and should be treated as a bug, see
/// [`ChordError::is_defect`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    /// The note symbol has an unknown letter or an unrecognized accidental sequence.
    #[error("invalid note symbol '{symbol}'")]
    InvalidNoteSymbol { symbol: String },

    /// The quality name is not a key of the dictionary.
    #[error("unknown chord quality '{name}'")]
    UnknownQuality { name: String },

    /// The interval symbol is absent from the interval table.
    #[error("unknown interval symbol '{symbol}'")]
    UnknownIntervalSymbol { symbol: String },

    /// Spelling produced an alteration outside {0, 1, 2, 10, 11}.
    #[error("unreachable alteration {alteration} spelling '{interval}' on letter {letter}")]
    UnreachableAlteration {
        letter: char,
        interval: String,
        alteration: u8,
    },

    /// The root's own accidental pushes the interval past a double accidental.
    #[error("'{interval}' above root '{root}' needs more than a double accidental")]
    AccidentalOutOfRange { root: String, interval: String },
}

impl ChordError {
    /// Returns the stable error code (e.g., "C001").
    pub fn code(&self) -> &'static str {
        match self {
            ChordError::InvalidNoteSymbol { .. } => "C001",
            ChordError::UnknownQuality { .. } => "C002",
            ChordError::UnknownIntervalSymbol { .. } => "C003",
            ChordError::UnreachableAlteration { .. } => "C004",
            ChordError::AccidentalOutOfRange { .. } => "C005",
        }
    }

    /// Returns true when the error signals an internal invariant violation
    /// rather than bad input.
    pub fn is_defect(&self) -> bool {
        matches!(self, ChordError::UnreachableAlteration { .. })
    }

    pub(crate) fn invalid_note(symbol: impl Into<String>) -> Self {
        ChordError::InvalidNoteSymbol {
            symbol: symbol.into(),
        }
    }

    pub(crate) fn unknown_quality(name: impl Into<String>) -> Self {
        ChordError::UnknownQuality { name: name.into() }
    }
}

/// Errors that can occur while loading a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object keyed by quality name.
    #[error("dictionary root must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Kinds of problems the dictionary validator reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// V001: Pitch classes derived from intervals differ from stored pcs
    IntervalPcsMismatch,
    /// V002: Pitch classes derived from notes differ from stored pcs
    NotesPcsMismatch,
    /// V003: Pitch classes decoded from the binary string differ from stored pcs
    BinaryPcsMismatch,
    /// V004: Binary string read as an integer differs from stored decimal
    BinaryDecimalMismatch,
    /// V005: Binary string is not exactly twelve '0'/'1' characters
    MalformedBinary,
    /// V006: Interval symbol is missing from the interval table
    UnknownInterval,
    /// V007: Note symbol cannot be parsed
    InvalidNote,
    /// V008: A note does not sound the pitch class its interval implies
    NoteIntervalMismatch,
    /// V009: Entry could not be deserialized and was skipped
    MalformedEntry,
}

impl IssueKind {
    /// Returns the issue code string (e.g., "V001").
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::IntervalPcsMismatch => "V001",
            IssueKind::NotesPcsMismatch => "V002",
            IssueKind::BinaryPcsMismatch => "V003",
            IssueKind::BinaryDecimalMismatch => "V004",
            IssueKind::MalformedBinary => "V005",
            IssueKind::UnknownInterval => "V006",
            IssueKind::InvalidNote => "V007",
            IssueKind::NoteIntervalMismatch => "V008",
            IssueKind::MalformedEntry => "V009",
        }
    }

    /// Returns the human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::IntervalPcsMismatch => "Interval/PCS mismatch",
            IssueKind::NotesPcsMismatch => "Notes/PCS mismatch",
            IssueKind::BinaryPcsMismatch => "Binary/PCS mismatch",
            IssueKind::BinaryDecimalMismatch => "Binary/Decimal mismatch",
            IssueKind::MalformedBinary => "Malformed binary",
            IssueKind::UnknownInterval => "Unknown interval",
            IssueKind::InvalidNote => "Invalid note",
            IssueKind::NoteIntervalMismatch => "Note/Interval mismatch",
            IssueKind::MalformedEntry => "Malformed entry",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single validator observation about one dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dictionary key of the offending quality.
    pub quality: String,
    /// What went wrong.
    pub kind: IssueKind,
    /// Value recomputed from first principles.
    pub expected: String,
    /// Value found in the dictionary.
    pub actual: String,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        quality: impl Into<String>,
        kind: IssueKind,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            quality: quality.into(),
            kind,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} in '{}' (expected {}, got {})",
            self.kind,
            self.kind.label(),
            self.quality,
            self.expected,
            self.actual
        )
    }
}
