//! Dictionary loading with source provenance.
//!
//! A dictionary comes either from a JSON file or from the copy compiled into
//! the core crate. Both paths return the same [`LoadResult`], carrying the
//! BLAKE3 hash of the exact source text and any entries skipped while loading.

use std::path::{Path, PathBuf};

use chordspell_core::{ChordDictionary, DictionaryError, ValidationIssue, BUILTIN_DICTIONARY_JSON};
use serde::{Deserialize, Serialize};

/// Where a dictionary was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The dictionary bundled with the binary.
    Builtin,
    /// A user-supplied JSON file.
    File,
}

impl SourceKind {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Builtin => "builtin",
            SourceKind::File => "file",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of loading a dictionary.
#[derive(Debug)]
pub struct LoadResult {
    pub dictionary: ChordDictionary,
    /// Source kind.
    pub source_kind: SourceKind,
    /// File path, for file sources.
    pub source_path: Option<PathBuf>,
    /// BLAKE3 hash of the source text (hex string).
    pub source_hash: String,
    /// Entries that failed to deserialize and were skipped.
    pub skipped: Vec<ValidationIssue>,
}

impl LoadResult {
    /// Human-readable source label: the file path, or `<builtin>`.
    pub fn source_label(&self) -> String {
        match &self.source_path {
            Some(path) => path.display().to_string(),
            None => "<builtin>".to_string(),
        }
    }

    /// First 16 characters of the source hash.
    pub fn short_hash(&self) -> &str {
        &self.source_hash[..self.source_hash.len().min(16)]
    }
}

/// Errors that can occur during dictionary loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The text is not valid JSON.
    JsonParse { message: String },

    /// The JSON document is not an object keyed by quality name.
    NotAnObject { found: &'static str },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { message } => {
                write!(f, "JSON parse error: {}", message)
            }
            InputError::NotAnObject { found } => {
                write!(f, "dictionary must be a JSON object, got {}", found)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn from_dictionary_error(err: DictionaryError) -> InputError {
    match err {
        DictionaryError::Json(e) => InputError::JsonParse {
            message: e.to_string(),
        },
        DictionaryError::NotAnObject(found) => InputError::NotAnObject { found },
        DictionaryError::Io(e) => InputError::FileRead {
            path: PathBuf::new(),
            source: e,
        },
    }
}

/// Loads the dictionary at `path`, or the bundled one when `path` is `None`.
///
/// Loading is lenient: records that do not deserialize are skipped and
/// reported in [`LoadResult::skipped`].
///
/// # Example
/// ```
/// use chordspell_cli::input::{load_dictionary, SourceKind};
///
/// let loaded = load_dictionary(None).unwrap();
/// assert_eq!(loaded.source_kind, SourceKind::Builtin);
/// assert!(loaded.dictionary.contains("maj7"));
/// ```
pub fn load_dictionary(path: Option<&Path>) -> Result<LoadResult, InputError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            load_from_str(&content, SourceKind::File, Some(path.to_path_buf()))
        }
        None => load_from_str(BUILTIN_DICTIONARY_JSON, SourceKind::Builtin, None),
    }
}

fn load_from_str(
    content: &str,
    source_kind: SourceKind,
    source_path: Option<PathBuf>,
) -> Result<LoadResult, InputError> {
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let (dictionary, skipped) =
        ChordDictionary::from_json_lenient(content).map_err(from_dictionary_error)?;

    log::info!(
        "event=dictionary_loaded module=input status=ok source={} qualities={} skipped={} hash={}",
        source_kind,
        dictionary.len(),
        skipped.len(),
        &source_hash[..16]
    );

    Ok(LoadResult {
        dictionary,
        source_kind,
        source_path,
        source_hash,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordspell_core::IssueKind;

    #[test]
    fn test_source_kind_as_str() {
        assert_eq!(SourceKind::Builtin.as_str(), "builtin");
        assert_eq!(SourceKind::File.as_str(), "file");
        assert_eq!(format!("{}", SourceKind::File), "file");
    }

    #[test]
    fn test_load_builtin() {
        let result = load_dictionary(None).unwrap();
        assert_eq!(result.source_kind, SourceKind::Builtin);
        assert_eq!(result.source_label(), "<builtin>");
        assert_eq!(result.dictionary.len(), 31);
        assert_eq!(
            result.source_hash,
            blake3::hash(BUILTIN_DICTIONARY_JSON.as_bytes())
                .to_hex()
                .to_string()
        );
        assert_eq!(result.short_hash().len(), 16);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("chords.json");
        let json = r#"{
            "maj": {
                "intervals": ["R", "3", "5"],
                "notes": ["C", "E", "G"],
                "pcs": [0, 4, 7],
                "binary": "000010010001",
                "decimal": 145
            },
            "broken": { "notes": 5 }
        }"#;
        std::fs::write(&path, json).unwrap();

        let result = load_dictionary(Some(&path)).unwrap();
        assert_eq!(result.source_kind, SourceKind::File);
        assert_eq!(result.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(result.dictionary.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].kind, IssueKind::MalformedEntry);
    }

    #[test]
    fn test_load_file_not_found() {
        let result = load_dictionary(Some(Path::new("/nonexistent/chords.json")));
        assert!(matches!(result, Err(InputError::FileRead { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("invalid.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let result = load_dictionary(Some(&path));
        assert!(matches!(result, Err(InputError::JsonParse { .. })));
    }

    #[test]
    fn test_load_array_document() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("array.json");
        std::fs::write(&path, "[]").unwrap();

        let result = load_dictionary(Some(&path));
        assert!(matches!(
            result,
            Err(InputError::NotAnObject { found: "array" })
        ));
    }
}
