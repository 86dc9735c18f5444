//! Chord-quality dictionary model and loading.
//!
//! A dictionary is a JSON object keyed by quality name. Every record is the
//! canonical root-C form of one quality:
//!
//! ```json
//! {
//!   "maj7": {
//!     "intervals": ["R", "3", "5", "7"],
//!     "notes": ["C", "E", "G", "B"],
//!     "pcs": [0, 4, 7, 11],
//!     "binary": "100010010001",
//!     "decimal": 2193,
//!     "aliases": ["M7"],
//!     "fullName": "major seventh",
//!     "displayName": "maj7",
//!     "forteNumber": "4-20"
//!   }
//! }
//! ```
//!
//! Intervals and notes are kept as the strings found in the file so the
//! validator can report bad symbols instead of refusing the whole document.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{DictionaryError, IssueKind, ValidationIssue};
use crate::interval;

/// JSON source of the dictionary bundled with the crate.
pub const BUILTIN_DICTIONARY_JSON: &str = include_str!("../data/chord_dictionary.json");

/// How a quality's intervals are assigned to letter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingPolicy {
    /// Letter steps straight from the interval table.
    #[default]
    Standard,
    /// An 8-semitone interval is a raised fifth, never a minor sixth.
    Augmented,
    /// 3, 6 and 9 semitones are a minor third, diminished fifth and
    /// diminished seventh.
    Diminished,
}

impl SpellingPolicy {
    /// Classifies a quality from its interval structure.
    ///
    /// Only non-compound intervals count. Symbols missing from the interval
    /// table are ignored here; the validator reports them separately.
    pub fn classify<S: AsRef<str>>(intervals: &[S]) -> SpellingPolicy {
        let mut semis = [false; 12];
        for symbol in intervals {
            if let Ok(spec) = interval::lookup(symbol.as_ref()) {
                if !spec.compound {
                    semis[spec.semitones as usize] = true;
                }
            }
        }

        if semis[4] && semis[8] && !semis[7] {
            SpellingPolicy::Augmented
        } else if semis[3] && semis[6] && !semis[4] && !semis[7] {
            SpellingPolicy::Diminished
        } else {
            SpellingPolicy::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpellingPolicy::Standard => "standard",
            SpellingPolicy::Augmented => "augmented",
            SpellingPolicy::Diminished => "diminished",
        }
    }
}

impl fmt::Display for SpellingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical root-C record for one chord quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordQualityDefinition {
    /// Interval symbols, root first.
    pub intervals: Vec<String>,
    /// Spelled notes on C, same order as `intervals`.
    pub notes: Vec<String>,
    /// Stored pitch classes.
    pub pcs: Vec<u8>,
    /// Twelve-character presence string.
    pub binary: String,
    /// Presence mask as an integer.
    pub decimal: u32,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub forte_number: String,
    /// Explicit spelling policy. Filled in from the intervals when the
    /// record is added to a [`ChordDictionary`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling: Option<SpellingPolicy>,
}

impl ChordQualityDefinition {
    /// Spelling policy for this quality.
    pub fn policy(&self) -> SpellingPolicy {
        self.spelling
            .unwrap_or_else(|| SpellingPolicy::classify(&self.intervals))
    }

    fn resolve_policy(&mut self) {
        if self.spelling.is_none() {
            self.spelling = Some(SpellingPolicy::classify(&self.intervals));
        }
    }
}

/// Immutable map of quality name to definition, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChordDictionary {
    entries: BTreeMap<String, ChordQualityDefinition>,
}

impl ChordDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the dictionary bundled with the crate.
    pub fn builtin() -> Result<Self, DictionaryError> {
        Self::from_json(BUILTIN_DICTIONARY_JSON)
    }

    /// Parses a dictionary, failing on the first malformed record.
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let entries: BTreeMap<String, ChordQualityDefinition> = serde_json::from_str(json)?;
        Ok(entries.into_iter().collect())
    }

    /// Parses a dictionary, skipping records that do not deserialize.
    ///
    /// Each skipped record is returned as a [`IssueKind::MalformedEntry`]
    /// issue so it can be merged into a validation report.
    pub fn from_json_lenient(json: &str) -> Result<(Self, Vec<ValidationIssue>), DictionaryError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = match value {
            serde_json::Value::Object(map) => map,
            other => return Err(DictionaryError::NotAnObject(json_type_name(&other))),
        };

        let mut dictionary = ChordDictionary::new();
        let mut issues = Vec::new();
        for (name, record) in object {
            match serde_json::from_value::<ChordQualityDefinition>(record) {
                Ok(definition) => {
                    dictionary.insert(name, definition);
                }
                Err(e) => {
                    warn!(
                        "event=dictionary_load module=dictionary status=skipped quality={} error={}",
                        name, e
                    );
                    issues.push(ValidationIssue::new(
                        name,
                        IssueKind::MalformedEntry,
                        "chord quality record",
                        e.to_string(),
                    ));
                }
            }
        }

        debug!(
            "event=dictionary_load module=dictionary status=ok qualities={} skipped={}",
            dictionary.len(),
            issues.len()
        );
        Ok((dictionary, issues))
    }

    /// Reads and strictly parses a dictionary file.
    pub fn from_path(path: &Path) -> Result<Self, DictionaryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Adds a definition, resolving its spelling policy.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        mut definition: ChordQualityDefinition,
    ) -> Option<ChordQualityDefinition> {
        definition.resolve_policy();
        self.entries.insert(name.into(), definition)
    }

    pub fn get(&self, name: &str) -> Option<&ChordQualityDefinition> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Quality names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChordQualityDefinition)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds a quality by key, then by alias.
    ///
    /// When several entries list the same alias, the first in key order wins.
    pub fn resolve(&self, text: &str) -> Option<(&str, &ChordQualityDefinition)> {
        if let Some((name, definition)) = self.entries.get_key_value(text) {
            return Some((name.as_str(), definition));
        }
        self.iter()
            .find(|(_, definition)| definition.aliases.iter().any(|alias| alias == text))
    }
}

impl FromIterator<(String, ChordQualityDefinition)> for ChordDictionary {
    fn from_iter<I: IntoIterator<Item = (String, ChordQualityDefinition)>>(iter: I) -> Self {
        let mut dictionary = ChordDictionary::new();
        for (name, definition) in iter {
            dictionary.insert(name, definition);
        }
        dictionary
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
