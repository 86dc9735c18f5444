//! Dictionary export: field-selected records with optional per-root
//! transpositions, and the flat `"{quality}_{root}"` expansion.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::dictionary::{ChordDictionary, ChordQualityDefinition};
use crate::equivalence::{EquivalenceIndex, Equivalents, ROOTS};
use crate::error::ChordError;
use crate::pitch::Note;
use crate::transpose::{transpose_definition, TransposedChord};

/// A field that can be selected for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportField {
    Intervals,
    Notes,
    Pcs,
    Binary,
    Decimal,
    Aliases,
    FullName,
    DisplayName,
    ForteNumber,
    Transpositions,
}

impl ExportField {
    pub const ALL: [ExportField; 10] = [
        ExportField::Intervals,
        ExportField::Notes,
        ExportField::Pcs,
        ExportField::Binary,
        ExportField::Decimal,
        ExportField::Aliases,
        ExportField::FullName,
        ExportField::DisplayName,
        ExportField::ForteNumber,
        ExportField::Transpositions,
    ];

    /// JSON key, as in the dictionary file.
    pub fn key(&self) -> &'static str {
        match self {
            ExportField::Intervals => "intervals",
            ExportField::Notes => "notes",
            ExportField::Pcs => "pcs",
            ExportField::Binary => "binary",
            ExportField::Decimal => "decimal",
            ExportField::Aliases => "aliases",
            ExportField::FullName => "fullName",
            ExportField::DisplayName => "displayName",
            ExportField::ForteNumber => "forteNumber",
            ExportField::Transpositions => "transpositions",
        }
    }

    fn stored_value(&self, definition: &ChordQualityDefinition) -> Option<Value> {
        let value = match self {
            ExportField::Intervals => Value::from(definition.intervals.clone()),
            ExportField::Notes => Value::from(definition.notes.clone()),
            ExportField::Pcs => Value::from(definition.pcs.clone()),
            ExportField::Binary => Value::from(definition.binary.clone()),
            ExportField::Decimal => Value::from(definition.decimal),
            ExportField::Aliases => Value::from(definition.aliases.clone()),
            ExportField::FullName => Value::from(definition.full_name.clone()),
            ExportField::DisplayName => Value::from(definition.display_name.clone()),
            ExportField::ForteNumber => Value::from(definition.forte_number.clone()),
            ExportField::Transpositions => return None,
        };
        Some(value)
    }
}

impl fmt::Display for ExportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A field name that is not one of [`ExportField::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export field '{0}'")]
pub struct UnknownExportField(pub String);

impl FromStr for ExportField {
    type Err = UnknownExportField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportField::ALL
            .into_iter()
            .find(|field| field.key() == s.trim())
            .ok_or_else(|| UnknownExportField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct SpellingRecord {
    chord: String,
    notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct InversionRecord {
    interval: u8,
    chord: String,
    intervals: Vec<String>,
    notes: Vec<String>,
    pcs: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranspositionRecord {
    intervals: Vec<String>,
    notes: Vec<String>,
    pcs: Vec<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alternative_spellings: Vec<SpellingRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    named_inversions: Vec<InversionRecord>,
}

impl TranspositionRecord {
    fn new(chord: &TransposedChord, equivalents: Equivalents) -> Self {
        TranspositionRecord {
            intervals: chord.intervals.clone(),
            notes: chord.notes.clone(),
            pcs: chord.sorted_pcs(),
            alternative_spellings: equivalents
                .alternative_spellings
                .into_iter()
                .map(|eq| SpellingRecord {
                    chord: eq.chord(),
                    notes: eq.notes,
                })
                .collect(),
            named_inversions: equivalents
                .named_inversions
                .into_iter()
                .map(|eq| InversionRecord {
                    interval: eq.root_interval,
                    chord: eq.chord(),
                    intervals: eq.intervals,
                    notes: eq.notes,
                    pcs: eq.pcs,
                })
                .collect(),
        }
    }
}

/// One entry of the flat expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedRecord {
    pub root: Note,
    pub intervals: Vec<String>,
    pub notes: Vec<String>,
    /// Ascending, duplicates removed.
    pub pcs: Vec<u8>,
    pub binary: String,
    pub decimal: u32,
    pub aliases: Vec<String>,
    pub full_name: String,
    pub forte_number: String,
}

/// Transposes to every root in [`ROOTS`], skipping roots that fail recoverably.
fn transpositions(
    name: &str,
    definition: &ChordQualityDefinition,
) -> Result<Vec<TransposedChord>, ChordError> {
    let mut chords = Vec::with_capacity(ROOTS.len());
    for root in ROOTS {
        match transpose_definition(root, name, definition) {
            Ok(chord) => chords.push(chord),
            Err(e) if e.is_defect() => return Err(e),
            Err(e) => debug!(
                "event=export_root_skipped module=export root={} quality={} error={}",
                root, name, e
            ),
        }
    }
    Ok(chords)
}

/// One exported quality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transpositions: Option<BTreeMap<String, TranspositionRecord>>,
}

impl ExportRecord {
    /// Roots that have a transposition entry.
    pub fn transposition_roots(&self) -> Vec<&str> {
        self.transpositions
            .iter()
            .flat_map(|by_root| by_root.keys().map(String::as_str))
            .collect()
    }
}

/// Exports every quality with only the selected fields.
///
/// Stored fields are copied as written. `transpositions` maps each root to
/// its spelled intervals, notes and sorted pcs, plus alternative spellings
/// and named inversions when there are any.
pub fn export_dictionary(
    dictionary: &ChordDictionary,
    fields: &[ExportField],
) -> Result<BTreeMap<String, ExportRecord>, ChordError> {
    let index = if fields.contains(&ExportField::Transpositions) {
        Some(EquivalenceIndex::build(dictionary)?)
    } else {
        None
    };

    let mut export = BTreeMap::new();
    for (name, definition) in dictionary.iter() {
        let mut record = Map::new();
        for field in fields {
            if let Some(value) = field.stored_value(definition) {
                record.insert(field.key().to_string(), value);
            }
        }

        let spelled = match &index {
            Some(index) => {
                let mut by_root = BTreeMap::new();
                for chord in transpositions(name, definition)? {
                    let equivalents = Equivalents::partition(index.find_for(&chord));
                    by_root.insert(
                        chord.root.to_string(),
                        TranspositionRecord::new(&chord, equivalents),
                    );
                }
                Some(by_root)
            }
            None => None,
        };

        export.insert(
            name.to_string(),
            ExportRecord {
                fields: record,
                transpositions: spelled,
            },
        );
    }

    debug!(
        "event=export module=export status=ok qualities={} fields={} sets={}",
        export.len(),
        fields.len(),
        index.as_ref().map_or(0, EquivalenceIndex::set_count)
    );
    Ok(export)
}

/// Flattens the dictionary into `"{quality}_{root}"` records over [`ROOTS`].
pub fn expand_dictionary(
    dictionary: &ChordDictionary,
) -> Result<BTreeMap<String, ExpandedRecord>, ChordError> {
    let mut expanded = BTreeMap::new();
    for (name, definition) in dictionary.iter() {
        for chord in transpositions(name, definition)? {
            let key = format!("{}_{}", name, chord.root);
            expanded.insert(
                key,
                ExpandedRecord {
                    root: chord.root,
                    pcs: chord.sorted_pcs(),
                    intervals: chord.intervals,
                    notes: chord.notes,
                    binary: chord.binary,
                    decimal: chord.decimal,
                    aliases: chord.aliases,
                    full_name: chord.full_name,
                    forte_number: chord.forte_number,
                },
            );
        }
    }
    Ok(expanded)
}
