//! Dictionary validator.
//!
//! Every entry is recomputed from first principles and compared with what the
//! file stores. The pass never stops early: each disagreement becomes a
//! [`ValidationIssue`] and the next check runs.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::Serialize;

use crate::dictionary::{ChordDictionary, ChordQualityDefinition};
use crate::error::{IssueKind, ValidationIssue};
use crate::interval;
use crate::pcset::PitchClassSet;
use crate::pitch::Note;

/// Qualities whose stored pitch-class sets are identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCluster {
    pub pcs: Vec<u8>,
    pub qualities: Vec<String>,
}

/// Outcome of validating a dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of entries checked.
    pub checked: usize,
    /// Issues sorted by kind, then quality.
    pub issues: Vec<ValidationIssue>,
    /// Informational; duplicates are not errors.
    pub duplicates: Vec<DuplicateCluster>,
}

impl ValidationReport {
    /// Returns true if no issues were found.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// Adds an issue without re-sorting.
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Merges issues found while loading (skipped entries) and restores the ordering.
    pub fn merge_load_issues(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
        self.sort();
    }

    pub fn issues_for<'a>(
        &'a self,
        quality: &'a str,
    ) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.issues
            .iter()
            .filter(move |issue| issue.quality == quality)
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind == kind)
            .count()
    }

    fn sort(&mut self) {
        self.issues
            .sort_by(|a, b| (a.kind, &a.quality).cmp(&(b.kind, &b.quality)));
    }
}

/// Validates every entry of a dictionary.
///
/// # Example
/// ```
/// use chordspell_core::dictionary::ChordDictionary;
/// use chordspell_core::validation::validate_dictionary;
///
/// let dictionary = ChordDictionary::builtin().unwrap();
/// let report = validate_dictionary(&dictionary);
/// assert!(report.is_ok());
/// ```
pub fn validate_dictionary(dictionary: &ChordDictionary) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (name, definition) in dictionary.iter() {
        validate_entry(name, definition, &mut report);
        report.checked += 1;
    }
    report.sort();
    report.duplicates = duplicate_clusters(dictionary);

    debug!(
        "event=validate module=validation status={} checked={} issues={} duplicates={}",
        if report.is_ok() { "ok" } else { "issues" },
        report.checked,
        report.issues.len(),
        report.duplicates.len()
    );
    report
}

/// Runs every check for one entry.
pub fn validate_entry(
    name: &str,
    definition: &ChordQualityDefinition,
    report: &mut ValidationReport,
) {
    let stored: BTreeSet<u8> = definition.pcs.iter().copied().collect();

    let semitones = check_intervals(name, definition, &stored, report);
    let notes = check_notes(name, definition, &stored, report);
    check_binary(name, definition, &stored, report);
    check_note_interval_pairs(name, &semitones, &notes, report);
}

fn set_string(set: &BTreeSet<u8>) -> String {
    format!("{:?}", set.iter().collect::<Vec<_>>())
}

fn as_set(set: PitchClassSet) -> BTreeSet<u8> {
    set.to_vec().into_iter().collect()
}

/// Interval table lookups and the interval-derived set.
fn check_intervals(
    name: &str,
    definition: &ChordQualityDefinition,
    stored: &BTreeSet<u8>,
    report: &mut ValidationReport,
) -> Vec<Option<u8>> {
    let semitones: Vec<Option<u8>> = definition
        .intervals
        .iter()
        .map(|symbol| match interval::semitones(symbol) {
            Ok(semis) => Some(semis),
            Err(_) => {
                report.add_issue(ValidationIssue::new(
                    name,
                    IssueKind::UnknownInterval,
                    "interval table symbol",
                    symbol.clone(),
                ));
                None
            }
        })
        .collect();

    if semitones.iter().all(Option::is_some) {
        let derived = as_set(PitchClassSet::from_values(semitones.iter().flatten().copied()));
        if &derived != stored {
            report.add_issue(ValidationIssue::new(
                name,
                IssueKind::IntervalPcsMismatch,
                set_string(&derived),
                set_string(stored),
            ));
        }
    }
    semitones
}

/// Note parsing and the note-derived set.
fn check_notes(
    name: &str,
    definition: &ChordQualityDefinition,
    stored: &BTreeSet<u8>,
    report: &mut ValidationReport,
) -> Vec<Option<(Note, u8)>> {
    let notes: Vec<Option<(Note, u8)>> = definition
        .notes
        .iter()
        .map(|symbol| match symbol.parse::<Note>() {
            Ok(note) => Some((note, note.pitch_class().value())),
            Err(_) => {
                report.add_issue(ValidationIssue::new(
                    name,
                    IssueKind::InvalidNote,
                    "letter A-G with an optional accidental",
                    symbol.clone(),
                ));
                None
            }
        })
        .collect();

    if notes.iter().all(Option::is_some) {
        let derived: BTreeSet<u8> = notes.iter().flatten().map(|(_, pc)| *pc).collect();
        if &derived != stored {
            report.add_issue(ValidationIssue::new(
                name,
                IssueKind::NotesPcsMismatch,
                set_string(&derived),
                set_string(stored),
            ));
        }
    }
    notes
}

/// Binary decoding against the stored pcs and decimal.
fn check_binary(
    name: &str,
    definition: &ChordQualityDefinition,
    stored: &BTreeSet<u8>,
    report: &mut ValidationReport,
) {
    let decoded = match PitchClassSet::from_binary(&definition.binary) {
        Ok(set) => set,
        Err(e) => {
            report.add_issue(ValidationIssue::new(
                name,
                IssueKind::MalformedBinary,
                "12 characters of '0' or '1'",
                format!("'{}' ({})", definition.binary, e),
            ));
            return;
        }
    };

    let decoded_set = as_set(decoded);
    if &decoded_set != stored {
        report.add_issue(ValidationIssue::new(
            name,
            IssueKind::BinaryPcsMismatch,
            set_string(stored),
            format!("{} from '{}'", set_string(&decoded_set), definition.binary),
        ));
    }

    if decoded.decimal() != definition.decimal {
        report.add_issue(ValidationIssue::new(
            name,
            IssueKind::BinaryDecimalMismatch,
            decoded.decimal().to_string(),
            definition.decimal.to_string(),
        ));
    }
}

/// `pc(notes[i]) == semitone(intervals[i])` for every index.
fn check_note_interval_pairs(
    name: &str,
    semitones: &[Option<u8>],
    notes: &[Option<(Note, u8)>],
    report: &mut ValidationReport,
) {
    if semitones.len() != notes.len() {
        report.add_issue(ValidationIssue::new(
            name,
            IssueKind::NoteIntervalMismatch,
            format!("{} notes", semitones.len()),
            format!("{} notes", notes.len()),
        ));
        return;
    }

    for (index, (semis, note)) in semitones.iter().zip(notes).enumerate() {
        if let (Some(semis), Some((note, pc))) = (semis, note) {
            if semis != pc {
                report.add_issue(ValidationIssue::new(
                    name,
                    IssueKind::NoteIntervalMismatch,
                    format!("pitch class {} at index {}", semis, index),
                    format!("{} (pitch class {})", note, pc),
                ));
            }
        }
    }
}

/// Groups qualities by stored pitch-class set, keeping groups of two or more.
pub fn duplicate_clusters(dictionary: &ChordDictionary) -> Vec<DuplicateCluster> {
    let mut groups: BTreeMap<Vec<u8>, Vec<String>> = BTreeMap::new();
    for (name, definition) in dictionary.iter() {
        let key: Vec<u8> = definition
            .pcs
            .iter()
            .copied()
            .collect::<BTreeSet<u8>>()
            .into_iter()
            .collect();
        groups.entry(key).or_default().push(name.to_string());
    }

    groups
        .into_iter()
        .filter(|(_, qualities)| qualities.len() > 1)
        .map(|(pcs, qualities)| DuplicateCluster { pcs, qualities })
        .collect()
}
