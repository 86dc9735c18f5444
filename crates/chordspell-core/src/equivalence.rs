//! Set-equivalence finder.
//!
//! Two (root, quality) pairs are equivalent when their transpositions sound
//! the same pitch-class set. An equivalent on the same root pitch class is an
//! alternative spelling; on another root it is a named inversion.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::Serialize;

use crate::dictionary::{ChordDictionary, ChordQualityDefinition};
use crate::error::ChordError;
use crate::pcset::PitchClassSet;
use crate::pitch::{Accidental, Letter, Note};
use crate::transpose::{transpose, transpose_definition, TransposedChord};

const fn note(letter: Letter, accidental: Accidental) -> Note {
    Note::new(letter, accidental)
}

/// The seventeen roots searched for equivalents: naturals plus the common
/// sharp and flat spellings of each black key.
pub const ROOTS: [Note; 17] = [
    note(Letter::C, Accidental::Natural),
    note(Letter::C, Accidental::Sharp),
    note(Letter::D, Accidental::Flat),
    note(Letter::D, Accidental::Natural),
    note(Letter::D, Accidental::Sharp),
    note(Letter::E, Accidental::Flat),
    note(Letter::E, Accidental::Natural),
    note(Letter::F, Accidental::Natural),
    note(Letter::F, Accidental::Sharp),
    note(Letter::G, Accidental::Flat),
    note(Letter::G, Accidental::Natural),
    note(Letter::G, Accidental::Sharp),
    note(Letter::A, Accidental::Flat),
    note(Letter::A, Accidental::Natural),
    note(Letter::A, Accidental::Sharp),
    note(Letter::B, Accidental::Flat),
    note(Letter::B, Accidental::Natural),
];

/// One root per pitch class, black keys spelled sharp.
pub const SHARP_ROOTS: [Note; 12] = [
    note(Letter::C, Accidental::Natural),
    note(Letter::C, Accidental::Sharp),
    note(Letter::D, Accidental::Natural),
    note(Letter::D, Accidental::Sharp),
    note(Letter::E, Accidental::Natural),
    note(Letter::F, Accidental::Natural),
    note(Letter::F, Accidental::Sharp),
    note(Letter::G, Accidental::Natural),
    note(Letter::G, Accidental::Sharp),
    note(Letter::A, Accidental::Natural),
    note(Letter::A, Accidental::Sharp),
    note(Letter::B, Accidental::Natural),
];

/// A (root, quality) pair sounding the same set as the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalent {
    pub root: Note,
    pub quality: String,
    /// Semitones from the query root up to this root.
    pub root_interval: u8,
    pub intervals: Vec<String>,
    pub notes: Vec<String>,
    /// Pitch class of each note, in note order.
    pub pcs: Vec<u8>,
}

impl Equivalent {
    fn from_chord(query_root: Note, chord: &TransposedChord) -> Self {
        Equivalent {
            root: chord.root,
            quality: chord.quality.clone(),
            root_interval: query_root
                .pitch_class()
                .interval_to(chord.root.pitch_class()),
            intervals: chord.intervals.clone(),
            notes: chord.notes.clone(),
            pcs: chord.pcs.clone(),
        }
    }

    /// Root and quality written together, e.g. `"E♭dim7"`.
    pub fn chord(&self) -> String {
        format!("{}{}", self.root, self.quality)
    }
}

/// Finder results split by root interval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalents {
    /// Same root pitch class, different name or spelling.
    pub alternative_spellings: Vec<Equivalent>,
    /// Different root pitch class.
    pub named_inversions: Vec<Equivalent>,
}

impl Equivalents {
    pub fn partition(found: Vec<Equivalent>) -> Self {
        let (alternative_spellings, named_inversions): (Vec<_>, Vec<_>) =
            found.into_iter().partition(|eq| eq.root_interval == 0);
        Equivalents {
            alternative_spellings,
            named_inversions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.alternative_spellings.is_empty() && self.named_inversions.is_empty()
    }
}

/// Transposes a candidate, skipping recoverable failures.
fn candidate(
    root: Note,
    name: &str,
    definition: &ChordQualityDefinition,
) -> Result<Option<TransposedChord>, ChordError> {
    match transpose_definition(root, name, definition) {
        Ok(chord) => Ok(Some(chord)),
        Err(e) if e.is_defect() => Err(e),
        Err(e) => {
            debug!(
                "event=candidate_skipped module=equivalence root={} quality={} error_code={} error={}",
                root,
                name,
                e.code(),
                e
            );
            Ok(None)
        }
    }
}

/// Brute-force search over [`ROOTS`] and every quality.
///
/// The query pair itself is excluded. Results are sorted by root interval;
/// ties keep root-then-quality search order.
///
/// # Example
/// ```
/// use chordspell_core::dictionary::ChordDictionary;
/// use chordspell_core::equivalence::find_equivalents;
///
/// let dictionary = ChordDictionary::builtin().unwrap();
/// let found = find_equivalents("C".parse().unwrap(), "6", &dictionary).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].chord(), "Am7");
/// assert_eq!(found[0].root_interval, 9);
/// ```
pub fn find_equivalents(
    root: Note,
    quality: &str,
    dictionary: &ChordDictionary,
) -> Result<Vec<Equivalent>, ChordError> {
    let query = transpose(root, quality, dictionary)?;

    let mut found = Vec::new();
    for candidate_root in ROOTS {
        for (name, definition) in dictionary.iter() {
            if candidate_root == root && name == quality {
                continue;
            }
            if let Some(chord) = candidate(candidate_root, name, definition)? {
                if chord.pitch_class_set == query.pitch_class_set {
                    found.push(Equivalent::from_chord(root, &chord));
                }
            }
        }
    }
    found.sort_by_key(|eq| eq.root_interval);
    Ok(found)
}

/// Every transposition over [`ROOTS`], bucketed by pitch-class set.
///
/// Answers the same queries as [`find_equivalents`] without re-spelling the
/// whole dictionary each time.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceIndex {
    by_set: HashMap<PitchClassSet, Vec<TransposedChord>>,
}

impl EquivalenceIndex {
    pub fn build(dictionary: &ChordDictionary) -> Result<Self, ChordError> {
        let mut by_set: HashMap<PitchClassSet, Vec<TransposedChord>> = HashMap::new();
        let mut entries = 0usize;
        for root in ROOTS {
            for (name, definition) in dictionary.iter() {
                if let Some(chord) = candidate(root, name, definition)? {
                    by_set.entry(chord.pitch_class_set).or_default().push(chord);
                    entries += 1;
                }
            }
        }
        debug!(
            "event=index_build module=equivalence status=ok entries={} sets={}",
            entries,
            by_set.len()
        );
        Ok(EquivalenceIndex { by_set })
    }

    /// Equivalents of an already transposed chord.
    pub fn find_for(&self, query: &TransposedChord) -> Vec<Equivalent> {
        let mut found: Vec<Equivalent> = self
            .by_set
            .get(&query.pitch_class_set)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|chord| !(chord.root == query.root && chord.quality == query.quality))
                    .map(|chord| Equivalent::from_chord(query.root, chord))
                    .collect()
            })
            .unwrap_or_default();
        found.sort_by_key(|eq| eq.root_interval);
        found
    }

    pub fn find(
        &self,
        root: Note,
        quality: &str,
        dictionary: &ChordDictionary,
    ) -> Result<Vec<Equivalent>, ChordError> {
        let query = transpose(root, quality, dictionary)?;
        Ok(self.find_for(&query))
    }

    /// Number of distinct pitch-class sets indexed.
    pub fn set_count(&self) -> usize {
        self.by_set.len()
    }
}

/// For each quality, labels `"(interval)quality"` of the pairs over
/// [`SHARP_ROOTS`] that share a set with one of its transpositions.
///
/// Qualities that never share a set are absent. Labels are deduplicated in
/// first-seen order, walking sets by ascending decimal value.
pub fn named_inversion_map(
    dictionary: &ChordDictionary,
) -> Result<BTreeMap<String, Vec<String>>, ChordError> {
    let mut by_set: BTreeMap<u16, Vec<(Note, &str)>> = BTreeMap::new();
    for (name, definition) in dictionary.iter() {
        for root in SHARP_ROOTS {
            if let Some(chord) = candidate(root, name, definition)? {
                by_set
                    .entry(chord.pitch_class_set.mask())
                    .or_default()
                    .push((root, name));
            }
        }
    }

    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for chords in by_set.values().filter(|chords| chords.len() > 1) {
        for &(root, quality) in chords {
            let labels = map.entry(quality.to_string()).or_default();
            for &(other_root, other_quality) in chords {
                if other_root == root && other_quality == quality {
                    continue;
                }
                let interval = root.pitch_class().interval_to(other_root.pitch_class());
                let label = format!("({}){}", interval, other_quality);
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builtin() -> ChordDictionary {
        ChordDictionary::builtin().unwrap()
    }

    fn n(s: &str) -> Note {
        s.parse().unwrap()
    }

    fn summary(found: &[Equivalent]) -> Vec<(u8, String, Vec<String>)> {
        found
            .iter()
            .map(|eq| (eq.root_interval, eq.chord(), eq.notes.clone()))
            .collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_roots_are_distinct_and_cover_every_pitch_class() {
        for (i, a) in ROOTS.iter().enumerate() {
            for b in &ROOTS[i + 1..] {
                assert_ne!(a, b);
            }
        }
        let set: PitchClassSet = ROOTS.iter().map(Note::pitch_class).collect();
        assert_eq!(set.len(), 12);
        let sharp: PitchClassSet = SHARP_ROOTS.iter().map(Note::pitch_class).collect();
        assert_eq!(sharp.len(), 12);
    }

    #[test]
    fn test_major_seventh_has_no_equivalents() {
        let found = find_equivalents(n("C"), "maj7", &builtin()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_minor_seventh_relative() {
        let found = find_equivalents(n("A"), "m7", &builtin()).unwrap();
        assert_eq!(
            summary(&found),
            vec![(3, "C6".to_string(), strings(&["C", "E", "G", "A"]))]
        );
    }

    #[test]
    fn test_diminished_seventh_symmetry() {
        let found = find_equivalents(n("C"), "dim7", &builtin()).unwrap();
        assert_eq!(
            summary(&found),
            vec![
                (3, "D♯dim7".to_string(), strings(&["D♯", "F♯", "A", "C"])),
                (3, "E♭dim7".to_string(), strings(&["E♭", "G♭", "B𝄫", "D𝄫"])),
                (6, "F♯dim7".to_string(), strings(&["F♯", "A", "C", "E♭"])),
                (6, "G♭dim7".to_string(), strings(&["G♭", "B𝄫", "D𝄫", "F𝄫"])),
                (9, "Adim7".to_string(), strings(&["A", "C", "E♭", "G♭"])),
            ]
        );
    }

    #[test]
    fn test_augmented_triad() {
        let found = find_equivalents(n("C"), "aug", &builtin()).unwrap();
        assert_eq!(
            summary(&found),
            vec![
                (4, "Eaug".to_string(), strings(&["E", "G♯", "B♯"])),
                (8, "G♯aug".to_string(), strings(&["G♯", "B♯", "D𝄪"])),
                (8, "A♭aug".to_string(), strings(&["A♭", "C", "E"])),
            ]
        );
    }

    #[test]
    fn test_alternative_spelling_partition() {
        let found = find_equivalents(n("C"), "aug7", &builtin()).unwrap();
        let split = Equivalents::partition(found);
        assert_eq!(split.alternative_spellings.len(), 1);
        assert_eq!(split.alternative_spellings[0].chord(), "C7♯5");
        assert_eq!(
            split.alternative_spellings[0].notes,
            strings(&["C", "E", "G♯", "B♭"])
        );
        assert!(split.named_inversions.is_empty());
    }

    #[test]
    fn test_half_diminished() {
        let found = find_equivalents(n("C"), "m7♭5", &builtin()).unwrap();
        let split = Equivalents::partition(found);
        assert!(split.alternative_spellings.is_empty());
        let chords: Vec<String> = split
            .named_inversions
            .iter()
            .map(Equivalent::chord)
            .collect();
        assert_eq!(chords, strings(&["D♯m6", "E♭m6"]));
    }

    #[test]
    fn test_unknown_query_quality() {
        let err = find_equivalents(n("C"), "nope", &builtin()).unwrap_err();
        assert_eq!(err.code(), "C002");
    }

    #[test]
    fn test_query_root_outside_search_roots() {
        // F♭ is spelled differently from every search root but E major still matches
        let found = find_equivalents(n("F♭"), "maj", &builtin()).unwrap();
        let chords: Vec<String> = found.iter().map(Equivalent::chord).collect();
        assert_eq!(chords, strings(&["Emaj"]));
        assert_eq!(found[0].root_interval, 0);
    }

    #[test]
    fn test_index_matches_brute_force() {
        let dictionary = builtin();
        let index = EquivalenceIndex::build(&dictionary).unwrap();
        assert!(index.set_count() > 0);
        assert!(index.set_count() <= dictionary.len() * ROOTS.len());
        for root in ROOTS {
            for name in dictionary.names() {
                assert_eq!(
                    index.find(root, name, &dictionary).unwrap(),
                    find_equivalents(root, name, &dictionary).unwrap(),
                    "{}{}",
                    root,
                    name
                );
            }
        }
    }

    #[test]
    fn test_named_inversion_map() {
        let map = named_inversion_map(&builtin()).unwrap();
        assert!(!map.contains_key("maj7"));
        assert_eq!(map["6"], strings(&["(9)m7"]));
        assert_eq!(map["m7"], strings(&["(3)6"]));

        let dim7 = &map["dim7"];
        for label in ["(3)dim7", "(6)dim7", "(9)dim7"] {
            assert!(dim7.contains(&label.to_string()), "{:?}", dim7);
        }
        assert!(map["aug7"].contains(&"(0)7♯5".to_string()));
    }
}
