//! Chord quality transposer.

use serde::Serialize;

use crate::dictionary::{ChordDictionary, ChordQualityDefinition};
use crate::error::ChordError;
use crate::pcset::PitchClassSet;
use crate::pitch::Note;
use crate::speller;

/// One quality spelled on one root. Built per query, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransposedChord {
    pub root: Note,
    pub quality: String,
    pub intervals: Vec<String>,
    pub notes: Vec<String>,
    /// Pitch class of each note, in note order.
    pub pcs: Vec<u8>,
    #[serde(skip)]
    pub pitch_class_set: PitchClassSet,
    pub binary: String,
    pub decimal: u32,
    pub aliases: Vec<String>,
    pub full_name: String,
    pub display_name: String,
    pub forte_number: String,
}

impl TransposedChord {
    /// Chord symbol as written, e.g. `"E♭maj7"`.
    pub fn symbol(&self) -> String {
        let suffix = if self.display_name.is_empty() && self.quality != "maj" {
            self.quality.as_str()
        } else {
            self.display_name.as_str()
        };
        format!("{}{}", self.root, suffix)
    }

    /// Pitch classes in ascending order with duplicates removed.
    pub fn sorted_pcs(&self) -> Vec<u8> {
        self.pitch_class_set.to_vec()
    }
}

/// Transposes the named quality to `root`.
///
/// # Example
/// ```
/// use chordspell_core::dictionary::ChordDictionary;
/// use chordspell_core::transpose::transpose;
///
/// let dictionary = ChordDictionary::builtin().unwrap();
/// let chord = transpose("D".parse().unwrap(), "maj7", &dictionary).unwrap();
/// assert_eq!(chord.notes, vec!["D", "F♯", "A", "C♯"]);
/// assert_eq!(chord.binary, "001001000110");
/// assert_eq!(chord.decimal, 582);
/// ```
pub fn transpose(
    root: Note,
    quality: &str,
    dictionary: &ChordDictionary,
) -> Result<TransposedChord, ChordError> {
    let definition = dictionary
        .get(quality)
        .ok_or_else(|| ChordError::unknown_quality(quality))?;
    transpose_definition(root, quality, definition)
}

/// Transposes a definition that is not necessarily held by a dictionary.
pub fn transpose_definition(
    root: Note,
    quality: &str,
    definition: &ChordQualityDefinition,
) -> Result<TransposedChord, ChordError> {
    let notes = speller::spell_quality(root, definition)?;
    let (pcs, pitch_class_set, binary, decimal) = if root.is_c_natural() {
        (
            definition.pcs.clone(),
            PitchClassSet::from_values(definition.pcs.iter().copied()),
            definition.binary.clone(),
            definition.decimal,
        )
    } else {
        let pcs = notes
            .iter()
            .map(|note| note.parse::<Note>().map(|n| n.pitch_class().value()))
            .collect::<Result<Vec<u8>, ChordError>>()?;
        let set = PitchClassSet::from_values(pcs.iter().copied());
        (pcs, set, set.to_binary(), set.decimal())
    };

    Ok(TransposedChord {
        root,
        quality: quality.to_string(),
        intervals: definition.intervals.clone(),
        notes,
        pcs,
        pitch_class_set,
        binary,
        decimal,
        aliases: definition.aliases.clone(),
        full_name: definition.full_name.clone(),
        display_name: definition.display_name.clone(),
        forte_number: definition.forte_number.clone(),
    })
}
