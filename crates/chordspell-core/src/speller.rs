//! Note speller: picks the letter name and accidental for an interval above a root.

use crate::dictionary::{ChordQualityDefinition, SpellingPolicy};
use crate::error::ChordError;
use crate::interval::{self, IntervalSpec};
use crate::pitch::{Accidental, Note};

/// Letter step for `spec` after the policy override.
///
/// Overrides only touch non-compound intervals; extensions keep their table
/// letter.
pub fn letter_step(spec: &IntervalSpec, policy: SpellingPolicy) -> u8 {
    if spec.compound {
        return spec.letter_step;
    }
    match (policy, spec.semitones) {
        (SpellingPolicy::Augmented, 8) => 4,
        (SpellingPolicy::Diminished, 3) => 2,
        (SpellingPolicy::Diminished, 6) => 4,
        (SpellingPolicy::Diminished, 9) => 6,
        _ => spec.letter_step,
    }
}

/// Spells the note `interval` above `root`.
///
/// # Example
/// ```
/// use chordspell_core::dictionary::SpellingPolicy;
/// use chordspell_core::pitch::Note;
/// use chordspell_core::speller::spell;
///
/// let root: Note = "E♭".parse().unwrap();
/// let third = spell(root, "3", SpellingPolicy::Standard).unwrap();
/// assert_eq!(third.to_string(), "G");
///
/// let d: Note = "D".parse().unwrap();
/// let seventh = spell(d, "𝄫7", SpellingPolicy::Diminished).unwrap();
/// assert_eq!(seventh.to_string(), "C𝄫");
/// ```
pub fn spell(root: Note, interval: &str, policy: SpellingPolicy) -> Result<Note, ChordError> {
    let spec = interval::lookup(interval)?;
    let target_letter = root.letter.step(letter_step(spec, policy));
    let alteration = |root: Note| {
        let target = root.pitch_class().transpose(spec.semitones);
        target_letter.natural_pitch_class().interval_to(target)
    };

    let altered = alteration(root);
    if let Some(accidental) = Accidental::from_alteration(altered) {
        return Ok(Note::new(target_letter, accidental));
    }

    // Reachable from the bare letter: the root's accidental is what overflows.
    if Accidental::from_alteration(alteration(Note::natural(root.letter))).is_some() {
        return Err(ChordError::AccidentalOutOfRange {
            root: root.to_string(),
            interval: spec.symbol.to_string(),
        });
    }
    Err(ChordError::UnreachableAlteration {
        letter: target_letter.as_char(),
        interval: spec.symbol.to_string(),
        alteration: altered,
    })
}

/// Spells every interval of a quality above `root`, in interval order.
///
/// On natural C the stored canonical notes are returned as written.
pub fn spell_quality(
    root: Note,
    definition: &ChordQualityDefinition,
) -> Result<Vec<String>, ChordError> {
    if root.is_c_natural() {
        return Ok(definition.notes.clone());
    }
    let policy = definition.policy();
    definition
        .intervals
        .iter()
        .map(|symbol| spell(root, symbol, policy).map(|note| note.to_string()))
        .collect()
}
