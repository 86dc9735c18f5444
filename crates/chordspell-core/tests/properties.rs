//! Property-based tests for transposition, encodings and equivalence.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p chordspell-core --test properties
//! ```

use std::sync::OnceLock;

use proptest::prelude::*;

use chordspell_core::{
    find_equivalents, interval, transpose, ChordDictionary, Note, PitchClassSet, ROOTS,
};

fn dictionary() -> &'static ChordDictionary {
    static DICTIONARY: OnceLock<ChordDictionary> = OnceLock::new();
    DICTIONARY.get_or_init(|| ChordDictionary::builtin().expect("bundled dictionary parses"))
}

fn quality_names() -> &'static Vec<String> {
    static NAMES: OnceLock<Vec<String>> = OnceLock::new();
    NAMES.get_or_init(|| dictionary().names().map(str::to_string).collect())
}

/// Any of the seventeen search roots.
fn any_root() -> impl Strategy<Value = Note> {
    (0..ROOTS.len()).prop_map(|i| ROOTS[i])
}

/// Any quality name of the bundled dictionary.
fn any_quality() -> impl Strategy<Value = String> {
    (0..quality_names().len()).prop_map(|i| quality_names()[i].clone())
}

// ============================================================================
// 1. Root identity
// ============================================================================

#[test]
fn root_c_reproduces_canonical_fields() {
    for (name, definition) in dictionary().iter() {
        let chord = transpose(Note::C, name, dictionary()).unwrap();
        assert_eq!(chord.intervals, definition.intervals, "{}", name);
        assert_eq!(chord.notes, definition.notes, "{}", name);
        assert_eq!(chord.pcs, definition.pcs, "{}", name);
        assert_eq!(chord.binary, definition.binary, "{}", name);
        assert_eq!(chord.decimal, definition.decimal, "{}", name);
    }
}

// ============================================================================
// 2. Encodings and spelling
// ============================================================================

proptest! {
    /// The binary string decodes to the transposed set and reads as the decimal.
    #[test]
    fn binary_and_decimal_round_trip(root in any_root(), quality in any_quality()) {
        let chord = transpose(root, &quality, dictionary()).unwrap();
        let decoded = PitchClassSet::from_binary(&chord.binary).unwrap();
        prop_assert_eq!(decoded, chord.pitch_class_set);
        prop_assert_eq!(u32::from_str_radix(&chord.binary, 2).unwrap(), chord.decimal);
    }

    /// Every spelled note sounds root + interval.
    #[test]
    fn notes_sound_their_intervals(root in any_root(), quality in any_quality()) {
        let chord = transpose(root, &quality, dictionary()).unwrap();
        prop_assert_eq!(chord.notes.len(), chord.intervals.len());
        for (note, symbol) in chord.notes.iter().zip(&chord.intervals) {
            let note: Note = note.parse().unwrap();
            let semis = interval::semitones(symbol).unwrap();
            prop_assert_eq!(
                note.pitch_class(),
                root.pitch_class().transpose(semis),
                "{}{}: {} for {}", root, quality, note, symbol
            );
        }
    }

    /// The transposed set is the root-C set rotated by the root.
    #[test]
    fn transposed_set_is_rotation(root in any_root(), quality in any_quality()) {
        let on_c = transpose(Note::C, &quality, dictionary()).unwrap();
        let chord = transpose(root, &quality, dictionary()).unwrap();
        prop_assert_eq!(
            chord.pitch_class_set,
            on_c.pitch_class_set.transpose(root.pitch_class().value())
        );
    }

    /// Rotating by k and then by 12 - k is the identity.
    #[test]
    fn set_rotation_inverts(mask in 0u16..4096, k in 0u8..12) {
        let set = PitchClassSet::from_mask(mask);
        prop_assert_eq!(set.transpose(k).transpose(12 - k), set);
        prop_assert_eq!(set.transpose(k).len(), set.len());
    }

    /// Arbitrary note text never panics.
    #[test]
    fn note_parsing_never_panics(s in "\\PC{0,6}") {
        let _ = s.parse::<Note>();
    }
}

// ============================================================================
// 3. Equivalence symmetry
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// B found for A implies A found for B at the inverse interval.
    #[test]
    fn equivalence_is_symmetric(root in any_root(), quality in any_quality()) {
        let found = find_equivalents(root, &quality, dictionary()).unwrap();
        for eq in &found {
            let back = find_equivalents(eq.root, &eq.quality, dictionary()).unwrap();
            let expected_interval = (12 - eq.root_interval) % 12;
            prop_assert!(
                back.iter().any(|b| b.root == root
                    && b.quality == quality
                    && b.root_interval == expected_interval),
                "{}{} -> {} but not back", root, quality, eq.chord()
            );
        }
    }
}
