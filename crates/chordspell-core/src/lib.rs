//! Chordspell Core Library
//!
//! This crate transposes chord qualities to any root with correct letter and
//! accidental spelling, cross-validates chord dictionaries, and finds
//! (root, quality) pairs that sound the same pitch-class set.
//!
//! # Overview
//!
//! A dictionary holds each quality once, spelled on C:
//!
//! - **Intervals and notes**: ordered, one note per interval
//! - **Encodings**: pitch classes, a 12-character presence string and its decimal value
//! - **Metadata**: aliases, full and display names, Forte number
//!
//! # Example
//!
//! ```
//! use chordspell_core::{find_equivalents, transpose, validate_dictionary, ChordDictionary, Note};
//!
//! let dictionary = ChordDictionary::builtin().unwrap();
//!
//! // Spell a quality on another root
//! let root: Note = "B♭".parse().unwrap();
//! let chord = transpose(root, "7", &dictionary).unwrap();
//! assert_eq!(chord.notes, vec!["B♭", "D", "F", "A♭"]);
//!
//! // Check the dictionary against itself
//! assert!(validate_dictionary(&dictionary).is_ok());
//!
//! // C6 and Am7 share a pitch-class set
//! let found = find_equivalents(Note::C, "6", &dictionary).unwrap();
//! assert_eq!(found[0].chord(), "Am7");
//! ```
//!
//! # Modules
//!
//! - [`pitch`]: Note symbols and pitch classes
//! - [`interval`]: Interval table
//! - [`pcset`]: Pitch-class sets and binary/decimal encodings
//! - [`dictionary`]: Dictionary model, loading and spelling policies
//! - [`speller`]: Letter and accidental selection
//! - [`transpose`]: Quality transposition
//! - [`validation`]: Dictionary consistency checks
//! - [`equivalence`]: Set-equivalence search and index
//! - [`symbol`]: Chord symbol parsing
//! - [`export`]: Field-selected and expanded exports
//! - [`error`]: Error types and issue codes

pub mod dictionary;
pub mod equivalence;
pub mod error;
pub mod export;
pub mod interval;
pub mod pcset;
pub mod pitch;
pub mod speller;
pub mod symbol;
pub mod transpose;
pub mod validation;

// Re-export commonly used types at the crate root
pub use dictionary::{
    ChordDictionary, ChordQualityDefinition, SpellingPolicy, BUILTIN_DICTIONARY_JSON,
};
pub use equivalence::{
    find_equivalents, named_inversion_map, EquivalenceIndex, Equivalent, Equivalents, ROOTS,
    SHARP_ROOTS,
};
pub use error::{ChordError, DictionaryError, IssueKind, ValidationIssue};
pub use export::{expand_dictionary, export_dictionary, ExpandedRecord, ExportField, ExportRecord};
pub use interval::IntervalSpec;
pub use pcset::PitchClassSet;
pub use pitch::{pitch_class_of, Accidental, Letter, Note, PitchClass};
pub use speller::{spell, spell_quality};
pub use symbol::{parse_chord_symbol, ChordSymbol};
pub use transpose::{transpose, TransposedChord};
pub use validation::{validate_dictionary, DuplicateCluster, ValidationReport};
