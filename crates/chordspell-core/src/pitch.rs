//! Pitch-class codec: note symbols to pitch-class numbers and back.
//!
//! A [`Note`] is a letter plus an explicit [`Accidental`]. The accidental is
//! decided once, when the symbol is parsed; nothing downstream inspects the
//! original string again.
//!
//! Accepted accidental spellings (the whole remainder after the letter must be
//! exactly one of these, anything else is rejected):
//!
//! | Accidental | Spellings |
//! |---|---|
//! | natural | (empty) |
//! | sharp | `♯`, `#` |
//! | flat | `♭`, `b` |
//! | double sharp | `𝄪`, `♯♯`, `##`, `x` |
//! | double flat | `𝄫`, `♭♭`, `bb` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChordError;

/// An octave-independent pitch class in `0..12`, 0 = C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Creates a pitch class, reducing the value modulo 12.
    pub fn new(value: u8) -> Self {
        PitchClass(value % 12)
    }

    /// Creates a pitch class from any signed semitone count.
    pub fn from_semitones(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    /// Returns the numeric value in `0..12`.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Moves up by `semitones`, wrapping at the octave.
    pub fn transpose(self, semitones: u8) -> Self {
        PitchClass::new(self.0 + semitones % 12)
    }

    /// Ascending interval in semitones from `self` up to `other`.
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.0 + 12 - self.0) % 12
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the seven diatonic letter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Letters in diatonic order starting from C.
    pub const ALL: [Letter; 7] = [
        Letter::C, Letter::D, Letter::E, Letter::F, Letter::G, Letter::A, Letter::B,
    ];

    /// Position of the letter in [`Letter::ALL`].
    pub fn index(self) -> usize {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Advances `steps` letter names, wrapping from B to C.
    pub fn step(self, steps: u8) -> Letter {
        Letter::ALL[(self.index() + steps as usize) % 7]
    }

    /// Pitch class of the unaltered letter.
    pub fn natural_pitch_class(self) -> PitchClass {
        let value = match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        };
        PitchClass(value)
    }

    /// Parses an uppercase letter name.
    pub fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Accidental attached to a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Semitone offset applied to the natural letter.
    pub fn offset(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// Canonical Unicode mark (empty for natural).
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "𝄫",
            Accidental::Flat => "♭",
            Accidental::Natural => "",
            Accidental::Sharp => "♯",
            Accidental::DoubleSharp => "𝄪",
        }
    }

    /// Maps an upward alteration `(target - natural) mod 12` to an accidental.
    ///
    /// Only {0, 1, 2, 10, 11} are representable; everything else returns `None`.
    pub fn from_alteration(alteration: u8) -> Option<Accidental> {
        match alteration {
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            10 => Some(Accidental::DoubleFlat),
            11 => Some(Accidental::Flat),
            _ => None,
        }
    }

    fn parse(marks: &str) -> Option<Accidental> {
        match marks {
            "" => Some(Accidental::Natural),
            "♯" | "#" => Some(Accidental::Sharp),
            "♭" | "b" => Some(Accidental::Flat),
            "𝄪" | "♯♯" | "##" | "x" => Some(Accidental::DoubleSharp),
            "𝄫" | "♭♭" | "bb" => Some(Accidental::DoubleFlat),
            _ => None,
        }
    }
}

/// A spelled note: letter plus accidental, no octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Note {
    pub const C: Note = Note::natural(Letter::C);

    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub const fn natural(letter: Letter) -> Self {
        Self {
            letter,
            accidental: Accidental::Natural,
        }
    }

    /// Pitch class sounded by this spelling.
    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::from_semitones(
            self.letter.natural_pitch_class().value() as i32 + self.accidental.offset(),
        )
    }

    /// True for natural C, the root every canonical definition is written on.
    pub fn is_c_natural(&self) -> bool {
        *self == Note::C
    }
}

impl FromStr for Note {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| ChordError::invalid_note(s))?;
        let accidental = Accidental::parse(chars.as_str())
            .ok_or_else(|| ChordError::invalid_note(s))?;
        Ok(Note { letter, accidental })
    }
}

impl TryFrom<String> for Note {
    type Error = ChordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental.symbol())
    }
}

/// Parses a note symbol and returns its pitch class.
///
/// # Example
/// ```
/// use chordspell_core::pitch::pitch_class_of;
///
/// assert_eq!(pitch_class_of("F♯").unwrap().value(), 6);
/// assert_eq!(pitch_class_of("B𝄫").unwrap().value(), 9);
/// assert!(pitch_class_of("H").is_err());
/// ```
pub fn pitch_class_of(symbol: &str) -> Result<PitchClass, ChordError> {
    symbol.parse::<Note>().map(|note| note.pitch_class())
}

/// Pitch class of a letter name given as a character.
pub fn natural_pitch_class(letter: char) -> Result<PitchClass, ChordError> {
    Letter::from_char(letter)
        .map(Letter::natural_pitch_class)
        .ok_or_else(|| ChordError::invalid_note(letter.to_string()))
}
