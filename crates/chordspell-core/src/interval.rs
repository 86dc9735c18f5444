//! Static interval table.
//!
//! Every interval symbol maps to a diatonic letter step and a semitone
//! distance from the root. The letter step cannot be recovered from the
//! semitone count (`♯5` and `♭6` are both 8 semitones), so this table is the
//! single authority for both.

use crate::error::ChordError;

/// One row of the interval table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSpec {
    /// Canonical symbol, Unicode accidentals.
    pub symbol: &'static str,
    /// Letter names to advance from the root (0..=6).
    pub letter_step: u8,
    /// Semitones above the root, reduced to one octave (0..=11).
    pub semitones: u8,
    /// True for 9th, 11th and 13th extensions.
    pub compound: bool,
}

const fn simple(symbol: &'static str, letter_step: u8, semitones: u8) -> IntervalSpec {
    IntervalSpec {
        symbol,
        letter_step,
        semitones,
        compound: false,
    }
}

const fn compound(symbol: &'static str, letter_step: u8, semitones: u8) -> IntervalSpec {
    IntervalSpec {
        symbol,
        letter_step,
        semitones,
        compound: true,
    }
}

/// The full interval table.
pub static INTERVALS: &[IntervalSpec] = &[
    simple("R", 0, 0),
    simple("♭2", 1, 1),
    simple("2", 1, 2),
    simple("♯2", 1, 3),
    simple("♭3", 2, 3),
    simple("3", 2, 4),
    simple("4", 3, 5),
    simple("♯4", 3, 6),
    simple("♭5", 4, 6),
    simple("5", 4, 7),
    simple("♯5", 4, 8),
    simple("♭6", 5, 8),
    simple("6", 5, 9),
    simple("𝄫7", 6, 9),
    simple("♭7", 6, 10),
    simple("7", 6, 11),
    compound("♭9", 1, 1),
    compound("9", 1, 2),
    compound("♯9", 1, 3),
    compound("11", 3, 5),
    compound("♯11", 3, 6),
    compound("♭13", 5, 8),
    compound("13", 5, 9),
];

/// Rewrites ASCII accidentals (`bb`, `b`, `#`) to the Unicode marks used by the table.
pub fn normalize_symbol(symbol: &str) -> String {
    let trimmed = symbol.trim();
    if let Some(rest) = trimmed.strip_prefix("bb") {
        return format!("𝄫{}", rest);
    }
    if let Some(rest) = trimmed.strip_prefix('b') {
        return format!("♭{}", rest);
    }
    if let Some(rest) = trimmed.strip_prefix('#') {
        return format!("♯{}", rest);
    }
    trimmed.to_string()
}

/// Looks up an interval symbol.
///
/// # Example
/// ```
/// use chordspell_core::interval::lookup;
///
/// let fifth = lookup("♯5").unwrap();
/// assert_eq!((fifth.letter_step, fifth.semitones), (4, 8));
/// let sixth = lookup("b6").unwrap();
/// assert_eq!((sixth.letter_step, sixth.semitones), (5, 8));
/// ```
pub fn lookup(symbol: &str) -> Result<&'static IntervalSpec, ChordError> {
    let find = |s: &str| INTERVALS.iter().find(|spec| spec.symbol == s);
    find(symbol)
        .or_else(|| find(&normalize_symbol(symbol)))
        .ok_or_else(|| ChordError::UnknownIntervalSymbol {
            symbol: symbol.to_string(),
        })
}

/// Semitone distance only (the circle-position view of the table).
pub fn semitones(symbol: &str) -> Result<u8, ChordError> {
    lookup(symbol).map(|spec| spec.semitones)
}
