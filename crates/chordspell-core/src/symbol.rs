//! Chord symbol parsing ("E♭maj7", "Ebmaj7", "F#m", "dim7").

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::dictionary::ChordDictionary;
use crate::error::ChordError;
use crate::pitch::Note;

/// Optional root letter with at most one accidental, then the quality text.
const SYMBOL_PATTERN: &str = r"^([A-G][b#♭♯]?)(.*)$";

static SYMBOL_REGEX: OnceLock<Regex> = OnceLock::new();

fn symbol_regex() -> &'static Regex {
    SYMBOL_REGEX.get_or_init(|| Regex::new(SYMBOL_PATTERN).expect("invalid regex pattern"))
}

/// A chord symbol resolved against a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordSymbol {
    pub root: Note,
    /// Dictionary key of the quality, even when an alias was typed.
    pub quality: String,
}

/// Parses a chord symbol.
///
/// Without a leading root the chord is on C. The quality text must be a
/// dictionary key or an alias; an empty quality is not treated as major.
///
/// # Example
/// ```
/// use chordspell_core::dictionary::ChordDictionary;
/// use chordspell_core::symbol::parse_chord_symbol;
///
/// let dictionary = ChordDictionary::builtin().unwrap();
/// let chord = parse_chord_symbol("Ebmaj7", &dictionary).unwrap();
/// assert_eq!(chord.root.to_string(), "E♭");
/// assert_eq!(chord.quality, "maj7");
/// ```
pub fn parse_chord_symbol(
    input: &str,
    dictionary: &ChordDictionary,
) -> Result<ChordSymbol, ChordError> {
    let input = input.trim();
    let (root, quality_text) = match symbol_regex().captures(input) {
        Some(caps) => {
            let root_text = caps.get(1).map_or("", |m| m.as_str());
            let quality_text = caps.get(2).map_or("", |m| m.as_str());
            (root_text.parse::<Note>()?, quality_text)
        }
        None => (Note::C, input),
    };

    let (quality, _) = dictionary
        .resolve(quality_text)
        .ok_or_else(|| ChordError::unknown_quality(quality_text))?;

    Ok(ChordSymbol {
        root,
        quality: quality.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<(String, String), ChordError> {
        let dictionary = ChordDictionary::builtin().unwrap();
        parse_chord_symbol(input, &dictionary).map(|s| (s.root.to_string(), s.quality))
    }

    fn ok(root: &str, quality: &str) -> Result<(String, String), ChordError> {
        Ok((root.to_string(), quality.to_string()))
    }

    #[test]
    fn test_unicode_and_ascii_roots() {
        assert_eq!(parse("E♭maj7"), ok("E♭", "maj7"));
        assert_eq!(parse("Ebmaj7"), ok("E♭", "maj7"));
        assert_eq!(parse("F#m7"), ok("F♯", "m7"));
        assert_eq!(parse("F♯m7"), ok("F♯", "m7"));
    }

    #[test]
    fn test_aliases_resolve_to_keys() {
        assert_eq!(parse("Am"), ok("A", "min"));
        assert_eq!(parse("GΔ7"), ok("G", "maj7"));
        assert_eq!(parse("Bø7"), ok("B", "m7♭5"));
        assert_eq!(parse("Dm7b5"), ok("D", "m7♭5"));
    }

    #[test]
    fn test_missing_root_defaults_to_c() {
        assert_eq!(parse("dim7"), ok("C", "dim7"));
        assert_eq!(parse("add9"), ok("C", "add9"));
    }

    #[test]
    fn test_unknown_quality() {
        assert!(matches!(parse("Cfoo"), Err(ChordError::UnknownQuality { .. })));
        // a bare root has an empty quality
        assert_eq!(
            parse("C"),
            Err(ChordError::UnknownQuality {
                name: String::new()
            })
        );
    }
}
