//! Show command implementation
//!
//! Parses a chord symbol and prints its chord card together with the chords
//! that sound the same pitch classes.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use chordspell_core::{
    find_equivalents, parse_chord_symbol, transpose, ChordError, Equivalents, TransposedChord,
};

use super::json_output::{self, CommandOutput};
use super::reporting;
use crate::input::LoadResult;

/// Result payload of `show --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowResult {
    /// Symbol as written back, e.g. "E♭maj7".
    pub symbol: String,
    pub chord: TransposedChord,
    #[serde(flatten)]
    pub equivalents: Equivalents,
}

/// Run the show command
///
/// # Arguments
/// * `dictionary` - Optional dictionary path (default: bundled dictionary)
/// * `chord` - Chord symbol, e.g. "F#-7"
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if the symbol cannot be resolved
pub fn run(dictionary: Option<&Path>, chord: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(dictionary, chord)
    } else {
        run_human(dictionary, chord)
    }
}

fn build(loaded: &LoadResult, chord: &str) -> Result<ShowResult, ChordError> {
    let symbol = parse_chord_symbol(chord, &loaded.dictionary)?;
    let spelled = transpose(symbol.root, &symbol.quality, &loaded.dictionary)?;
    let equivalents = Equivalents::partition(find_equivalents(
        symbol.root,
        &symbol.quality,
        &loaded.dictionary,
    )?);
    Ok(ShowResult {
        symbol: spelled.symbol(),
        chord: spelled,
        equivalents,
    })
}

fn run_human(dictionary: Option<&Path>, chord: &str) -> Result<ExitCode> {
    let loaded = reporting::load_human(dictionary)?;
    let result = build(&loaded, chord)?;

    reporting::print_chord_card(&result.chord);
    reporting::print_equivalents(&result.equivalents);
    Ok(ExitCode::SUCCESS)
}

fn run_json(dictionary: Option<&Path>, chord: &str) -> Result<ExitCode> {
    let Some(loaded) = reporting::load_json(dictionary)? else {
        return Ok(ExitCode::from(1));
    };

    match build(&loaded, chord) {
        Ok(result) => {
            json_output::print(&CommandOutput::success(result, &loaded))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => reporting::print_chord_failure(&e, &loaded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_dictionary;
    use pretty_assertions::assert_eq;

    fn names(found: &[chordspell_core::Equivalent]) -> Vec<String> {
        found.iter().map(|eq| eq.chord()).collect()
    }

    #[test]
    fn test_build_ascii_symbol() {
        let loaded = load_dictionary(None).unwrap();
        let result = build(&loaded, "F#-7").unwrap();
        assert_eq!(result.symbol, "F♯m7");
        assert_eq!(result.chord.notes, vec!["F♯", "A", "C♯", "E"]);
        let equivalents = &result.equivalents;
        assert_eq!(names(&equivalents.alternative_spellings), vec!["G♭m7"]);
        assert!(names(&equivalents.named_inversions).contains(&"A6".to_string()));
    }

    #[test]
    fn test_build_bare_quality_is_on_c() {
        let loaded = load_dictionary(None).unwrap();
        let result = build(&loaded, "dim7").unwrap();
        assert_eq!(result.chord.root.to_string(), "C");
        let intervals: Vec<u8> = result
            .equivalents
            .named_inversions
            .iter()
            .map(|eq| eq.root_interval)
            .collect();
        assert_eq!(intervals, vec![3, 3, 6, 6, 9]);
    }

    #[test]
    fn test_build_unknown_quality() {
        let loaded = load_dictionary(None).unwrap();
        let err = build(&loaded, "Cmaj13").unwrap_err();
        assert_eq!(err.code(), "C002");
    }

    #[test]
    fn test_show_result_json_shape() {
        let loaded = load_dictionary(None).unwrap();
        let result = build(&loaded, "Dmaj7").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["symbol"], "Dmaj7");
        assert_eq!(json["chord"]["decimal"], 582);
        assert!(json.get("alternativeSpellings").is_some());
        assert!(json.get("namedInversions").is_some());
    }

    #[test]
    fn test_run_exit_codes() {
        assert_eq!(run(None, "Bbm7", true).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(None, "Bbnope", true).unwrap(), ExitCode::from(1));
        assert!(run(None, "Bbnope", false).is_err());
    }
}
