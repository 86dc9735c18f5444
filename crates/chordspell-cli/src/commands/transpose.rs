//! Transpose command implementation
//!
//! Spells one quality on one root, or on every root of the standard set.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use chordspell_core::{transpose, ChordError, Note, TransposedChord, ROOTS};

use super::json_output::{self, CommandOutput};
use super::reporting;
use crate::input::LoadResult;

/// Result payload of `transpose --json`.
#[derive(Debug, Serialize)]
pub struct TransposeResult {
    pub quality: String,
    pub chords: Vec<TransposedChord>,
}

/// Run the transpose command
///
/// # Arguments
/// * `dictionary` - Optional dictionary path (default: bundled dictionary)
/// * `root` - Root note; C when absent
/// * `quality` - Quality name or alias
/// * `all_roots` - Spell on all 17 roots instead of `root`
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on an unknown root or quality
pub fn run(
    dictionary: Option<&Path>,
    root: Option<&str>,
    quality: &str,
    all_roots: bool,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(dictionary, root, quality, all_roots)
    } else {
        run_human(dictionary, root, quality, all_roots)
    }
}

fn build(
    loaded: &LoadResult,
    root: Option<&str>,
    quality: &str,
    all_roots: bool,
) -> Result<TransposeResult, ChordError> {
    let quality = reporting::resolve_quality(loaded, quality);
    let roots: Vec<Note> = if all_roots {
        ROOTS.to_vec()
    } else {
        vec![root.map(str::parse::<Note>).transpose()?.unwrap_or(Note::C)]
    };

    let chords = roots
        .into_iter()
        .map(|root| transpose(root, &quality, &loaded.dictionary))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TransposeResult { quality, chords })
}

fn run_human(
    dictionary: Option<&Path>,
    root: Option<&str>,
    quality: &str,
    all_roots: bool,
) -> Result<ExitCode> {
    let loaded = reporting::load_human(dictionary)?;
    let result = build(&loaded, root, quality, all_roots)?;

    match result.chords.as_slice() {
        [chord] => reporting::print_chord_card(chord),
        chords => {
            println!("{} {}", "Quality:".cyan().bold(), result.quality);
            for chord in chords {
                reporting::print_chord_row(chord);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_json(
    dictionary: Option<&Path>,
    root: Option<&str>,
    quality: &str,
    all_roots: bool,
) -> Result<ExitCode> {
    let Some(loaded) = reporting::load_json(dictionary)? else {
        return Ok(ExitCode::from(1));
    };

    match build(&loaded, root, quality, all_roots) {
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

    #[test]
    fn test_build_single_root() {
        let loaded = load_dictionary(None).unwrap();
        let result = build(&loaded, Some("Bb"), "7", false).unwrap();
        assert_eq!(result.chords.len(), 1);
        assert_eq!(result.chords[0].notes, vec!["B♭", "D", "F", "A♭"]);
    }

    #[test]
    fn test_build_defaults_to_c() {
        let loaded = load_dictionary(None).unwrap();
        let result = build(&loaded, None, "min7", false).unwrap();
        assert_eq!(result.quality, "m7");
        assert_eq!(result.chords[0].notes, vec!["C", "E♭", "G", "B♭"]);
    }

    #[test]
    fn test_build_all_roots() {
        let loaded = load_dictionary(None).unwrap();
        let result = build(&loaded, None, "maj7", true).unwrap();
        let roots: Vec<String> = result.chords.iter().map(|c| c.root.to_string()).collect();
        assert_eq!(roots.len(), 17);
        assert_eq!(roots[1], "C♯");
        assert_eq!(roots[2], "D♭");
        assert_eq!(result.chords[3].notes, vec!["D", "F♯", "A", "C♯"]);
    }

    #[test]
    fn test_build_errors() {
        let loaded = load_dictionary(None).unwrap();
        let err = build(&loaded, Some("H"), "maj7", false).unwrap_err();
        assert_eq!(err.code(), "C001");
        let err = build(&loaded, Some("C"), "maj13", false).unwrap_err();
        assert_eq!(err.code(), "C002");
        let err = build(&loaded, Some("B𝄪"), "maj", false).unwrap_err();
        assert_eq!(err.code(), "C005");
        assert!(!err.is_defect());
    }

    #[test]
    fn test_run_exit_codes() {
        let code = run(None, Some("E♭"), "m7♭5", false, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let code = run(None, Some("E♭"), "nope", false, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
