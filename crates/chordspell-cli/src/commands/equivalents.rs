//! Equivalents command implementation

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use chordspell_core::{find_equivalents, ChordError, Equivalents, Note};

use super::json_output::{self, CommandOutput};
use super::reporting;
use crate::input::LoadResult;

/// Result payload of `equivalents --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentsResult {
    pub root: Note,
    pub quality: String,
    #[serde(flatten)]
    pub equivalents: Equivalents,
}

/// Run the equivalents command
///
/// # Returns
/// Exit code: 0 on success (including no matches), 1 on an unknown root or quality
pub fn run(
    dictionary: Option<&Path>,
    root: &str,
    quality: &str,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(dictionary, root, quality)
    } else {
        run_human(dictionary, root, quality)
    }
}

fn build(loaded: &LoadResult, root: &str, quality: &str) -> Result<EquivalentsResult, ChordError> {
    let root: Note = root.parse()?;
    let quality = reporting::resolve_quality(loaded, quality);
    let found = find_equivalents(root, &quality, &loaded.dictionary)?;
    Ok(EquivalentsResult {
        root,
        quality,
        equivalents: Equivalents::partition(found),
    })
}

fn run_human(dictionary: Option<&Path>, root: &str, quality: &str) -> Result<ExitCode> {
    let loaded = reporting::load_human(dictionary)?;
    let result = build(&loaded, root, quality)?;

    println!(
        "{} {}{}",
        "Equivalents of:".cyan().bold(),
        result.root,
        result.quality
    );
    reporting::print_equivalents(&result.equivalents);
    Ok(ExitCode::SUCCESS)
}

fn run_json(dictionary: Option<&Path>, root: &str, quality: &str) -> Result<ExitCode> {
    let Some(loaded) = reporting::load_json(dictionary)? else {
        return Ok(ExitCode::from(1));
    };

    match build(&loaded, root, quality) {
        Ok(result) => {
            json_output::print(&CommandOutput::success(result, &loaded))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => reporting::print_chord_failure(&e, &loaded),
    }
}
