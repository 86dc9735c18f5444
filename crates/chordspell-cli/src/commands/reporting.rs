//! Shared loading and rendering helpers for the command implementations.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use chordspell_core::{ChordError, Equivalent, Equivalents, TransposedChord};

use super::json_output::{self, input_error_to_json, CommandOutput, JsonError};
use crate::input::{load_dictionary, LoadResult};

/// Loads the dictionary for human output, printing skipped entries to stderr.
pub(crate) fn load_human(path: Option<&Path>) -> Result<LoadResult> {
    let loaded = load_dictionary(path).with_context(|| {
        format!(
            "Failed to load dictionary: {}",
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "<builtin>".to_string())
        )
    })?;
    for issue in &loaded.skipped {
        eprintln!(
            "  {} [load] skipped '{}': {}",
            "!".yellow(),
            issue.quality,
            issue.actual
        );
    }
    Ok(loaded)
}

/// Loads the dictionary for JSON output.
///
/// On failure the JSON error envelope has already been printed and `None`
/// is returned.
pub(crate) fn load_json(path: Option<&Path>) -> Result<Option<LoadResult>> {
    match load_dictionary(path) {
        Ok(loaded) => Ok(Some(loaded)),
        Err(e) => {
            let file = path.map(|p| p.display().to_string());
            let error = input_error_to_json(&e, file.as_deref());
            print_failure(vec![error], None)?;
            Ok(None)
        }
    }
}

/// Prints a failed JSON envelope and returns exit code 1.
pub(crate) fn print_failure(
    errors: Vec<JsonError>,
    loaded: Option<&LoadResult>,
) -> Result<ExitCode> {
    let output: CommandOutput<()> = CommandOutput::failure(errors, loaded);
    json_output::print(&output)?;
    Ok(ExitCode::from(1))
}

/// Prints a failed JSON envelope for a chord error.
pub(crate) fn print_chord_failure(error: &ChordError, loaded: &LoadResult) -> Result<ExitCode> {
    print_failure(vec![json_output::chord_error_to_json(error)], Some(loaded))
}

/// Resolves a quality name or alias to its dictionary key.
///
/// Unresolved text is returned unchanged so the lookup downstream reports it.
pub(crate) fn resolve_quality(loaded: &LoadResult, text: &str) -> String {
    loaded
        .dictionary
        .resolve(text)
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| text.to_string())
}

fn join(items: &[String]) -> String {
    items.join(" ")
}

fn join_pcs(pcs: &[u8]) -> String {
    pcs.iter()
        .map(|pc| pc.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prints the full card of one spelled chord.
pub(crate) fn print_chord_card(chord: &TransposedChord) {
    println!("{} {}", "Chord:".cyan().bold(), chord.symbol().bold());
    if !chord.full_name.is_empty() {
        println!("  {:<10} {}", "Name".dimmed(), chord.full_name);
    }
    println!("  {:<10} {}", "Quality".dimmed(), chord.quality);
    println!("  {:<10} {}", "Intervals".dimmed(), join(&chord.intervals));
    println!("  {:<10} {}", "Notes".dimmed(), join(&chord.notes));
    println!("  {:<10} {}", "PCS".dimmed(), join_pcs(&chord.sorted_pcs()));
    println!(
        "  {:<10} {} ({})",
        "Binary".dimmed(),
        chord.binary,
        chord.decimal
    );
    if !chord.forte_number.is_empty() {
        println!("  {:<10} {}", "Forte".dimmed(), chord.forte_number);
    }
    if !chord.aliases.is_empty() {
        println!("  {:<10} {}", "Aliases".dimmed(), chord.aliases.join(", "));
    }
}

/// Prints one spelled chord as a single table row.
pub(crate) fn print_chord_row(chord: &TransposedChord) {
    println!(
        "  {:<10} {:<24} {}",
        chord.symbol().bold(),
        join(&chord.notes),
        chord.binary.dimmed()
    );
}

fn print_equivalent(eq: &Equivalent) {
    println!(
        "  {:>4} {:<12} {}",
        format!("+{}", eq.root_interval).dimmed(),
        eq.chord(),
        join(&eq.notes)
    );
}

/// Prints finder results under their two headings.
pub(crate) fn print_equivalents(found: &Equivalents) {
    if found.is_empty() {
        println!("\n{}", "No equivalent chords".dimmed());
        return;
    }
    if !found.alternative_spellings.is_empty() {
        println!("\n{}", "Alternative spellings:".cyan().bold());
        for eq in &found.alternative_spellings {
            print_equivalent(eq);
        }
    }
    if !found.named_inversions.is_empty() {
        println!("\n{}", "Named inversions:".cyan().bold());
        for eq in &found.named_inversions {
            print_equivalent(eq);
        }
    }
}
