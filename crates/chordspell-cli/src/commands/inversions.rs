//! Inversions command implementation
//!
//! Prints, for every quality, the qualities that spell one of its
//! transpositions under another root.

use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;

use chordspell_core::named_inversion_map;

use super::json_output::{self, CommandOutput};
use super::reporting;

/// Run the inversions command
pub fn run(dictionary: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(dictionary)
    } else {
        run_human(dictionary)
    }
}

fn run_human(dictionary: Option<&Path>) -> Result<ExitCode> {
    let loaded = reporting::load_human(dictionary)?;
    let map = named_inversion_map(&loaded.dictionary)?;

    println!("{}", "Named inversions:".cyan().bold());
    print_map(&map);
    println!(
        "\n{} of {} qualities share a pitch-class set",
        map.len(),
        loaded.dictionary.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn print_map(map: &BTreeMap<String, Vec<String>>) {
    let width = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (quality, labels) in map {
        let padding = " ".repeat(width - quality.chars().count());
        println!("  {}{}  {}", quality.bold(), padding, labels.join(", "));
    }
}

fn run_json(dictionary: Option<&Path>) -> Result<ExitCode> {
    let Some(loaded) = reporting::load_json(dictionary)? else {
        return Ok(ExitCode::from(1));
    };

    match named_inversion_map(&loaded.dictionary) {
        Ok(map) => {
            json_output::print(&CommandOutput::success(map, &loaded))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => reporting::print_chord_failure(&e, &loaded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_dictionary;

    #[test]
    fn test_builtin_map_has_sixth_and_minor_seventh() {
        let loaded = load_dictionary(None).unwrap();
        let map = named_inversion_map(&loaded.dictionary).unwrap();
        assert!(map["6"].contains(&"(9)m7".to_string()));
        assert!(map["m7"].contains(&"(3)6".to_string()));
        assert!(!map.contains_key("maj7"));
    }

    #[test]
    fn test_run_exit_codes() {
        assert_eq!(run(None, true).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(None, false).unwrap(), ExitCode::SUCCESS);
    }
}
