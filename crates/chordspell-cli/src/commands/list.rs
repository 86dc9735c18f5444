//! List command implementation

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use chordspell_core::{ChordDictionary, SpellingPolicy};

use super::json_output::{self, CommandOutput};
use super::reporting;

/// One row of `list --json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QualityEntry {
    pub name: String,
    pub display_name: String,
    pub full_name: String,
    pub aliases: Vec<String>,
    pub spelling: SpellingPolicy,
}

fn entries(dictionary: &ChordDictionary) -> Vec<QualityEntry> {
    dictionary
        .iter()
        .map(|(name, def)| QualityEntry {
            name: name.to_string(),
            display_name: def.display_name.clone(),
            full_name: def.full_name.clone(),
            aliases: def.aliases.clone(),
            spelling: def.policy(),
        })
        .collect()
}

/// Run the list command
pub fn run(dictionary: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        let Some(loaded) = reporting::load_json(dictionary)? else {
            return Ok(ExitCode::from(1));
        };
        let rows = entries(&loaded.dictionary);
        json_output::print(&CommandOutput::success(rows, &loaded))?;
        return Ok(ExitCode::SUCCESS);
    }

    let loaded = reporting::load_human(dictionary)?;
    let rows = entries(&loaded.dictionary);
    println!(
        "{} {} qualities from {}",
        "Dictionary:".cyan().bold(),
        rows.len(),
        loaded.source_label()
    );
    for row in &rows {
        let mut line = format!(
            "  {:<10} {:<10} {}",
            row.name, row.display_name, row.full_name
        );
        if row.spelling != SpellingPolicy::Standard {
            line.push_str(&format!(" [{}]", row.spelling));
        }
        println!("{}", line);
        if !row.aliases.is_empty() {
            println!("  {:<10} {}", "", row.aliases.join(", ").dimmed());
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_dictionary;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entries_follow_dictionary_order() {
        let loaded = load_dictionary(None).unwrap();
        let rows = entries(&loaded.dictionary);
        assert_eq!(rows.len(), 31);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<&str> = loaded.dictionary.names().collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_entries_carry_spelling_policy() {
        let loaded = load_dictionary(None).unwrap();
        let rows = entries(&loaded.dictionary);
        let policy = |name: &str| rows.iter().find(|r| r.name == name).map(|r| r.spelling);
        assert_eq!(policy("aug"), Some(SpellingPolicy::Augmented));
        assert_eq!(policy("dim7"), Some(SpellingPolicy::Diminished));
        assert_eq!(policy("maj7"), Some(SpellingPolicy::Standard));
    }

    #[test]
    fn test_run_exit_codes() {
        assert_eq!(run(None, true).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(None, false).unwrap(), ExitCode::SUCCESS);
    }
}
