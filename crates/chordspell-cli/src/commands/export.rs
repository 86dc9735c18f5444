//! Export command implementation
//!
//! Writes the dictionary as JSON, either keyed by quality with a field
//! selection or flattened to one record per (quality, root).

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use chordspell_core::{expand_dictionary, export_dictionary, ChordDictionary, ExportField};

use super::reporting;

/// Run the export command
///
/// # Arguments
/// * `dictionary` - Optional dictionary path (default: bundled dictionary)
/// * `fields` - Field names to keep; empty selects every field
/// * `expanded` - Write the flat `"{quality}_{root}"` expansion instead
/// * `output` - Output file (default: stdout)
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    dictionary: Option<&Path>,
    fields: &[String],
    expanded: bool,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let loaded = reporting::load_human(dictionary)?;
    let fields = parse_fields(fields)?;
    let json = render(&loaded.dictionary, &fields, expanded)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            eprintln!(
                "{} {} qualities to {}",
                "Exported".green().bold(),
                loaded.dictionary.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_fields(fields: &[String]) -> Result<Vec<ExportField>> {
    if fields.is_empty() {
        return Ok(ExportField::ALL.to_vec());
    }
    let mut parsed = Vec::with_capacity(fields.len());
    for name in fields {
        let field: ExportField = name.parse().with_context(|| {
            let known: Vec<&str> = ExportField::ALL.iter().map(|f| f.key()).collect();
            format!("expected one of: {}", known.join(", "))
        })?;
        if !parsed.contains(&field) {
            parsed.push(field);
        }
    }
    Ok(parsed)
}

fn render(dictionary: &ChordDictionary, fields: &[ExportField], expanded: bool) -> Result<String> {
    let json = if expanded {
        serde_json::to_string_pretty(&expand_dictionary(dictionary)?)?
    } else {
        serde_json::to_string_pretty(&export_dictionary(dictionary, fields)?)?
    };
    Ok(json)
}
