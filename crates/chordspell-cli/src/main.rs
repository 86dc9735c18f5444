//! Chordspell CLI - Command-line interface for chord spelling
//!
//! This binary provides commands for transposing chord qualities, finding
//! equivalent chords, and validating and exporting chord dictionaries.

use clap::Parser;
use std::process::ExitCode;

use chordspell_cli::{commands, logging};

mod cli_args;
use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_level) {
        eprintln!("{}: {}", colored::Colorize::red("error"), e);
        return ExitCode::from(2);
    }

    let dictionary = cli.dictionary.as_deref();

    let result = match cli.command {
        Commands::Show { chord, json } => commands::show::run(dictionary, &chord, json),
        Commands::Transpose {
            root,
            quality,
            all_roots,
            json,
        } => commands::transpose::run(dictionary, root.as_deref(), &quality, all_roots, json),
        Commands::Equivalents {
            root,
            quality,
            json,
        } => commands::equivalents::run(dictionary, &root, &quality, json),
        Commands::Validate { json } => commands::validate::run(dictionary, json),
        Commands::Inversions { json } => commands::inversions::run(dictionary, json),
        Commands::Export {
            fields,
            expanded,
            output,
        } => commands::export::run(dictionary, &fields, expanded, output.as_deref()),
        Commands::List { json } => commands::list::run(dictionary, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_show() {
        let cli = Cli::try_parse_from(["chordspell", "show", "Ebmaj7", "--json"]).unwrap();
        match cli.command {
            Commands::Show { chord, json } => {
                assert_eq!(chord, "Ebmaj7");
                assert!(json);
            }
            _ => panic!("expected show command"),
        }
        assert!(cli.dictionary.is_none());
    }

    #[test]
    fn test_cli_parses_transpose() {
        let cli = Cli::try_parse_from([
            "chordspell",
            "transpose",
            "--root",
            "B♭",
            "--quality",
            "7",
        ])
        .unwrap();
        match cli.command {
            Commands::Transpose {
                root,
                quality,
                all_roots,
                json,
            } => {
                assert_eq!(root.as_deref(), Some("B♭"));
                assert_eq!(quality, "7");
                assert!(!all_roots);
                assert!(!json);
            }
            _ => panic!("expected transpose command"),
        }
    }

    #[test]
    fn test_cli_rejects_root_with_all_roots() {
        let result = Cli::try_parse_from([
            "chordspell",
            "transpose",
            "--root",
            "D",
            "--quality",
            "maj7",
            "--all-roots",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "chordspell",
            "validate",
            "--dictionary",
            "chords.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(
            cli.dictionary.as_deref(),
            Some(std::path::Path::new("chords.json"))
        );
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Validate { json: false }));
    }

    #[test]
    fn test_cli_parses_export_fields() {
        let cli = Cli::try_parse_from([
            "chordspell",
            "export",
            "--fields",
            "notes,pcs,transpositions",
            "-o",
            "out.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                fields,
                expanded,
                output,
            } => {
                assert_eq!(fields, vec!["notes", "pcs", "transpositions"]);
                assert!(!expanded);
                assert_eq!(output.as_deref(), Some(std::path::Path::new("out.json")));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_parses_equivalents() {
        let cli =
            Cli::try_parse_from(["chordspell", "equivalents", "-r", "C", "-q", "dim7"]).unwrap();
        match cli.command {
            Commands::Equivalents { root, quality, json } => {
                assert_eq!(root, "C");
                assert_eq!(quality, "dim7");
                assert!(!json);
            }
            _ => panic!("expected equivalents command"),
        }
    }
}
