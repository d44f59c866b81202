//! Command-line interface for mdstrip
//! Strips Markdown, HTML/XML tags and code out of a document to save prompt tokens.
//!
//! Usage:
//!   mdstrip `<path>` [--mode `<mode>`] [--stats] [--format `<format>`]  - Clean a file (`-` or nothing reads stdin)
//!   mdstrip --mode custom --strip-tags --strip-links `<path>`         - Pick operations by hand
//!   mdstrip --list-modes                                           - List the cleaning modes

mod run;

use clap::{Arg, ArgAction, Command};
use mdstrip_config::OutputFormat;
use mdstrip_core::{Mode, Operation};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = build_cli().get_matches();

    if matches.get_flag("list-modes") {
        handle_list_modes_command();
        return;
    }

    if let Err(e) = run::handle_clean_command(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    let mut command = Command::new("mdstrip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Strip formatting from text to reduce LLM token usage")
        .arg(
            Arg::new("path")
                .help("Path to the document to clean ('-' or omitted reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .help("Cleaning mode: plain-text, standard-markdown or custom")
                .value_parser(|s: &str| s.parse::<Mode>()),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("keep")
                .long("keep")
                .value_name("OPERATION")
                .help("Switch one operation off in custom mode (e.g. 'strip-links')")
                .value_parser(|s: &str| s.parse::<Operation>())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the result to a file instead of stdout"),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Print the size reduction report to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: text or json")
                .value_parser(|s: &str| s.parse::<OutputFormat>()),
        )
        .arg(
            Arg::new("max-input-bytes")
                .long("max-input-bytes")
                .help("Reject inputs larger than this many bytes")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("list-modes")
                .long("list-modes")
                .help("List available cleaning modes")
                .action(ArgAction::SetTrue),
        );

    for (flag, op) in run::OPERATION_SWITCHES {
        command = command.arg(
            Arg::new(flag)
                .long(flag)
                .help(format!("Enable {} in custom mode", op))
                .action(ArgAction::SetTrue),
        );
    }

    command
}

/// Handle the list-modes command
fn handle_list_modes_command() {
    println!("Available cleaning modes:\n");

    for mode in Mode::ALL {
        println!("  {} ({})", mode.name(), mode.label());
        println!("    {}", mode.description());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn parses_custom_switches() {
        let matches = build_cli()
            .try_get_matches_from(["mdstrip", "--mode", "custom", "--strip-links", "doc.md"])
            .unwrap();
        assert_eq!(matches.get_one::<Mode>("mode"), Some(&Mode::Custom));
        assert!(matches.get_flag("strip-links"));
        assert!(!matches.get_flag("strip-tags"));
        assert_eq!(
            matches.get_one::<String>("path").map(String::as_str),
            Some("doc.md")
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = build_cli().try_get_matches_from(["mdstrip", "--mode", "fancy"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_output_format() {
        let matches = build_cli()
            .try_get_matches_from(["mdstrip", "--format", "json"])
            .unwrap();
        assert_eq!(
            matches.get_one::<OutputFormat>("format"),
            Some(&OutputFormat::Json)
        );
        assert!(build_cli()
            .try_get_matches_from(["mdstrip", "--format", "yaml"])
            .is_err());
    }

    #[test]
    fn parses_repeated_keep() {
        let matches = build_cli()
            .try_get_matches_from(["mdstrip", "--keep", "strip-links", "--keep", "strip_headers"])
            .unwrap();
        let kept: Vec<Operation> = matches
            .get_many::<Operation>("keep")
            .unwrap()
            .copied()
            .collect();
        assert_eq!(kept, vec![Operation::StripLinks, Operation::StripHeaders]);
    }
}
