//! Clean command: resolve configuration, read the document, write the result

use clap::ArgMatches;
use mdstrip_config::{ConfigError, Loader, MdstripConfig, OutputFormat, LOCAL_CONFIG_FILE};
use mdstrip_core::{CleanReport, DocumentLoader, LoaderError, Mode, Operation};
use std::fs;
use std::io::{self, Write};

/// Command-line switch for each operation, in help order.
pub const OPERATION_SWITCHES: [(&str, Operation); 9] = [
    ("strip-emphasis", Operation::StripMarkdownEmphasis),
    ("strip-headers", Operation::StripHeaders),
    ("strip-links", Operation::StripLinks),
    ("strip-images", Operation::StripImages),
    ("strip-horizontal-rules", Operation::StripHorizontalRules),
    ("strip-code-blocks", Operation::StripCodeBlocks),
    ("strip-tags", Operation::StripXmlHtmlTags),
    ("strip-comments", Operation::StripComments),
    ("collapse-whitespace", Operation::CollapseWhitespace),
];

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Load(LoaderError),
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "Configuration error: {}", err),
            CliError::Load(err) => write!(f, "{}", err),
            CliError::Io(err) => write!(f, "IO error: {}", err),
            CliError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<LoaderError> for CliError {
    fn from(err: LoaderError) -> Self {
        CliError::Load(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

/// Handle the default clean command
pub fn handle_clean_command(matches: &ArgMatches) -> Result<(), CliError> {
    let (config, custom_flags_given) = load_config(matches)?;

    if custom_flags_given && config.cleaning.mode != Mode::Custom {
        log::warn!(
            "operation switches are ignored in {} mode; use --mode custom",
            config.cleaning.mode
        );
    }

    let cleaner = config.cleaner();
    log::debug!("cleaning with {:?}", cleaner);

    let limit = cleaner.max_input_bytes();
    let document = match matches.get_one::<String>("path").map(String::as_str) {
        None | Some("-") => {
            DocumentLoader::from_reader_with_limit(io::stdin().lock(), limit)?
        }
        Some(path) => DocumentLoader::from_path_with_limit(path, limit)?,
    };

    let (cleaned, report) = document.clean_with_report(&cleaner)?;

    let rendered = render(&cleaned, &report, config.output.format)?;
    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, rendered)?,
        None => io::stdout().lock().write_all(rendered.as_bytes())?,
    }

    if config.output.stats {
        eprintln!("{}", report);
    }

    Ok(())
}

/// Layer `mdstrip.toml`, `--config` and the command-line flags over the defaults.
///
/// Also reports whether any per-operation switch was given.
fn load_config(matches: &ArgMatches) -> Result<(MdstripConfig, bool), CliError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    if let Some(mode) = matches.get_one::<Mode>("mode") {
        loader = loader.with_mode(*mode)?;
    }

    let mut custom_flags_given = false;
    for (flag, op) in OPERATION_SWITCHES {
        if matches.get_flag(flag) {
            loader = loader.enable(op, true)?;
            custom_flags_given = true;
        }
    }
    if let Some(kept) = matches.get_many::<Operation>("keep") {
        for op in kept {
            loader = loader.enable(*op, false)?;
            custom_flags_given = true;
        }
    }

    if let Some(limit) = matches.get_one::<usize>("max-input-bytes") {
        loader = loader.with_max_input_bytes(*limit)?;
    }
    if matches.get_flag("stats") {
        loader = loader.with_stats(true)?;
    }
    if let Some(format) = matches.get_one::<OutputFormat>("format") {
        loader = loader.with_format(*format)?;
    }

    Ok((loader.build()?, custom_flags_given))
}

fn render(cleaned: &str, report: &CleanReport, format: OutputFormat) -> Result<String, CliError> {
    let mut rendered = match format {
        OutputFormat::Text => cleaned.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "text": cleaned,
            "report": report,
        }))?,
    };
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
