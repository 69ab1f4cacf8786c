use std::path::{Path, PathBuf};

use argot_core::{SchemaDocument, Verb};
use argot_parser::{ErrorKind, ParsedArgs, Parser as ArgParser, ParserConfig, ParsingResult};
use argot_suggest::SuggestionEngine;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "argot", version)]
#[command(about = "Parse arguments against an argot schema document")]
struct Cli {
    /// Log parser stages and suggestion scores to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an argument list, verb first, against a schema document.
    Parse(ParseArgs),
    /// Suggest verb or option names close to a mistyped token.
    Suggest(SuggestArgs),
    /// Load and validate a schema document.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema document (YAML, or JSON with a .json extension).
    #[arg(long)]
    schema: PathBuf,
    /// Parser configuration YAML.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
    /// Arguments to parse, after `--`. Verb groups are split on the group separator.
    #[arg(last = true, required = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct SuggestArgs {
    /// Schema document (YAML, or JSON with a .json extension).
    #[arg(long)]
    schema: PathBuf,
    /// Parser configuration YAML; its suggestion settings are used.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Suggest option names of this verb instead of verb names.
    #[arg(long)]
    verb: Option<String>,
    /// The mistyped token.
    token: String,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Schema document (YAML, or JSON with a .json extension).
    #[arg(long)]
    schema: PathBuf,
}

/// Serialized outcome of one verb group.
#[derive(Debug, Serialize)]
struct GroupReport<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<&'a ParsedArgs>,
}

impl<'a> From<&'a ParsingResult<ParsedArgs>> for GroupReport<'a> {
    fn from(result: &'a ParsingResult<ParsedArgs>) -> Self {
        Self {
            success: result.is_success(),
            error_kind: result.error().map(|err| err.kind()),
            error: result.error_message(),
            args: result.instance(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Suggest(args) => run_suggest(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let verbs = load_verbs(&args.schema)?;
    let parser = ArgParser::new(load_config(args.config.as_deref())?)
        .map_err(|err| format!("Invalid parser config: {err}"))?;

    let results = parser.parse_groups(&verbs, &args.argv);
    if results.is_empty() {
        return Err("no verb given".to_string());
    }
    debug!(groups = results.len(), "Parsed argument groups");

    match args.format {
        CliOutputFormat::Text => {
            for result in &results {
                println!("{result}");
            }
        }
        CliOutputFormat::Json => {
            let reports: Vec<GroupReport<'_>> = results.iter().map(GroupReport::from).collect();
            let raw = serde_json::to_string_pretty(&reports)
                .map_err(|err| format!("Failed to serialize results: {err}"))?;
            println!("{raw}");
        }
        CliOutputFormat::Yaml => {
            let reports: Vec<GroupReport<'_>> = results.iter().map(GroupReport::from).collect();
            let raw = serde_yaml::to_string(&reports)
                .map_err(|err| format!("Failed to serialize results: {err}"))?;
            print!("{raw}");
        }
    }

    let failed = results.iter().filter(|result| !result.is_success()).count();
    if failed > 0 {
        return Err(format!("{failed} of {} group(s) failed", results.len()));
    }
    Ok(())
}

fn run_suggest(args: SuggestArgs) -> Result<(), String> {
    let verbs = load_verbs(&args.schema)?;
    let config = load_config(args.config.as_deref())?;
    let engine = SuggestionEngine::new(config.suggestions);

    let ranked = match &args.verb {
        Some(name) => {
            let verb = verbs
                .iter()
                .find(|verb| verb.matches(name))
                .ok_or_else(|| {
                    format!("Verb '{name}' not found in '{}'", args.schema.display())
                })?;
            let names = verb.options().iter().flat_map(|option| option.names());
            engine.rank(&args.token, names)
        }
        None => {
            let names = verbs
                .iter()
                .flat_map(|verb| std::iter::once(verb.long_name()).chain(verb.short_name()));
            engine.rank(&args.token, names)
        }
    };

    if ranked.is_empty() {
        println!("No suggestions for '{}'.", args.token);
    }
    for suggestion in ranked {
        println!("{}\t{:.3}", suggestion.candidate, suggestion.score);
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let verbs = load_verbs(&args.schema)?;
    let options: usize = verbs.iter().map(|verb| verb.options().len()).sum();
    println!(
        "Validated '{}': {} verb(s), {} option(s).",
        args.schema.display(),
        verbs.len(),
        options
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_verbs(path: &Path) -> Result<Vec<Verb>, String> {
    let document = SchemaDocument::load(path)
        .map_err(|err| format!("Failed to load schema '{}': {err}", path.display()))?;
    document
        .verbs()
        .map_err(|err| format!("Invalid schema '{}': {err}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<ParserConfig, String> {
    match path {
        Some(path) => ParserConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(ParserConfig::default()),
    }
}
