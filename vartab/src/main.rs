//! # vartab
//!
//! A CLI tool that renders annotated variant records as tab-delimited text.
//!
//! ## Overview
//!
//! vartab is built on top of vartablib. It reads one JSON object per line
//! (an attribute bag for one variant-allele/feature overlap) and writes the
//! header block followed by one tab-delimited line per record: the fixed
//! columns, then a sorted `Extra` column of `key=value` pairs.
//!
//! ## Usage
//!
//! ```bash
//! # Format records from a file
//! vartab format annotations.jsonl
//!
//! # Read from stdin, enabling optional fields
//! cat annotations.jsonl | vartab --flag symbol,sift,hgvs
//!
//! # Describe a plugin's fields and a custom track in the header
//! vartab format in.jsonl --plugin CADD=cadd_headers.json --custom ClinVar=clinvar.vcf.gz:exact:CLNSIG
//!
//! # List the Extra candidates for a run, as JSON
//! vartab fields --config run.json --output json
//!
//! # List the known run flags
//! vartab flags
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vartablib::fields::FLAG_FIELDS;
use vartablib::{
    AttributeBag, ColumnTable, CustomTrack, LineFormatter, PluginHeaders, RunConfig, RunInfo,
};

/// Arguments shared by every command that resolves a run configuration
fn config_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .value_name("FILE")
            .help("JSON run configuration (flags, plugins, custom tracks)"),
        Arg::new("flag")
            .long("flag")
            .action(ArgAction::Append)
            .value_delimiter(',')
            .value_name("NAME")
            .help("Enable a run flag (comma-separated or repeated, e.g. symbol,sift)"),
        Arg::new("plugin")
            .long("plugin")
            .action(ArgAction::Append)
            .value_name("NAME=FILE")
            .help("Plugin header descriptions from a JSON object file"),
        Arg::new("custom")
            .long("custom")
            .action(ArgAction::Append)
            .value_name("SHORT=FILE[:TYPE[:FIELD,...]]")
            .help("Custom annotation track"),
    ]
}

/// Arguments of the format command
fn format_command_args() -> Vec<Arg> {
    let mut args = vec![
        Arg::new("input")
            .help("JSON Lines input, one record per line (defaults to stdin)")
            .value_name("INPUT"),
        Arg::new("no-header")
            .long("no-header")
            .action(ArgAction::SetTrue)
            .help("Omit the header block"),
    ];
    args.extend(config_args());
    args
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("vartab")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render annotated variant records as tab-delimited text")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug information to stderr"),
        )
        .args(format_command_args())
        .subcommand(
            Command::new("format")
                .about("Format JSON Lines records as tab-delimited lines (default command)")
                .args(format_command_args()),
        )
        .subcommand(
            Command::new("fields")
                .about("List the Extra column keys and descriptions for a run")
                .args(config_args())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(["text", "json"])
                        .default_value("text")
                        .help("Output format"),
                ),
        )
        .subcommand(Command::new("flags").about("List run flags and the fields they enable"))
}

/// Resolve the run configuration: config file first, then command-line additions
fn build_config(matches: &ArgMatches) -> anyhow::Result<RunConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::new(),
    };

    if let Some(flags) = matches.get_many::<String>("flag") {
        config = config.flags(flags.cloned());
    }

    if let Some(plugins) = matches.get_many::<String>("plugin") {
        for spec in plugins {
            let (name, path) = spec
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("invalid plugin '{}': expected NAME=FILE", spec))?;
            config = config.plugin(PluginHeaders::load(name, path)?);
        }
    }

    if let Some(customs) = matches.get_many::<String>("custom") {
        for spec in customs {
            config = config.custom(CustomTrack::parse(spec)?);
        }
    }

    Ok(config)
}

fn run_info(matches: &ArgMatches, config: &RunConfig) -> RunInfo {
    let mut info = RunInfo::new(format!("VARTAB v{}", env!("CARGO_PKG_VERSION")))
        .produced_at(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
    if let Some(path) = matches.get_one::<String>("config") {
        info = info.entry("Config", path.as_str());
    }
    if !config.flags.is_empty() {
        let flags: Vec<&str> = config.flags.iter().map(String::as_str).collect();
        info = info.entry("Flags", flags.join(","));
    }
    info
}

/// Handler for format command
fn format_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = build_config(matches)?;
    let info = run_info(matches, &config);
    let formatter = LineFormatter::from_config(ColumnTable::vep(), config);

    let reader: Box<dyn BufRead> = match matches.get_one::<String>("input") {
        Some(path) if path != "-" => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open '{}'", path))?,
        )),
        _ => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if !matches.get_flag("no-header") {
        for line in formatter.header_block(&info) {
            writeln!(out, "{}", line)?;
        }
    }

    let mut records = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let bag = AttributeBag::from_json_str(&line)
            .with_context(|| format!("line {}", idx + 1))?;
        writeln!(out, "{}", formatter.render_line(&bag))?;
        records += 1;
    }

    out.flush()?;
    debug!(records, "Formatted records");
    Ok(())
}

/// Handler for fields command
fn fields_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = build_config(matches)?;
    let formatter = LineFormatter::from_config(ColumnTable::vep(), config);
    let block = formatter.descriptors();

    if matches.get_one::<String>("output").map(String::as_str) == Some("json") {
        println!("{}", serde_json::to_string_pretty(&block)?);
        return Ok(());
    }

    let width = block
        .extra
        .iter()
        .chain(block.providers.iter())
        .map(|h| h.name.len())
        .max()
        .unwrap_or(0);
    for header in block.extra.iter().chain(block.providers.iter()) {
        println!("{:<width$}  {}", header.name, header.description, width = width);
    }
    Ok(())
}

/// Handler for flags command
fn flags_handler() -> anyhow::Result<()> {
    let width = FLAG_FIELDS.iter().map(|f| f.flag.len()).max().unwrap_or(0);
    for entry in FLAG_FIELDS {
        println!("{:<width$}  {}", entry.flag, entry.fields.join(", "), width = width);
    }
    Ok(())
}

/// `RUST_LOG` wins unless `-v` is given; without either, only warnings are shown.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    match (verbose, rust_log) {
        (false, Some(directives)) => EnvFilter::new(directives),
        (false, None) => EnvFilter::new("warn"),
        (true, Some(directives)) => {
            EnvFilter::new(directives).add_directive(tracing::Level::DEBUG.into())
        }
        (true, None) => EnvFilter::new("debug"),
    }
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .init();
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    let verbose = matches.get_flag("verbose")
        || matches
            .subcommand()
            .is_some_and(|(_, sub)| sub.get_flag("verbose"));
    init_tracing(verbose);

    let result = match matches.subcommand() {
        Some(("format", sub)) => format_handler(sub),
        Some(("fields", sub)) => fields_handler(sub),
        Some(("flags", _)) => flags_handler(),
        // No subcommand: treat as format
        _ => format_handler(&matches),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").for_stderr().red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
