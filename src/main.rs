//! Saillint CLI - SAIL Accessibility Linter

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use saillint::config::{ColorMode, Config, OutputFormat};
use saillint::engine::Engine;
use saillint::finding::Severity;
use saillint::interpreter;
use saillint::output::{CompactFormatter, JsonFormatter, OutputFormatter, TextFormatter};
use saillint::rule::load_rules;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "saillint",
    version,
    about = "SAIL Accessibility Linter",
    long_about = "Scans SAIL interface definitions for accessibility problems against the \
design-system checklist, with a built-in rule set as a fallback."
)]
struct Cli {
    /// Files or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Checklist rules file (YAML or JSON); omit to use built-in checks
    #[arg(long)]
    checklist: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Minimum severity to report
    #[arg(long, value_enum)]
    min_severity: Option<MinSeverity>,

    /// List the automatic checks the interpreter can compile and exit
    #[arg(long)]
    list_checks: bool,

    /// Exit with 0 even if findings are reported
    #[arg(long)]
    exit_zero: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Compact,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Compact => OutputFormat::Compact,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MinSeverity {
    Warning,
    Error,
}

impl From<MinSeverity> for Severity {
    fn from(min: MinSeverity) -> Self {
        match min {
            MinSeverity::Warning => Severity::Warning,
            MinSeverity::Error => Severity::Error,
        }
    }
}

fn main() {
    env_logger::init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            std::process::exit(2);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    // CLI flags override configuration
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if cli.no_color {
        config.output.color = ColorMode::Never;
    }
    if cli.verbose {
        config.output.verbose = true;
    }
    if let Some(jobs) = cli.jobs {
        config.engine.jobs = jobs;
    }
    if let Some(path) = cli.checklist {
        config.checklist.path = Some(path);
    }
    if let Some(min) = cli.min_severity {
        config.checklist.min_severity = Some(min.into());
    }

    if cli.list_checks {
        print_checks();
        return Ok(0);
    }

    let files = collect_files(&cli.files, &config)?;
    if files.is_empty() {
        anyhow::bail!("no SAIL files to lint");
    }

    // An unusable checklist degrades to the built-in checks instead of
    // failing the run, matching the scan-level fallback behavior.
    let rules = match &config.checklist.path {
        Some(path) => match load_rules(path) {
            Ok(rules) => {
                log::info!("loaded {} checklist rules from {}", rules.len(), path.display());
                rules
            }
            Err(err) => {
                log::warn!(
                    "could not load checklist from {}: {}; using built-in checks",
                    path.display(),
                    err
                );
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let engine = Engine::new(config.clone()).with_rules(rules);
    let result = engine.lint(&files);

    let use_color = match config.output.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            std::env::var_os("NO_COLOR").is_none()
                && std::io::IsTerminal::is_terminal(&std::io::stdout())
        }
    };

    let formatter: Box<dyn OutputFormatter> = match config.output.format {
        OutputFormat::Text => {
            let mut text = TextFormatter::new();
            text.colored = use_color;
            text.show_stats = config.output.statistics;
            if config.output.verbose {
                text = text.with_links();
            }
            Box::new(text)
        }
        OutputFormat::Json => Box::new(JsonFormatter::new().pretty()),
        OutputFormat::Compact => Box::new(CompactFormatter::new()),
    };

    print!("{}", formatter.format(&result));

    Ok(if cli.exit_zero { 0 } else { result.exit_code() })
}

/// Expand CLI arguments (or the configured include patterns) into a
/// deduplicated, ordered file list
fn collect_files(args: &[String], config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let patterns: Vec<String> = if args.is_empty() {
        config.files.include.clone()
    } else {
        args.to_vec()
    };

    let excludes = config.exclude_set().context("compiling exclude patterns")?;

    let mut files = Vec::new();
    for pattern in &patterns {
        let path = PathBuf::from(pattern);
        if path.is_file() {
            files.push(path);
            continue;
        }

        let matches =
            glob::glob(pattern).with_context(|| format!("bad file pattern: {}", pattern))?;
        for entry in matches {
            let path = entry?;
            if path.is_file() && !excludes.is_match(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn print_checks() {
    println!("Automatic checks compiled from checklist rules:\n");
    for classification in interpreter::classifications() {
        println!("  {:<22} {}", classification.id, classification.summary);
    }
    println!("\nWithout a checklist, a fixed built-in subset of these runs instead.");
}
