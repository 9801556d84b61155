//! span-diff: approximate character-level diff with a time budget
//!
//! Reports the spans of two texts that have no counterpart in the other.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use span_diff::{
    cli,
    config::{
        AppConfig, ConfigOverrides, ConfigPreset, DiffConfigBuilder, MultiDiffConfig,
        file::CONFIG_FILE_NAMES,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io::{self, Write as _};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nOutput Formats:",
        "\n  annotated, summary, json, spans",
        "\n\nPresets:",
        "\n  default, fast, thorough, exact"
    )
}

#[derive(Parser)]
#[command(name = "span-diff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Approximate character-level diff with a time budget", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or no --fail-on-* flag triggered)
    1  Changes detected (--fail-on-change)
    2  Diff incomplete: time or depth limit reached (--fail-on-incomplete)
    3  Error occurred

EXAMPLES:
    # Show both files with their differences highlighted
    span-diff diff old.txt new.txt

    # CI check with a tight budget
    span-diff diff old.txt new.txt --max-time 0.5 --fail-on-change --fail-on-incomplete

    # Export JSON for processing
    span-diff diff old.txt new.txt -o json > diff.json

    # Compare one baseline against many revisions
    span-diff diff-multi base.txt rev-*.txt -o summary")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Engine and output options shared by `diff` and `diff-multi`
#[derive(Args)]
struct DiffOptions {
    /// Output format [default: auto, annotated on a terminal and summary otherwise]
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Settings preset (default, fast, thorough, exact)
    #[arg(long)]
    preset: Option<String>,

    /// Time budget in seconds for each comparison
    #[arg(long, env = "SPAN_DIFF_MAX_TIME")]
    max_time: Option<f64>,

    /// Maximum recursion depth (unlimited by default)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Never retry poor alignments with the chunked strategy
    #[arg(long)]
    no_escalation: bool,

    /// Characters of changed text shown per span in summaries (0 hides it)
    #[arg(long)]
    context_chars: Option<usize>,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// Exit with code 2 if a diff hit its time or depth limit
    #[arg(long)]
    fail_on_incomplete: bool,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old text
    old: PathBuf,

    /// Path to the new text
    new: PathBuf,

    #[command(flatten)]
    options: DiffOptions,
}

/// Arguments for the `diff-multi` subcommand
#[derive(Parser)]
struct DiffMultiArgs {
    /// Path to the baseline text
    baseline: PathBuf,

    /// Paths to texts to compare against the baseline
    #[arg(required = true)]
    targets: Vec<PathBuf>,

    #[command(flatten)]
    options: DiffOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two text files
    Diff(DiffArgs),

    /// Compare a baseline against multiple targets (1:N comparison)
    DiffMulti(DiffMultiArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate a man page and print it to stdout
    Man,
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .span-diff.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let app = effective_config(&cli.config, &args.options, cli.quiet, cli.no_color)?;
            let config = DiffConfigBuilder::from_app_config(&app)
                .old_path(args.old)
                .new_path(args.new)
                .build()?;
            cli::run_diff(config)
        }
        Commands::DiffMulti(args) => {
            let app = effective_config(&cli.config, &args.options, cli.quiet, cli.no_color)?;
            cli::run_diff_multi(MultiDiffConfig {
                baseline: args.baseline,
                targets: args.targets,
                engine: app.engine,
                output: app.output,
                behavior: app.behavior,
            })
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "span-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
        Commands::ConfigSchema { output } => {
            let schema = span_diff::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { action } => {
            run_config_action(action, cli.config)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut buf = Vec::new();
            man.render(&mut buf).context("failed to render man page")?;
            io::stdout().write_all(&buf)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Layer the settings: config file (or defaults), then preset, then flags.
fn effective_config(
    config_path: &Option<PathBuf>,
    options: &DiffOptions,
    quiet: bool,
    no_color: bool,
) -> Result<AppConfig> {
    let (mut app, loaded_from) = span_diff::config::load_or_default(config_path.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    if let Some(name) = &options.preset {
        let preset = ConfigPreset::from_name(name).with_context(|| {
            let valid: Vec<_> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
            format!("Unknown preset '{name}'. Valid options: {}", valid.join(", "))
        })?;
        app.merge(&AppConfig::from_preset(preset));
    }

    app.apply_overrides(&ConfigOverrides {
        max_time_secs: options.max_time,
        max_depth: options.max_depth,
        no_escalation: options.no_escalation,
        format: options.output,
        output_file: options.output_file.clone(),
        no_color,
        context_chars: options.context_chars,
        fail_on_change: options.fail_on_change,
        fail_on_incomplete: options.fail_on_incomplete,
        quiet,
    });

    Ok(app)
}

fn run_config_action(action: ConfigAction, config_path: Option<PathBuf>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = span_diff::config::load_or_default(config_path.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("span-diff").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match span_diff::config::discover_config_file(config_path.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".span-diff.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = span_diff::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
