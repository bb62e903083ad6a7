//! Toggles nexkit's generated files between tracked and untracked by
//! maintaining a single marker-delimited block in the repository's
//! `.gitignore`. Everything else in that file is left alone.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use nexkit_exclude::core::config::Settings;
use nexkit_exclude::utils::{self, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nexkit-exclude")]
#[command(about = "Add or remove nexkit exclusion patterns in .gitignore")]
#[command(version)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Print debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add nexkit exclusion patterns (.specify/, specs/ and agent files) to .gitignore
    Add {
        /// Any path inside the repository (defaults to the current directory)
        path: Option<PathBuf>,
        /// Agent profile, e.g. `claude` or `copilot`; detected when omitted
        #[arg(long)]
        agent: Option<String>,
    },
    /// Remove nexkit exclusion patterns from .gitignore
    Remove {
        /// Any path inside the repository (defaults to the current directory)
        path: Option<PathBuf>,
    },
    /// Show whether nexkit files are excluded and which are still tracked
    Status {
        /// Any path inside the repository (defaults to the current directory)
        path: Option<PathBuf>,
        #[arg(long)]
        agent: Option<String>,
    },
    /// Print the patterns that would be written for an agent
    Patterns {
        #[arg(long)]
        agent: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Add { path, agent } => utils::add_exclusions(settings, path, agent, cli.format),
        Commands::Remove { path } => utils::remove_exclusions(settings, path, cli.format),
        Commands::Status { path, agent } => utils::show_status(settings, path, agent, cli.format),
        Commands::Patterns { agent } => utils::list_patterns(agent, cli.format),
    }
}
