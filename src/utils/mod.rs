use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::builders::patterns::{self, ProfileId};
use crate::builders::reporter::{self, ExclusionStatus};
use crate::core::config::Settings;
use crate::core::engine::{ExclusionEngine, ExclusionResult};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

pub fn add_exclusions(
    settings: Settings,
    path: Option<PathBuf>,
    agent: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let engine = ExclusionEngine::from_settings(settings);
    let path = target_path(path)?;
    let result = engine.add_exclusions(&path, parse_agent(agent.as_deref()))?;

    if print_structured(&result, format)? {
        return Ok(());
    }
    print_result(&result);
    print_guidance(&result.tracked_files, &result.git_root);
    Ok(())
}

pub fn remove_exclusions(
    settings: Settings,
    path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let engine = ExclusionEngine::from_settings(settings);
    let path = target_path(path)?;
    let result = engine.remove_exclusions(&path)?;

    if print_structured(&result, format)? {
        return Ok(());
    }
    print_result(&result);
    Ok(())
}

pub fn show_status(
    settings: Settings,
    path: Option<PathBuf>,
    agent: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let engine = ExclusionEngine::from_settings(settings);
    let path = target_path(path)?;
    let status = engine.check_status(&path, parse_agent(agent.as_deref()))?;

    if print_structured(&status, format)? {
        return Ok(());
    }
    print_status(&status, engine.settings());
    print_guidance(&status.tracked_files, &status.git_root);
    Ok(())
}

/// Prints the catalog for `agent` without touching any repository.
pub fn list_patterns(agent: Option<String>, format: OutputFormat) -> Result<()> {
    let profile = parse_agent(agent.as_deref());
    let patterns = patterns::patterns_for(profile.as_ref());

    if print_structured(&patterns, format)? {
        return Ok(());
    }
    for pattern in patterns {
        println!("{pattern}");
    }
    Ok(())
}

fn parse_agent(agent: Option<&str>) -> Option<ProfileId> {
    agent.and_then(ProfileId::parse)
}

fn target_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

/// Prints `value` as JSON or YAML. Returns `false` for text output, which
/// each command renders itself.
fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<bool> {
    let rendered = match format {
        OutputFormat::Text => return Ok(false),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to serialize to YAML")?,
    };
    println!("{rendered}");
    Ok(true)
}

fn print_result(result: &ExclusionResult) {
    if result.already_configured {
        println!("ℹ️  {}", result.message.bright_blue());
    } else {
        println!("✓ {}", result.message.green());
    }

    for pattern in &result.patterns_affected {
        println!("  {}", pattern.cyan());
    }
    if let Some(profile) = &result.profile {
        println!("  Agent: {}", profile.as_str().bright_yellow());
    }
}

fn print_status(status: &ExclusionStatus, settings: &Settings) {
    println!("{}", "Nexkit Exclusion Status".cyan().bold());
    println!("├─ Repository: {}", status.git_root.display());

    match &status.gitignore_path {
        Some(path) => println!("├─ Ignore file: {}", path.display()),
        None => println!("├─ Ignore file: {}", format!("no {}", settings.ignore_file).yellow()),
    }
    if let Some(profile) = &status.profile {
        println!("├─ Agent: {}", profile.as_str().bright_yellow());
    }

    if status.is_excluded {
        println!("└─ {}", "Nexkit files are excluded".green().bold());
    } else {
        println!("└─ {}", "Nexkit files are not excluded".yellow().bold());
        println!("   Missing patterns:");
        for pattern in &status.missing_patterns {
            println!("     {pattern}");
        }
    }
}

fn print_guidance(tracked: &[PathBuf], root: &Path) {
    let guidance = reporter::format_cleanup_guidance(tracked, root);
    if !guidance.is_empty() {
        println!("{}", guidance.yellow());
    }
}
