use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::git::{Git2Client, GitCli, GitClient};

/// Which implementation answers repository queries.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// Spawn the `git` executable.
    #[default]
    Process,
    /// Use libgit2 in-process.
    Libgit2,
}

/// Settings read from an optional TOML file.
///
/// ```toml
/// backend = "process"
/// git_binary = "/usr/bin/git"
/// ignore_file = ".gitignore"
/// default_profile = "claude"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub backend: GitBackend,
    pub git_binary: PathBuf,
    /// File name of the ignore file, relative to the repository root.
    pub ignore_file: String,
    /// Profile used when the caller names none, before auto-detection.
    pub default_profile: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: GitBackend::Process,
            git_binary: PathBuf::from("git"),
            ignore_file: ".gitignore".to_string(),
            default_profile: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Builds the repository client selected by `backend`.
    pub fn git_client(&self) -> Box<dyn GitClient> {
        match self.backend {
            GitBackend::Process => Box::new(GitCli::new(self.git_binary.clone())),
            GitBackend::Libgit2 => Box::new(Git2Client::new()),
        }
    }
}
