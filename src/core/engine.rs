use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::builders::patterns::{self, ProfileId};
use crate::builders::reporter::{self, ExclusionStatus};
use crate::builders::section;
use crate::builders::storage;
use crate::core::config::Settings;
use crate::core::error::{ExclusionError, Result};
use crate::core::git::GitClient;

/// Outcome of adding or removing the nexkit section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionResult {
    pub success: bool,
    pub message: String,
    pub gitignore_path: PathBuf,
    /// Patterns written by an add, or found inside the section by a remove.
    pub patterns_affected: Vec<String>,
    /// Set when an add found the section already present and changed nothing.
    pub already_configured: bool,
    pub tracked_files: Vec<PathBuf>,
    pub git_root: PathBuf,
    pub profile: Option<ProfileId>,
}

/// Applies and inspects the nexkit section of a repository's ignore file.
///
/// Nothing is cached between calls; every operation resolves the repository
/// root again.
pub struct ExclusionEngine {
    git: Box<dyn GitClient>,
    settings: Settings,
}

impl ExclusionEngine {
    pub fn new(git: Box<dyn GitClient>, settings: Settings) -> Self {
        Self { git, settings }
    }

    /// Builds an engine with the repository client named in `settings`.
    pub fn from_settings(settings: Settings) -> Self {
        let git = settings.git_client();
        Self::new(git, settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves the repository root for `path`, or fails with `NotARepository`.
    pub fn resolve_root(&self, path: &Path) -> Result<PathBuf> {
        self.git
            .resolve_root(path)
            .ok_or_else(|| ExclusionError::NotARepository(path.to_path_buf()))
    }

    fn ignore_path(&self, root: &Path) -> PathBuf {
        root.join(&self.settings.ignore_file)
    }

    /// Picks the explicit profile, then the configured default, then detection.
    fn effective_profile(&self, root: &Path, requested: Option<ProfileId>) -> Option<ProfileId> {
        requested
            .or_else(|| {
                self.settings
                    .default_profile
                    .as_deref()
                    .and_then(ProfileId::parse)
            })
            .or_else(|| patterns::detect_profile(root))
    }

    /// Appends the section for `profile` to the ignore file unless it is already there.
    pub fn add_exclusions(
        &self,
        path: &Path,
        profile: Option<ProfileId>,
    ) -> Result<ExclusionResult> {
        let git_root = self.resolve_root(path)?;
        let profile = self.effective_profile(&git_root, profile);
        let gitignore_path = self.ignore_path(&git_root);
        let file_name = &self.settings.ignore_file;

        if section::has_section(&gitignore_path) {
            debug!("section already present in {}", gitignore_path.display());
            let tracked_files =
                reporter::tracked_matches(self.git.as_ref(), &git_root, profile.as_ref())?;
            return Ok(ExclusionResult {
                success: true,
                message: "Nexkit exclusions already configured".to_string(),
                gitignore_path,
                patterns_affected: Vec::new(),
                already_configured: true,
                tracked_files,
                git_root,
                profile,
            });
        }

        let existing = storage::read_ignore_file(&gitignore_path)?.unwrap_or_default();
        let patterns_added = patterns::patterns_for(profile.as_ref());
        let rendered = section::render_section(&patterns_added, profile.as_ref());
        storage::write_atomic(
            &gitignore_path,
            &section::insert_section(&existing, &rendered),
        )?;
        debug!(
            "added {} exclusion pattern(s) to {}",
            patterns_added.len(),
            gitignore_path.display()
        );

        let tracked_files =
            reporter::tracked_matches(self.git.as_ref(), &git_root, profile.as_ref())?;

        Ok(ExclusionResult {
            success: true,
            message: format!("Successfully added nexkit exclusions to {file_name}"),
            gitignore_path,
            patterns_affected: patterns_added,
            already_configured: false,
            tracked_files,
            git_root,
            profile,
        })
    }

    /// Cuts the section out of the ignore file, leaving everything else in place.
    pub fn remove_exclusions(&self, path: &Path) -> Result<ExclusionResult> {
        let git_root = self.resolve_root(path)?;
        let gitignore_path = self.ignore_path(&git_root);
        let file_name = &self.settings.ignore_file;

        let unchanged = |message: String, gitignore_path: PathBuf, git_root: PathBuf| {
            ExclusionResult {
                success: true,
                message,
                gitignore_path,
                patterns_affected: Vec::new(),
                already_configured: false,
                tracked_files: Vec::new(),
                git_root,
                profile: None,
            }
        };

        let Some(content) = storage::read_ignore_file(&gitignore_path)? else {
            return Ok(unchanged(
                format!("No {file_name} file found"),
                gitignore_path,
                git_root,
            ));
        };
        if !section::contains_section(&content) {
            return Ok(unchanged(
                format!("Nexkit exclusions not found in {file_name}"),
                gitignore_path,
                git_root,
            ));
        }

        let removal = section::strip_section(&content);
        storage::write_atomic(&gitignore_path, &removal.content)?;
        debug!(
            "removed nexkit section ({} pattern(s)) from {}",
            removal.patterns.len(),
            gitignore_path.display()
        );

        Ok(ExclusionResult {
            success: true,
            message: format!("Successfully removed nexkit exclusions from {file_name}"),
            gitignore_path,
            patterns_affected: removal.patterns,
            already_configured: false,
            tracked_files: Vec::new(),
            git_root,
            profile: None,
        })
    }

    /// Reports the current state without touching any file.
    pub fn check_status(
        &self,
        path: &Path,
        profile: Option<ProfileId>,
    ) -> Result<ExclusionStatus> {
        let git_root = self.resolve_root(path)?;
        let profile = self.effective_profile(&git_root, profile);
        let gitignore_path = self.ignore_path(&git_root);

        let content = storage::read_ignore_file(&gitignore_path)?;
        let has_gitignore = content.is_some();
        let is_excluded = content.as_deref().is_some_and(section::contains_section);
        let missing_patterns = if is_excluded {
            Vec::new()
        } else {
            patterns::patterns_for(profile.as_ref())
        };
        let tracked_files =
            reporter::tracked_matches(self.git.as_ref(), &git_root, profile.as_ref())?;

        Ok(ExclusionStatus {
            is_excluded,
            has_gitignore,
            missing_patterns,
            requires_cleanup: !tracked_files.is_empty(),
            tracked_files,
            git_root,
            gitignore_path: has_gitignore.then_some(gitignore_path),
            profile,
        })
    }
}
