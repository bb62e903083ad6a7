use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::builders::patterns::{self, ProfileId};
use crate::core::error::Result;
use crate::core::git::GitClient;

/// How many tracked paths the guidance lists before summarizing the rest.
pub const GUIDANCE_DISPLAY_LIMIT: usize = 10;

/// A read-only snapshot of the exclusion state of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionStatus {
    /// Whether the ignore file holds the nexkit section.
    pub is_excluded: bool,
    pub has_gitignore: bool,
    /// Patterns that would be added. Empty once the section is present.
    pub missing_patterns: Vec<String>,
    /// Catalog paths that are still committed.
    pub tracked_files: Vec<PathBuf>,
    /// Set whenever `tracked_files` is non-empty, configured or not.
    pub requires_cleanup: bool,
    pub git_root: PathBuf,
    /// `None` when the ignore file does not exist.
    pub gitignore_path: Option<PathBuf>,
    /// The profile the snapshot was computed for, explicit or detected.
    pub profile: Option<ProfileId>,
}

/// Collects the tracked files under every catalog prefix for `profile`.
///
/// Results keep first-seen order and contain no duplicates.
pub fn tracked_matches(
    git: &dyn GitClient,
    root: &Path,
    profile: Option<&ProfileId>,
) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut tracked = Vec::new();

    for prefix in patterns::tracked_prefixes(profile) {
        let files = git.list_tracked(root, &prefix)?;
        debug!("{} tracked file(s) under {prefix}", files.len());
        for file in files {
            if seen.insert(file.clone()) {
                tracked.push(file);
            }
        }
    }

    Ok(tracked)
}

/// Builds plain-text instructions for untracking `tracked`.
///
/// Returns an empty string when nothing is tracked. Only the first
/// [`GUIDANCE_DISPLAY_LIMIT`] paths are listed, but the `git rm` command names all of them.
pub fn format_cleanup_guidance(tracked: &[PathBuf], root: &Path) -> String {
    if tracked.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        String::new(),
        "Warning: nexkit files are currently tracked in git".to_string(),
        String::new(),
        format!("Found {} tracked file(s):", tracked.len()),
        String::new(),
    ];

    for file in tracked.iter().take(GUIDANCE_DISPLAY_LIMIT) {
        lines.push(format!("  • {}", file.display()));
    }
    if tracked.len() > GUIDANCE_DISPLAY_LIMIT {
        lines.push(format!(
            "  ... and {} more",
            tracked.len() - GUIDANCE_DISPLAY_LIMIT
        ));
    }

    let command_args: Vec<String> = tracked.iter().map(|file| shell_quote(file)).collect();

    lines.extend([
        String::new(),
        "To remove these files from git tracking:".to_string(),
        String::new(),
        format!(
            "  1. From {}, run this command to untrack files (keeps local copies):",
            root.display()
        ),
        format!("     git rm --cached {}", command_args.join(" ")),
        String::new(),
        "  2. Commit the change:".to_string(),
        "     git commit -m \"Stop tracking nexkit files\"".to_string(),
        String::new(),
        "  3. The files will remain in your working directory but won't be tracked.".to_string(),
        String::new(),
    ]);

    lines.join("\n")
}

/// Single-quotes a path for the shell when it contains anything unusual.
fn shell_quote(path: &Path) -> String {
    let raw = path.display().to_string();
    let plain = raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '-' | '_' | '+' | ':' | '@'));
    if plain {
        raw
    } else {
        format!("'{}'", raw.replace('\'', "'\\''"))
    }
}
