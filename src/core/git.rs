use git2::Repository;
use log::{debug, trace};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::str;

use crate::core::error::{ExclusionError, Result};

/// Trait defining the repository queries the exclusion engine needs.
/// This abstraction lets tests substitute fakes for the real repository.
///
/// Implementations never cache: every call re-reads repository state.
pub trait GitClient {
    /// Returns whether `path` lies inside a working tree. Never fails.
    fn is_under_version_control(&self, path: &Path) -> bool;

    /// Returns the canonical top-level directory for `path`, if any.
    fn resolve_root(&self, path: &Path) -> Option<PathBuf>;

    /// Lists tracked files (relative to `root`) under the directory `prefix`.
    ///
    /// A prefix that cannot be queried yields an empty list. Only a missing
    /// tool is reported as an error.
    fn list_tracked(&self, root: &Path, prefix: &str) -> Result<Vec<PathBuf>>;
}

/// Runs the queries through the `git` executable.
pub struct GitCli {
    binary: PathBuf,
}

impl GitCli {
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, cwd: &Path, args: &[&str]) -> io::Result<Output> {
        trace!("running {} {:?} in {}", self.binary.display(), args, cwd.display());
        Command::new(&self.binary).args(args).current_dir(cwd).output()
    }

    fn show_toplevel(&self, path: &Path) -> io::Result<Output> {
        self.run(working_dir(path), &["rev-parse", "--show-toplevel"])
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitClient for GitCli {
    fn is_under_version_control(&self, path: &Path) -> bool {
        match self.show_toplevel(path) {
            Ok(output) => output.status.success(),
            Err(e) => {
                debug!("git query failed for {}: {e}", path.display());
                false
            }
        }
    }

    fn resolve_root(&self, path: &Path) -> Option<PathBuf> {
        let output = self.show_toplevel(path).ok()?;
        if !output.status.success() {
            return None;
        }

        let stdout = str::from_utf8(&output.stdout).ok()?;
        let top = stdout.trim_end_matches(['\r', '\n']);
        if top.is_empty() {
            return None;
        }
        Some(canonical(Path::new(top)))
    }

    fn list_tracked(&self, root: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
        let output = match self.run(root, &["ls-files", "-z", "--", prefix]) {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ExclusionError::ToolUnavailable(
                    self.binary.display().to_string(),
                ));
            }
            Err(e) => {
                debug!("git ls-files {prefix} could not run: {e}");
                return Ok(Vec::new());
            }
        };

        if !output.status.success() {
            debug!("git ls-files {prefix} exited with {}", output.status);
            return Ok(Vec::new());
        }

        Ok(output
            .stdout
            .split(|byte| *byte == 0)
            .filter(|entry| !entry.is_empty())
            .map(|entry| PathBuf::from(String::from_utf8_lossy(entry).into_owned()))
            .collect())
    }
}

/// Concrete implementation of GitClient using the git2 crate.
///
/// Opens the repository on every call instead of holding a handle.
#[derive(Default)]
pub struct Git2Client;

impl Git2Client {
    pub fn new() -> Self {
        Self
    }
}

impl GitClient for Git2Client {
    fn is_under_version_control(&self, path: &Path) -> bool {
        self.resolve_root(path).is_some()
    }

    fn resolve_root(&self, path: &Path) -> Option<PathBuf> {
        let repo = match Repository::discover(working_dir(path)) {
            Ok(repo) => repo,
            Err(e) => {
                debug!("no repository above {}: {}", path.display(), e.message());
                return None;
            }
        };
        repo.workdir().map(canonical)
    }

    fn list_tracked(&self, root: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
        let index = match Repository::open(root).and_then(|repo| repo.index()) {
            Ok(index) => index,
            Err(e) => {
                debug!("cannot read index of {}: {}", root.display(), e.message());
                return Ok(Vec::new());
            }
        };
        let prefix = prefix.trim_end_matches('/');
        let nested = format!("{prefix}/");

        let mut files = Vec::new();
        for entry in index.iter() {
            if let Ok(path_str) = str::from_utf8(&entry.path)
                && (path_str == prefix || path_str.starts_with(&nested))
            {
                files.push(PathBuf::from(path_str));
            }
        }
        Ok(files)
    }
}

/// `git` must be started inside a directory, so a file path is queried via its parent.
fn working_dir(path: &Path) -> &Path {
    if !path.is_file() {
        return path;
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
