use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// Every failure the exclusion core can raise to its caller.
///
/// Absent ignore files, absent sections, an already configured section, zero
/// tracked files and unknown profile identifiers are ordinary states and are
/// never reported through this type.
#[derive(Debug, thiserror::Error)]
pub enum ExclusionError {
    /// No repository root could be resolved from the given path.
    #[error("Not a git repository: {}. Initialize git first with: git init", .0.display())]
    NotARepository(PathBuf),

    /// The git binary could not be spawned while listing tracked files.
    #[error("Git is not installed or not in PATH (tried `{0}`)")]
    ToolUnavailable(String),

    #[error("Cannot access {}: {source}. Check file permissions.", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} file encoding issue: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Failed to update {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("libgit2 error: {0}")]
    Git(#[from] git2::Error),
}

impl ExclusionError {
    /// Classifies an I/O failure on `path`, keeping permission problems distinct.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, ExclusionError>;
