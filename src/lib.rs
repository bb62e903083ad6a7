//! Manages the nexkit-owned section of a repository's `.gitignore`.
//!
//! Generated nexkit files can be switched between tracked and untracked
//! without touching anything a user wrote in the same ignore file.

pub mod builders;
pub mod core;
pub mod utils;


pub use crate::builders::patterns::{ProfileId, detect_profile, patterns_for};
pub use crate::builders::reporter::{ExclusionStatus, format_cleanup_guidance};
pub use crate::core::config::{GitBackend, Settings};
pub use crate::core::engine::{ExclusionEngine, ExclusionResult};
pub use crate::core::error::ExclusionError;
pub use crate::core::git::{Git2Client, GitCli, GitClient};
