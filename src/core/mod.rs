// This file is the module declaration file for the `core` module.
// It declares the submodules in `src/core/` and exposes them to the rest
// of the crate.

// `config` module:
// Settings read from an optional TOML file (`Settings`), including which
// repository backend to use (`GitBackend`) and the ignore file name.
pub mod config;

// `engine` module:
// `ExclusionEngine` drives the add, remove and status operations and
// returns `ExclusionResult` / `ExclusionStatus` to the caller.
pub mod engine;

// `error` module:
// `ExclusionError`, the single error type of the library.
pub mod error;

// `git` module:
// The `GitClient` trait and its two implementations: `GitCli`, which
// spawns the `git` executable, and `Git2Client`, which uses libgit2.
pub mod git;
