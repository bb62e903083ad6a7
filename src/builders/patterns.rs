use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Patterns excluded regardless of profile, always rendered first.
pub const BASE_PATTERNS: [&str; 2] = [".specify/", "specs/"];

/// Tracked-file locations queried when no recognized profile is in effect.
pub const LEGACY_TRACKED_PREFIXES: [&str; 2] = [".github/prompts", ".github/chatmodes"];

/// One row of the profile catalog: the extra exclusions for an integration and
/// the directories whose presence identifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileEntry {
    pub id: &'static str,
    pub patterns: [&'static str; 2],
    pub markers: [&'static str; 2],
}

const fn profile(
    id: &'static str,
    patterns: [&'static str; 2],
    markers: [&'static str; 2],
) -> ProfileEntry {
    ProfileEntry {
        id,
        patterns,
        markers,
    }
}

/// The recognized profiles. Order matters: detection reports the first row
/// with a marker directory present.
pub const PROFILES: &[ProfileEntry] = &[
    profile(
        "copilot",
        [".github/prompts/nexkit.*", ".github/chatmodes/"],
        [".github/prompts", ".github/chatmodes"],
    ),
    profile(
        "claude",
        [".claude/commands/nexkit.*", ".claude/modes/"],
        [".claude/commands", ".claude/modes"],
    ),
    profile(
        "gemini",
        [".gemini/commands/nexkit.*", ".gemini/modes/"],
        [".gemini/commands", ".gemini/modes"],
    ),
    profile(
        "cursor",
        [".cursor/commands/nexkit.*", ".cursor/modes/"],
        [".cursor/commands", ".cursor/modes"],
    ),
    profile(
        "qwen",
        [".qwen/commands/nexkit.*", ".qwen/modes/"],
        [".qwen/commands", ".qwen/modes"],
    ),
    profile(
        "opencode",
        [".opencode/command/nexkit.*", ".opencode/modes/"],
        [".opencode/command", ".opencode/modes"],
    ),
    profile(
        "windsurf",
        [".windsurf/workflows/nexkit.*", ".windsurf/modes/"],
        [".windsurf/workflows", ".windsurf/modes"],
    ),
    profile(
        "codex",
        [".codex/prompts/nexkit.*", ".codex/modes/"],
        [".codex/prompts", ".codex/modes"],
    ),
    profile(
        "kilocode",
        [".kilocode/workflows/nexkit.*", ".kilocode/modes/"],
        [".kilocode/workflows", ".kilocode/modes"],
    ),
    profile(
        "auggie",
        [".augment/commands/nexkit.*", ".augment/modes/"],
        [".augment/commands", ".augment/modes"],
    ),
    profile(
        "roo",
        [".roo/commands/nexkit.*", ".roo/modes/"],
        [".roo/commands", ".roo/modes"],
    ),
    profile(
        "q",
        [".amazonq/prompts/nexkit.*", ".amazonq/modes/"],
        [".amazonq/prompts", ".amazonq/modes"],
    ),
];

/// An integration profile identifier as given by the caller or found by detection.
///
/// Any non-empty identifier is accepted. Identifiers missing from [`PROFILES`]
/// simply contribute no extra patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileId(String);

impl ProfileId {
    /// Parses caller input. Blank input and `none` mean "no profile".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The catalog row for this identifier, if it is a recognized one.
    pub fn entry(&self) -> Option<&'static ProfileEntry> {
        lookup(&self.0)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ProfileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Finds the catalog row with exactly this identifier.
pub fn lookup(id: &str) -> Option<&'static ProfileEntry> {
    PROFILES.iter().find(|entry| entry.id == id)
}

/// Returns the exclusion patterns for `profile`: the base set, followed by the
/// profile's own pair when the identifier is recognized.
pub fn patterns_for(profile: Option<&ProfileId>) -> Vec<String> {
    let mut patterns: Vec<String> = BASE_PATTERNS.iter().map(|p| p.to_string()).collect();

    if let Some(entry) = profile.and_then(ProfileId::entry) {
        patterns.extend(entry.patterns.iter().map(|p| p.to_string()));
    }

    patterns
}

/// Detects the profile in use under `root` using the built-in catalog.
pub fn detect_profile(root: &Path) -> Option<ProfileId> {
    detect_profile_in(root, PROFILES)
}

/// Returns the first row of `table` with any marker directory present under `root`.
pub fn detect_profile_in(root: &Path, table: &[ProfileEntry]) -> Option<ProfileId> {
    table
        .iter()
        .find(|entry| entry.markers.iter().any(|marker| root.join(marker).exists()))
        .map(|entry| ProfileId(entry.id.to_string()))
}

/// Reduces a glob to the longest directory prefix that contains no wildcard.
///
/// `.github/prompts/nexkit.*` becomes `.github/prompts`, `specs/` becomes
/// `specs`. Returns `None` when nothing literal is left.
pub fn literal_dir_prefix(pattern: &str) -> Option<&str> {
    let literal = match pattern.find(['*', '?', '[']) {
        Some(idx) => match pattern[..idx].rfind('/') {
            Some(slash) => &pattern[..slash],
            None => "",
        },
        None => pattern,
    };

    let literal = literal.trim_end_matches('/');
    (!literal.is_empty()).then_some(literal)
}

/// The directories whose tracked contents should be reported for `profile`.
pub fn tracked_prefixes(profile: Option<&ProfileId>) -> Vec<String> {
    let mut prefixes: Vec<String> = Vec::new();
    let mut push = |prefix: &str| {
        if !prefixes.iter().any(|p| p == prefix) {
            prefixes.push(prefix.to_string());
        }
    };

    for pattern in patterns_for(profile) {
        if let Some(prefix) = literal_dir_prefix(&pattern) {
            push(prefix);
        }
    }

    if profile.and_then(ProfileId::entry).is_none() {
        for prefix in LEGACY_TRACKED_PREFIXES {
            push(prefix);
        }
    }

    prefixes
}
