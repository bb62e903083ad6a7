//! Rendering, detection and removal of the nexkit block inside an ignore file.
//!
//! The block looks like this, and other tooling may parse against that shape:
//!
//! ```text
//!
//! # Nexkit - Spec-Driven Development Tools
//! # Generated by: nexkit add-exclusion
//! # To remove: nexkit remove-exclusion
//! # Agent: claude
//!
//! .specify/
//! specs/
//! .claude/commands/nexkit.*
//! .claude/modes/
//!
//! # End Nexkit exclusions
//!
//! ```
//!
//! Nothing outside the two marker lines is ever rewritten.

use std::fs;
use std::path::Path;

use crate::builders::patterns::ProfileId;

pub const SECTION_START_MARKER: &str = "# Nexkit - Spec-Driven Development Tools";
pub const SECTION_END_MARKER: &str = "# End Nexkit exclusions";
const GENERATED_BY: &str = "# Generated by: nexkit add-exclusion";
const REMOVE_HINT: &str = "# To remove: nexkit remove-exclusion";

/// Returns whether the ignore file at `path` holds a section.
/// A missing or unreadable file has none.
pub fn has_section(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| contains_section(&content))
        .unwrap_or(false)
}

/// Substring search for the start marker, anywhere in `content`.
pub fn contains_section(content: &str) -> bool {
    content.contains(SECTION_START_MARKER)
}

/// Renders the section for `patterns`, annotated with `profile` when one is set.
pub fn render_section(patterns: &[String], profile: Option<&ProfileId>) -> String {
    let mut lines: Vec<String> = vec![
        String::new(),
        SECTION_START_MARKER.to_string(),
        GENERATED_BY.to_string(),
        REMOVE_HINT.to_string(),
    ];

    if let Some(profile) = profile {
        lines.push(format!("# Agent: {profile}"));
    }

    lines.push(String::new());
    lines.extend(patterns.iter().cloned());
    lines.push(String::new());
    lines.push(SECTION_END_MARKER.to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// Appends `section` to `existing`, adding the newline missing at its end if needed.
pub fn insert_section(existing: &str, section: &str) -> String {
    let mut content = String::with_capacity(existing.len() + section.len() + 1);
    content.push_str(existing);
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(section);
    content
}

/// The outcome of cutting the section out of ignore-file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRemoval {
    /// The remaining text, ending in exactly one newline unless empty.
    pub content: String,
    /// Pattern lines that sat between the markers.
    pub patterns: Vec<String>,
}

/// Removes the first marker pair and everything between them.
///
/// Suppression starts at the first line containing the start marker and stops
/// after the first following line containing the end marker. Without an end
/// marker the rest of the file belongs to the section. Trailing blank lines
/// left behind are dropped.
pub fn strip_section(content: &str) -> SectionRemoval {
    let mut kept: Vec<&str> = Vec::new();
    let mut patterns = Vec::new();
    let mut state = ScanState::Before;

    for line in content.split('\n') {
        match state {
            ScanState::Before if line.contains(SECTION_START_MARKER) => {
                state = ScanState::Inside;
            }
            ScanState::Inside => {
                if line.contains(SECTION_END_MARKER) {
                    state = ScanState::After;
                } else if is_pattern_line(line) {
                    patterns.push(line.trim().to_string());
                }
            }
            ScanState::Before | ScanState::After => kept.push(line),
        }
    }

    while kept.last().is_some_and(|line| line.trim().is_empty()) {
        kept.pop();
    }

    let mut remaining = kept.join("\n");
    if !remaining.is_empty() {
        remaining.push('\n');
    }

    SectionRemoval {
        content: remaining,
        patterns,
    }
}

#[derive(Clone, Copy)]
enum ScanState {
    Before,
    Inside,
    After,
}

fn is_pattern_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}
