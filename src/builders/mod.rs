// This file is the module declaration file for the `builders` module.
// These modules hold the pure building blocks the engine composes.

// `patterns` module:
// The profile catalog. Maps an optional `ProfileId` to the ordered list of
// exclusion globs, detects the profile from marker directories, and reduces
// globs to the directory prefixes that are checked for tracked files.
pub mod patterns;

// `reporter` module:
// Cross-references the catalog with the repository index (`tracked_matches`),
// defines `ExclusionStatus`, and formats the cleanup guidance text.
pub mod reporter;

// `section` module:
// Renders, detects and strips the marker-delimited block inside the
// ignore file. Never touches lines outside the markers.
pub mod section;

// `storage` module:
// Reads the ignore file as strict UTF-8 and replaces it through a sibling
// temporary file and a rename.
pub mod storage;
