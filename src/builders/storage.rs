use log::debug;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::{ExclusionError, Result};

/// Reads the ignore file as UTF-8. `Ok(None)` when the file does not exist.
pub fn read_ignore_file(path: &Path) -> Result<Option<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ExclusionError::from_io(path, e)),
    };

    String::from_utf8(bytes)
        .map(Some)
        .map_err(|source| ExclusionError::Encoding {
            path: path.to_path_buf(),
            source,
        })
}

/// The sibling file a replacement is staged in: `<name>.tmp`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("ignore"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces `path` with `content` so readers never see a partial file.
///
/// The content is written to a sibling temporary file which is then renamed
/// over the destination. On failure the temporary file is removed before the
/// error is returned. Concurrent writers are not detected; the last rename wins.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    let outcome = fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = outcome {
        if temp_path.exists()
            && let Err(cleanup) = fs::remove_file(&temp_path)
        {
            debug!("could not remove {}: {cleanup}", temp_path.display());
        }
        return Err(ExclusionError::from_io(path, e));
    }

    debug!("replaced {} ({} bytes)", path.display(), content.len());
    Ok(())
}
