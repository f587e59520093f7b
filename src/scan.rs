use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Lists the regular files in `dir` whose name ends with `.<suffix>`.
///
/// Matching is case-sensitive and a leading dot in `suffix` is ignored.
/// Symlinks are followed; names need not be UTF-8. The result is sorted by
/// file name so repeated runs see the same order.
pub fn list_files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let ending = format!(".{}", suffix.trim_start_matches('.'));
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        if !entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(ending.as_bytes())
        {
            continue;
        }

        let path = entry.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!("ignoring {}: not a readable file", path.display());
        }
    }

    files.sort_unstable_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
