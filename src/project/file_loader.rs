//! Reading documents from disk.

use std::path::{Path, PathBuf};

use super::ProjectConfig;

/// Collect every recognised document under `dir`.
///
/// Subdirectories are visited before the files of a directory; both are
/// sorted by name so the result is stable across platforms.
pub fn collect_file_paths(dir: &Path, config: &ProjectConfig) -> std::io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    collect_recursive(dir, config, &mut result)?;
    Ok(result)
}

fn collect_recursive(dir: &Path, config: &ProjectConfig, result: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        } else if path.is_file() && config.is_document(&path) {
            files.push(path);
        }
    }
    dirs.sort();
    files.sort();

    for sub in dirs {
        collect_recursive(&sub, config, result)?;
    }
    result.extend(files);
    Ok(())
}

/// Read a document as UTF-8 text.
pub fn load_file(path: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
