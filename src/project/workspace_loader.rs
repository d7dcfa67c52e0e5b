use crate::ide::AnalysisHost;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::file_loader;

/// Errors that can occur while loading documents from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The directory to load does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The directory tree could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Some documents could not be read; the others were loaded.
    #[error("Failed to load {} file(s):\n  {}", .0.len(), format_failures(.0))]
    Files(Vec<(PathBuf, std::io::Error)>),
}

fn format_failures(failures: &[(PathBuf, std::io::Error)]) -> String {
    failures
        .iter()
        .map(|(path, e)| format!("{}: {}", path.display(), e))
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// Loads workspace documents on demand
#[derive(Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads all recognised documents from a directory into an AnalysisHost.
    ///
    /// Unreadable files are skipped and reported together once the rest of
    /// the directory has been loaded.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<usize, LoadError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(LoadError::DirectoryNotFound(path));
        }

        let paths = file_loader::collect_file_paths(&path, host.project().config())
            .map_err(|source| LoadError::Directory {
                path: path.clone(),
                source,
            })?;

        let mut loaded = 0;
        let mut errors = Vec::new();
        for file_path in paths {
            match file_loader::load_file(&file_path) {
                Ok(text) => {
                    host.set_file_content(&file_path, &text);
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", file_path.display(), e);
                    errors.push((file_path, e));
                }
            }
        }

        tracing::debug!("Loaded {} document(s) from {}", loaded, path.display());
        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Files(errors))
        }
    }

    /// Loads a single document into an AnalysisHost.
    pub fn load_file_into_host(&self, path: &Path, host: &mut AnalysisHost) -> Result<(), LoadError> {
        let text = file_loader::load_file(path).map_err(|e| LoadError::Files(vec![(path.to_path_buf(), e)]))?;
        host.set_file_content(path, &text);
        Ok(())
    }
}
