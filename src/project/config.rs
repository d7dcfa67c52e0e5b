//! Project configuration.

use std::path::{Path, PathBuf};

use crate::base::constants::{MAX_NAVIGATION_ENTRIES, PROTOTYPES_DIR, RESOURCES_DIR, YAML_EXTENSIONS};

/// Options controlling where prototypes live and how results are surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectConfig {
    /// Project root directory.
    pub root: PathBuf,
    /// Resources directory name, relative to `root`.
    pub resources_dir: String,
    /// Prototypes directory name, relative to the resources directory.
    pub prototypes_dir: String,
    /// Extensions (without dot) of documents that are loaded and scanned.
    pub extensions: Vec<String>,
    /// Maximum number of entries in one interactive listing. Values below
    /// one are treated as one.
    pub max_navigation_entries: usize,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            resources_dir: RESOURCES_DIR.to_string(),
            prototypes_dir: PROTOTYPES_DIR.to_string(),
            extensions: YAML_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_navigation_entries: MAX_NAVIGATION_ENTRIES,
        }
    }
}

impl ProjectConfig {
    /// Default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn resources_path(&self) -> PathBuf {
        self.root.join(&self.resources_dir)
    }

    pub fn prototypes_path(&self) -> PathBuf {
        self.resources_path().join(&self.prototypes_dir)
    }

    /// Check if `path` has one of the recognised document extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}
