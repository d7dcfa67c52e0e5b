//! IDE features: high-level APIs for editor hosts.
//!
//! This module is the interface between the prototype model (HIR) and an
//! editor. Each function corresponds to one host request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take a project and an index, return data
//! 2. **No editor types**: Offsets and ranges are byte based; hosts convert
//! 3. **Composable**: Built on top of HIR queries
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use robust_yaml::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new(ProjectConfig::with_root("/game"));
//! let file = host.set_file_content("/game/Resources/Prototypes/a.yml", "- id: A\n");
//!
//! let analysis = host.analysis();
//! let prototype = analysis.declaration_at(file, 6.into());
//! ```

mod analysis;
mod goto;
mod navigation;
mod references;
mod rename;

pub use analysis::{Analysis, AnalysisHost};
pub use goto::{GotoResult, GotoTarget, declaration, declaration_at, goto_definition};
pub use navigation::{
    InheritorMarker, InheritorNavigation, TargetPresentation, goto_inheritors, inheritor_markers,
    presentation,
};
pub use references::{Usage, find_usages, references, references_at};
pub use rename::{RenameError, SourceChange, TextEdit, apply_edits, rename};
