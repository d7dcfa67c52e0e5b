//! Inheritor navigation, gutter markers and target presentation.

use tokio_util::sync::CancellationToken;

use crate::base::constants::{
    CONTAINER_PROTOTYPES, GUTTER_PROTOTYPE_INHERITORS, GUTTER_TOOLTIP_INHERITORS,
    inheritor_chooser_title,
};
use crate::base::{FileId, TextRange};
use crate::hir::{Prototype, PrototypesStorage, immediate_inheritors, inheritors};
use crate::parser::{AstNode, SequenceItem};
use crate::project::Project;

/// Outcome of "go to inheritors".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InheritorNavigation {
    /// Nothing inherits from the prototype.
    None,
    /// Jump straight to the only inheritor.
    Single(Prototype),
    /// Let the user choose. `truncated` is set when more inheritors exist
    /// than the listing holds.
    Choose {
        title: String,
        targets: Vec<Prototype>,
        truncated: bool,
    },
}

/// Collect transitive inheritors of `prototype` for navigation, capped at
/// the configured number of entries. A cap of zero lists one entry.
pub fn goto_inheritors(
    project: &Project,
    storage: &PrototypesStorage,
    prototype: &Prototype,
    cancel: &CancellationToken,
) -> InheritorNavigation {
    let cap = project.config().max_navigation_entries.max(1);
    let mut targets: Vec<Prototype> = inheritors(project, storage, prototype, cancel)
        .take(cap.saturating_add(1))
        .collect();
    let truncated = targets.len() > cap;
    targets.truncate(cap);

    match targets.len() {
        0 => InheritorNavigation::None,
        1 if !truncated => InheritorNavigation::Single(targets.remove(0)),
        count => InheritorNavigation::Choose {
            title: inheritor_chooser_title(&prototype.to_string(), count, truncated),
            targets,
            truncated,
        },
    }
}

/// A gutter marker on a prototype that has inheritors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritorMarker {
    pub prototype: Prototype,
    /// Range of the `-` marker token.
    pub range: TextRange,
    pub name: &'static str,
    pub tooltip: &'static str,
}

/// Markers for every prototype of `file` with at least one inheritor.
///
/// Only documents under the prototypes directory get markers.
pub fn inheritor_markers(
    project: &Project,
    storage: &PrototypesStorage,
    file: FileId,
    cancel: &CancellationToken,
) -> Vec<InheritorMarker> {
    if !project.is_in_prototypes(file) {
        return Vec::new();
    }
    let Some(source) = project.file(file) else {
        return Vec::new();
    };

    let mut markers = Vec::new();
    let dashes = source
        .syntax()
        .descendants()
        .filter_map(SequenceItem::cast)
        .filter_map(|item| item.dash());
    for dash in dashes {
        if cancel.is_cancelled() {
            break;
        }
        let Some(prototype) = Prototype::from_marker(project, file, &dash) else {
            continue;
        };
        if immediate_inheritors(project, storage, &prototype, cancel).next().is_none() {
            continue;
        }
        markers.push(InheritorMarker {
            range: dash.text_range(),
            prototype,
            name: GUTTER_PROTOTYPE_INHERITORS,
            tooltip: GUTTER_TOOLTIP_INHERITORS,
        });
    }
    markers
}

/// How a navigation target is shown in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPresentation {
    /// `id (type)`, or the bare id for untyped prototypes.
    pub presentable_text: String,
    /// Set for prototypes declared under the prototypes directory.
    pub container_text: Option<&'static str>,
    /// `path:line`, 1-based.
    pub location_text: String,
}

pub fn presentation(project: &Project, prototype: &Prototype) -> Option<TargetPresentation> {
    let source = project.file(prototype.file())?;
    let line = source.line_index().line_col(prototype.range().start()).line + 1;
    Some(TargetPresentation {
        presentable_text: prototype.to_string(),
        container_text: project
            .is_in_prototypes(prototype.file())
            .then_some(CONTAINER_PROTOTYPES),
        location_text: format!("{}:{}", source.path().display(), line),
    })
}
