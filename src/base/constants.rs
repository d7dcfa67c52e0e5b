//! Domain constants: directory layout, document extensions, field keys and
//! user-visible messages.

/// Directory under the project root that holds game resources.
pub const RESOURCES_DIR: &str = "Resources";

/// Directory under [`RESOURCES_DIR`] that holds prototype documents.
pub const PROTOTYPES_DIR: &str = "Prototypes";

/// Extensions of documents scanned for prototypes.
pub const YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Upper bound on entries surfaced by a single interactive listing.
pub const MAX_NAVIGATION_ENTRIES: usize = 100;

// Prototype field keys
pub const ID_KEY: &str = "id";
pub const TYPE_KEY: &str = "type";
pub const PARENTS_KEY: &str = "parents";
pub const PARENT_KEY: &str = "parent";

// Messages
pub const CONTAINER_PROTOTYPES: &str = "Prototypes";
pub const USAGE_PARENT_DECLARATION: &str = "Parent declaration";
pub const GUTTER_PROTOTYPE_INHERITORS: &str = "Prototype inheritors";
pub const GUTTER_TOOLTIP_INHERITORS: &str = "Has inheritors";
pub const STAGE_DISCOVERY: &str = "Discovering prototypes";
pub const STAGE_LOADING: &str = "Loading prototypes";
pub const STAGE_ASSEMBLING: &str = "Assembling prototypes";

/// Title of the chooser listing the inheritors of `prototype`.
///
/// `count` is rendered with a trailing `+` when the listing was truncated.
pub fn inheritor_chooser_title(prototype: &str, count: usize, truncated: bool) -> String {
    if truncated {
        format!("Choose Inheritor of {prototype} ({count}+ found)")
    } else {
        format!("Choose Inheritor of {prototype} ({count} found)")
    }
}
