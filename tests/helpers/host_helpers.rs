//! Helpers for setting up analysis hosts over in-memory documents.

use robust_yaml::base::{FileId, TextSize};
use robust_yaml::hir::{Prototype, PrototypeId};
use robust_yaml::ide::{Analysis, AnalysisHost};
use robust_yaml::project::ProjectConfig;

/// Root of every in-memory test project.
pub const ROOT: &str = "/game";

/// Path of a document under the prototypes directory.
pub fn prototype_path(name: &str) -> String {
    format!("{ROOT}/Resources/Prototypes/{name}")
}

/// Creates an AnalysisHost with a single prototype document.
pub fn host_from_prototypes(source: &str) -> (AnalysisHost, FileId) {
    let mut host = AnalysisHost::new(ProjectConfig::with_root(ROOT));
    let file = host.set_file_content(prototype_path("test.yml"), source);
    let errors = host.project().file(file).unwrap().errors().to_vec();
    assert!(errors.is_empty(), "Parse errors: {:?}", errors);
    (host, file)
}

/// Creates an AnalysisHost with documents at paths relative to the root.
pub fn host_from_sources(files: &[(&str, &str)]) -> (AnalysisHost, Vec<FileId>) {
    let mut host = AnalysisHost::new(ProjectConfig::with_root(ROOT));
    let ids = files
        .iter()
        .map(|(path, text)| host.set_file_content(format!("{ROOT}/{path}"), text))
        .collect();
    (host, ids)
}

/// The single prototype declared with `id`.
pub fn prototype(analysis: &Analysis<'_>, id: &str) -> Prototype {
    let found = analysis.storage().get(&PrototypeId::valid(id));
    assert_eq!(found.len(), 1, "expected exactly one prototype `{id}`");
    found[0].clone()
}

/// Ids of `prototypes`, in order.
pub fn ids<'a>(prototypes: impl IntoIterator<Item = &'a Prototype>) -> Vec<String> {
    prototypes.into_iter().map(|p| p.id().to_string()).collect()
}

/// Offset of the `nth` occurrence of `needle` in `source`.
pub fn offset_of(source: &str, needle: &str, nth: usize) -> TextSize {
    let offset = source
        .match_indices(needle)
        .nth(nth)
        .map(|(offset, _)| offset)
        .unwrap_or_else(|| panic!("`{needle}` occurs fewer than {} times", nth + 1));
    TextSize::from(offset as u32)
}
