//! Loading workspaces from disk.

use std::fs;
use std::path::Path;

use robust_yaml::ide::AnalysisHost;
use robust_yaml::project::{LoadError, ProjectConfig, WorkspaceLoader};
use tokio_util::sync::CancellationToken;

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_load_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Resources/Prototypes/Entities/base.yml", b"- id: Base\n");
    write(dir.path(), "Resources/Prototypes/Entities/child.YAML", b"- id: Child\n  parent: Base\n");
    write(dir.path(), "Resources/Prototypes/readme.txt", b"- id: NotLoaded\n");
    write(dir.path(), "Resources/Maps/station.yml", b"spawn: Child\n");

    let mut host = AnalysisHost::new(ProjectConfig::with_root(dir.path()));
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();
    assert_eq!(loaded, 3);

    let analysis = host.analysis();
    assert_eq!(analysis.storage().len(), 2);
    assert!(analysis.prototypes_named("NotLoaded").is_empty());

    let base = &analysis.prototypes_named("Base")[0];
    let cancel = CancellationToken::new();
    let children = analysis.immediate_inheritors(base, &cancel);
    assert_eq!(children.len(), 1);

    let child = &analysis.prototypes_named("Child")[0];
    let usages = analysis.find_usages(child, &cancel).unwrap();
    let station = host
        .project()
        .file_id(&dir.path().join("Resources/Maps/station.yml"))
        .unwrap();
    assert_eq!(usages.len(), 1);
    assert_eq!(usages[0].file, station);
}

#[test]
fn test_load_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let mut host = AnalysisHost::new(ProjectConfig::with_root(dir.path()));
    let result = WorkspaceLoader::new().load_directory_into_host(&missing, &mut host);
    assert!(matches!(result, Err(LoadError::DirectoryNotFound(path)) if path == missing));
}

#[test]
fn test_unreadable_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Resources/Prototypes/good.yml", b"- id: Good\n");
    write(dir.path(), "Resources/Prototypes/bad.yml", &[0xff, 0xfe, b'\n']);

    let mut host = AnalysisHost::new(ProjectConfig::with_root(dir.path()));
    let result = WorkspaceLoader::new().load_directory_into_host(dir.path(), &mut host);
    let Err(LoadError::Files(failures)) = result else {
        panic!("expected a file failure, got {result:?}");
    };
    assert_eq!(failures.len(), 1);
    assert!(failures[0].0.ends_with("bad.yml"));
    assert_eq!(host.analysis().prototypes_named("Good").len(), 1);
}

#[test]
fn test_load_single_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Resources/Prototypes/one.yml", b"- id: One\n");

    let mut host = AnalysisHost::new(ProjectConfig::with_root(dir.path()));
    WorkspaceLoader::new()
        .load_file_into_host(&dir.path().join("Resources/Prototypes/one.yml"), &mut host)
        .unwrap();
    assert_eq!(host.analysis().prototypes_named("One").len(), 1);
}
