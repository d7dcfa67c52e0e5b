//! Immediate and transitive inheritors.

use tokio_util::sync::CancellationToken;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_base_and_child() {
    let (host, _) = host_from_prototypes(BASE_AND_CHILD);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let base = prototype(&analysis, "base");
    let child = prototype(&analysis, "child");

    assert_eq!(ids(&analysis.immediate_inheritors(&base, &cancel)), vec!["child"]);
    assert!(analysis.immediate_inheritors(&child, &cancel).is_empty());
    let all: Vec<_> = analysis.inheritors(&base, &cancel).collect();
    assert_eq!(ids(&all), vec!["child"]);
}

#[test]
fn test_three_level_chain_is_breadth_first() {
    let (host, _) = host_from_prototypes(THREE_LEVEL_CHAIN);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let base = prototype(&analysis, "base");

    let all: Vec<_> = analysis.inheritors(&base, &cancel).collect();
    assert_eq!(ids(&all), vec!["middle", "leaf"]);
    assert_eq!(ids(&analysis.immediate_inheritors(&base, &cancel)), vec!["middle"]);
}

#[test]
fn test_type_mismatch_is_excluded() {
    let (host, _) = host_from_prototypes(TYPE_MISMATCH);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let base = prototype(&analysis, "base");
    assert!(analysis.immediate_inheritors(&base, &cancel).is_empty());
}

#[test]
fn test_missing_type_matches_any() {
    let (host, _) = host_from_prototypes("- type: cat\n  id: base\n- id: child\n  parent: base\n");
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let base = prototype(&analysis, "base");
    assert_eq!(ids(&analysis.immediate_inheritors(&base, &cancel)), vec!["child"]);
}

#[test]
fn test_inheritors_across_files() {
    let (host, _) = host_from_sources(&[
        ("Resources/Prototypes/Entities/base.yml", "- id: Base\n"),
        ("Resources/Prototypes/Entities/Mobs/mob.yml", "- id: Mob\n  parent: Base\n"),
        ("Resources/Prototypes/Entities/Mobs/cat.yml", "- id: Cat\n  parents: [ Mob ]\n"),
    ]);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let base = prototype(&analysis, "Base");
    let all: Vec<_> = analysis.inheritors(&base, &cancel).collect();
    assert_eq!(ids(&all), vec!["Mob", "Cat"]);
}

#[test]
fn test_parents_outside_prototypes_dir_do_not_count() {
    let (host, _) = host_from_sources(&[
        ("Resources/Prototypes/base.yml", "- id: Base\n"),
        ("Resources/Maps/map.yml", "- id: Elsewhere\n  parent: Base\n"),
    ]);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let base = prototype(&analysis, "Base");
    assert!(analysis.immediate_inheritors(&base, &cancel).is_empty());
}

#[test]
fn test_nested_parent_key_does_not_count() {
    let (host, _) = host_from_prototypes(
        "- id: Base\n- id: Spawner\n  components:\n  - type: Spawn\n    parent: Base\n",
    );
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let base = prototype(&analysis, "Base");
    assert!(analysis.immediate_inheritors(&base, &cancel).is_empty());
}

#[test]
fn test_duplicate_parent_entries_yield_once() {
    let (host, _) = host_from_prototypes("- id: A\n- id: B\n  parents: [A, A]\n");
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let a = prototype(&analysis, "A");
    assert_eq!(ids(&analysis.immediate_inheritors(&a, &cancel)), vec!["B"]);
}

#[test]
fn test_cycle_terminates() {
    let (host, _) = host_from_prototypes("- id: A\n  parent: C\n- id: B\n  parent: A\n- id: C\n  parent: B\n");
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let a = prototype(&analysis, "A");
    let all: Vec<_> = analysis.inheritors(&a, &cancel).collect();
    assert_eq!(ids(&all), vec!["B", "C"]);
}

#[test]
fn test_walk_is_lazy() {
    let (host, _) = host_from_prototypes(THREE_LEVEL_CHAIN);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    let base = prototype(&analysis, "base");

    let mut walk = analysis.inheritors(&base, &cancel);
    assert_eq!(walk.next().map(|p| p.id().to_string()).as_deref(), Some("middle"));
    cancel.cancel();
    assert!(walk.next().is_none());
}
