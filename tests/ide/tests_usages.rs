//! Usage search tests for the IDE layer.

use robust_yaml::base::TextRange;
use robust_yaml::hir::UsageKind;
use robust_yaml::ide::Usage;
use tokio_util::sync::CancellationToken;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_usages_group_parent_declarations() {
    let (host, file) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let base = prototype(&analysis, "BaseWeapon");

    let usages = analysis.find_usages(&base, &CancellationToken::new()).unwrap();
    assert_eq!(usages.len(), 2);
    assert!(usages.iter().all(|u| u.file == file));
    assert!(usages.iter().all(|u| u.usage_kind == Some(UsageKind::ParentDeclaration)));
    assert_eq!(UsageKind::ParentDeclaration.label(), "Parent declaration");
}

#[test]
fn test_usages_include_free_mentions() {
    let maps = "spawn: Sword\nnote: a Sword here\nlist: [Sword, SwordFish]\n";
    let (host, files) = host_from_sources(&[
        ("Resources/Prototypes/weapons.yml", ENTITY_DOCUMENT),
        ("Resources/Maps/armory.yml", maps),
    ]);
    let analysis = host.analysis();
    let sword = prototype(&analysis, "Sword");

    let usages = analysis.find_usages(&sword, &CancellationToken::new()).unwrap();
    let in_maps: Vec<&Usage> = usages.iter().filter(|u| u.file == files[1]).collect();
    assert_eq!(
        in_maps.iter().map(|u| u.range).collect::<Vec<_>>(),
        vec![
            TextRange::at(offset_of(maps, "Sword", 0), 5.into()),
            TextRange::at(offset_of(maps, "Sword", 2), 5.into()),
        ]
    );
    assert!(in_maps.iter().all(|u| u.usage_kind.is_none()));

    let in_prototypes = usages.iter().filter(|u| u.file == files[0]).count();
    assert_eq!(in_prototypes, 1);
}

#[test]
fn test_declaration_is_not_a_usage() {
    let (host, _) = host_from_prototypes("- id: Lonely\n");
    let analysis = host.analysis();
    let lonely = prototype(&analysis, "Lonely");
    assert_eq!(analysis.find_usages(&lonely, &CancellationToken::new()), Some(Vec::new()));
}

#[test]
fn test_usages_of_duplicate_ids_resolve_to_each() {
    let (host, _) = host_from_sources(&[
        ("Resources/Prototypes/a.yml", "- id: Dup\n"),
        ("Resources/Prototypes/b.yml", "- id: Dup\n- id: User\n  parent: Dup\n"),
    ]);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    for dup in analysis.storage().get_by_text("Dup") {
        let usages = analysis.find_usages(dup, &cancel).unwrap();
        assert_eq!(usages.len(), 1);
    }
}

#[test]
fn test_prototype_without_id_has_no_usage_search() {
    let (host, file) = host_from_prototypes(DEGENERATE_IDS);
    let analysis = host.analysis();
    let nameless = analysis.declaration_at(file, 2.into()).unwrap();
    assert!(analysis.find_usages(&nameless, &CancellationToken::new()).is_none());
}

#[test]
fn test_references_at() {
    let source = "- id: A\n  parents:\n  - B\n  - 'C'\n";
    let (host, file) = host_from_prototypes(source);
    let analysis = host.analysis();
    let found = analysis.references_at(file, offset_of(source, "C", 0));
    assert_eq!(found.len(), 1);
    assert!(found[0].is_parent_occurrence());
    assert_eq!(found[0].id_text(), "C");
    assert!(analysis.references_at(file, offset_of(source, "A", 0)).is_empty());
}
