//! Declaration and go to definition tests for the IDE layer.

use robust_yaml::hir::PrototypeId;
use rstest::rstest;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// DECLARATIONS
// =============================================================================

#[rstest]
#[case("id: BaseWeapon", 0, Some("BaseWeapon"))]
#[case("BaseWeapon", 0, Some("BaseWeapon"))]
#[case("abstract", 0, Some("BaseWeapon"))]
#[case("Sprite", 0, None)]
#[case("Katana", 0, Some("Katana"))]
#[case("# Weapons", 0, None)]
fn test_declaration_at(#[case] needle: &str, #[case] nth: usize, #[case] expected: Option<&str>) {
    let (host, file) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let found = analysis.declaration_at(file, offset_of(ENTITY_DOCUMENT, needle, nth));
    assert_eq!(found.map(|p| p.id().to_string()).as_deref(), expected);
}

#[test]
fn test_declaration_on_marker() {
    let (host, file) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let dash = offset_of(ENTITY_DOCUMENT, "- type: entity", 1);
    let found = analysis.declaration_at(file, dash).unwrap();
    assert_eq!(found.id(), &PrototypeId::valid("Sword"));
}

// =============================================================================
// GOTO DEFINITION
// =============================================================================

#[test]
fn test_goto_definition_from_parent() {
    let (host, file) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();

    let result = analysis.goto_definition(file, offset_of(ENTITY_DOCUMENT, "BaseWeapon", 1));
    assert_eq!(result.targets.len(), 1, "Goto definition should find target");

    let target = &result.targets[0];
    assert_eq!(target.name.as_ref(), "BaseWeapon");
    assert_eq!(target.file, file);
    assert_eq!(target.focus_range.start(), offset_of(ENTITY_DOCUMENT, "BaseWeapon", 0));
}

#[test]
fn test_goto_definition_from_flow_parent_list() {
    let (host, file) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let result = analysis.goto_definition(file, offset_of(ENTITY_DOCUMENT, "Sword, ", 0));
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].name.as_ref(), "Sword");
}

#[test]
fn test_goto_definition_across_files() {
    let (host, files) = host_from_sources(&[
        ("Resources/Prototypes/base.yml", "- id: Base\n"),
        ("Resources/Maps/station.yml", "entities:\n- proto: Base\n"),
    ]);
    let analysis = host.analysis();
    let result = analysis.goto_definition(files[1], offset_of("entities:\n- proto: Base\n", "Base", 0));
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].file, files[0]);
}

#[test]
fn test_goto_definition_ambiguous() {
    let (host, files) = host_from_sources(&[
        ("Resources/Prototypes/a.yml", "- id: Dup\n"),
        ("Resources/Prototypes/b.yml", "- id: Dup\n"),
        ("Resources/Prototypes/c.yml", "- id: User\n  parent: Dup\n"),
    ]);
    let analysis = host.analysis();
    let result = analysis.goto_definition(files[2], offset_of("- id: User\n  parent: Dup\n", "Dup", 0));
    assert!(result.is_ambiguous());
    assert_eq!(result.targets.len(), 2);
}

#[rstest]
#[case("Objects", 0)]
#[case("Unknown", 0)]
#[case("name", 0)]
fn test_goto_definition_nothing(#[case] needle: &str, #[case] nth: usize) {
    let source = "- id: A\n  name: Unknown\n  sprite: Objects/a.rsi\n";
    let (host, file) = host_from_prototypes(source);
    let analysis = host.analysis();
    assert!(analysis.goto_definition(file, offset_of(source, needle, nth)).is_empty());
}
