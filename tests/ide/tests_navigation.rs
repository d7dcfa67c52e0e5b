//! Inheritor navigation, gutter markers and target presentation.

use robust_yaml::base::TextRange;
use robust_yaml::ide::InheritorNavigation;
use robust_yaml::project::ProjectConfig;
use robust_yaml::ide::AnalysisHost;
use tokio_util::sync::CancellationToken;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_goto_inheritors_lists_breadth_first() {
    let (host, _) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let base = prototype(&analysis, "BaseWeapon");

    let InheritorNavigation::Choose { title, targets, truncated } =
        analysis.goto_inheritors(&base, &CancellationToken::new())
    else {
        panic!("expected a chooser");
    };
    assert_eq!(ids(&targets), vec!["Sword", "Katana"]);
    assert!(!truncated);
    assert_eq!(title, "Choose Inheritor of BaseWeapon (entity) (2 found)");
}

#[test]
fn test_goto_inheritors_single() {
    let (host, _) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let sword = prototype(&analysis, "Sword");
    let katana = prototype(&analysis, "Katana");
    assert_eq!(
        analysis.goto_inheritors(&sword, &CancellationToken::new()),
        InheritorNavigation::Single(katana.clone())
    );
    assert_eq!(
        analysis.goto_inheritors(&katana, &CancellationToken::new()),
        InheritorNavigation::None
    );
}

#[test]
fn test_goto_inheritors_respects_configured_cap() {
    let mut config = ProjectConfig::with_root(ROOT);
    config.max_navigation_entries = 1;
    let mut host = AnalysisHost::new(config);
    host.set_file_content(prototype_path("a.yml"), "- id: A\n- id: B\n  parent: A\n- id: C\n  parent: A\n");
    let analysis = host.analysis();
    let a = prototype(&analysis, "A");

    let InheritorNavigation::Choose { title, targets, truncated } =
        analysis.goto_inheritors(&a, &CancellationToken::new())
    else {
        panic!("expected a truncated chooser");
    };
    assert!(truncated);
    assert_eq!(ids(&targets), vec!["B"]);
    assert_eq!(title, "Choose Inheritor of A (1+ found)");
}

#[test]
fn test_markers_on_prototype_dashes() {
    let (host, file) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let markers = analysis.inheritor_markers(file, &CancellationToken::new());

    assert_eq!(ids(markers.iter().map(|m| &m.prototype)), vec!["BaseWeapon", "Sword"]);
    for (marker, nth) in markers.iter().zip(0..) {
        let dash = offset_of(ENTITY_DOCUMENT, "- type: entity", nth);
        assert_eq!(marker.range, TextRange::at(dash, 1.into()));
        assert_eq!(marker.name, "Prototype inheritors");
        assert_eq!(marker.tooltip, "Has inheritors");
    }
}

#[test]
fn test_no_markers_outside_prototypes() {
    let (host, files) = host_from_sources(&[
        ("Resources/Prototypes/base.yml", "- id: Base\n"),
        ("Resources/Maps/base.yml", "- id: Base\n- id: Child\n  parent: Base\n"),
    ]);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    assert!(analysis.inheritor_markers(files[0], &cancel).is_empty());
    assert!(analysis.inheritor_markers(files[1], &cancel).is_empty());
}

#[test]
fn test_cancelled_markers() {
    let (host, file) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(analysis.inheritor_markers(file, &cancel).is_empty());
}

#[test]
fn test_presentation_of_declaration() {
    let (host, _) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let katana = prototype(&analysis, "Katana");

    let line = ENTITY_DOCUMENT[..usize::from(offset_of(ENTITY_DOCUMENT, "- type: entity", 2))]
        .matches('\n')
        .count()
        + 1;
    let presentation = analysis.presentation(&katana).unwrap();
    assert_eq!(presentation.presentable_text, "Katana (entity)");
    assert_eq!(presentation.container_text, Some("Prototypes"));
    assert_eq!(presentation.location_text, format!("{}:{line}", prototype_path("test.yml")));
}

#[test]
fn test_navigation_target_focuses_id() {
    let (host, file) = host_from_prototypes(ENTITY_DOCUMENT);
    let analysis = host.analysis();
    let katana = prototype(&analysis, "Katana");
    assert_eq!(
        analysis.navigation_target(&katana),
        (file, TextRange::at(offset_of(ENTITY_DOCUMENT, "Katana", 0), 6.into()))
    );
}
