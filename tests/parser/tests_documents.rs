//! Parsing whole prototype documents.

use robust_yaml::parser::{AstNode, ScalarStyle, SyntaxKind, Value, YamlFile, parse_yaml};
use rstest::rstest;

use crate::helpers::source_fixtures::*;

fn top_level_items(input: &str) -> Vec<Value> {
    let parse = parse_yaml(input);
    assert!(parse.ok(), "Parse errors: {:?}", parse.errors);
    let file = YamlFile::cast(parse.syntax()).unwrap();
    let document = file.documents().next().unwrap();
    let Some(Value::Sequence(sequence)) = document.top_level_value() else {
        panic!("expected a top-level sequence");
    };
    sequence.items().filter_map(|item| item.value()).collect()
}

fn scalar_field(item: &Value, key: &str) -> String {
    item.as_mapping()
        .and_then(|mapping| mapping.get(key))
        .and_then(|kv| kv.value())
        .and_then(|value| value.as_scalar().map(|s| s.text_value()))
        .unwrap_or_else(|| panic!("no scalar `{key}`"))
}

#[rstest]
#[case(BASE_AND_CHILD)]
#[case(THREE_LEVEL_CHAIN)]
#[case(TYPE_MISMATCH)]
#[case(DEGENERATE_IDS)]
#[case(ENTITY_DOCUMENT)]
fn test_fixtures_parse_losslessly(#[case] input: &str) {
    let parse = parse_yaml(input);
    assert!(parse.ok(), "Parse errors: {:?}", parse.errors);
    assert_eq!(parse.syntax().text().to_string(), input);
}

#[test]
fn test_entity_document_structure() {
    let items = top_level_items(ENTITY_DOCUMENT);
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| item.as_mapping().is_some()));

    let ids: Vec<String> = items.iter().map(|item| scalar_field(item, "id")).collect();
    assert_eq!(ids, vec!["BaseWeapon", "Sword", "Katana"]);
    assert_eq!(scalar_field(&items[0], "abstract"), "true");
}

#[test]
fn test_entity_document_block_scalars() {
    let items = top_level_items(ENTITY_DOCUMENT);
    let description = |item: &Value| {
        item.as_mapping()
            .and_then(|m| m.get("description"))
            .and_then(|kv| kv.value())
            .and_then(|v| v.as_scalar().cloned())
            .unwrap()
    };

    let folded = description(&items[0]);
    assert_eq!(folded.style(), ScalarStyle::Folded);
    assert_eq!(folded.text_value(), "A generic weapon. Handle with care.");

    let literal = description(&items[2]);
    assert_eq!(literal.style(), ScalarStyle::Literal);
    assert_eq!(literal.text_value(), "Sharp.\n");
}

#[test]
fn test_entity_document_nested_components() {
    let items = top_level_items(ENTITY_DOCUMENT);
    let components = items[1]
        .as_mapping()
        .and_then(|m| m.get("components"))
        .and_then(|kv| kv.value())
        .unwrap();
    let components: Vec<Value> = components
        .as_sequence()
        .unwrap()
        .items()
        .filter_map(|item| item.value())
        .collect();
    let types: Vec<String> = components.iter().map(|c| scalar_field(c, "type")).collect();
    assert_eq!(types, vec!["Sprite", "MeleeWeapon"]);
}

#[test]
fn test_quoted_id_and_flow_parents() {
    let items = top_level_items(ENTITY_DOCUMENT);
    let katana = items[2].as_mapping().unwrap();

    let id = katana.get("id").and_then(|kv| kv.value()).unwrap();
    assert_eq!(id.as_scalar().unwrap().style(), ScalarStyle::DoubleQuoted);

    let parents = katana.get("parent").and_then(|kv| kv.value()).unwrap();
    let names: Vec<String> = parents
        .as_sequence()
        .unwrap()
        .items()
        .filter_map(|item| item.value())
        .filter_map(|value| value.as_scalar().map(|s| s.text_value()))
        .collect();
    assert_eq!(names, vec!["Sword", "BaseWeapon"]);
    assert!(parents.as_sequence().unwrap().items().all(|item| item.dash().is_none()));
}

#[test]
fn test_comments_are_trivia() {
    let parse = parse_yaml(ENTITY_DOCUMENT);
    let comments: Vec<_> = parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::COMMENT)
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(comments, vec!["# Weapons"]);
}

#[test]
fn test_multiple_documents() {
    let input = "- id: A\n---\n- id: B\n  parent: A\n";
    let parse = parse_yaml(input);
    assert!(parse.ok());
    let file = YamlFile::cast(parse.syntax()).unwrap();
    assert_eq!(file.documents().count(), 2);
}
