//! Common prototype document fixtures for tests.

/// `base` with one direct inheritor.
pub const BASE_AND_CHILD: &str = r#"- type: entity
  id: base
- type: entity
  id: child
  parents: [base]
"#;

/// Three-level chain `base ← middle ← leaf`, declared leaf first.
pub const THREE_LEVEL_CHAIN: &str = r#"- type: entity
  id: leaf
  parent: middle
- type: entity
  id: middle
  parent: base
- type: entity
  id: base
"#;

/// A child whose type differs from its parent's.
pub const TYPE_MISMATCH: &str = r#"- type: cat
  id: base
- type: dog
  id: child
  parents:
  - base
"#;

/// Prototypes with degenerate ids.
pub const DEGENERATE_IDS: &str = r#"- type: entity
  name: no id here
- type: entity
  id: [not, text]
- type: entity
  id: valid
"#;

/// A realistic document with comments, tags, block scalars and nesting.
pub const ENTITY_DOCUMENT: &str = r#"# Weapons
- type: entity
  id: BaseWeapon
  abstract: true
  name: weapon
  description: >-
    A generic weapon.
    Handle with care.
  components:
  - type: Sprite
    sprite: Objects/Weapons/base.rsi
    state: icon
  - type: Item
    size: Normal

- type: entity
  id: Sword
  parent: BaseWeapon
  name: sword
  components:
  - type: Sprite
    sprite: Objects/Weapons/sword.rsi
  - type: MeleeWeapon
    damage:
      types:
        Slash: 15

- type: entity
  id: "Katana"
  parent: [ Sword, BaseWeapon ]
  description: |
    Sharp.
"#;
