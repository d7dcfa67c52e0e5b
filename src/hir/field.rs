//! Field schema of prototype declarations.
//!
//! Each field names the keys it can be written under and the pattern its
//! value must satisfy. The same patterns classify arbitrary nodes, e.g. to
//! tell whether a scalar is an `id` value.

use std::sync::LazyLock;

use crate::base::constants::{ID_KEY, PARENT_KEY, PARENTS_KEY, TYPE_KEY};
use crate::parser::{Mapping, SyntaxKind, Value};
use crate::pattern::{PROTOTYPE_ID, Pattern, TYPE_NAME};

/// One named field of a prototype declaration.
#[derive(Debug, Clone)]
pub struct PrototypeField {
    main_key: &'static str,
    alternate_keys: &'static [&'static str],
    /// Value pattern including the key-value position.
    pattern: Pattern,
}

impl PrototypeField {
    fn new(main_key: &'static str, alternate_keys: &'static [&'static str], value_pattern: Pattern) -> Self {
        let mut keys = vec![main_key];
        keys.extend_from_slice(alternate_keys);
        let pattern = value_pattern.with_parent(Pattern::key_text(&keys));
        Self {
            main_key,
            alternate_keys,
            pattern,
        }
    }

    pub fn main_key(&self) -> &'static str {
        self.main_key
    }

    /// Main key first, then the alternates.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.main_key).chain(self.alternate_keys.iter().copied())
    }

    /// Matches a value node of this field.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The raw value of this field in `mapping`, looked up by key only.
    pub fn value_in(&self, mapping: &Mapping) -> Option<Value> {
        self.keys()
            .find_map(|key| mapping.get(key))
            .and_then(|kv| kv.value())
    }
}

/// A scalar usable as a prototype reference.
pub static REFERENCE_VALUE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::text_matches(PROTOTYPE_ID.clone()));

/// A mapping at prototype position: item of the top-level sequence of a document.
pub static PROTOTYPE_POSITION: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::kind(SyntaxKind::MAPPING).with_parents(&[
        SyntaxKind::SEQUENCE_ITEM,
        SyntaxKind::SEQUENCE,
        SyntaxKind::DOCUMENT,
    ])
});

pub static ID: LazyLock<PrototypeField> =
    LazyLock::new(|| PrototypeField::new(ID_KEY, &[], REFERENCE_VALUE.clone()));

pub static TYPE: LazyLock<PrototypeField> =
    LazyLock::new(|| PrototypeField::new(TYPE_KEY, &[], Pattern::text_matches(TYPE_NAME.clone())));

/// A single reference, or a sequence holding at least one.
pub static PARENTS: LazyLock<PrototypeField> = LazyLock::new(|| {
    PrototypeField::new(
        PARENTS_KEY,
        &[PARENT_KEY],
        Pattern::any_of([
            REFERENCE_VALUE.clone(),
            Pattern::with_items(REFERENCE_VALUE.clone()),
        ]),
    )
});

/// A reference that is an entry of a prototype's parents field.
pub static PARENT_OCCURRENCE: LazyLock<Pattern> = LazyLock::new(|| {
    let in_prototype = Pattern::kind(SyntaxKind::KEY_VALUE)
        .with_parent(PROTOTYPE_POSITION.clone());
    let parents_value = PARENTS.pattern().clone().with_parent(in_prototype);
    Pattern::any_of([
        REFERENCE_VALUE.clone().and(parents_value.clone()),
        REFERENCE_VALUE.clone().with_parent(
            Pattern::kind(SyntaxKind::SEQUENCE_ITEM).with_parent(parents_value),
        ),
    ])
});
