//! Structural and value predicates over syntax nodes.
//!
//! A [`Pattern`] answers "does this node sit where I expect, with the value I
//! expect?". Patterns compose: the prototype field schema is built entirely
//! out of the combinators here.
//!
//! ```ignore
//! let id_value = Pattern::text_matches(PROTOTYPE_ID.clone())
//!     .with_parent(Pattern::key_text(&["id"]));
//! assert!(id_value.accepts(&scalar_node));
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use smol_str::SmolStr;

use crate::parser::{AstNode, KeyValue, Scalar, Sequence, SyntaxKind, SyntaxNode};

/// Grammar of prototype identifiers and references.
pub static PROTOTYPE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_-]*$").unwrap_or_else(|e| unreachable!("{e}"))
});

/// Grammar of type names (C#-style identifiers).
pub static TYPE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap_or_else(|e| unreachable!("{e}"))
});

/// Check if text is a valid prototype identifier.
pub fn is_prototype_identifier(text: &str) -> bool {
    PROTOTYPE_ID.is_match(text)
}

/// Check if text is a valid type name.
pub fn is_type_name(text: &str) -> bool {
    TYPE_NAME.is_match(text)
}

type Predicate = dyn Fn(&SyntaxNode) -> bool + Send + Sync;

/// A named, cloneable, thread-safe predicate over syntax nodes.
#[derive(Clone)]
pub struct Pattern {
    name: SmolStr,
    predicate: Arc<Predicate>,
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({})", self.name)
    }
}

impl Pattern {
    pub fn new(
        name: impl Into<SmolStr>,
        predicate: impl Fn(&SyntaxNode) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self, node: &SyntaxNode) -> bool {
        (self.predicate)(node)
    }

    /// Accepts every node.
    pub fn always() -> Self {
        Self::new("always", |_| true)
    }

    /// Node is of the given kind.
    pub fn kind(kind: SyntaxKind) -> Self {
        Self::new(format!("{kind:?}"), move |node| node.kind() == kind)
    }

    /// Both this pattern and `other` accept the node.
    pub fn and(self, other: Pattern) -> Self {
        let name = format!("{} & {}", self.name, other.name);
        Self::new(name, move |node| self.accepts(node) && other.accepts(node))
    }

    /// At least one of `patterns` accepts the node.
    pub fn any_of(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        let patterns: Vec<Pattern> = patterns.into_iter().collect();
        let name = patterns
            .iter()
            .map(Pattern::name)
            .collect::<Vec<_>>()
            .join(" | ");
        Self::new(format!("({name})"), move |node| {
            patterns.iter().any(|p| p.accepts(node))
        })
    }

    /// This pattern accepts the node and `parent` accepts its parent.
    pub fn with_parent(self, parent: Pattern) -> Self {
        let name = format!("{} < {}", self.name, parent.name);
        Self::new(name, move |node| {
            self.accepts(node) && node.parent().is_some_and(|p| parent.accepts(&p))
        })
    }

    /// This pattern accepts the node and its ancestors have exactly the
    /// given kinds, innermost first.
    pub fn with_parents(self, kinds: &[SyntaxKind]) -> Self {
        let kinds = kinds.to_vec();
        let name = format!("{} < {:?}", self.name, kinds);
        Self::new(name, move |node| {
            if !self.accepts(node) {
                return false;
            }
            let mut ancestors = node.ancestors().skip(1);
            kinds
                .iter()
                .all(|&kind| ancestors.next().is_some_and(|a| a.kind() == kind))
        })
    }

    /// A scalar whose decoded value matches `regex`.
    pub fn text_matches(regex: Regex) -> Self {
        let name = format!("matches<{}>", regex.as_str());
        Self::new(name, move |node| {
            Scalar::cast(node.clone()).is_some_and(|s| regex.is_match(&s.text_value()))
        })
    }

    /// A key-value pair whose key text is one of `keys`.
    pub fn key_text(keys: &[&str]) -> Self {
        let keys: Vec<SmolStr> = keys.iter().map(|&k| SmolStr::new(k)).collect();
        let name = format!("key{keys:?}");
        Self::new(name, move |node| {
            KeyValue::cast(node.clone())
                .and_then(|kv| kv.key_text())
                .is_some_and(|text| keys.iter().any(|k| k == &text))
        })
    }

    /// A sequence with at least one item whose value `item` accepts.
    pub fn with_items(item: Pattern) -> Self {
        let name = format!("items<{}>", item.name);
        Self::new(name, move |node| {
            Sequence::cast(node.clone()).is_some_and(|seq| {
                seq.items()
                    .filter_map(|i| i.value())
                    .any(|v| item.accepts(v.syntax()))
            })
        })
    }
}
