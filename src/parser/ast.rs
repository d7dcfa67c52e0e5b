//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Scalars additionally know how to decode their textual value.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use rowan::{TextRange, TextSize};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Root
// ============================================================================

ast_node!(YamlFile, FILE);

impl YamlFile {
    pub fn documents(&self) -> impl Iterator<Item = Document> + '_ {
        self.0.children().filter_map(Document::cast)
    }
}

ast_node!(Document, DOCUMENT);

impl Document {
    /// The single top-level value of the document, if any.
    pub fn top_level_value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }
}

// ============================================================================
// Values
// ============================================================================

/// Any YAML value node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Sequence(Sequence),
    Mapping(Mapping),
    Scalar(Scalar),
    Alias(Alias),
}

impl AstNode for Value {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::SEQUENCE | SyntaxKind::MAPPING | SyntaxKind::SCALAR | SyntaxKind::ALIAS
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::SEQUENCE => Some(Self::Sequence(Sequence(node))),
            SyntaxKind::MAPPING => Some(Self::Mapping(Mapping(node))),
            SyntaxKind::SCALAR => Some(Self::Scalar(Scalar(node))),
            SyntaxKind::ALIAS => Some(Self::Alias(Alias(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Sequence(n) => n.syntax(),
            Self::Mapping(n) => n.syntax(),
            Self::Scalar(n) => n.syntax(),
            Self::Alias(n) => n.syntax(),
        }
    }
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

ast_node!(Sequence, SEQUENCE);

impl Sequence {
    pub fn items(&self) -> impl Iterator<Item = SequenceItem> + '_ {
        self.0.children().filter_map(SequenceItem::cast)
    }
}

ast_node!(SequenceItem, SEQUENCE_ITEM);

impl SequenceItem {
    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }

    /// The `-` marker of a block sequence entry. Flow entries have none.
    pub fn dash(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::DASH)
    }
}

ast_node!(Mapping, MAPPING);

impl Mapping {
    pub fn key_values(&self) -> impl Iterator<Item = KeyValue> + '_ {
        self.0.children().filter_map(KeyValue::cast)
    }

    /// First pair whose key text is `key`.
    pub fn get(&self, key: &str) -> Option<KeyValue> {
        self.key_values().find(|kv| kv.key_text().as_deref() == Some(key))
    }
}

ast_node!(KeyValue, KEY_VALUE);

impl KeyValue {
    pub fn key(&self) -> Option<Key> {
        self.0.children().find_map(Key::cast)
    }

    pub fn key_text(&self) -> Option<String> {
        self.key().map(|k| k.text())
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }
}

ast_node!(Key, KEY);

impl Key {
    /// Decoded key text (quotes removed).
    pub fn text(&self) -> String {
        let tokens: Vec<_> = significant_tokens(&self.0).collect();
        match tokens.as_slice() {
            [single] => decode_flow_token(single),
            _ => fold_plain(&tokens),
        }
    }
}

ast_node!(Scalar, SCALAR);

/// Presentation style of a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl Scalar {
    /// Tokens of the scalar value, excluding tags and anchors.
    fn content_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        significant_tokens(&self.0).filter(|t| !t.kind().is_property())
    }

    pub fn style(&self) -> ScalarStyle {
        match self.content_tokens().next().map(|t| (t.kind(), t)) {
            Some((SyntaxKind::SINGLE_QUOTED, _)) => ScalarStyle::SingleQuoted,
            Some((SyntaxKind::DOUBLE_QUOTED, _)) => ScalarStyle::DoubleQuoted,
            Some((SyntaxKind::BLOCK_HEADER, t)) if t.text().starts_with('>') => ScalarStyle::Folded,
            Some((SyntaxKind::BLOCK_HEADER, _)) => ScalarStyle::Literal,
            _ => ScalarStyle::Plain,
        }
    }

    /// The decoded value of this scalar.
    pub fn text_value(&self) -> String {
        let tokens: Vec<_> = self.content_tokens().collect();
        let Some(first) = tokens.first() else {
            return String::new();
        };
        match first.kind() {
            SyntaxKind::SINGLE_QUOTED | SyntaxKind::DOUBLE_QUOTED => decode_flow_token(first),
            SyntaxKind::BLOCK_HEADER => self.block_value(first),
            _ => fold_plain(&tokens),
        }
    }

    /// Range of the value text: inside the quotes for quoted scalars, the
    /// content lines for block scalars, the words for plain scalars.
    pub fn value_range(&self) -> TextRange {
        let mut tokens = self.content_tokens();
        let Some(first) = tokens.next() else {
            return TextRange::empty(self.0.text_range().end());
        };
        let last = tokens.last().unwrap_or_else(|| first.clone());
        let range = TextRange::new(first.text_range().start(), last.text_range().end());
        match first.kind() {
            SyntaxKind::SINGLE_QUOTED | SyntaxKind::DOUBLE_QUOTED => {
                let inner_end = if range.len() >= TextSize::new(2) {
                    range.end() - TextSize::new(1)
                } else {
                    range.end()
                };
                TextRange::new((range.start() + TextSize::new(1)).min(inner_end), inner_end)
            }
            SyntaxKind::BLOCK_HEADER => {
                let start = self
                    .0
                    .children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .skip_while(|t| t != &first)
                    .find(|t| t.kind() == SyntaxKind::NEWLINE)
                    .map(|t| t.text_range().end())
                    .unwrap_or_else(|| self.0.text_range().end());
                TextRange::new(start, self.0.text_range().end().max(start))
            }
            _ => range,
        }
    }

    fn block_value(&self, header: &SyntaxToken) -> String {
        let header_text = header.text();
        let folded = header_text.starts_with('>');
        let chomp = if header_text.contains('-') {
            Chomping::Strip
        } else if header_text.contains('+') {
            Chomping::Keep
        } else {
            Chomping::Clip
        };
        let explicit_indent = header_text
            .chars()
            .find_map(|c| c.to_digit(10))
            .map(|d| d as usize);

        let node_start = self.0.text_range().start();
        let range = self.value_range();
        let node_text = self.0.text().to_string();
        let body = &node_text[usize::from(range.start() - node_start)..usize::from(range.end() - node_start)];

        let lines: Vec<&str> = body.lines().collect();
        let indent = explicit_indent.unwrap_or_else(|| {
            lines
                .iter()
                .filter(|l| !l.trim().is_empty())
                .map(|l| l.len() - l.trim_start_matches(' ').len())
                .next()
                .unwrap_or(0)
        });

        let content: Vec<&str> = lines
            .iter()
            .map(|l| {
                let leading = l.len() - l.trim_start_matches(' ').len();
                &l[leading.min(indent)..]
            })
            .collect();

        let mut out = String::new();
        let mut previous_blank = true;
        for (i, line) in content.iter().enumerate() {
            if i > 0 {
                let separator = if folded && !previous_blank && !line.is_empty() && !line.starts_with(' ') {
                    ' '
                } else {
                    '\n'
                };
                if !(folded && line.is_empty() && !previous_blank) {
                    out.push(separator);
                }
            }
            out.push_str(line);
            previous_blank = line.is_empty();
        }

        let trimmed_len = out.trim_end_matches('\n').len();
        match chomp {
            Chomping::Strip => out.truncate(trimmed_len),
            Chomping::Clip => {
                out.truncate(trimmed_len);
                if !out.is_empty() {
                    out.push('\n');
                }
            }
            Chomping::Keep => {
                if body.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    Strip,
    Clip,
    Keep,
}

ast_node!(Alias, ALIAS);

impl Alias {
    /// Name of the referenced anchor, without the `*`.
    pub fn name(&self) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::ALIAS_TOKEN)
            .map(|t| t.text()[1..].to_string())
    }
}

// ============================================================================
// Text decoding
// ============================================================================

fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

fn decode_flow_token(token: &SyntaxToken) -> String {
    let text = token.text();
    match token.kind() {
        SyntaxKind::SINGLE_QUOTED => unquote(text, '\'').replace("''", "'"),
        SyntaxKind::DOUBLE_QUOTED => unescape_double(unquote(text, '"')),
        _ => text.to_string(),
    }
}

fn unquote(text: &str, quote: char) -> &str {
    let text = text.strip_prefix(quote).unwrap_or(text);
    text.strip_suffix(quote).unwrap_or(text)
}

fn unescape_double(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some(' ') => out.push(' '),
            Some('x') => push_code_point(&mut out, &mut chars, 2),
            Some('u') => push_code_point(&mut out, &mut chars, 4),
            Some('U') => push_code_point(&mut out, &mut chars, 8),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn push_code_point(out: &mut String, chars: &mut std::str::Chars<'_>, digits: usize) {
    let hex: String = chars.by_ref().take(digits).collect();
    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => out.push(char::REPLACEMENT_CHARACTER),
    }
}

/// Joins the tokens of a plain scalar, folding line breaks into spaces.
fn fold_plain(tokens: &[SyntaxToken]) -> String {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return String::new();
    };
    let mut text = String::new();
    let mut token = Some(first.clone());
    while let Some(t) = token {
        text.push_str(t.text());
        if t == *last {
            break;
        }
        token = t.next_token();
    }
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
