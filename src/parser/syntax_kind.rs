//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the YAML syntax tree.

/// All syntax kinds (tokens and nodes) of the YAML subset used by prototype documents
///
/// Tokens are leaf nodes (words, quoted strings, indicators).
/// Nodes are composite (documents, sequences, mappings, scalars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    PLAIN,              // unquoted word
    SINGLE_QUOTED,      // 'text'
    DOUBLE_QUOTED,      // "text"
    BLOCK_HEADER,       // | |- > >+ |2

    // =========================================================================
    // NODE PROPERTIES
    // =========================================================================
    TAG,                // !type:Foo
    ANCHOR,             // &name
    ALIAS_TOKEN,        // *name

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    DASH,               // -
    COLON,              // :
    COMMA,              // ,
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_BRACE,            // {
    R_BRACE,            // }
    DOC_START,          // ---

    // =========================================================================
    // NODES
    // =========================================================================
    FILE,
    DOCUMENT,
    SEQUENCE,
    SEQUENCE_ITEM,
    MAPPING,
    KEY_VALUE,
    KEY,
    SCALAR,
    ALIAS,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, line break or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }

    /// Check if this is a trivia token that stays on the current line
    pub fn is_inline_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this is a node property (tag or anchor)
    pub fn is_property(self) -> bool {
        matches!(self, Self::TAG | Self::ANCHOR)
    }

    /// Check if this token closes or separates flow collection entries
    pub fn is_flow_terminator(self) -> bool {
        matches!(self, Self::COMMA | Self::R_BRACKET | Self::R_BRACE)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YamlLanguage {}

impl rowan::Language for YamlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<YamlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<YamlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<YamlLanguage>;
pub type SyntaxNodePtr = rowan::ast::SyntaxNodePtr<YamlLanguage>;
