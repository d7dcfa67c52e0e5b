//! Logos-based lexer for YAML
//!
//! Fast tokenization using the logos crate. The lexer is context free: it
//! does not know whether `:` ends a key or belongs to a plain scalar, so the
//! parser glues tokens back together where YAML says they form one scalar.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
    /// 0-indexed line of the first byte.
    pub line: u32,
    /// Byte column of the first byte; indentation is measured with it.
    pub col: u32,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
            line: 0,
            col: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        let (line, col) = (self.line, self.col);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        if kind == SyntaxKind::NEWLINE {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += text.len() as u32;
        }

        Some(Token {
            kind,
            text,
            offset,
            line,
            col,
        })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"#[^\r\n]*")]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[^ \t\r\n:,\[\]{}#'!&*|>\x22\-][^ \t\r\n:,\[\]{}]*")]
    Plain,

    #[regex(r"'([^'\r\n]|'')*'")]
    SingleQuoted,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    DoubleQuoted,

    #[regex(r"[|>]([+\-][0-9]?|[0-9][+\-]?)?")]
    BlockHeader,

    // =========================================================================
    // NODE PROPERTIES
    // =========================================================================
    #[regex(r"![^ \t\r\n,\[\]{}]*")]
    Tag,

    #[regex(r"&[^ \t\r\n,\[\]{}]+")]
    Anchor,

    #[regex(r"\*[^ \t\r\n,\[\]{}]+")]
    Alias,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("---")]
    DocStart,
    #[token("-")]
    Dash,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::Newline => SyntaxKind::NEWLINE,
            LogosToken::Comment => SyntaxKind::COMMENT,
            LogosToken::Plain => SyntaxKind::PLAIN,
            LogosToken::SingleQuoted => SyntaxKind::SINGLE_QUOTED,
            LogosToken::DoubleQuoted => SyntaxKind::DOUBLE_QUOTED,
            LogosToken::BlockHeader => SyntaxKind::BLOCK_HEADER,
            LogosToken::Tag => SyntaxKind::TAG,
            LogosToken::Anchor => SyntaxKind::ANCHOR,
            LogosToken::Alias => SyntaxKind::ALIAS_TOKEN,
            LogosToken::DocStart => SyntaxKind::DOC_START,
            LogosToken::Dash => SyntaxKind::DASH,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
        }
    }
}
