//! Recursive descent parser for YAML
//!
//! Builds a rowan GreenNode tree from tokens.
//! Block structure is driven by token columns; flow collections by brackets.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse YAML source text into a CST
pub fn parse_yaml(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn kind_at(&self, idx: usize) -> Option<SyntaxKind> {
        self.tokens.get(idx).map(|t| t.kind)
    }

    fn current_kind(&self) -> Option<SyntaxKind> {
        self.kind_at(self.pos)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// At a line break, a comment, or the end of input.
    fn at_line_end(&self) -> bool {
        matches!(
            self.current_kind(),
            None | Some(SyntaxKind::NEWLINE) | Some(SyntaxKind::COMMENT)
        )
    }

    fn col(&self, idx: usize) -> i32 {
        self.tokens[idx].col as i32
    }

    /// Index of the first non-trivia token at or after `from`.
    fn next_significant(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_trivia())
    }

    /// True when `idx` is followed by trivia or the end of input.
    fn followed_by_space(&self, idx: usize) -> bool {
        self.kind_at(idx + 1).is_none_or(SyntaxKind::is_trivia)
    }

    /// A `-` that introduces a block sequence entry.
    fn is_indicator_dash(&self, idx: usize) -> bool {
        self.kind_at(idx) == Some(SyntaxKind::DASH) && self.followed_by_space(idx)
    }

    fn is_doc_start(&self, idx: usize) -> bool {
        self.kind_at(idx) == Some(SyntaxKind::DOC_START)
            && self.tokens[idx].col == 0
            && self.followed_by_space(idx)
    }

    /// If a block mapping key starts at `idx`, returns the index of its `:`.
    fn key_colon(&self, idx: usize) -> Option<usize> {
        match self.kind_at(idx)? {
            SyntaxKind::L_BRACKET
            | SyntaxKind::L_BRACE
            | SyntaxKind::BLOCK_HEADER
            | SyntaxKind::COLON
            | SyntaxKind::DOC_START => return None,
            SyntaxKind::DASH if self.is_indicator_dash(idx) => return None,
            _ => {}
        }
        let mut i = idx;
        while let Some(kind) = self.kind_at(i) {
            match kind {
                SyntaxKind::NEWLINE | SyntaxKind::COMMENT => return None,
                SyntaxKind::COLON if i > idx && self.followed_by_space(i) => return Some(i),
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// If a flow mapping key starts at `idx`, returns the index of its `:`.
    fn flow_key_colon(&self, idx: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = idx;
        while let Some(kind) = self.kind_at(i) {
            match kind {
                SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE if depth > 0 => depth -= 1,
                SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE | SyntaxKind::COMMA if depth == 0 => {
                    return None;
                }
                SyntaxKind::COLON if depth == 0 => {
                    let after_quoted = i > idx
                        && matches!(
                            self.kind_at(i - 1),
                            Some(SyntaxKind::SINGLE_QUOTED | SyntaxKind::DOUBLE_QUOTED)
                        );
                    let separated = self
                        .kind_at(i + 1)
                        .is_none_or(|k| k.is_trivia() || k.is_flow_terminator());
                    if separated || after_quoted {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        None
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_while(&mut self, pred: impl Fn(SyntaxKind) -> bool) {
        while self.current_kind().is_some_and(&pred) {
            self.bump();
        }
    }

    fn bump_trivia(&mut self) {
        self.bump_while(SyntaxKind::is_trivia);
    }

    /// Bump tokens up to (excluding) `end`, leaving trailing trivia unconsumed.
    fn bump_trimmed(&mut self, end: usize) {
        let last = (self.pos..end)
            .rev()
            .find(|&i| !self.tokens[i].kind.is_trivia());
        if let Some(last) = last {
            while self.pos <= last {
                self.bump();
            }
        }
    }

    /// Bump the content of the current line, excluding trailing whitespace and comments.
    fn bump_line_content(&mut self) {
        let end = (self.pos..self.tokens.len())
            .find(|&i| {
                matches!(
                    self.tokens[i].kind,
                    SyntaxKind::NEWLINE | SyntaxKind::COMMENT
                )
            })
            .unwrap_or(self.tokens.len());
        self.bump_trimmed(end);
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .tokens
            .get(self.pos)
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while let Some(kind) = self.current_kind() {
            if recovery.contains(&kind) {
                break;
            }
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    /// After an inline value: trailing comments are fine, anything else is an error.
    fn finish_line(&mut self) {
        self.bump_while(SyntaxKind::is_inline_trivia);
        if !self.at_eof() && !self.at(SyntaxKind::NEWLINE) {
            self.error_recover("unexpected content after value", &[SyntaxKind::NEWLINE]);
        }
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules: documents
    // =========================================================================

    /// File = Document ('---' Document)*
    fn parse_file(&mut self) {
        self.start_node(SyntaxKind::FILE);
        loop {
            self.parse_document();
            if self.at_eof() {
                break;
            }
        }
        self.finish_node();
    }

    /// Document = '---'? BlockNode?
    fn parse_document(&mut self) {
        self.start_node(SyntaxKind::DOCUMENT);

        self.bump_trivia();
        let mut has_content = false;
        if self.is_doc_start(self.pos) {
            self.bump();
            self.bump_while(|k| k == SyntaxKind::WHITESPACE);
            if !self.at_line_end() {
                self.parse_block_node(-1, false);
                self.finish_line();
                has_content = true;
            }
            self.bump_trivia();
        }
        if !has_content && !self.at_eof() && !self.is_doc_start(self.pos) {
            self.parse_block_node(-1, false);
        }

        loop {
            self.bump_trivia();
            if self.at_eof() || self.is_doc_start(self.pos) {
                break;
            }
            self.error_recover("unexpected content in document", &[SyntaxKind::NEWLINE]);
        }

        self.finish_node();
    }

    // =========================================================================
    // Grammar rules: block context
    // =========================================================================

    /// BlockNode = Properties? (Alias | FlowCollection | BlockScalar | BlockSequence
    ///             | BlockMapping | Scalar)
    ///
    /// The node must be indented deeper than `min_col`. With `inline` set the
    /// node shares a line with a key, so block collections cannot start here.
    fn parse_block_node(&mut self, min_col: i32, inline: bool) {
        let checkpoint = self.builder.checkpoint();
        let mut inline = inline;

        let mut has_properties = false;
        while self.current_kind().is_some_and(SyntaxKind::is_property) {
            self.bump();
            self.bump_while(|k| k == SyntaxKind::WHITESPACE);
            has_properties = true;
        }

        if has_properties && self.at_line_end() {
            match self.next_significant(self.pos) {
                Some(next) if self.col(next) > min_col && !self.is_doc_start(next) => {
                    self.bump_trivia();
                    inline = false;
                }
                _ => {
                    // A tagged empty value.
                    self.start_node_at(checkpoint, SyntaxKind::SCALAR);
                    self.finish_node();
                    return;
                }
            }
        }

        match self.current_kind() {
            None => {
                self.start_node_at(checkpoint, SyntaxKind::SCALAR);
                self.finish_node();
            }
            Some(SyntaxKind::ALIAS_TOKEN) => {
                self.start_node_at(checkpoint, SyntaxKind::ALIAS);
                self.bump();
                self.finish_node();
            }
            Some(SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE) => {
                self.parse_flow_collection(checkpoint);
            }
            Some(SyntaxKind::BLOCK_HEADER) => self.parse_block_scalar(checkpoint, min_col),
            Some(SyntaxKind::DASH) if !inline && self.is_indicator_dash(self.pos) => {
                self.parse_block_sequence(checkpoint);
            }
            Some(_) if !inline && self.key_colon(self.pos).is_some() => {
                self.parse_block_mapping(checkpoint);
            }
            Some(_) => self.parse_scalar(checkpoint, min_col),
        }
    }

    /// BlockSequence = ('-' BlockNode?)+ with every '-' in the same column
    fn parse_block_sequence(&mut self, checkpoint: Checkpoint) {
        let col = self.col(self.pos);
        self.start_node_at(checkpoint, SyntaxKind::SEQUENCE);

        loop {
            self.start_node(SyntaxKind::SEQUENCE_ITEM);
            self.bump(); // '-'
            self.bump_while(|k| k == SyntaxKind::WHITESPACE);

            if self.at_line_end() {
                self.bump_while(SyntaxKind::is_inline_trivia);
                match self.next_significant(self.pos) {
                    Some(next) if self.col(next) > col && !self.is_doc_start(next) => {
                        self.bump_trivia();
                        self.parse_block_node(col, false);
                    }
                    _ => {}
                }
            } else {
                self.parse_block_node(col, false);
                self.finish_line();
            }
            self.finish_node();

            match self.next_significant(self.pos) {
                Some(next) if self.col(next) == col && self.is_indicator_dash(next) => {
                    self.bump_trivia();
                }
                _ => break,
            }
        }

        self.finish_node();
    }

    /// BlockMapping = (Key ':' BlockNode?)+ with every key in the same column
    fn parse_block_mapping(&mut self, checkpoint: Checkpoint) {
        let col = self.col(self.pos);
        self.start_node_at(checkpoint, SyntaxKind::MAPPING);

        while let Some(colon) = self.key_colon(self.pos) {
            self.start_node(SyntaxKind::KEY_VALUE);

            self.start_node(SyntaxKind::KEY);
            self.bump_trimmed(colon);
            self.finish_node();
            self.bump_trivia();
            self.bump(); // ':'
            self.bump_while(|k| k == SyntaxKind::WHITESPACE);

            if self.at_line_end() {
                self.bump_while(SyntaxKind::is_inline_trivia);
                match self.next_significant(self.pos) {
                    Some(next)
                        if !self.is_doc_start(next)
                            && (self.col(next) > col
                                || (self.col(next) == col && self.is_indicator_dash(next))) =>
                    {
                        self.bump_trivia();
                        // Sequences may sit in the same column as their key.
                        let min_col = if self.col(self.pos) == col { col - 1 } else { col };
                        self.parse_block_node(min_col, false);
                    }
                    _ => {}
                }
            } else {
                self.parse_block_node(col, true);
                self.finish_line();
            }
            self.finish_node();

            match self.next_significant(self.pos) {
                Some(next) if self.col(next) == col && self.key_colon(next).is_some() => {
                    self.bump_trivia();
                }
                _ => break,
            }
        }

        self.finish_node();
    }

    /// Scalar = Quoted | Plain (continuation lines indented deeper than `min_col`)*
    fn parse_scalar(&mut self, checkpoint: Checkpoint, min_col: i32) {
        self.start_node_at(checkpoint, SyntaxKind::SCALAR);

        if matches!(
            self.current_kind(),
            Some(SyntaxKind::SINGLE_QUOTED | SyntaxKind::DOUBLE_QUOTED)
        ) {
            self.bump();
        } else {
            self.bump_line_content();
            while let Some(next) = self.next_significant(self.pos) {
                let blank_between = (self.pos..next)
                    .all(|i| matches!(self.tokens[i].kind, SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE));
                let continues = blank_between
                    && self.tokens[next].line > self.tokens[self.pos.saturating_sub(1)].line
                    && self.col(next) > min_col
                    && !self.is_doc_start(next)
                    && self.key_colon(next).is_none();
                if !continues {
                    break;
                }
                self.bump_trivia();
                self.bump_line_content();
            }
        }

        self.finish_node();
    }

    /// BlockScalar = ('|' | '>') Indicators? (Line indented deeper than `min_col` | BlankLine)*
    fn parse_block_scalar(&mut self, checkpoint: Checkpoint, min_col: i32) {
        self.start_node_at(checkpoint, SyntaxKind::SCALAR);
        self.bump(); // header
        self.bump_while(SyntaxKind::is_inline_trivia);

        if !self.at_eof() && !self.at(SyntaxKind::NEWLINE) {
            self.error_recover("unexpected content after block scalar header", &[SyntaxKind::NEWLINE]);
        }

        while self.at(SyntaxKind::NEWLINE) {
            let first = (self.pos + 1..self.tokens.len())
                .find(|&i| self.tokens[i].kind != SyntaxKind::WHITESPACE);
            let Some(first) = first else { break };

            if self.tokens[first].kind == SyntaxKind::NEWLINE {
                // Blank line inside (or trailing) the block
                self.bump();
                self.bump_while(|k| k == SyntaxKind::WHITESPACE);
                continue;
            }
            if self.col(first) <= min_col || self.is_doc_start(first) {
                break;
            }
            self.bump(); // newline
            self.bump_while(|k| k != SyntaxKind::NEWLINE);
        }

        self.finish_node();
    }

    // =========================================================================
    // Grammar rules: flow context
    // =========================================================================

    /// FlowCollection = '[' (FlowEntry (',' FlowEntry)*)? ']' | '{' (FlowPair (',' FlowPair)*)? '}'
    fn parse_flow_collection(&mut self, checkpoint: Checkpoint) {
        let (kind, close) = if self.at(SyntaxKind::L_BRACKET) {
            (SyntaxKind::SEQUENCE, SyntaxKind::R_BRACKET)
        } else {
            (SyntaxKind::MAPPING, SyntaxKind::R_BRACE)
        };
        self.start_node_at(checkpoint, kind);
        self.bump(); // '[' or '{'

        loop {
            self.bump_trivia();
            match self.current_kind() {
                None => {
                    self.error("unclosed flow collection");
                    break;
                }
                Some(k) if k == close => {
                    self.bump();
                    break;
                }
                Some(SyntaxKind::COMMA) => {
                    self.error("unexpected ','");
                    self.bump();
                    continue;
                }
                Some(SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE) => {
                    self.error("mismatched closing bracket");
                    self.bump();
                    break;
                }
                Some(_) => {}
            }

            let before = self.pos;
            if kind == SyntaxKind::SEQUENCE {
                self.start_node(SyntaxKind::SEQUENCE_ITEM);
                self.parse_flow_entry(true);
                self.finish_node();
            } else {
                self.parse_flow_pair();
            }
            self.bump_trivia();

            if self.at(SyntaxKind::COMMA) {
                self.bump();
            } else if !self.at_eof() && !self.at(close) {
                self.error_recover("expected ','", &[SyntaxKind::COMMA, close]);
                self.eat_comma();
            } else if self.pos == before {
                break;
            }
        }

        self.finish_node();
    }

    fn eat_comma(&mut self) {
        if self.at(SyntaxKind::COMMA) {
            self.bump();
        }
    }

    /// FlowEntry = Properties? (FlowCollection | Alias | FlowPair | FlowScalar)
    fn parse_flow_entry(&mut self, in_sequence: bool) {
        let checkpoint = self.builder.checkpoint();
        while self.current_kind().is_some_and(SyntaxKind::is_property) {
            self.bump();
            self.bump_trivia();
        }

        match self.current_kind() {
            Some(SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE) => {
                self.parse_flow_collection(checkpoint);
            }
            Some(SyntaxKind::ALIAS_TOKEN) => {
                self.start_node_at(checkpoint, SyntaxKind::ALIAS);
                self.bump();
                self.finish_node();
            }
            Some(_) if in_sequence && self.flow_key_colon(self.pos).is_some() => {
                // Single pair mapping: [a: b]
                self.start_node_at(checkpoint, SyntaxKind::MAPPING);
                self.parse_flow_pair();
                self.finish_node();
            }
            _ => self.parse_flow_scalar(checkpoint),
        }
    }

    /// FlowPair = FlowKey (':' FlowEntry?)?
    fn parse_flow_pair(&mut self) {
        self.start_node(SyntaxKind::KEY_VALUE);

        let colon = self.flow_key_colon(self.pos);
        let key_end = colon.unwrap_or_else(|| self.flow_scalar_end(self.pos));
        self.start_node(SyntaxKind::KEY);
        self.bump_trimmed(key_end);
        self.finish_node();
        self.bump_trivia();

        if colon.is_some() && self.at(SyntaxKind::COLON) {
            self.bump();
            self.bump_trivia();
            if !self.current_kind().is_none_or(SyntaxKind::is_flow_terminator) {
                self.parse_flow_entry(false);
            }
        }

        self.finish_node();
    }

    /// Index just past the last token of a flow scalar starting at `from`.
    fn flow_scalar_end(&self, from: usize) -> usize {
        if matches!(
            self.kind_at(from),
            Some(SyntaxKind::SINGLE_QUOTED | SyntaxKind::DOUBLE_QUOTED)
        ) {
            return from + 1;
        }
        let mut i = from;
        while let Some(kind) = self.kind_at(i) {
            let stop = match kind {
                SyntaxKind::COMMA
                | SyntaxKind::R_BRACKET
                | SyntaxKind::R_BRACE
                | SyntaxKind::L_BRACKET
                | SyntaxKind::L_BRACE
                | SyntaxKind::NEWLINE
                | SyntaxKind::COMMENT => true,
                SyntaxKind::COLON => self
                    .kind_at(i + 1)
                    .is_none_or(|k| k.is_trivia() || k.is_flow_terminator()),
                _ => false,
            };
            if stop {
                break;
            }
            i += 1;
        }
        i
    }

    fn parse_flow_scalar(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::SCALAR);
        let end = self.flow_scalar_end(self.pos);
        self.bump_trimmed(end);
        self.finish_node();
    }
}
