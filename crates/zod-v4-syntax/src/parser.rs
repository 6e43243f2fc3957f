//! Recursive descent parser producing a [`SyntaxTree`].
//!
//! The parser works on a pre-tokenized stream with arbitrary lookahead.
//! Ambiguous constructs (arrow functions vs parenthesized expressions,
//! call type arguments vs `<` comparisons) are resolved by speculative
//! parsing with [`Parser::try_parse`], which rolls back both the token
//! position and the node arena on failure.

pub mod error;
pub mod expr;
pub mod guards;
pub mod pattern;
pub mod precedence;
pub mod recovery;
pub mod stmt;
pub mod types;

use crate::ast::{NodeId, NodeKind, SyntaxTree, TreeBuilder};
use crate::lexer::{LexError, Lexer};
use crate::token::{Span, Token};

pub use error::{ParseError, ParseErrorKind};

/// Parser state.
pub struct Parser {
    /// Pre-tokenized input, always terminated by `Token::Eof`
    tokens: Vec<(Token, Span)>,

    /// Current position in token stream
    pos: usize,

    /// Span of the most recently consumed token
    last_span: Span,

    /// Accumulated statement-level errors
    errors: Vec<ParseError>,

    /// Node arena under construction
    builder: TreeBuilder,

    /// Current recursion depth (see `guards::MAX_PARSE_DEPTH`)
    depth: usize,

    /// Set while parsing a `for` head, where `in` ends the initializer
    no_in: bool,

    /// Original tokens replaced when a `>>`-style token was split to close
    /// a type argument list; restored on backtrack
    split_log: Vec<(usize, Token, Span)>,
}

impl Parser {
    /// Create a new parser from source code.
    pub fn new(source: &str) -> Result<Self, Vec<LexError>> {
        let tokens = Lexer::new(source).tokenize()?;

        Ok(Self {
            tokens,
            pos: 0,
            last_span: Span::new(0, 0, 1, 1),
            errors: Vec::new(),
            builder: TreeBuilder::new(),
            depth: 0,
            no_in: false,
            split_log: Vec::new(),
        })
    }

    /// Parse the whole token stream into a tree.
    ///
    /// Returns all accumulated errors if any statement failed to parse.
    pub fn parse(mut self) -> Result<SyntaxTree, Vec<ParseError>> {
        let mut body = Vec::new();

        while !self.at_eof() {
            match stmt::parse_statement(&mut self) {
                Ok(stmt) => body.push(stmt),
                Err(err) => {
                    // Resuming inside the overly deep construct would only
                    // hit the limit again, once per enclosing level.
                    let limit = matches!(err.kind, ParseErrorKind::ParserLimitExceeded { .. });
                    self.errors.push(err);
                    if limit {
                        break;
                    }
                    recovery::sync_to_statement_boundary(&mut self);
                }
            }
        }

        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        let end = self.current_span();
        let root = self.builder.alloc(
            NodeKind::Program { body },
            Span::new(0, end.end, 1, 1),
        );
        Ok(self.builder.finish(root))
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    /// Peek at the next token.
    #[inline]
    pub fn peek(&self) -> &Token {
        self.peek_nth(1)
    }

    /// Peek `n` tokens ahead; saturates at `Eof`.
    pub fn peek_nth(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx].0
    }

    /// Span of the token `n` ahead; saturates at `Eof`.
    pub fn peek_span(&self, n: usize) -> Span {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[idx].1
    }

    /// Current position in the token stream.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Advance to the next token, returning the previous current token.
    pub fn advance(&mut self) -> Token {
        let (tok, span) = self.tokens[self.pos].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
            self.last_span = span;
        }
        tok
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, expected: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(expected)
    }

    /// Check if the current token is the contextual keyword `name`.
    #[inline]
    pub fn check_ident(&self, name: &str) -> bool {
        self.current().is_ident(name)
    }

    /// Check if we've reached EOF.
    #[inline]
    pub fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it matches the expected kind and return
    /// its span.
    pub fn expect(&mut self, expected: Token) -> Result<Span, ParseError> {
        if self.check(&expected) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected_token(&[expected]))
        }
    }

    /// Consume an identifier and return its name and span.
    pub fn expect_identifier(&mut self) -> Result<(String, Span), ParseError> {
        match self.current() {
            Token::Identifier(name) => {
                let name = name.clone();
                let span = self.current_span();
                self.advance();
                Ok((name, span))
            }
            _ => Err(self.unexpected_token(&[Token::Identifier(String::new())])),
        }
    }

    /// Consume an optional statement-terminating semicolon.
    pub fn consume_semicolon(&mut self) {
        self.eat(&Token::Semicolon);
    }

    /// True if a line break separates the previous token from the current one.
    pub fn has_newline_before(&self) -> bool {
        self.current_span().line > self.last_span.line
    }

    /// Consume one `>` closing a type argument or parameter list, splitting
    /// `>>`, `>>>` and `>=`-style tokens when needed.
    pub fn eat_closing_angle(&mut self) -> Result<(), ParseError> {
        let (token, span) = self.tokens[self.pos].clone();
        let rest = match token {
            Token::Greater => {
                self.advance();
                return Ok(());
            }
            Token::GreaterGreater => Token::Greater,
            Token::GreaterGreaterGreater => Token::GreaterGreater,
            Token::GreaterEqual => Token::Equal,
            Token::GreaterGreaterEqual => Token::GreaterEqual,
            Token::GreaterGreaterGreaterEqual => Token::GreaterGreaterEqual,
            _ => return Err(self.unexpected_token(&[Token::Greater])),
        };
        self.split_log.push((self.pos, token, span));
        self.last_span = Span::new(span.start, span.start + 1, span.line, span.column);
        self.tokens[self.pos] = (
            rest,
            Span::new(span.start + 1, span.end, span.line, span.column + 1),
        );
        Ok(())
    }

    // ========================================================================
    // Node Construction
    // ========================================================================

    #[inline]
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.builder.alloc(kind, span)
    }

    #[inline]
    pub fn node_kind(&self, id: NodeId) -> &NodeKind {
        self.builder.kind(id)
    }

    #[inline]
    pub fn node_span(&self, id: NodeId) -> Span {
        self.builder.span(id)
    }

    /// Rewrite an already allocated node (used to reinterpret expressions
    /// as assignment patterns).
    pub fn replace_node(&mut self, id: NodeId, kind: NodeKind) {
        let span = self.builder.span(id);
        self.builder.replace(id, kind, span);
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn finish_span(&self, start: Span) -> Span {
        self.combine_spans(&start, &self.last_span)
    }

    /// Combine two spans into a single span.
    pub fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        Span {
            start: start.start,
            end: end.end.max(start.start),
            line: start.line,
            column: start.column,
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Create an "unexpected token" error at the current position.
    pub fn unexpected_token(&self, expected: &[Token]) -> ParseError {
        let span = self.current_span();
        if self.at_eof() {
            ParseError::unexpected_eof(expected.to_vec(), span)
        } else {
            ParseError::unexpected_token(expected.to_vec(), self.current().clone(), span)
        }
    }

    // ========================================================================
    // Speculation and Depth
    // ========================================================================

    /// Run `f`; on error restore the parser to where it was and return
    /// `None`.
    pub fn try_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Parser) -> Result<T, ParseError>,
    ) -> Option<T> {
        let pos = self.pos;
        let last_span = self.last_span;
        let checkpoint = self.builder.checkpoint();
        let splits = self.split_log.len();
        let depth = self.depth;
        let no_in = self.no_in;

        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.pos = pos;
                self.last_span = last_span;
                self.builder.rollback(checkpoint);
                while self.split_log.len() > splits {
                    if let Some((at, token, span)) = self.split_log.pop() {
                        self.tokens[at] = (token, span);
                    }
                }
                self.depth = depth;
                self.no_in = no_in;
                None
            }
        }
    }

    /// Enter a recursive production; pair with [`Parser::leave`].
    pub fn enter(&mut self, name: &'static str) -> Result<(), ParseError> {
        let span = self.current_span();
        guards::enter(&mut self.depth, name, span)
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run `f` with `in` treated as a binary operator or not.
    pub fn with_no_in<T>(&mut self, no_in: bool, f: impl FnOnce(&mut Parser) -> T) -> T {
        let saved = std::mem::replace(&mut self.no_in, no_in);
        let result = f(self);
        self.no_in = saved;
        result
    }

    pub fn no_in(&self) -> bool {
        self.no_in
    }
}
