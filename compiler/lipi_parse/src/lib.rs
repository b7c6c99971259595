//! Parser for scheme source files.
//!
//! Transforms the token stream from `lipi_lexer` into the statement AST
//! defined in `lipi_ir`. Declaration options (`priority:`, `accept_if:`)
//! are resolved to typed values here, so downstream phases never re-check
//! option spellings.
//!
//! Parsing is error-tolerant: a broken statement is reported and the
//! parser resynchronizes at the next statement boundary, so one pass
//! collects every error in the file.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use error::ParseError;

use cursor::Cursor;
use lipi_diagnostic::ErrorCode;
use lipi_ir::{Span, Stmt};
use lipi_lexer::{LexedToken, TokenKind, TokenList};

/// Parse result containing the statement list and any errors.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseResult {
    pub stmts: Vec<Stmt>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Recursive-descent parser over a lexed token stream.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a parser over a token list.
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
        }
    }

    #[inline]
    fn position(&self) -> usize {
        self.cursor.position()
    }

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn check_ident(&self) -> bool {
        self.cursor.check_ident()
    }

    #[inline]
    fn check_str(&self) -> bool {
        self.cursor.check_str()
    }

    #[inline]
    fn advance(&mut self) -> &LexedToken {
        self.cursor.advance()
    }

    #[inline]
    fn expect(&mut self, kind: &TokenKind) -> Result<&LexedToken, ParseError> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        self.cursor.expect_ident()
    }

    #[inline]
    fn expect_str(&mut self) -> Result<(String, Span), ParseError> {
        self.cursor.expect_str()
    }

    /// Record an error without aborting the surrounding construct.
    #[inline]
    fn push_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Parse a whole scheme (a sequence of statements).
    pub fn parse_scheme(mut self) -> ParseResult {
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            if self.check_ident() {
                match self.parse_stmt() {
                    Ok(stmt) => stmts.push(stmt),
                    Err(e) => {
                        self.push_error(e);
                        self.recover_to_next_stmt();
                    }
                }
            } else {
                let err = self.stray_token_error();
                self.push_error(err);
                if self.check(&TokenKind::RBrace) {
                    // a stray closer carries nothing to skip over
                    self.advance();
                } else {
                    self.recover_to_next_stmt();
                }
            }
        }

        ParseResult {
            stmts,
            errors: self.errors,
        }
    }

    /// Recovery: skip to the next statement boundary.
    fn recover_to_next_stmt(&mut self) {
        recovery::synchronize_stmt(&mut self.cursor);
    }

    /// Recovery: skip to the next entry boundary inside a block.
    fn recover_in_block(&mut self) {
        recovery::synchronize_in_block(&mut self.cursor);
    }

    #[cold]
    fn stray_token_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1001,
            format!(
                "expected a statement, found {}",
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
        .with_context("expected a statement")
    }
}

/// Parse a token list into statements.
pub fn parse(tokens: &TokenList) -> ParseResult {
    Parser::new(tokens).parse_scheme()
}

/// Lex and parse a source string in one step.
///
/// Lexer errors come first in the error list; the parser still runs over
/// the full token stream so later statements are checked too.
pub fn parse_source(source: &str) -> ParseResult {
    let lexed = lipi_lexer::lex(source);
    let mut result = parse(&lexed.tokens);
    if !lexed.errors.is_empty() {
        let mut errors: Vec<ParseError> = lexed
            .errors
            .iter()
            .map(ParseError::from_lex_error)
            .collect();
        errors.append(&mut result.errors);
        result.errors = errors;
    }
    result
}
