//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use lipi_diagnostic::ErrorCode;
use lipi_ir::Span;
use lipi_lexer::{LexedToken, TokenKind, TokenList};

use crate::error::ParseError;

/// Cursor for navigating tokens.
///
/// Provides methods for accessing, consuming, and checking tokens during
/// parsing. Tracks current position in the token stream.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    ///
    /// The token list must end with an EOF token, which the lexer
    /// guarantees.
    pub fn new(tokens: &'a TokenList) -> Self {
        debug_assert!(
            matches!(tokens.get(tokens.len().wrapping_sub(1)).map(|t| &t.kind), Some(TokenKind::Eof)),
            "token stream must end with EOF"
        );
        Cursor { tokens, pos: 0 }
    }

    /// Get the current position in the token stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token.
    ///
    /// Invariant: cursor position is always valid (`0..tokens.len()`).
    /// The last token is always EOF.
    #[inline]
    pub fn current(&self) -> &LexedToken {
        debug_assert!(self.pos < self.tokens.len(), "cursor position out of bounds");
        &self.tokens[self.pos]
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Check if at end of token stream.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind.
    ///
    /// Data-carrying kinds compare by discriminant only.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Check if the current token is an identifier.
    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Check if the current token is a string literal.
    #[inline]
    pub fn check_str(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Str(_))
    }

    /// Advance to the next token and return the consumed token.
    ///
    /// The lexer always appends an EOF token and grammar rules check the
    /// current token kind before calling `advance()`, so the parser can
    /// never advance past the last token.
    #[inline]
    pub fn advance(&mut self) -> &LexedToken {
        let current = self.pos;
        debug_assert!(self.pos < self.tokens.len(), "advance past end of token stream");
        self.pos = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[current]
    }

    /// Expect the current token to be of the given kind, advance and return it.
    /// Returns an error if the token kind doesn't match.
    ///
    /// Split into inline happy path + `#[cold]` error path so that
    /// `format!()` allocations don't prevent inlining the fast case.
    #[inline]
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&LexedToken, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    /// Build the error for a failed `expect()` call.
    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: &TokenKind) -> ParseError {
        ParseError::new(
            ErrorCode::E1001,
            format!(
                "expected `{}`, found {}",
                kind.display_name(),
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
        .with_context(format!("expected `{}`", kind.display_name()))
    }

    /// Expect and consume an identifier, returning its name and span.
    #[inline]
    pub fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            let span = self.current_span();
            self.advance();
            Ok((name, span))
        } else {
            Err(self.make_expect_ident_error())
        }
    }

    /// Build the error for a failed `expect_ident()` call.
    #[cold]
    #[inline(never)]
    fn make_expect_ident_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1004,
            format!(
                "expected identifier, found {}",
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
    }

    /// Expect and consume a string literal, returning its cooked text and span.
    #[inline]
    pub fn expect_str(&mut self) -> Result<(String, Span), ParseError> {
        if let TokenKind::Str(text) = self.current_kind() {
            let text = text.clone();
            let span = self.current_span();
            self.advance();
            Ok((text, span))
        } else {
            Err(self.make_expect_str_error())
        }
    }

    /// Build the error for a failed `expect_str()` call.
    #[cold]
    #[inline(never)]
    fn make_expect_str_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1010,
            format!(
                "expected string literal, found {}",
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    fn tokens(source: &str) -> TokenList {
        lipi_lexer::lex(source).tokens
    }

    #[test]
    fn test_cursor_navigation() {
        let toks = tokens("vowels { }");
        let mut cursor = Cursor::new(&toks);

        assert!(cursor.check_ident());
        cursor.advance();
        assert!(cursor.check(&TokenKind::LBrace));
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_expect_success_and_failure() {
        let toks = tokens("( )");
        let mut cursor = Cursor::new(&toks);

        assert!(cursor.expect(&TokenKind::LParen).is_ok());
        let err = cursor.expect(&TokenKind::Comma).unwrap_err();
        assert_eq!(err.code, ErrorCode::E1001);
        assert!(err.message.contains("expected `,`"));
        // failed expect does not advance
        assert!(cursor.check(&TokenKind::RParen));
    }

    #[test]
    fn test_expect_ident_returns_name() {
        let toks = tokens("stable true");
        let mut cursor = Cursor::new(&toks);

        let (name, span) = cursor.expect_ident().unwrap();
        assert_eq!(name, "stable");
        assert_eq!(span, Span::new(0, 6));
        assert!(cursor.expect_ident().is_err());
    }

    #[test]
    fn test_expect_str_cooked() {
        let toks = tokens(r#""chill""#);
        let mut cursor = Cursor::new(&toks);

        let (text, _) = cursor.expect_str().unwrap();
        assert_eq!(text, "chill");
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let toks = tokens("");
        let mut cursor = Cursor::new(&toks);

        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
    }
}
