//! Lexer error types.
//!
//! The lexer reports errors as plain values; the parser maps them onto
//! diagnostics with error codes. Keeping this crate free of the diagnostic
//! machinery lets external tools lex schemes without pulling in the
//! compiler.

use lipi_ir::Span;

/// A lexical error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// Where the error occurred.
    pub span: Span,
    /// What went wrong.
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing `"` for a string literal.
    UnterminatedString,
    /// A character that starts no token.
    InvalidCharacter { found: char },
    /// Integer literal out of range.
    InvalidNumber,
    /// Invalid escape in a string literal (e.g. `\q`).
    InvalidEscape { escape_char: char },
}

impl LexError {
    /// Create an unterminated string error.
    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedString,
        }
    }

    /// Create an invalid character error.
    #[cold]
    pub fn invalid_character(span: Span, found: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::InvalidCharacter { found },
        }
    }

    /// Create an invalid number error.
    #[cold]
    pub fn invalid_number(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::InvalidNumber,
        }
    }

    /// Create an invalid escape error.
    #[cold]
    pub fn invalid_escape(span: Span, escape_char: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::InvalidEscape { escape_char },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let span = Span::new(10, 15);
        let err = LexError::unterminated_string(span);
        assert_eq!(err.span, span);
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn test_escape_error_carries_char() {
        let err = LexError::invalid_escape(Span::new(5, 7), 'q');
        assert_eq!(err.kind, LexErrorKind::InvalidEscape { escape_char: 'q' });
    }

    #[test]
    fn test_error_equality() {
        let a = LexError::invalid_number(Span::new(0, 5));
        let b = LexError::invalid_number(Span::new(0, 5));
        let c = LexError::invalid_character(Span::new(0, 5), '$');
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
