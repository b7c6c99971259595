//! Parse error types.
//!
//! `ParseError` is the parser's internal error value; `to_diagnostic()`
//! turns it into a renderable diagnostic. Lexer errors are folded into the
//! same type so callers see one ordered error list for the whole front end.

use lipi_diagnostic::{Diagnostic, ErrorCode};
use lipi_ir::Span;
use lipi_lexer::{LexError, LexErrorKind};

/// A parse error with enough context for diagnostic rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Location of the error.
    pub span: Span,
    /// Optional label text for the primary span.
    pub context: Option<String>,
    /// Optional help messages.
    pub help: Vec<String>,
}

impl ParseError {
    /// Create a new parse error.
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
            help: Vec::new(),
        }
    }

    /// Convert a lexer error into a parse error.
    #[cold]
    pub fn from_lex_error(err: &LexError) -> Self {
        match err.kind {
            LexErrorKind::UnterminatedString => {
                ParseError::new(ErrorCode::E0001, "unterminated string literal", err.span)
                    .with_help("add a closing `\"`")
            }
            LexErrorKind::InvalidCharacter { found } => ParseError::new(
                ErrorCode::E0002,
                format!("invalid character `{found}`"),
                err.span,
            ),
            LexErrorKind::InvalidNumber => {
                ParseError::new(ErrorCode::E0003, "integer literal out of range", err.span)
                    .with_help("values must fit a 64-bit signed integer")
            }
            LexErrorKind::InvalidEscape { escape_char } => ParseError::new(
                ErrorCode::E0004,
                format!("invalid escape sequence `\\{escape_char}`"),
                err.span,
            )
            .with_help(r#"valid escapes are: \", \\, \n, \t"#),
        }
    }

    /// Add label text for the primary span.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a help message.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Convert to a full Diagnostic for rich error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.context.as_deref().unwrap_or("here"));

        for help in &self.help {
            diag = diag.with_note(help);
        }

        diag
    }
}
