//! Lexer for scheme sources using logos.
//!
//! Produces a [`TokenList`] plus any [`LexError`]s found while scanning.
//! Errors do not stop the lexer: an untokenizable span becomes a
//! [`TokenKind::Error`] token so the parser can recover at the next
//! statement boundary.

mod cook_escape;
mod lex_error;
mod raw_token;
mod token;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{LexedToken, TokenKind, TokenList};

use lipi_ir::Span;
use logos::Logos;

use crate::raw_token::RawToken;

/// Everything the lexer produced for one source file.
#[derive(Clone, Debug)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

/// Lex a scheme source into tokens.
///
/// The returned list always ends with an [`TokenKind::Eof`] token.
pub fn lex(source: &str) -> LexOutput {
    let mut tokens = TokenList::new();
    let mut errors = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(raw) => match raw {
                RawToken::LineComment => {}
                RawToken::UnterminatedString => {
                    errors.push(LexError::unterminated_string(span));
                    tokens.push(LexedToken::new(TokenKind::Error, span));
                }
                _ => {
                    let kind = convert_token(raw, slice, span, &mut errors);
                    tokens.push(LexedToken::new(kind, span));
                }
            },
            Err(()) => {
                errors.push(classify_error(slice, span));
                tokens.push(LexedToken::new(TokenKind::Error, span));
            }
        }
    }

    let eof_pos = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX));
    tokens.push(LexedToken::new(TokenKind::Eof, Span::point(eof_pos)));

    LexOutput { tokens, errors }
}

/// Convert a raw token to a `TokenKind`, cooking string escapes.
fn convert_token(
    raw: RawToken,
    slice: &str,
    span: Span,
    errors: &mut Vec<LexError>,
) -> TokenKind {
    match raw {
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            match cook_escape::unescape_string(content, span.start + 1, errors) {
                Some(cooked) => TokenKind::Str(cooked),
                None => TokenKind::Str(content.to_string()),
            }
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::FatArrow => TokenKind::FatArrow,

        // Handled in lex() before conversion
        RawToken::LineComment | RawToken::UnterminatedString => {
            unreachable!("trivia and unterminated strings are handled in lex")
        }
    }
}

/// Classify an untokenizable slice.
///
/// logos reports errors as bare spans; the slice text tells overflowed
/// numbers apart from stray characters.
fn classify_error(slice: &str, span: Span) -> LexError {
    if !slice.is_empty() && slice.chars().any(|c| c.is_ascii_digit()) {
        LexError::invalid_number(span)
    } else {
        let found = slice.chars().next().unwrap_or('\0');
        LexError::invalid_character(span, found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_basic() {
        let out = lex("stable true");

        assert_eq!(out.tokens.len(), 3); // stable, true, EOF
        assert!(matches!(out.tokens[0].kind, TokenKind::Ident(_)));
        assert!(matches!(out.tokens[1].kind, TokenKind::True));
        assert!(matches!(out.tokens[2].kind, TokenKind::Eof));
        assert!(out.errors.is_empty());
    }

    #[test]
    fn test_lex_invalid_escape_in_value() {
        let out = lex(r#"vowels { "a" => "\q" }"#);

        assert_eq!(out.errors.len(), 1);
        assert!(matches!(
            out.errors[0].kind,
            LexErrorKind::InvalidEscape { escape_char: 'q' }
        ));
        // the token survives with a replacement character
        assert!(matches!(out.tokens[4].kind, TokenKind::Str(_)));
    }

    #[test]
    fn test_lex_mapping_tokens() {
        let out = lex(r#"vowels { "a" => "അ" }"#);

        assert!(matches!(out.tokens[0].kind, TokenKind::Ident(_)));
        assert!(matches!(out.tokens[1].kind, TokenKind::LBrace));
        assert!(matches!(out.tokens[2].kind, TokenKind::Str(_)));
        assert!(matches!(out.tokens[3].kind, TokenKind::FatArrow));
        assert!(matches!(out.tokens[4].kind, TokenKind::Str(_)));
        assert!(matches!(out.tokens[5].kind, TokenKind::RBrace));
        assert!(matches!(out.tokens[6].kind, TokenKind::Eof));
        assert!(out.errors.is_empty());
    }

    #[test]
    fn test_lex_string_escapes() {
        let out = lex(r#""hello\nworld""#);

        match &out.tokens[0].kind {
            TokenKind::Str(s) => assert_eq!(s, "hello\nworld"),
            other => panic!("expected string token, got {other:?}"),
        }
    }

    #[test]
    fn test_lex_options() {
        let out = lex("consonants(priority: high, accept_if: starts_with)");

        assert!(matches!(out.tokens[0].kind, TokenKind::Ident(_)));
        assert!(matches!(out.tokens[1].kind, TokenKind::LParen));
        assert!(matches!(out.tokens[2].kind, TokenKind::Ident(_)));
        assert!(matches!(out.tokens[3].kind, TokenKind::Colon));
        assert!(matches!(out.tokens[4].kind, TokenKind::Ident(_)));
        assert!(matches!(out.tokens[5].kind, TokenKind::Comma));
    }

    #[test]
    fn test_lex_negative_int() {
        let out = lex("priority: -1");

        assert!(matches!(out.tokens[2].kind, TokenKind::Int(-1)));
        assert!(out.errors.is_empty());
    }

    #[test]
    fn test_lex_int_overflow() {
        let out = lex("99999999999999999999");

        assert!(matches!(out.tokens[0].kind, TokenKind::Error));
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].kind, LexErrorKind::InvalidNumber);
    }

    #[test]
    fn test_lex_comment_is_skipped() {
        let out = lex("# scheme metadata\nstable false");

        assert_eq!(out.tokens.len(), 3); // stable, false, EOF
        assert!(matches!(out.tokens[1].kind, TokenKind::False));
    }

    #[test]
    fn test_lex_unterminated_string() {
        let out = lex("\"abc");

        assert!(matches!(out.tokens[0].kind, TokenKind::Error));
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].kind, LexErrorKind::UnterminatedString);
        assert_eq!(out.errors[0].span, Span::new(0, 4));
    }

    #[test]
    fn test_lex_escaped_closing_quote_is_unterminated() {
        let out = lex(r#""abc\" more"#);
        // the backslash escapes what looked like the closing quote
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].kind, LexErrorKind::UnterminatedString);
        assert_eq!(out.errors[0].span, Span::new(0, 11));
    }

    #[test]
    fn test_lex_invalid_character() {
        let out = lex("vowels $ {}");

        assert!(matches!(out.tokens[1].kind, TokenKind::Error));
        assert_eq!(out.errors.len(), 1);
        assert_eq!(
            out.errors[0].kind,
            LexErrorKind::InvalidCharacter { found: '$' }
        );
    }

    #[test]
    fn test_lex_empty_source() {
        let out = lex("");

        assert_eq!(out.tokens.len(), 1);
        assert!(matches!(out.tokens[0].kind, TokenKind::Eof));
        assert_eq!(out.tokens[0].span, Span::point(0));
    }

    #[test]
    fn test_lex_spans_are_byte_offsets() {
        let out = lex(r#"tag "chill""#);

        assert_eq!(out.tokens[0].span, Span::new(0, 3));
        assert_eq!(out.tokens[1].span, Span::new(4, 11));
    }

    #[test]
    fn test_keywords_inside_identifiers_stay_identifiers() {
        let out = lex("truely falsey");

        assert!(matches!(out.tokens[0].kind, TokenKind::Ident(_)));
        assert!(matches!(out.tokens[1].kind, TokenKind::Ident(_)));
    }
}
