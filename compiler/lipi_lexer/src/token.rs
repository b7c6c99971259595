//! Syntax tokens produced by the lexer.

use std::fmt;

use lipi_ir::Span;

/// Kind of a lexed token.
///
/// Statement keywords (`vowels`, `tag`, `combine`, ...) lex as [`Ident`];
/// the parser resolves them so unknown statements get a proper diagnostic
/// carrying the name. Only the boolean literals are keywords.
///
/// [`Ident`]: TokenKind::Ident
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Identifier or statement keyword.
    Ident(String),
    /// String literal with escapes resolved.
    Str(String),
    /// Integer literal.
    Int(i64),

    True,
    False,

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    FatArrow,

    /// A span the lexer could not tokenize.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Short human name used in diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Str(_) => "string",
            TokenKind::Int(_) => "integer",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::FatArrow => "=>",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "`{name}`"),
            _ => write!(f, "{}", self.display_name()),
        }
    }
}

/// One lexed token with its source location.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexedToken {
    pub kind: TokenKind,
    pub span: Span,
}

impl LexedToken {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        LexedToken { kind, span }
    }
}

/// A list of lexed tokens.
///
/// Wraps `Vec<LexedToken>`; the parser walks it by index with a cursor.
/// The last token is always [`TokenKind::Eof`].
#[derive(Clone, Default, Eq, PartialEq)]
pub struct TokenList {
    tokens: Vec<LexedToken>,
}

impl TokenList {
    /// Create a new empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Create a new token list with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Push a token.
    #[inline]
    pub fn push(&mut self, token: LexedToken) {
        self.tokens.push(token);
    }

    /// Get the number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get token at index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&LexedToken> {
        self.tokens.get(index)
    }

    /// Get a slice of all tokens.
    #[inline]
    pub fn as_slice(&self) -> &[LexedToken] {
        &self.tokens
    }

    /// Iterate over tokens.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &LexedToken> {
        self.tokens.iter()
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenList({} tokens)", self.tokens.len())
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = LexedToken;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a LexedToken;
    type IntoIter = std::slice::Iter<'a, LexedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
