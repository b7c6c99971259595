//! Raw token definition.
//!
//! The `RawToken` enum is the logos-derived tokenizer output before escape
//! cooking and final token conversion.

use logos::Logos;

/// Raw token from logos (before cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // The grammar is free-form; newlines are blank
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*")]
    LineComment,

    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=>")]
    FatArrow,

    // Integer, possibly negative. The DSL has no arithmetic, so `-` only
    // ever appears as a sign.
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    // String literal (no unescaped newlines allowed)
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,

    // An opening `"` whose closing quote never arrives on the same line.
    // Matches strictly shorter input than `String`, so closed literals
    // always win on longest-match.
    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    UnterminatedString,

    // Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}
