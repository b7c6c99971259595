//! Core data model for the Lipi scheme compiler.
//!
//! A scheme is a declarative script mapping phonetic patterns to script
//! output. This crate holds everything the rest of the compiler agrees on:
//! source spans, token records and their metadata enums, the tagged mapping
//! value type, the statement AST, and scheme details.

mod ast;
mod scheme;
mod span;
mod token;
mod value;

pub use ast::{CategoryArg, CombineExpr, CombineSource, QueryKind, Stmt, TokenOptions};
pub use scheme::SchemeDetails;
pub use span::{Span, SpanError};
pub use token::{
    has_inherent_a_ending, AcceptCondition, MatchType, Priority, Token, TokenCategory, TokenId,
};
pub use value::{expression, Mapping, Value};

/// Zero-width non-joiner, the forced value of `non_joiner` tokens.
pub const ZWNJ: &str = "\u{200c}";

/// Zero-width joiner, the forced value of `joiner` tokens.
pub const ZWJ: &str = "\u{200d}";

/// Tag marking chillu consonants, consumed by the `get_chill` query.
pub const CHIL_TAG: &str = "chill";
