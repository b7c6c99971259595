//! Statement AST for scheme sources.
//!
//! The parser resolves declaration options (`priority:`, `accept_if:`) to
//! typed values while building these nodes, so the evaluator never re-checks
//! option spellings.

use crate::{Mapping, MatchType, Priority, Span, TokenCategory, Value};
use crate::token::AcceptCondition;

/// Resolved options of a token-category declaration.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenOptions {
    pub priority: Priority,
    pub accept_condition: AcceptCondition,
}

/// Read-only token queries usable as a `combine` source.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum QueryKind {
    Vowels,
    Consonants,
    ConsonantVowelCombinations,
    Anusvara,
    Visarga,
    Virama,
    Symbols,
    Numbers,
    Chill,
    DeadConsonants,
}

impl QueryKind {
    /// The query's surface name.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Vowels => "get_vowels",
            QueryKind::Consonants => "get_consonants",
            QueryKind::ConsonantVowelCombinations => "get_consonant_vowel_combinations",
            QueryKind::Anusvara => "get_anusvara",
            QueryKind::Visarga => "get_visarga",
            QueryKind::Virama => "get_virama",
            QueryKind::Symbols => "get_symbols",
            QueryKind::Numbers => "get_numbers",
            QueryKind::Chill => "get_chill",
            QueryKind::DeadConsonants => "get_dead_consonants",
        }
    }
}

/// The token sequence a `combine` draws from.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CombineSource {
    /// A built-in query, optionally narrowed to one match type.
    Query {
        kind: QueryKind,
        criteria: Option<MatchType>,
        span: Span,
    },
    /// A custom list, looked up by name in the list registry.
    ListName { name: String, span: Span },
}

impl CombineSource {
    pub fn span(&self) -> Span {
        match self {
            CombineSource::Query { span, .. } | CombineSource::ListName { span, .. } => *span,
        }
    }
}

/// A `combine(source, template)` expression.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CombineExpr {
    pub source: CombineSource,
    pub template: Mapping,
    pub span: Span,
}

/// Argument of a token-category declaration.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CategoryArg {
    /// A literal mapping of pattern(s) to value(s).
    Mapping(Mapping),
    /// A combine expression producing the mapping.
    Combine(CombineExpr),
    /// A single scalar; only `period` takes this form.
    Scalar(Value),
}

/// One scheme statement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Stmt {
    LanguageCode { value: String, span: Span },
    Identifier { value: String, span: Span },
    DisplayName { value: String, span: Span },
    Author { value: String, span: Span },
    Stable { value: bool, span: Span },
    InferDeadConsonants { value: bool, span: Span },
    IgnoreDuplicates { value: bool, span: Span },
    Category {
        category: TokenCategory,
        options: TokenOptions,
        arg: CategoryArg,
        span: Span,
    },
    Tag {
        name: String,
        body: Vec<Stmt>,
        span: Span,
    },
    List {
        names: Vec<String>,
        body: Vec<Stmt>,
        span: Span,
    },
    GenerateCv { span: Span },
    StemRules { mapping: Mapping, span: Span },
    StemExceptions { mapping: Mapping, span: Span },
}

impl Stmt {
    /// Source span of the whole statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::LanguageCode { span, .. }
            | Stmt::Identifier { span, .. }
            | Stmt::DisplayName { span, .. }
            | Stmt::Author { span, .. }
            | Stmt::Stable { span, .. }
            | Stmt::InferDeadConsonants { span, .. }
            | Stmt::IgnoreDuplicates { span, .. }
            | Stmt::Category { span, .. }
            | Stmt::Tag { span, .. }
            | Stmt::List { span, .. }
            | Stmt::GenerateCv { span }
            | Stmt::StemRules { span, .. }
            | Stmt::StemExceptions { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TokenOptions::default();
        assert_eq!(options.priority, Priority::NORMAL);
        assert_eq!(options.accept_condition, AcceptCondition::All);
    }

    #[test]
    fn test_stmt_span() {
        let stmt = Stmt::GenerateCv {
            span: Span::new(5, 16),
        };
        assert_eq!(stmt.span(), Span::new(5, 16));

        let stmt = Stmt::Tag {
            name: "chill".to_string(),
            body: Vec::new(),
            span: Span::new(0, 20),
        };
        assert_eq!(stmt.span(), Span::new(0, 20));
    }

    #[test]
    fn test_query_names() {
        assert_eq!(QueryKind::Chill.as_str(), "get_chill");
        assert_eq!(
            QueryKind::ConsonantVowelCombinations.as_str(),
            "get_consonant_vowel_combinations"
        );
    }
}
