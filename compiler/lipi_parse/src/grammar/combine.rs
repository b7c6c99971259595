//! `combine(source, template)` grammar.
//!
//! The source is either a built-in token query (optionally narrowed by a
//! match criteria) or the name of a custom list. Query names are resolved
//! here; list names are looked up by the evaluator, which knows what lists
//! the scheme has declared so far.

use lipi_diagnostic::ErrorCode;
use lipi_ir::{CombineExpr, CombineSource, MatchType, QueryKind};
use lipi_lexer::TokenKind;
use tracing::trace;

use crate::error::ParseError;
use crate::Parser;

/// Resolve a query name to its kind.
fn query_keyword(name: &str) -> Option<QueryKind> {
    match name {
        "get_vowels" => Some(QueryKind::Vowels),
        "get_consonants" => Some(QueryKind::Consonants),
        "get_consonant_vowel_combinations" => Some(QueryKind::ConsonantVowelCombinations),
        "get_anusvara" => Some(QueryKind::Anusvara),
        "get_visarga" => Some(QueryKind::Visarga),
        "get_virama" => Some(QueryKind::Virama),
        "get_symbols" => Some(QueryKind::Symbols),
        "get_numbers" => Some(QueryKind::Numbers),
        "get_chill" => Some(QueryKind::Chill),
        "get_dead_consonants" => Some(QueryKind::DeadConsonants),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parse `combine ( source , { template } )`.
    ///
    /// The cursor sits on the `combine` keyword, checked by the caller.
    pub(crate) fn parse_combine(&mut self) -> Result<CombineExpr, ParseError> {
        let kw_span = self.current_span();
        self.advance();

        self.expect(&TokenKind::LParen)?;
        let source = self.parse_combine_source()?;
        self.expect(&TokenKind::Comma)?;
        let template = self.parse_mapping()?;
        self.expect(&TokenKind::RParen)?;

        let span = kw_span.merge(self.previous_span());
        trace!(source = ?source, "parse_combine");
        Ok(CombineExpr {
            source,
            template,
            span,
        })
    }

    /// Parse a combine source: `get_*` query or custom list name.
    ///
    /// Anything spelled `get_*` must be a known query. Other identifiers
    /// pass through as list names for the evaluator to resolve.
    fn parse_combine_source(&mut self) -> Result<CombineSource, ParseError> {
        let (name, span) = self.expect_ident()?;

        if let Some(kind) = query_keyword(&name) {
            let (criteria, span) = if self.check(&TokenKind::LParen) {
                let criteria = self.parse_criteria()?;
                (criteria, span.merge(self.previous_span()))
            } else {
                (None, span)
            };
            return Ok(CombineSource::Query {
                kind,
                criteria,
                span,
            });
        }

        if name.starts_with("get_") {
            return Err(ParseError::new(
                ErrorCode::E1009,
                format!("`{name}` is not a known token query"),
                span,
            )
            .with_context("unknown query"));
        }

        Ok(CombineSource::ListName { name, span })
    }

    /// Parse `( criteria? )` after a query name.
    fn parse_criteria(&mut self) -> Result<Option<MatchType>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        if self.check(&TokenKind::RParen) {
            self.advance();
            return Ok(None);
        }

        let (name, span) = self.expect_ident()?;
        let criteria = match name.as_str() {
            "exact" => MatchType::Exact,
            "possibility" => MatchType::Possibility,
            _ => {
                return Err(ParseError::new(
                    ErrorCode::E1001,
                    format!("`{name}` is not a valid match criteria"),
                    span,
                )
                .with_help("use `exact` or `possibility`"));
            }
        };
        self.expect(&TokenKind::RParen)?;
        Ok(Some(criteria))
    }
}
