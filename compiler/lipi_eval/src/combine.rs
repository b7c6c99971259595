//! Template combination over token queries and custom lists.
//!
//! A combine expression takes a set of already created tokens and a
//! template mapping. Each token is substituted into every template pair,
//! the substituted patterns are grouped by their substituted value, and
//! the grouped result comes back as an ordinary mapping ready for
//! expansion.

use indexmap::IndexMap;
use tracing::debug;

use lipi_diagnostic::{Diagnostic, ErrorCode, Fatal};
use lipi_ir::{
    CombineExpr, CombineSource, Mapping, MatchType, QueryKind, Span, Token, TokenCategory, Value,
    CHIL_TAG,
};

use crate::session::Evaluator;
use crate::store::TokenStore;

impl<S: TokenStore> Evaluator<'_, S> {
    /// Resolve a combine expression into an expandable mapping.
    ///
    /// Returns `None` for an unknown list name; a soft error is recorded
    /// and the statement is skipped. An empty template, or querying the
    /// virama before one is declared, is author error and aborts the run.
    pub(crate) fn resolve_combine(&mut self, expr: &CombineExpr) -> Result<Option<Mapping>, Fatal> {
        self.validate(&expr.template);
        if expr.template.is_empty() {
            return Err(Fatal::new(
                Diagnostic::error(ErrorCode::E4003)
                    .with_message("combine template is empty")
                    .with_label(expr.span, "add at least one pattern => value pair"),
            ));
        }
        let Some(tokens) = self.resolve_source(&expr.source)? else {
            return Ok(None);
        };
        Ok(Some(combine_tokens(&tokens, &expr.template)))
    }

    fn resolve_source(&mut self, source: &CombineSource) -> Result<Option<Vec<Token>>, Fatal> {
        match source {
            CombineSource::Query {
                kind,
                criteria,
                span,
            } => Ok(Some(self.resolve_query(*kind, *criteria, *span)?)),
            CombineSource::ListName { name, .. } => {
                let Some(ids) = self.lists.get(name) else {
                    self.reporter
                        .error(ErrorCode::E4005, format!("`{name}` is not a defined list"));
                    return Ok(None);
                };
                Ok(Some(
                    ids.iter()
                        .filter_map(|id| self.registry.get(*id))
                        .cloned()
                        .collect(),
                ))
            }
        }
    }

    fn resolve_query(
        &mut self,
        kind: QueryKind,
        criteria: Option<MatchType>,
        span: Span,
    ) -> Result<Vec<Token>, Fatal> {
        let category = match kind {
            QueryKind::Vowels => TokenCategory::Vowel,
            QueryKind::Consonants => TokenCategory::Consonant,
            QueryKind::ConsonantVowelCombinations => TokenCategory::ConsonantVowel,
            QueryKind::Anusvara => TokenCategory::Anusvara,
            QueryKind::Visarga => TokenCategory::Visarga,
            QueryKind::Symbols => TokenCategory::Symbol,
            QueryKind::Numbers => TokenCategory::Number,
            // Chill consonants are exact matches carrying the chill tag.
            // Criteria do not apply.
            QueryKind::Chill => {
                return Ok(self
                    .registry
                    .tokens_of(TokenCategory::Consonant)
                    .filter(|token| token.match_type == MatchType::Exact)
                    .filter(|token| token.tag.as_deref() == Some(CHIL_TAG))
                    .cloned()
                    .collect());
            }
            QueryKind::Virama => {
                if self.registry.ids_of(TokenCategory::Virama).is_empty() {
                    return Err(Fatal::new(
                        Diagnostic::error(ErrorCode::E4004)
                            .with_message("Virama is not set")
                            .with_label(span, "declare a virama before this statement"),
                    ));
                }
                TokenCategory::Virama
            }
            QueryKind::DeadConsonants => {
                self.import_dead_consonants();
                TokenCategory::DeadConsonant
            }
        };
        let tokens = self.registry.tokens_of(category);
        Ok(match criteria {
            None => tokens.cloned().collect(),
            Some(wanted) => tokens
                .filter(|token| token.match_type == wanted)
                .cloned()
                .collect(),
        })
    }

    /// Pull store-derived dead consonants into the registry.
    ///
    /// The store infers these as a side effect of consonant creation, so
    /// the registry only learns about them on demand. Each call appends
    /// the store's current view again.
    fn import_dead_consonants(&mut self) {
        let derived = self.store.get_all_tokens(TokenCategory::DeadConsonant);
        debug!(count = derived.len(), "import derived dead consonants");
        for token in derived {
            self.registry.insert(token);
        }
    }
}

/// Substitute every token into every template pair, grouping the
/// substituted patterns by their substituted value.
fn combine_tokens(tokens: &[Token], template: &Mapping) -> Mapping {
    let mut grouped: IndexMap<Value, Vec<Value>> = IndexMap::new();
    for token in tokens {
        for (key, value) in template {
            let pattern = substitute_pattern(key, token);
            let value = substitute_value(value, token);
            grouped.entry(value).or_default().push(pattern);
        }
    }
    Mapping::from_pairs(
        grouped
            .into_iter()
            .map(|(value, patterns)| (Value::Group(patterns), value))
            .collect(),
    )
}

/// Replace `*` with the token's pattern throughout a pattern template.
///
/// Possibility tokens get each substituted scalar wrapped in a
/// one-element group so the possibility survives expansion.
fn substitute_pattern(template: &Value, token: &Token) -> Value {
    match template {
        Value::Group(items) => Value::Group(
            items
                .iter()
                .map(|item| substitute_pattern(item, token))
                .collect(),
        ),
        leaf => {
            let text = leaf
                .scalar_text()
                .unwrap_or_default()
                .replace('*', &token.pattern);
            let substituted = Value::Str(text);
            if token.match_type == MatchType::Possibility {
                Value::Group(vec![substituted])
            } else {
                substituted
            }
        }
    }
}

/// Replace `*1`, `*2`, `*3` with the token's value slots.
///
/// Placeholders for empty slots stay untouched.
fn substitute_value(template: &Value, token: &Token) -> Value {
    match template {
        Value::Group(items) => Value::Group(
            items
                .iter()
                .map(|item| substitute_value(item, token))
                .collect(),
        ),
        leaf => {
            let mut text = leaf
                .scalar_text()
                .unwrap_or_default()
                .replace("*1", &token.value1);
            if !token.value2.is_empty() {
                text = text.replace("*2", &token.value2);
            }
            if !token.value3.is_empty() {
                text = text.replace("*3", &token.value3);
            }
            Value::Str(text)
        }
    }
}
