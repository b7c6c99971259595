//! Expansion of mappings into individual tokens.
//!
//! A mapping pair produces one token per pattern leaf. Scalar keys match
//! exactly; group keys are flattened and every leaf becomes a possibility
//! pattern sharing the same values. Value groups fill the three value
//! slots in order, extra elements are dropped.

use lipi_diagnostic::ErrorCode;
use lipi_ir::{Mapping, MatchType, Token, TokenCategory, TokenOptions, Value};

use crate::session::Evaluator;
use crate::store::TokenStore;

impl<S: TokenStore> Evaluator<'_, S> {
    pub(crate) fn create_tokens(
        &mut self,
        mapping: &Mapping,
        category: TokenCategory,
        options: TokenOptions,
    ) {
        if self.reporter.has_errors() {
            return;
        }
        for (key, value) in mapping {
            let match_type = if key.is_group() {
                MatchType::Possibility
            } else {
                MatchType::Exact
            };
            let (value1, value2, value3) = split_values(value);
            for leaf in key.leaves() {
                let Some(pattern) = leaf.scalar_text() else {
                    continue;
                };
                self.persist_token(Token {
                    category,
                    pattern,
                    value1: value1.clone(),
                    value2: value2.clone(),
                    value3: value3.clone(),
                    tag: None,
                    match_type,
                    priority: options.priority,
                    accept_condition: options.accept_condition,
                });
            }
        }
    }

    /// The single funnel every token passes through.
    ///
    /// Stamps the active tag, hands the token to the store, and on
    /// acceptance registers it for queries and active lists. Earlier
    /// errors suppress persistence so a broken scheme stops producing
    /// tokens while later statements still get checked.
    pub(crate) fn persist_token(&mut self, mut token: Token) {
        if self.reporter.has_errors() {
            return;
        }
        token.tag = self.reporter.current_tag().map(ToOwned::to_owned);
        if let Err(err) = self.store.create_token(&token) {
            self.reporter.error(ErrorCode::E3001, err.message());
            return;
        }
        let id = self.registry.insert(token);
        self.lists.record(id);
    }
}

/// First three value leaves, in order. Missing slots stay empty.
fn split_values(value: &Value) -> (String, String, String) {
    let leaves = value.leaves();
    let slot = |index: usize| {
        leaves
            .get(index)
            .and_then(|leaf| leaf.scalar_text())
            .unwrap_or_default()
    };
    (slot(0), slot(1), slot(2))
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use super::*;
    use crate::store::MemoryStore;
    use lipi_diagnostic::Reporter;
    use pretty_assertions::assert_eq;

    fn pairs(pairs: Vec<(Value, Value)>) -> Mapping {
        Mapping::from_pairs(pairs)
    }

    #[test]
    fn test_scalar_key_is_an_exact_match() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(Value::from("a"), Value::from("അ"))]);
        evaluator.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());

        let vowels = store.get_all_tokens(TokenCategory::Vowel);
        assert_eq!(vowels.len(), 1);
        assert_eq!(vowels[0].pattern, "a");
        assert_eq!(vowels[0].value1, "അ");
        assert_eq!(vowels[0].match_type, MatchType::Exact);
    }

    #[test]
    fn test_group_key_leaves_are_possibilities() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(
            Value::Group(vec![
                Value::from("aa"),
                Value::Group(vec![Value::from("A")]),
            ]),
            Value::from("ആ"),
        )]);
        evaluator.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());

        let vowels = store.get_all_tokens(TokenCategory::Vowel);
        assert_eq!(vowels.len(), 2);
        assert_eq!(vowels[0].pattern, "aa");
        assert_eq!(vowels[1].pattern, "A");
        assert!(vowels
            .iter()
            .all(|t| t.match_type == MatchType::Possibility));
    }

    #[test]
    fn test_value_group_fills_three_slots() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(
            Value::from("a"),
            Value::Group(vec![
                Value::from("അ"),
                Value::from("ا"),
                Value::from("अ"),
                Value::from("dropped"),
            ]),
        )]);
        evaluator.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());

        let vowels = store.get_all_tokens(TokenCategory::Vowel);
        assert_eq!(vowels[0].value1, "അ");
        assert_eq!(vowels[0].value2, "ا");
        assert_eq!(vowels[0].value3, "अ");
    }

    #[test]
    fn test_scalar_value_leaves_later_slots_empty() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(Value::from("a"), Value::from("അ"))]);
        evaluator.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());

        let vowels = store.get_all_tokens(TokenCategory::Vowel);
        assert_eq!(vowels[0].value2, "");
        assert_eq!(vowels[0].value3, "");
    }

    #[test]
    fn test_numeric_keys_become_decimal_patterns() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(Value::from(1), Value::from("൧"))]);
        evaluator.create_tokens(&mapping, TokenCategory::Number, TokenOptions::default());

        let numbers = store.get_all_tokens(TokenCategory::Number);
        assert_eq!(numbers[0].pattern, "1");
    }

    #[test]
    fn test_active_tag_is_stamped() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        reporter.set_tag("chill");
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(Value::from("nj"), Value::from("ഞ"))]);
        evaluator.create_tokens(&mapping, TokenCategory::Consonant, TokenOptions::default());

        let consonants = store.get_all_tokens(TokenCategory::Consonant);
        assert_eq!(consonants[0].tag.as_deref(), Some("chill"));
    }

    #[test]
    fn test_store_rejection_is_reported_and_not_registered() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(Value::from("a"), Value::from("അ"))]);
        evaluator.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());
        assert_eq!(evaluator.registry().len(), 1);

        evaluator.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());
        assert_eq!(reporter.diagnostics()[0].code, ErrorCode::E3001);
        assert_eq!(store.get_all_tokens(TokenCategory::Vowel).len(), 1);
    }

    #[test]
    fn test_rejected_token_skips_active_lists() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(Value::from("a"), Value::from("അ"))]);
        evaluator.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());

        {
            let mut scope = evaluator.recording_scope(&["dups".to_owned()]);
            scope.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());
        }
        assert_eq!(evaluator.lists().get("dups").map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_earlier_errors_suppress_expansion() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        reporter.error(ErrorCode::E2001, "Empty values are not allowed");
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let mapping = pairs(vec![(Value::from("a"), Value::from("അ"))]);
        evaluator.create_tokens(&mapping, TokenCategory::Vowel, TokenOptions::default());

        assert!(evaluator.registry().is_empty());
        assert!(store.get_all_tokens(TokenCategory::Vowel).is_empty());
    }

    #[test]
    fn test_options_carry_through() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        let options = TokenOptions {
            priority: lipi_ir::Priority::HIGH,
            accept_condition: lipi_ir::AcceptCondition::StartsWith,
        };
        let mapping = pairs(vec![(Value::from("a"), Value::from("അ"))]);
        evaluator.create_tokens(&mapping, TokenCategory::Vowel, options);

        let vowels = store.get_all_tokens(TokenCategory::Vowel);
        assert_eq!(vowels[0].priority, lipi_ir::Priority::HIGH);
        assert_eq!(
            vowels[0].accept_condition,
            lipi_ir::AcceptCondition::StartsWith
        );
    }
}
