//! Consonant and vowel cross products.

use tracing::debug;

use lipi_ir::{has_inherent_a_ending, AcceptCondition, MatchType, Token, TokenCategory};

use crate::session::Evaluator;
use crate::store::TokenStore;

impl<S: TokenStore> Evaluator<'_, S> {
    /// Generate one combined token for every registered consonant and
    /// vowel pair.
    ///
    /// Vowels without a dependent sign (value2) contribute nothing. A
    /// consonant pattern with an inherent trailing a sound drops that
    /// letter before the vowel pattern is appended, so "ka" and "i" form
    /// "ki" rather than "kai".
    pub(crate) fn generate_cv(&mut self) {
        let consonants: Vec<Token> = self
            .registry
            .tokens_of(TokenCategory::Consonant)
            .cloned()
            .collect();
        let vowels: Vec<Token> = self
            .registry
            .tokens_of(TokenCategory::Vowel)
            .cloned()
            .collect();
        debug!(
            consonants = consonants.len(),
            vowels = vowels.len(),
            "generate consonant vowel combinations"
        );

        for consonant in &consonants {
            let elide = has_inherent_a_ending(&consonant.pattern);
            for vowel in &vowels {
                if vowel.value2.is_empty() {
                    continue;
                }

                let mut pattern = consonant.pattern.clone();
                if elide {
                    pattern.pop();
                }
                pattern.push_str(&vowel.pattern);

                let match_type = if consonant.match_type == MatchType::Possibility
                    || vowel.match_type == MatchType::Possibility
                {
                    MatchType::Possibility
                } else {
                    MatchType::Exact
                };

                // The vowel's condition wins unless it is All.
                let accept_condition = if vowel.accept_condition == AcceptCondition::All {
                    consonant.accept_condition
                } else {
                    vowel.accept_condition
                };

                let priority = if vowel.priority < consonant.priority {
                    vowel.priority
                } else {
                    consonant.priority
                };

                self.persist_token(Token {
                    category: TokenCategory::ConsonantVowel,
                    pattern,
                    value1: format!("{}{}", consonant.value1, vowel.value2),
                    value2: String::new(),
                    value3: String::new(),
                    tag: None,
                    match_type,
                    priority,
                    accept_condition,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use lipi_diagnostic::Reporter;
    use lipi_ir::Priority;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn token(category: TokenCategory, pattern: &str, value1: &str, value2: &str) -> Token {
        Token {
            category,
            pattern: pattern.to_owned(),
            value1: value1.to_owned(),
            value2: value2.to_owned(),
            value3: String::new(),
            tag: None,
            match_type: MatchType::Exact,
            priority: Priority::NORMAL,
            accept_condition: AcceptCondition::All,
        }
    }

    fn cv_tokens(consonants: Vec<Token>, vowels: Vec<Token>) -> Vec<Token> {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        for token in consonants.into_iter().chain(vowels) {
            evaluator.persist_token(token);
        }
        evaluator.generate_cv();
        assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());
        store.get_all_tokens(TokenCategory::ConsonantVowel)
    }

    #[test]
    fn test_inherent_a_is_elided() {
        let cv = cv_tokens(
            vec![token(TokenCategory::Consonant, "ka", "ക", "ക")],
            vec![token(TokenCategory::Vowel, "i", "ഇ", "ി")],
        );

        assert_eq!(cv.len(), 1);
        assert_eq!(cv[0].pattern, "ki");
        assert_eq!(cv[0].value1, "കി");
        assert_eq!(cv[0].value2, "");
    }

    #[test]
    fn test_double_a_ending_is_not_elided() {
        let cv = cv_tokens(
            vec![token(TokenCategory::Consonant, "kkaa", "ക്കാ", "")],
            vec![token(TokenCategory::Vowel, "i", "ഇ", "ി")],
        );

        assert_eq!(cv[0].pattern, "kkaai");
    }

    #[test]
    fn test_vowel_without_dependent_sign_is_skipped() {
        let cv = cv_tokens(
            vec![token(TokenCategory::Consonant, "ka", "ക", "")],
            vec![token(TokenCategory::Vowel, "a", "അ", "")],
        );
        assert!(cv.is_empty());
    }

    #[test]
    fn test_lower_priority_wins() {
        let mut consonant = token(TokenCategory::Consonant, "ka", "ക", "");
        consonant.priority = Priority::HIGH;
        let mut vowel = token(TokenCategory::Vowel, "i", "ഇ", "ി");
        vowel.priority = Priority::LOW;

        let cv = cv_tokens(vec![consonant], vec![vowel]);
        assert_eq!(cv[0].priority, Priority::LOW);
    }

    #[test]
    fn test_vowel_accept_condition_wins_over_consonant() {
        let mut consonant = token(TokenCategory::Consonant, "ka", "ക", "");
        consonant.accept_condition = AcceptCondition::StartsWith;
        let mut vowel = token(TokenCategory::Vowel, "i", "ഇ", "ി");
        vowel.accept_condition = AcceptCondition::EndsWith;

        let cv = cv_tokens(vec![consonant], vec![vowel]);
        assert_eq!(cv[0].accept_condition, AcceptCondition::EndsWith);
    }

    #[test]
    fn test_all_vowel_accept_condition_defers_to_consonant() {
        let mut consonant = token(TokenCategory::Consonant, "ka", "ക", "");
        consonant.accept_condition = AcceptCondition::StartsWith;
        let vowel = token(TokenCategory::Vowel, "i", "ഇ", "ി");

        let cv = cv_tokens(vec![consonant], vec![vowel]);
        assert_eq!(cv[0].accept_condition, AcceptCondition::StartsWith);
    }

    #[test]
    fn test_possibility_propagates_from_either_side() {
        let mut consonant = token(TokenCategory::Consonant, "ka", "ക", "");
        consonant.match_type = MatchType::Possibility;
        let vowel = token(TokenCategory::Vowel, "i", "ഇ", "ി");

        let cv = cv_tokens(vec![consonant], vec![vowel]);
        assert_eq!(cv[0].match_type, MatchType::Possibility);
    }

    #[test]
    fn test_earlier_errors_suppress_generation() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);
        evaluator.persist_token(token(TokenCategory::Consonant, "ka", "ക", ""));
        evaluator.persist_token(token(TokenCategory::Vowel, "i", "ഇ", "ി"));
        evaluator.persist_token(token(TokenCategory::Vowel, "i", "ഇ", "ി"));
        evaluator.generate_cv();

        assert!(store.get_all_tokens(TokenCategory::ConsonantVowel).is_empty());
    }

    proptest! {
        #[test]
        fn cross_product_is_complete(n_consonants in 1usize..6, n_vowels in 1usize..6) {
            let consonants: Vec<Token> = (0..n_consonants)
                .map(|i| token(TokenCategory::Consonant, &format!("c{i}b"), &format!("C{i}"), ""))
                .collect();
            let vowels: Vec<Token> = (0..n_vowels)
                .map(|j| token(TokenCategory::Vowel, &format!("v{j}"), &format!("V{j}"), &format!("W{j}")))
                .collect();

            let cv = cv_tokens(consonants, vowels);
            prop_assert_eq!(cv.len(), n_consonants * n_vowels);
            for entry in &cv {
                prop_assert!(entry.pattern.starts_with('c'));
                prop_assert_eq!(entry.category, TokenCategory::ConsonantVowel);
            }
        }
    }
}
