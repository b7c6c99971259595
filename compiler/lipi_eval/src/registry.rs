//! The in-memory registry of tokens created during a run.
//!
//! The registry is what queries and the consonant-vowel generator read;
//! the store is what persists. The two can disagree deliberately: the
//! store rewrites joiner values and reclassifies inferred dead
//! consonants, while the registry keeps tokens as the scheme declared
//! them.

use rustc_hash::FxHashMap;

use lipi_ir::{Token, TokenCategory, TokenId};

/// Tokens created so far, indexed by category.
#[derive(Default, Debug)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
    by_category: FxHashMap<TokenCategory, Vec<TokenId>>,
}

impl TokenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        TokenRegistry::default()
    }

    /// Add a token, returning its id.
    pub fn insert(&mut self, token: Token) -> TokenId {
        let id = TokenId::new(self.tokens.len());
        self.by_category.entry(token.category).or_default().push(id);
        self.tokens.push(token);
        id
    }

    /// Look up a token by id.
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    /// Ids of every token in a category, in creation order.
    pub fn ids_of(&self, category: TokenCategory) -> &[TokenId] {
        self.by_category
            .get(&category)
            .map_or(&[], Vec::as_slice)
    }

    /// Tokens of a category, in creation order.
    pub fn tokens_of(&self, category: TokenCategory) -> impl Iterator<Item = &Token> + '_ {
        self.ids_of(category)
            .iter()
            .filter_map(|id| self.tokens.get(id.index()))
    }

    /// Total number of registered tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipi_ir::{AcceptCondition, MatchType, Priority};
    use pretty_assertions::assert_eq;

    fn token(category: TokenCategory, pattern: &str) -> Token {
        Token {
            category,
            pattern: pattern.to_string(),
            value1: pattern.to_uppercase(),
            value2: String::new(),
            value3: String::new(),
            tag: None,
            match_type: MatchType::Exact,
            priority: Priority::NORMAL,
            accept_condition: AcceptCondition::All,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = TokenRegistry::new();
        let id = registry.insert(token(TokenCategory::Vowel, "a"));

        assert_eq!(registry.get(id).map(|t| t.pattern.as_str()), Some("a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_category_order_preserved() {
        let mut registry = TokenRegistry::new();
        registry.insert(token(TokenCategory::Consonant, "k"));
        registry.insert(token(TokenCategory::Vowel, "a"));
        registry.insert(token(TokenCategory::Consonant, "g"));

        let consonants: Vec<&str> = registry
            .tokens_of(TokenCategory::Consonant)
            .map(|t| t.pattern.as_str())
            .collect();
        assert_eq!(consonants, vec!["k", "g"]);
        assert!(registry.ids_of(TokenCategory::Number).is_empty());
    }
}
