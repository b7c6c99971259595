//! The token store interface and the in-memory symbol table behind it.
//!
//! The evaluator talks to persistence exclusively through [`TokenStore`].
//! [`SymbolTable`] carries the semantics every store shares: field
//! validation, duplicate detection, joiner defaults, and dead-consonant
//! inference. [`MemoryStore`] wraps a table with a no-op flush for tests
//! and for dry-run checks; the file-backed store adds serialization on
//! top of the same table.

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::debug;

use lipi_ir::{
    has_inherent_a_ending, AcceptCondition, MatchType, SchemeDetails, Token, TokenCategory, ZWJ,
    ZWNJ,
};

/// Longest pattern, value, or tag a store accepts, in characters.
pub const SYMBOL_MAX: usize = 30;

/// A store rejection, carrying the message the store produced.
///
/// Rejections are data errors in the scheme being compiled, not I/O
/// failures; the evaluator records them as soft diagnostics and drops
/// the offending token.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Create a rejection with the given message.
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        StoreError {
            message: message.into(),
        }
    }

    /// The rejection message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

/// Persistence interface the evaluator drives.
///
/// One implementation writes the compiled symbol table to disk; the
/// [`MemoryStore`] implementation keeps everything in memory.
pub trait TokenStore {
    /// Persist one token. Rejections carry the reason as the error message.
    fn create_token(&mut self, token: &Token) -> Result<(), StoreError>;

    /// All persisted tokens of a category, including ones the store derived
    /// itself (inferred dead consonants).
    fn get_all_tokens(&self, category: TokenCategory) -> Vec<Token>;

    /// Write out buffered state.
    fn flush(&mut self) -> Result<(), StoreError>;

    /// Record the scheme metadata block.
    fn set_scheme_metadata(&mut self, details: &SchemeDetails) -> Result<(), StoreError>;

    /// Record a stemming rule.
    fn create_stem_rule(&mut self, old_ending: &str, new_ending: &str) -> Result<(), StoreError>;

    /// Record a stemming exception.
    fn create_stem_exception(&mut self, word: &str, stem: &str) -> Result<(), StoreError>;

    /// Enable or disable dead-consonant inference for subsequent inserts.
    fn set_infer_dead_consonants(&mut self, infer: bool);

    /// Enable or disable silent skipping of duplicate tokens.
    fn set_ignore_duplicates(&mut self, ignore: bool);
}

/// In-memory symbol table with the full store semantics.
///
/// Duplicate detection uses two indexes: exact tokens collide on
/// (pattern, accept condition) against other exact tokens; possibility
/// tokens collide on (pattern, value1, accept condition) against any
/// token.
#[derive(Default, Debug)]
pub struct SymbolTable {
    tokens: Vec<Token>,
    stem_rules: Vec<(String, String)>,
    stem_exceptions: Vec<(String, String)>,
    details: Option<SchemeDetails>,
    infer_dead_consonants: bool,
    ignore_duplicates: bool,
    exact_index: FxHashSet<(String, AcceptCondition)>,
    value_index: FxHashSet<(String, String, AcceptCondition)>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Validate and insert a token, deriving dead consonants when
    /// inference is on.
    pub fn create_token(&mut self, token: &Token) -> Result<(), StoreError> {
        let mut token = trimmed(token);

        if token.pattern.is_empty() || token.value1.is_empty() {
            return Err(StoreError::new("pattern or value1 is empty"));
        }
        if exceeds_symbol_max(&token) {
            return Err(StoreError::new(format!(
                "length of pattern, values or tag should be less than {SYMBOL_MAX} characters"
            )));
        }

        if token.category == TokenCategory::Consonant && self.infer_dead_consonants {
            let Some(virama) = self.virama() else {
                return Err(StoreError::new(
                    "virama needs to be set before auto generating dead consonants",
                ));
            };

            if token.value1.ends_with(&virama) {
                token.category = TokenCategory::DeadConsonant;
            } else if has_inherent_a_ending(&token.pattern) {
                self.persist(derive_dead_consonant(&token, &virama))?;
            }
        }

        if token.category == TokenCategory::NonJoiner {
            token.value1 = ZWNJ.to_string();
            token.value2 = ZWNJ.to_string();
        }
        if token.category == TokenCategory::Joiner {
            token.value1 = ZWJ.to_string();
            token.value2 = ZWJ.to_string();
        }

        self.persist(token)
    }

    /// Duplicate-check and store one token.
    fn persist(&mut self, token: Token) -> Result<(), StoreError> {
        let duplicate = match token.match_type {
            MatchType::Exact => self
                .exact_index
                .contains(&(token.pattern.clone(), token.accept_condition)),
            MatchType::Possibility => self.value_index.contains(&(
                token.pattern.clone(),
                token.value1.clone(),
                token.accept_condition,
            )),
        };

        if duplicate {
            if self.ignore_duplicates {
                debug!(
                    pattern = %token.pattern,
                    value1 = %token.value1,
                    "ignoring duplicate token"
                );
                return Ok(());
            }
            return Err(StoreError::new(format!(
                "there is already a match available for '{} => {}'. Duplicate entries are not allowed",
                token.pattern, token.value1
            )));
        }

        self.value_index.insert((
            token.pattern.clone(),
            token.value1.clone(),
            token.accept_condition,
        ));
        if token.match_type == MatchType::Exact {
            self.exact_index
                .insert((token.pattern.clone(), token.accept_condition));
        }
        self.tokens.push(token);
        Ok(())
    }

    /// All stored tokens of a category, in insertion order.
    pub fn tokens_of(&self, category: TokenCategory) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect()
    }

    /// Every stored token in insertion order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Validate and record the scheme metadata.
    pub fn set_metadata(&mut self, details: &SchemeDetails) -> Result<(), StoreError> {
        let lang_code = details.lang_code.as_deref().unwrap_or("");
        if lang_code.chars().count() != 2 {
            return Err(StoreError::new(
                "language code should be one of ISO 639-1 two letter codes",
            ));
        }
        self.details = Some(details.clone());
        Ok(())
    }

    /// The recorded metadata, if any was set.
    pub fn details(&self) -> Option<&SchemeDetails> {
        self.details.as_ref()
    }

    /// Record a stemming rule.
    pub fn add_stem_rule(&mut self, old_ending: &str, new_ending: &str) -> Result<(), StoreError> {
        if old_ending.is_empty() || new_ending.is_empty() {
            return Err(StoreError::new("old ending or new ending is empty"));
        }
        self.stem_rules
            .push((old_ending.to_string(), new_ending.to_string()));
        Ok(())
    }

    /// Record a stemming exception.
    pub fn add_stem_exception(&mut self, word: &str, stem: &str) -> Result<(), StoreError> {
        if word.is_empty() || stem.is_empty() {
            return Err(StoreError::new("word or stem is empty"));
        }
        self.stem_exceptions
            .push((word.to_string(), stem.to_string()));
        Ok(())
    }

    /// Recorded stemming rules in insertion order.
    pub fn stem_rules(&self) -> &[(String, String)] {
        &self.stem_rules
    }

    /// Recorded stemming exceptions in insertion order.
    pub fn stem_exceptions(&self) -> &[(String, String)] {
        &self.stem_exceptions
    }

    pub fn set_infer_dead_consonants(&mut self, infer: bool) {
        self.infer_dead_consonants = infer;
    }

    pub fn set_ignore_duplicates(&mut self, ignore: bool) {
        self.ignore_duplicates = ignore;
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The rendered form of the registered virama, if one was stored.
    fn virama(&self) -> Option<String> {
        self.tokens
            .iter()
            .find(|t| t.category == TokenCategory::Virama)
            .map(|t| t.value1.clone())
    }
}

/// Copy a token with its text fields whitespace-trimmed, the way the
/// table file stores them.
fn trimmed(token: &Token) -> Token {
    Token {
        category: token.category,
        pattern: token.pattern.trim().to_string(),
        value1: token.value1.trim().to_string(),
        value2: token.value2.trim().to_string(),
        value3: token.value3.trim().to_string(),
        tag: token.tag.as_ref().map(|t| t.trim().to_string()),
        match_type: token.match_type,
        priority: token.priority,
        accept_condition: token.accept_condition,
    }
}

fn exceeds_symbol_max(token: &Token) -> bool {
    let too_long = |s: &str| s.chars().count() > SYMBOL_MAX;
    too_long(&token.pattern)
        || too_long(&token.value1)
        || too_long(&token.value2)
        || too_long(&token.value3)
        || token.tag.as_deref().is_some_and(too_long)
}

/// The dead consonant implied by a consonant with an inherent `a` ending:
/// the pattern loses its trailing `a` and the values gain the virama.
fn derive_dead_consonant(token: &Token, virama: &str) -> Token {
    let mut pattern = token.pattern.clone();
    pattern.pop();

    let value2 = if token.value2.is_empty() {
        String::new()
    } else {
        format!("{}{virama}", token.value2)
    };

    Token {
        category: TokenCategory::DeadConsonant,
        pattern,
        value1: format!("{}{virama}", token.value1),
        value2,
        value3: token.value3.clone(),
        tag: token.tag.clone(),
        match_type: token.match_type,
        priority: token.priority,
        accept_condition: token.accept_condition,
    }
}

/// A [`TokenStore`] that never touches the filesystem.
///
/// Used by the evaluator's tests and by dry-run compiles.
#[derive(Default, Debug)]
pub struct MemoryStore {
    table: SymbolTable,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// The symbol table behind the store.
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }
}

impl TokenStore for MemoryStore {
    fn create_token(&mut self, token: &Token) -> Result<(), StoreError> {
        self.table.create_token(token)
    }

    fn get_all_tokens(&self, category: TokenCategory) -> Vec<Token> {
        self.table.tokens_of(category)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn set_scheme_metadata(&mut self, details: &SchemeDetails) -> Result<(), StoreError> {
        self.table.set_metadata(details)
    }

    fn create_stem_rule(&mut self, old_ending: &str, new_ending: &str) -> Result<(), StoreError> {
        self.table.add_stem_rule(old_ending, new_ending)
    }

    fn create_stem_exception(&mut self, word: &str, stem: &str) -> Result<(), StoreError> {
        self.table.add_stem_exception(word, stem)
    }

    fn set_infer_dead_consonants(&mut self, infer: bool) {
        self.table.set_infer_dead_consonants(infer);
    }

    fn set_ignore_duplicates(&mut self, ignore: bool) {
        self.table.set_ignore_duplicates(ignore);
    }
}
