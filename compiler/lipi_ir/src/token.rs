//! Compiled token records and their metadata enums.

use std::fmt;

/// Category of a compiled token.
///
/// The numeric codes are the classic symbol-table layout and are what the
/// table file records on disk.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenCategory {
    Vowel,
    Consonant,
    DeadConsonant,
    ConsonantVowel,
    Number,
    Symbol,
    Anusvara,
    Visarga,
    Virama,
    Other,
    NonJoiner,
    Joiner,
    Period,
}

impl TokenCategory {
    /// All categories, in code order.
    pub const ALL: &'static [TokenCategory] = &[
        TokenCategory::Vowel,
        TokenCategory::Consonant,
        TokenCategory::DeadConsonant,
        TokenCategory::ConsonantVowel,
        TokenCategory::Number,
        TokenCategory::Symbol,
        TokenCategory::Anusvara,
        TokenCategory::Visarga,
        TokenCategory::Virama,
        TokenCategory::Other,
        TokenCategory::NonJoiner,
        TokenCategory::Joiner,
        TokenCategory::Period,
    ];

    /// Stable numeric code used in the table file.
    pub fn code(self) -> u8 {
        match self {
            TokenCategory::Vowel => 1,
            TokenCategory::Consonant => 2,
            TokenCategory::DeadConsonant => 3,
            TokenCategory::ConsonantVowel => 4,
            TokenCategory::Number => 5,
            TokenCategory::Symbol => 6,
            TokenCategory::Anusvara => 7,
            TokenCategory::Visarga => 8,
            TokenCategory::Virama => 9,
            TokenCategory::Other => 10,
            TokenCategory::NonJoiner => 11,
            TokenCategory::Joiner => 12,
            TokenCategory::Period => 13,
        }
    }

    /// Decode a numeric category code from the table file.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Lower snake-case name, matching the declaration keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenCategory::Vowel => "vowel",
            TokenCategory::Consonant => "consonant",
            TokenCategory::DeadConsonant => "dead_consonant",
            TokenCategory::ConsonantVowel => "consonant_vowel",
            TokenCategory::Number => "number",
            TokenCategory::Symbol => "symbol",
            TokenCategory::Anusvara => "anusvara",
            TokenCategory::Visarga => "visarga",
            TokenCategory::Virama => "virama",
            TokenCategory::Other => "other",
            TokenCategory::NonJoiner => "non_joiner",
            TokenCategory::Joiner => "joiner",
            TokenCategory::Period => "period",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a token's pattern matches input.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MatchType {
    /// Pattern matches verbatim.
    Exact,
    /// Pattern is one option among a group sharing a composed value.
    Possibility,
}

impl MatchType {
    /// Stable numeric code used in the table file.
    pub fn code(self) -> u8 {
        match self {
            MatchType::Exact => 1,
            MatchType::Possibility => 2,
        }
    }

    /// Decode a numeric match-type code from the table file.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(MatchType::Exact),
            2 => Some(MatchType::Possibility),
            _ => None,
        }
    }
}

/// Tie-break ranking used when multiple tokens could match.
///
/// Ordered numerically: `LOW < NORMAL < HIGH`. Explicit integers outside the
/// named points are allowed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Priority(i32);

impl Priority {
    pub const HIGH: Priority = Priority(1);
    pub const NORMAL: Priority = Priority(0);
    pub const LOW: Priority = Priority(-1);

    /// Create an explicit priority value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Priority(value)
    }

    /// The raw numeric value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::NORMAL
    }
}

/// Where in an input word a token may apply.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum AcceptCondition {
    /// Anywhere in the input.
    #[default]
    All,
    /// Only at the start of a word.
    StartsWith,
    /// Only in the middle of a word.
    InBetween,
    /// Only at the end of a word.
    EndsWith,
}

impl AcceptCondition {
    /// Stable numeric code used in the table file.
    pub fn code(self) -> u8 {
        match self {
            AcceptCondition::All => 0,
            AcceptCondition::StartsWith => 1,
            AcceptCondition::InBetween => 2,
            AcceptCondition::EndsWith => 3,
        }
    }

    /// Decode a numeric accept-condition code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AcceptCondition::All),
            1 => Some(AcceptCondition::StartsWith),
            2 => Some(AcceptCondition::InBetween),
            3 => Some(AcceptCondition::EndsWith),
            _ => None,
        }
    }
}

/// One compiled mapping rule: pattern to up to three values, tagged with
/// category, match type, priority, and accept condition.
///
/// Invariant: `pattern` is never empty and every metadata field is concrete
/// by the time the token reaches a store.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub category: TokenCategory,
    pub pattern: String,
    pub value1: String,
    pub value2: String,
    pub value3: String,
    pub tag: Option<String>,
    pub match_type: MatchType,
    pub priority: Priority,
    pub accept_condition: AcceptCondition,
}

/// Index of a token inside the registry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TokenId(u32);

impl TokenId {
    /// Create an id from a registry index.
    ///
    /// # Panics
    /// Panics if the index exceeds `u32::MAX`; registries never get close.
    #[inline]
    pub fn new(index: usize) -> Self {
        TokenId(u32::try_from(index).unwrap_or_else(|_| panic!("token index {index} overflows")))
    }

    /// The registry index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a pattern carries an elidable inherent `a` sound.
///
/// True for patterns of at least two characters ending in a single `a`;
/// a double-`a` ending keeps its trailing vowel.
pub fn has_inherent_a_ending(pattern: &str) -> bool {
    let mut chars = pattern.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('a'), Some(second_last)) => second_last != 'a',
        _ => false,
    }
}
