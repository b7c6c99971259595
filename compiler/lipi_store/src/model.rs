//! On-disk model of a compiled table file.
//!
//! The file is the magic bytes followed by one bincode-encoded
//! [`TableFile`]. Enums are flattened to their stable numeric codes so the
//! format does not depend on Rust enum layout.

use serde::{Deserialize, Serialize};

use lipi_eval::StoreError;
use lipi_ir::{AcceptCondition, MatchType, Priority, Token, TokenCategory};

/// Magic bytes opening every table file.
pub const TABLE_MAGIC: &[u8; 8] = b"LIPITBL\0";

/// Current table format version. Bump on any incompatible record change.
pub const TABLE_VERSION: u16 = 1;

/// Metadata row keys, shared with table readers.
pub const META_LANG_CODE: &str = "lang-code";
pub const META_IDENTIFIER: &str = "scheme-id";
pub const META_DISPLAY_NAME: &str = "scheme-display-name";
pub const META_AUTHOR: &str = "scheme-author";
pub const META_COMPILED_DATE: &str = "scheme-compiled-date";
pub const META_STABLE: &str = "scheme-stable";

/// One symbol row with its enums flattened to table codes.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub category: u8,
    pub pattern: String,
    pub value1: String,
    pub value2: String,
    pub value3: String,
    pub tag: String,
    pub match_type: u8,
    pub priority: i32,
    pub accept_condition: u8,
}

impl SymbolRecord {
    /// Flatten a token into its file representation.
    pub fn from_token(token: &Token) -> Self {
        SymbolRecord {
            category: token.category.code(),
            pattern: token.pattern.clone(),
            value1: token.value1.clone(),
            value2: token.value2.clone(),
            value3: token.value3.clone(),
            tag: token.tag.clone().unwrap_or_default(),
            match_type: token.match_type.code(),
            priority: token.priority.value(),
            accept_condition: token.accept_condition.code(),
        }
    }

    /// Rebuild the token behind a record.
    ///
    /// Rejects codes no known category, match type, or accept condition
    /// carries.
    pub fn to_token(&self) -> Result<Token, StoreError> {
        let category = TokenCategory::from_code(self.category)
            .ok_or_else(|| StoreError::new(format!("unknown category code {}", self.category)))?;
        let match_type = MatchType::from_code(self.match_type).ok_or_else(|| {
            StoreError::new(format!("unknown match type code {}", self.match_type))
        })?;
        let accept_condition = AcceptCondition::from_code(self.accept_condition).ok_or_else(|| {
            StoreError::new(format!(
                "unknown accept condition code {}",
                self.accept_condition
            ))
        })?;
        Ok(Token {
            category,
            pattern: self.pattern.clone(),
            value1: self.value1.clone(),
            value2: self.value2.clone(),
            value3: self.value3.clone(),
            tag: (!self.tag.is_empty()).then(|| self.tag.clone()),
            match_type,
            priority: Priority::new(self.priority),
            accept_condition,
        })
    }
}

/// Everything a table file carries.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct TableFile {
    pub version: u16,
    pub symbols: Vec<SymbolRecord>,
    pub stem_rules: Vec<(String, String)>,
    pub stem_exceptions: Vec<(String, String)>,
    pub metadata: Vec<(String, String)>,
}

impl TableFile {
    /// Encode into file bytes, magic included.
    pub fn encode(&self) -> Result<Vec<u8>, StoreError> {
        let payload = bincode::serialize(self)
            .map_err(|e| StoreError::new(format!("failed to serialize table: {e}")))?;
        let mut bytes = TABLE_MAGIC.to_vec();
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Decode file bytes produced by [`TableFile::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        let Some(payload) = bytes.strip_prefix(TABLE_MAGIC.as_slice()) else {
            return Err(StoreError::new("not a compiled scheme table"));
        };
        let file: TableFile = bincode::deserialize(payload)
            .map_err(|e| StoreError::new(format!("failed to deserialize table: {e}")))?;
        if file.version != TABLE_VERSION {
            return Err(StoreError::new(format!(
                "unsupported table version {}",
                file.version
            )));
        }
        Ok(file)
    }

    /// Look up a metadata row by key.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
