//! The file-backed token store.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use lipi_eval::{StoreError, SymbolTable, TokenStore};
use lipi_ir::{SchemeDetails, Token, TokenCategory};

use crate::model::{
    SymbolRecord, TableFile, META_AUTHOR, META_COMPILED_DATE, META_DISPLAY_NAME, META_IDENTIFIER,
    META_LANG_CODE, META_STABLE, TABLE_VERSION,
};

/// A [`TokenStore`] that writes the compiled scheme to a table file.
///
/// All store semantics live in the shared [`SymbolTable`]; this type adds
/// the on-disk encoding. The file is rewritten on flush and again when
/// metadata lands, so it is complete after either call.
#[derive(Debug)]
pub struct TableStore {
    path: PathBuf,
    table: SymbolTable,
    compiled_date: Option<String>,
}

impl TableStore {
    /// Open a store writing to the given path.
    ///
    /// The file is created right away, so an unwritable target fails the
    /// compile before any evaluation happens.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = TableStore {
            path: path.into(),
            table: SymbolTable::new(),
            compiled_date: None,
        };
        store.write_file()?;
        Ok(store)
    }

    /// Read a table file back into its file model.
    pub fn read(path: &Path) -> Result<TableFile, StoreError> {
        let bytes = std::fs::read(path)
            .map_err(|e| StoreError::new(format!("could not read {}: {e}", path.display())))?;
        TableFile::decode(&bytes)
    }

    /// The path this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The table backing this store.
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    fn write_file(&self) -> Result<(), StoreError> {
        let file = TableFile {
            version: TABLE_VERSION,
            symbols: self
                .table
                .tokens()
                .iter()
                .map(SymbolRecord::from_token)
                .collect(),
            stem_rules: self.table.stem_rules().to_vec(),
            stem_exceptions: self.table.stem_exceptions().to_vec(),
            metadata: self.metadata_rows(),
        };
        let bytes = file.encode()?;
        std::fs::write(&self.path, bytes)
            .map_err(|e| StoreError::new(format!("could not write {}: {e}", self.path.display())))?;
        debug!(
            path = %self.path.display(),
            symbols = file.symbols.len(),
            "table file written"
        );
        Ok(())
    }

    fn metadata_rows(&self) -> Vec<(String, String)> {
        let Some(details) = self.table.details() else {
            return Vec::new();
        };
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        let stable = if details.is_stable.unwrap_or(false) {
            "1"
        } else {
            "0"
        };
        vec![
            (META_LANG_CODE.to_owned(), field(&details.lang_code)),
            (META_IDENTIFIER.to_owned(), field(&details.identifier)),
            (META_DISPLAY_NAME.to_owned(), field(&details.display_name)),
            (META_AUTHOR.to_owned(), field(&details.author)),
            (
                META_COMPILED_DATE.to_owned(),
                self.compiled_date.clone().unwrap_or_default(),
            ),
            (META_STABLE.to_owned(), stable.to_owned()),
        ]
    }
}

impl TokenStore for TableStore {
    fn create_token(&mut self, token: &Token) -> Result<(), StoreError> {
        self.table.create_token(token)
    }

    fn get_all_tokens(&self, category: TokenCategory) -> Vec<Token> {
        self.table.tokens_of(category)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.write_file()
    }

    fn set_scheme_metadata(&mut self, details: &SchemeDetails) -> Result<(), StoreError> {
        self.table.set_metadata(details)?;
        self.compiled_date = Some(Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string());
        self.write_file()
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

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use super::*;
    use lipi_ir::{AcceptCondition, MatchType, Priority};
    use pretty_assertions::assert_eq;

    fn temp_table(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    fn token(pattern: &str, value1: &str) -> Token {
        Token {
            category: TokenCategory::Vowel,
            pattern: pattern.to_owned(),
            value1: value1.to_owned(),
            value2: String::new(),
            value3: String::new(),
            tag: None,
            match_type: MatchType::Exact,
            priority: Priority::NORMAL,
            accept_condition: AcceptCondition::All,
        }
    }

    #[test]
    fn test_create_writes_an_empty_table() {
        let path = temp_table("lipi_store_create.lst");
        let _store = TableStore::create(&path).unwrap();

        let file = TableStore::read(&path).unwrap();
        assert_eq!(file.version, TABLE_VERSION);
        assert!(file.symbols.is_empty());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_create_fails_for_unwritable_target() {
        let path = temp_table("lipi_store_missing_dir").join("table.lst");
        let err = TableStore::create(&path).unwrap_err();
        assert!(err.message().starts_with("could not write"));
    }

    #[test]
    fn test_flush_persists_symbols_and_stem_rules() {
        let path = temp_table("lipi_store_flush.lst");
        let mut store = TableStore::create(&path).unwrap();
        store.create_token(&token("a", "അ")).unwrap();
        store.create_token(&token("i", "ഇ")).unwrap();
        store.create_stem_rule("ക്ക", "ക").unwrap();
        store.create_stem_exception("വാക്ക", "വാ").unwrap();
        store.flush().unwrap();

        let file = TableStore::read(&path).unwrap();
        assert_eq!(file.symbols.len(), 2);
        assert_eq!(file.symbols[0].pattern, "a");
        assert_eq!(file.symbols[0].value1, "അ");
        assert_eq!(file.stem_rules, vec![("ക്ക".to_owned(), "ക".to_owned())]);
        assert_eq!(file.stem_exceptions.len(), 1);
        assert!(file.metadata.is_empty());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_metadata_lands_with_a_compiled_date() {
        let path = temp_table("lipi_store_meta.lst");
        let mut store = TableStore::create(&path).unwrap();
        store.create_token(&token("a", "അ")).unwrap();
        store.flush().unwrap();

        let mut details = SchemeDetails::new();
        details.lang_code = Some("ml".to_owned());
        details.identifier = Some("ml-test".to_owned());
        details.display_name = Some("Test".to_owned());
        details.author = Some("someone".to_owned());
        details.is_stable = Some(true);
        store.set_scheme_metadata(&details).unwrap();

        let file = TableStore::read(&path).unwrap();
        assert_eq!(file.metadata_value(META_LANG_CODE), Some("ml"));
        assert_eq!(file.metadata_value(META_IDENTIFIER), Some("ml-test"));
        assert_eq!(file.metadata_value(META_DISPLAY_NAME), Some("Test"));
        assert_eq!(file.metadata_value(META_AUTHOR), Some("someone"));
        assert_eq!(file.metadata_value(META_STABLE), Some("1"));
        assert!(!file.metadata_value(META_COMPILED_DATE).unwrap().is_empty());

        // The symbols written by the earlier flush survive the rewrite.
        assert_eq!(file.symbols.len(), 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_metadata_validation_still_applies() {
        let path = temp_table("lipi_store_badmeta.lst");
        let mut store = TableStore::create(&path).unwrap();

        let mut details = SchemeDetails::new();
        details.lang_code = Some("mal".to_owned());
        let err = store.set_scheme_metadata(&details).unwrap_err();
        assert!(err.message().contains("ISO 639-1"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unstable_scheme_records_zero() {
        let path = temp_table("lipi_store_unstable.lst");
        let mut store = TableStore::create(&path).unwrap();

        let mut details = SchemeDetails::new();
        details.lang_code = Some("ml".to_owned());
        store.set_scheme_metadata(&details).unwrap();

        let file = TableStore::read(&path).unwrap();
        assert_eq!(file.metadata_value(META_STABLE), Some("0"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_store_semantics_are_shared() {
        let path = temp_table("lipi_store_dup.lst");
        let mut store = TableStore::create(&path).unwrap();
        store.create_token(&token("a", "അ")).unwrap();
        let err = store.create_token(&token("a", "ആ")).unwrap_err();
        assert!(err.message().contains("Duplicate entries are not allowed"));
        std::fs::remove_file(&path).unwrap();
    }
}
