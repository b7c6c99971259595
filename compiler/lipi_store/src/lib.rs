//! File-backed storage for compiled schemes.
//!
//! A compiled scheme is a single table file: a magic prefix, a format
//! version and a bincode payload holding the symbols, stem rules and
//! metadata. [`TableStore`] implements the evaluator's store trait on
//! top of that file, sharing all validation with the in-memory table.

mod model;
mod table;

pub use model::{
    SymbolRecord, TableFile, META_AUTHOR, META_COMPILED_DATE, META_DISPLAY_NAME, META_IDENTIFIER,
    META_LANG_CODE, META_STABLE, TABLE_MAGIC, TABLE_VERSION,
};
pub use table::TableStore;
