//! Scheme evaluator for the Lipi scheme compiler.
//!
//! Takes the statement AST from `lipi_parse` and drives it against a
//! [`TokenStore`]: mappings are validated and expanded into tokens,
//! consonant and vowel cross products are generated, combine templates
//! are resolved against queries and custom lists, and scheme metadata is
//! collected for the final write.
//!
//! The evaluator keeps its own view of every accepted token in a
//! [`TokenRegistry`] so queries and list lookups never read the store
//! back; the store is only consulted for categories it derives itself.

mod combine;
mod cv;
mod expand;
mod lists;
mod registry;
mod sanity;
mod scope_guard;
mod session;
mod store;

pub use lists::ListRegistry;
pub use registry::TokenRegistry;
pub use session::Evaluator;
pub use store::{MemoryStore, StoreError, SymbolTable, TokenStore, SYMBOL_MAX};
